use glam::IVec3;

use crate::{
    binaries::{BinaryCursor, BinaryData},
    error::ParseResult,
};

use super::{
    consts::{LumpType, MAX_MAP_NODES},
    Lump,
};

/// One side of a node split.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeChild {
    Node(u32),
    Leaf(u32),
}

impl From<i32> for NodeChild {
    /// On disk a negative child `c` refers to leaf `-(c + 1)`.
    fn from(value: i32) -> Self {
        if value >= 0 {
            NodeChild::Node(value as u32)
        } else {
            // -(c + 1) == !c for two's complement, and never overflows
            NodeChild::Leaf(!value as u32)
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BSPNode {
    pub plane: i32,
    pub children: [NodeChild; 2], // front, back
    pub mins: IVec3,              // integer bounding box
    pub maxs: IVec3,
}

impl BSPNode {
    pub fn front(&self) -> NodeChild {
        self.children[0]
    }

    pub fn back(&self) -> NodeChild {
        self.children[1]
    }
}

impl BinaryData for BSPNode {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        let plane = cursor.read_i32()?;
        let front = cursor.read_i32()?.into();
        let back = cursor.read_i32()?.into();
        Ok(Self {
            plane,
            children: [front, back],
            mins: cursor.read_ivec3()?,
            maxs: cursor.read_ivec3()?,
        })
    }
}

impl Lump for BSPNode {
    fn max() -> usize {
        MAX_MAP_NODES
    }

    fn lump_type() -> LumpType {
        LumpType::Nodes
    }

    fn record_size() -> usize {
        36
    }
}
