use std::ops::Range;

use glam::IVec3;

use crate::{
    binaries::{BinaryCursor, BinaryData},
    error::ParseResult,
};

use super::{
    consts::{LumpType, MAX_MAP_LEAFBRUSHES, MAX_MAP_LEAFFACES, MAX_MAP_LEAFS},
    Lump,
};

/// Terminal cell of the BSP tree.
///
/// Leaves are grouped into clusters for visibility. A negative cluster marks
/// a leaf outside the PVS (usually in the void or inside a solid); such
/// leaves are treated as always visible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BSPLeaf {
    pub cluster: i32,
    pub area: i32,               // areaportal area
    pub mins: IVec3,             // integer bounding box
    pub maxs: IVec3,
    pub leaf_faces: Range<i32>,  // into the leaf face lump
    pub leaf_brushes: Range<i32>, // into the leaf brush lump
}

impl BinaryData for BSPLeaf {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        Ok(Self {
            cluster: cursor.read_i32()?,
            area: cursor.read_i32()?,
            mins: cursor.read_ivec3()?,
            maxs: cursor.read_ivec3()?,
            leaf_faces: cursor.read_index_range()?,
            leaf_brushes: cursor.read_index_range()?,
        })
    }
}

impl Lump for BSPLeaf {
    fn max() -> usize {
        MAX_MAP_LEAFS
    }

    fn lump_type() -> LumpType {
        LumpType::Leaves
    }

    fn record_size() -> usize {
        48
    }
}

/// Face reference, one level of indirection from a leaf into the face lump.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BSPLeafFace {
    pub face: i32,
}

impl BinaryData for BSPLeafFace {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        Ok(Self {
            face: cursor.read_i32()?,
        })
    }
}

impl Lump for BSPLeafFace {
    fn max() -> usize {
        MAX_MAP_LEAFFACES
    }

    fn lump_type() -> LumpType {
        LumpType::LeafFaces
    }

    fn record_size() -> usize {
        4
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BSPLeafBrush {
    pub brush: i32,
}

impl BinaryData for BSPLeafBrush {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        Ok(Self {
            brush: cursor.read_i32()?,
        })
    }
}

impl Lump for BSPLeafBrush {
    fn max() -> usize {
        MAX_MAP_LEAFBRUSHES
    }

    fn lump_type() -> LumpType {
        LumpType::LeafBrushes
    }

    fn record_size() -> usize {
        4
    }
}
