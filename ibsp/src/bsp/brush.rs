use std::ops::Range;

use crate::{
    binaries::{BinaryCursor, BinaryData},
    error::ParseResult,
};

use super::{
    consts::{LumpType, MAX_MAP_BRUSHES, MAX_MAP_BRUSHSIDES},
    Lump,
};

/// Convex volume used for collision, bounded by its brush sides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BSPBrush {
    pub sides: Range<i32>, // into the brush side lump
    pub texture: i32,
}

impl BinaryData for BSPBrush {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        Ok(Self {
            sides: cursor.read_index_range()?,
            texture: cursor.read_i32()?,
        })
    }
}

impl Lump for BSPBrush {
    fn max() -> usize {
        MAX_MAP_BRUSHES
    }

    fn lump_type() -> LumpType {
        LumpType::Brushes
    }

    fn record_size() -> usize {
        12
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BSPBrushSide {
    pub plane: i32,
    pub texture: i32,
}

impl BinaryData for BSPBrushSide {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        Ok(Self {
            plane: cursor.read_i32()?,
            texture: cursor.read_i32()?,
        })
    }
}

impl Lump for BSPBrushSide {
    fn max() -> usize {
        MAX_MAP_BRUSHSIDES
    }

    fn lump_type() -> LumpType {
        LumpType::BrushSides
    }

    fn record_size() -> usize {
        8
    }
}
