use std::ops::Range;

use glam::Vec3;

use crate::{
    binaries::{BinaryCursor, BinaryData},
    error::ParseResult,
};

use super::{
    consts::{LumpType, MAX_MAP_MODELS},
    Lump,
};

/// A brush model. Model 0 is the static world, the rest are doors,
/// platforms and other movers.
#[derive(Clone, Debug, PartialEq)]
pub struct BSPModel {
    mins: Vec3,
    maxs: Vec3,
    pub faces: Range<i32>,
    pub brushes: Range<i32>,
}

impl BSPModel {
    pub fn maxs(&self) -> Vec3 {
        self.maxs
    }

    pub fn mins(&self) -> Vec3 {
        self.mins
    }
}

impl BinaryData for BSPModel {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        Ok(Self {
            mins: cursor.read_vec3()?,
            maxs: cursor.read_vec3()?,
            faces: cursor.read_index_range()?,
            brushes: cursor.read_index_range()?,
        })
    }
}

impl Lump for BSPModel {
    fn max() -> usize {
        MAX_MAP_MODELS
    }

    fn lump_type() -> LumpType {
        LumpType::Models
    }

    fn record_size() -> usize {
        40
    }
}
