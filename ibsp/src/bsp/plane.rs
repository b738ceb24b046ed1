use glam::Vec3;

use crate::{
    binaries::{BinaryCursor, BinaryData},
    error::ParseResult,
};

use super::{
    consts::{LumpType, MAX_MAP_PLANES},
    Lump,
};

/// Splitting plane of the BSP tree.
///
/// The plane is the set of points `p` where `normal · p = dist`. Points with
/// a positive signed distance lie in front of it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BSPPlane {
    pub normal: Vec3, // normal vector
    pub dist: f32,    // distance from origin
}

impl BSPPlane {
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.dist
    }
}

impl BinaryData for BSPPlane {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        Ok(Self {
            normal: cursor.read_vec3()?,
            dist: cursor.read_f32()?,
        })
    }
}

impl Lump for BSPPlane {
    fn max() -> usize {
        MAX_MAP_PLANES
    }

    fn lump_type() -> LumpType {
        LumpType::Planes
    }

    fn record_size() -> usize {
        16
    }
}
