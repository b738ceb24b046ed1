use std::ops::Range;

use glam::{IVec2, Vec3};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::{
    binaries::{BinaryCursor, BinaryData},
    error::{ParseError, ParseResult},
};

use super::{
    consts::{LumpType, MAX_MAP_DRAW_SURFS},
    Lump,
};

/// How a face's geometry is stored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum FaceType {
    /// Convex polygon, triangulated through mesh verts.
    Polygon = 1,
    /// Grid of quadratic Bézier control points.
    Patch = 2,
    /// Triangle soup, triangulated through mesh verts.
    Mesh = 3,
    /// Camera facing sprite. Only its first vertex is meaningful.
    Billboard = 4,
}

///Face
///
///A face is the renderable surface of the map. Every face references one
///texture and optionally one fog effect. Polygon and mesh faces own a run of
///vertices plus a run of mesh verts, each mesh vert being an offset from the
///face's first vertex; every three mesh verts form a triangle.
///
///Patch faces instead own a `patch_size.x` by `patch_size.y` grid of control
///points in their vertex run. The grid is made of 3x3 quadratic patches that
///share their edge rows and columns, so both dimensions are odd.
///
///Lightmap fields describe where the face sits on its 128x128 lightmap page.
///`lightmap` is `-1` for faces without one.
#[derive(Clone, Debug, PartialEq)]
pub struct BSPFace {
    pub texture: i32,
    pub effect: Option<i32>, // fog volume, none on disk is -1
    pub face_type: FaceType,
    pub vertices: Range<i32>,
    pub mesh_verts: Range<i32>,
    pub lightmap: i32,
    pub lightmap_start: IVec2, // corner of this face's block in the lightmap
    pub lightmap_size: IVec2,
    pub lightmap_origin: Vec3, // world space origin of the lightmap
    pub lightmap_s: Vec3,      // world space s and t unit vectors
    pub lightmap_t: Vec3,
    pub normal: Vec3,
    pub patch_size: IVec2,
}

impl BSPFace {
    pub fn lightmap_index(&self) -> Option<usize> {
        usize::try_from(self.lightmap).ok()
    }

    pub fn vertex_count(&self) -> usize {
        (self.vertices.end as i64 - self.vertices.start as i64).max(0) as usize
    }

    /// Number of 3x3 patches in a patch face's control grid.
    pub fn patch_count(&self) -> usize {
        if self.face_type != FaceType::Patch {
            return 0;
        }
        let w = (self.patch_size.x - 1).max(0) / 2;
        let h = (self.patch_size.y - 1).max(0) / 2;
        w as usize * h as usize
    }
}

impl BinaryData for BSPFace {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        let texture = cursor.read_i32()?;
        let effect = Some(cursor.read_i32()?).filter(|&e| e >= 0);

        let raw_type = cursor.read_i32()?;
        let face_type = FaceType::from_i32(raw_type).ok_or_else(|| {
            ParseError::malformed(LumpType::Faces, format!("unknown face type {raw_type}"))
        })?;

        Ok(Self {
            texture,
            effect,
            face_type,
            vertices: cursor.read_index_range()?,
            mesh_verts: cursor.read_index_range()?,
            lightmap: cursor.read_i32()?,
            lightmap_start: cursor.read_ivec2()?,
            lightmap_size: cursor.read_ivec2()?,
            lightmap_origin: cursor.read_vec3()?,
            lightmap_s: cursor.read_vec3()?,
            lightmap_t: cursor.read_vec3()?,
            normal: cursor.read_vec3()?,
            patch_size: cursor.read_ivec2()?,
        })
    }
}

impl Lump for BSPFace {
    fn max() -> usize {
        MAX_MAP_DRAW_SURFS
    }

    fn lump_type() -> LumpType {
        LumpType::Faces
    }

    fn record_size() -> usize {
        104
    }
}
