use common::vertex::Vertex;
use glam::Vec4;

use crate::{
    binaries::{BinaryCursor, BinaryData},
    error::ParseResult,
};

use super::{
    consts::{LumpType, MAX_MAP_DRAW_INDEXES, MAX_MAP_DRAW_VERTS},
    Lump,
};

impl BinaryData for Vertex {
    /// Wire order is position, surface uv, lightmap uv, normal, then an RGBA
    /// byte color.
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        let position = cursor.read_vec3()?.extend(1.0);
        let surface_uv = cursor.read_vec2()?;
        let lightmap_uv = cursor.read_vec2()?;
        let normal = cursor.read_vec3()?.extend(0.0);

        let mut color = [0.0; 4];
        for c in color.iter_mut() {
            *c = cursor.read_u8()? as f32 / 255.0;
        }

        Ok(Vertex {
            position,
            normal,
            color: Vec4::from_array(color),
            surface_uv,
            lightmap_uv,
        })
    }
}

impl Lump for Vertex {
    fn max() -> usize {
        MAX_MAP_DRAW_VERTS
    }

    fn lump_type() -> LumpType {
        LumpType::Vertices
    }

    fn record_size() -> usize {
        44
    }
}

/// Triangle corner, relative to the owning face's first vertex.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BSPMeshVert {
    pub offset: u32,
}

impl BinaryData for BSPMeshVert {
    fn read(cursor: &mut BinaryCursor) -> ParseResult<Self> {
        Ok(Self {
            offset: cursor.read_u32()?,
        })
    }
}

impl Lump for BSPMeshVert {
    fn max() -> usize {
        MAX_MAP_DRAW_INDEXES
    }

    fn lump_type() -> LumpType {
        LumpType::MeshVerts
    }

    fn record_size() -> usize {
        4
    }
}
