//! Builders for small synthetic maps used across the unit tests.

use std::ops::Range;

use common::vertex::Vertex;
use glam::{ivec2, vec2, vec3, IVec3, Vec3};

use crate::bsp::{
    consts::{LumpType, HEADER_LUMPS, HEADER_SIZE, IBSP_MAGIC, IBSP_VERSION, MAX_QPATH},
    face::{BSPFace, FaceType},
    leaf::BSPLeaf,
    node::BSPNode,
    textures::BSPTexture,
};

pub fn texture(name: &str) -> BSPTexture {
    BSPTexture {
        name: name.to_owned(),
        surface_flags: 0,
        content_flags: 1,
    }
}

pub fn face(face_type: FaceType, vertices: Range<i32>, mesh_verts: Range<i32>) -> BSPFace {
    BSPFace {
        texture: 0,
        effect: None,
        face_type,
        vertices,
        mesh_verts,
        lightmap: -1,
        lightmap_start: ivec2(0, 0),
        lightmap_size: ivec2(0, 0),
        lightmap_origin: Vec3::ZERO,
        lightmap_s: Vec3::ZERO,
        lightmap_t: Vec3::ZERO,
        normal: Vec3::Z,
        patch_size: ivec2(0, 0),
    }
}

pub fn leaf(cluster: i32, leaf_faces: Range<i32>) -> BSPLeaf {
    BSPLeaf {
        cluster,
        area: 0,
        mins: IVec3::splat(-64),
        maxs: IVec3::splat(64),
        leaf_faces,
        leaf_brushes: 0..0,
    }
}

pub fn node(plane: i32, front: i32, back: i32) -> BSPNode {
    BSPNode {
        plane,
        children: [front.into(), back.into()],
        mins: IVec3::splat(-64),
        maxs: IVec3::splat(64),
    }
}

pub fn vertex(position: Vec3) -> Vertex {
    Vertex {
        position: position.extend(1.0),
        normal: Vec3::Z.extend(0.0),
        color: Vec3::ONE.extend(1.0),
        surface_uv: vec2(position.x / 64.0, position.y / 64.0),
        lightmap_uv: vec2(0.5, 0.5),
    }
}

/// A 64 unit square on the z = 0 plane.
pub fn quad_vertices() -> Vec<Vertex> {
    [(0.0, 0.0), (64.0, 0.0), (64.0, 64.0), (0.0, 64.0)]
        .into_iter()
        .map(|(x, y)| vertex(vec3(x, y, 0.0)))
        .collect()
}

/// Assembles an IBSP file one section at a time.
pub struct MapWriter {
    pub ident: [u8; 4],
    pub version: i32,
    lumps: [Vec<u8>; HEADER_LUMPS],
}

impl Default for MapWriter {
    fn default() -> Self {
        Self {
            ident: IBSP_MAGIC,
            version: IBSP_VERSION,
            lumps: Default::default(),
        }
    }
}

impl MapWriter {
    fn section(&mut self, lump: LumpType) -> &mut Vec<u8> {
        &mut self.lumps[lump as usize]
    }

    fn ints(&mut self, lump: LumpType, values: &[i32]) -> &mut Self {
        let section = self.section(lump);
        for v in values {
            section.extend_from_slice(&v.to_le_bytes());
        }
        self
    }

    fn floats(&mut self, lump: LumpType, values: &[f32]) -> &mut Self {
        let section = self.section(lump);
        for v in values {
            section.extend_from_slice(&v.to_le_bytes());
        }
        self
    }

    fn name(&mut self, lump: LumpType, name: &str) -> &mut Self {
        let mut bytes = name.as_bytes().to_vec();
        bytes.resize(MAX_QPATH, 0);
        self.section(lump).extend_from_slice(&bytes);
        self
    }

    /// Replaces a section's bytes wholesale.
    pub fn raw(&mut self, lump: LumpType, bytes: &[u8]) -> &mut Self {
        *self.section(lump) = bytes.to_vec();
        self
    }

    pub fn entities(&mut self, text: &str) -> &mut Self {
        let mut bytes = text.as_bytes().to_vec();
        bytes.push(0);
        self.raw(LumpType::Entities, &bytes)
    }

    pub fn texture(&mut self, name: &str, surface_flags: u32, content_flags: u32) -> &mut Self {
        self.name(LumpType::Textures, name)
            .ints(LumpType::Textures, &[surface_flags as i32, content_flags as i32])
    }

    pub fn plane(&mut self, normal: Vec3, dist: f32) -> &mut Self {
        self.floats(LumpType::Planes, &[normal.x, normal.y, normal.z, dist])
    }

    pub fn node(&mut self, plane: i32, front: i32, back: i32) -> &mut Self {
        self.ints(LumpType::Nodes, &[plane, front, back, -64, -64, -64, 64, 64, 64])
    }

    pub fn leaf(&mut self, cluster: i32, faces: Range<i32>) -> &mut Self {
        self.ints(
            LumpType::Leaves,
            &[
                cluster,
                0,
                -64,
                -64,
                -64,
                64,
                64,
                64,
                faces.start,
                faces.end - faces.start,
                0,
                0,
            ],
        )
    }

    pub fn leaf_face(&mut self, face: i32) -> &mut Self {
        self.ints(LumpType::LeafFaces, &[face])
    }

    pub fn leaf_brush(&mut self, brush: i32) -> &mut Self {
        self.ints(LumpType::LeafBrushes, &[brush])
    }

    pub fn model(&mut self, faces: Range<i32>, brushes: Range<i32>) -> &mut Self {
        self.floats(LumpType::Models, &[-64.0, -64.0, -64.0, 64.0, 64.0, 64.0]).ints(
            LumpType::Models,
            &[
                faces.start,
                faces.end - faces.start,
                brushes.start,
                brushes.end - brushes.start,
            ],
        )
    }

    pub fn brush(&mut self, sides: Range<i32>, texture: i32) -> &mut Self {
        self.ints(LumpType::Brushes, &[sides.start, sides.end - sides.start, texture])
    }

    pub fn brush_side(&mut self, plane: i32, texture: i32) -> &mut Self {
        self.ints(LumpType::BrushSides, &[plane, texture])
    }

    pub fn effect(&mut self, name: &str, brush: i32) -> &mut Self {
        self.name(LumpType::Effects, name)
            .ints(LumpType::Effects, &[brush, -1])
    }

    pub fn vertex(&mut self, v: Vertex) -> &mut Self {
        let color = (v.color * 255.0).round().as_uvec4();
        self.floats(
            LumpType::Vertices,
            &[
                v.position.x,
                v.position.y,
                v.position.z,
                v.surface_uv.x,
                v.surface_uv.y,
                v.lightmap_uv.x,
                v.lightmap_uv.y,
                v.normal.x,
                v.normal.y,
                v.normal.z,
            ],
        );
        self.section(LumpType::Vertices)
            .extend(color.to_array().map(|c| c as u8));
        self
    }

    pub fn mesh_verts(&mut self, offsets: &[i32]) -> &mut Self {
        self.ints(LumpType::MeshVerts, offsets)
    }

    pub fn face(
        &mut self,
        face_type: i32,
        vertices: Range<i32>,
        mesh_verts: Range<i32>,
        lightmap: i32,
        patch_size: (i32, i32),
    ) -> &mut Self {
        self.textured_face(0, -1, face_type, vertices, mesh_verts, lightmap, patch_size)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn textured_face(
        &mut self,
        texture: i32,
        effect: i32,
        face_type: i32,
        vertices: Range<i32>,
        mesh_verts: Range<i32>,
        lightmap: i32,
        patch_size: (i32, i32),
    ) -> &mut Self {
        self.ints(
            LumpType::Faces,
            &[
                texture,
                effect,
                face_type,
                vertices.start,
                vertices.end - vertices.start,
                mesh_verts.start,
                mesh_verts.end - mesh_verts.start,
                lightmap,
                0,
                0,
                0,
                0,
            ],
        )
        .floats(LumpType::Faces, &[0.0; 9])
        .floats(LumpType::Faces, &[0.0, 0.0, 1.0])
        .ints(LumpType::Faces, &[patch_size.0, patch_size.1])
    }

    pub fn lightmap(&mut self, rgb: [u8; 3]) -> &mut Self {
        for _ in 0..128 * 128 {
            self.section(LumpType::Lightmaps).extend_from_slice(&rgb);
        }
        self
    }

    pub fn visdata(&mut self, clusters: i32, bytes_per_cluster: i32, bits: &[u8]) -> &mut Self {
        self.ints(LumpType::VisData, &[clusters, bytes_per_cluster]);
        self.section(LumpType::VisData).extend_from_slice(bits);
        self
    }

    /// Header followed by every section in directory order.
    pub fn finish(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.ident);
        out.extend_from_slice(&self.version.to_le_bytes());

        let mut offset = HEADER_SIZE;
        for lump in &self.lumps {
            out.extend_from_slice(&(offset as i32).to_le_bytes());
            out.extend_from_slice(&(lump.len() as i32).to_le_bytes());
            offset += lump.len();
        }
        for lump in &self.lumps {
            out.extend_from_slice(lump);
        }
        out
    }
}

/// Control points of a 3x3 patch with a raised middle.
pub fn patch_controls() -> Vec<Vertex> {
    (0..3)
        .flat_map(|r| {
            (0..3).map(move |c| {
                let z = if r == 1 && c == 1 { 32.0 } else { 0.0 };
                vertex(vec3(c as f32 * 32.0, r as f32 * 32.0, z))
            })
        })
        .collect()
}

/// Two leaves either side of the plane `x = 0`, a square polygon, a 3x3
/// patch and a billboard, with full visibility between the two clusters.
/// One single sided brush is listed but not referenced by any leaf.
pub fn sample_map() -> MapWriter {
    let mut writer = MapWriter::default();
    writer
        .entities(
            "{\n\"classname\" \"worldspawn\"\n}\n\
             {\n\"classname\" \"info_player_deathmatch\"\n\"origin\" \"32 32 16\"\n}\n",
        )
        .texture("textures/base_floor/clangdark", 0, 1)
        .plane(Vec3::X, 0.0)
        .node(0, -1, -2)
        .leaf(0, 0..2)
        .leaf(1, 2..3)
        .leaf_face(0)
        .leaf_face(1)
        .leaf_face(2)
        .leaf_brush(0)
        .brush(0..1, 0)
        .brush_side(0, 0)
        .model(0..3, 0..1)
        .mesh_verts(&[0, 1, 2, 0, 2, 3])
        .face(1, 0..4, 0..6, 0, (0, 0))
        .face(2, 4..13, 0..0, -1, (3, 3))
        .face(4, 13..14, 0..0, -1, (0, 0))
        .lightmap([10, 20, 30])
        .visdata(2, 1, &[0b11, 0b11]);

    for v in quad_vertices().into_iter().chain(patch_controls()) {
        writer.vertex(v);
    }
    writer.vertex(vertex(vec3(-32.0, 0.0, 48.0)));

    writer
}
