pub use crate::bezier::{
    tessellate, tessellate_patch, DEFAULT_TESSELLATION_LEVEL, MAX_TESSELLATION_LEVEL,
};
pub use crate::bsp::{
    brush::{BSPBrush, BSPBrushSide},
    consts::{Contents, LumpType, SurfaceFlags},
    entities::{parse_entities, parse_vec3, Entity},
    face::{BSPFace, FaceType},
    header::BSPHeader,
    leaf::{BSPLeaf, BSPLeafBrush, BSPLeafFace},
    lightmap::{BSPLightVol, BSPLightmap},
    loader::{parse, parse_with},
    model::BSPModel,
    node::{BSPNode, NodeChild},
    plane::BSPPlane,
    textures::{BSPEffect, BSPTexture},
    vert::BSPMeshVert,
    visdata::VisData,
};
pub use crate::error::{ConfigError, EntityError, LocateError, ParseError, PatchError};
pub use crate::map::{MapBuilder, MapModel};
pub use crate::meshes::{build_meshes, drawable, MeshBatch};
pub use crate::options::LoadOptions;
pub use crate::vis::{find_leaf, is_cluster_visible, visible_faces};
pub use common::vertex::Vertex;
