pub mod brush;
pub mod consts;
pub mod entities;
pub mod face;
pub mod header;
pub mod leaf;
pub mod lightmap;
pub mod loader;
pub mod lump;
pub mod model;
pub mod node;
pub mod plane;
pub mod textures;
pub mod vert;
pub mod visdata;

pub use lump::Lump;

// Quake III Arena map format, "IBSP" version 46.
//
// The file starts with the four byte magic and a version number, followed by a
// directory of 17 (offset, length) pairs, one per lump. Most lumps are flat
// arrays of fixed size little-endian records; the entity lump is plain text
// and the visibility lump is a small header followed by a cluster bit matrix.
//
// Faces reference vertices and mesh verts by (first, count) ranges. Leaves
// reference faces indirectly through the leaf face lump, and nodes reference
// their children by index with negative values naming leaves.
