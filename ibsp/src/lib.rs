pub mod bezier;
pub mod binaries;
pub mod bsp;
pub mod error;
pub mod map;
pub mod meshes;
pub mod options;
pub mod prelude;
pub mod vis;

#[cfg(test)]
pub(crate) mod test_map;

pub use bsp::loader::{parse, parse_with};
pub use map::MapModel;
