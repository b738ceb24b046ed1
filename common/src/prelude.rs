pub use crate::vertex::{lerp3, Vertex};
