pub mod prelude;
pub mod vertex;
