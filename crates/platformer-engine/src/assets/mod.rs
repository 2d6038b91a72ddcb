pub mod level;
pub mod registry;
