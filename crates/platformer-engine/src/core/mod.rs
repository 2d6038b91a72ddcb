pub mod collision;
pub mod physics;
pub mod time;
pub mod vector;
pub mod world;
