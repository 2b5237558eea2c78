pub mod collectible;
pub mod entity;
pub mod geometry;
pub mod grid;
pub mod hazard;
pub mod physics;
pub mod rect;
pub mod stage;
pub mod tile;
