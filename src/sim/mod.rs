pub mod event;
pub mod level;
pub mod scene;
pub mod session;
