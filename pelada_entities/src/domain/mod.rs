pub mod pelada;
pub mod player;
pub mod draw;
pub mod entity;

pub use entity::PeladaEntity;
