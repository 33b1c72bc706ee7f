pub mod actions;
pub mod draw;

pub use actions::{CreateDrawAction, DeleteDrawAction, DrawError, SetActiveDrawAction};
