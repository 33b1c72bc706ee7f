pub use crate::domain::draw::{average_rating, Draw, DrawMethod, Team, TeamPlayer};
pub use crate::domain::entity::PeladaEntity;
pub use crate::domain::pelada::Pelada;
pub use crate::domain::player::{Player, PlayerPosition};
