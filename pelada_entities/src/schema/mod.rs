pub mod pelada;
pub mod player;
pub mod draw;
pub mod team;
pub mod team_player;
