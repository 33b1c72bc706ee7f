use sea_orm::prelude::Uuid;
use sea_orm::DbErr;
use thiserror::Error;

mod create_draw;
mod delete_draw;
mod set_active_draw;

pub use self::create_draw::CreateDrawAction;
pub use self::delete_draw::DeleteDrawAction;
pub use self::set_active_draw::SetActiveDrawAction;

/// Error surface of the draw lifecycle. `Forbidden` is constructed by the
/// request layer from its authorization collaborator; no role logic lives
/// here. Everything is decided before the first write, so a failed action
/// leaves the database untouched.
#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Invalid draw configuration: {0}")]
    InvalidConfig(String),
    #[error("Insufficient players: need {missing} more players")]
    InsufficientPlayers {
        required: usize,
        available: usize,
        missing: usize,
    },
    #[error("Insufficient line players: need {missing} more line players")]
    InsufficientLinePlayers {
        required: usize,
        available: usize,
        missing: usize,
    },
    #[error("Pelada {0} does not exist")]
    PeladaNotFound(Uuid),
    #[error("Draw {0} does not exist")]
    DrawNotFound(Uuid),
    #[error("Not allowed to manage draws for this pelada")]
    Forbidden,
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error("Other error: {source}")]
    Other {
        #[from]
        source: anyhow::Error,
    },
}
