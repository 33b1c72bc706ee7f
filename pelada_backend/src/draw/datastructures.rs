use sea_orm::prelude::Uuid;
use serde::{Deserialize, Serialize};

use pelada_entities::prelude::{DrawMethod, Player, PlayerPosition};

/// Read-only snapshot of a player as the allocator sees it. The caller is
/// responsible for filtering the pool down to eligible players.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCandidate {
    pub uuid: Uuid,
    pub rating: f64,
    pub position: Option<PlayerPosition>,
}

impl From<&Player> for DrawCandidate {
    fn from(player: &Player) -> Self {
        DrawCandidate {
            uuid: player.uuid,
            rating: player.rating,
            position: player.position,
        }
    }
}

/// A player placed on a team by the allocator, with the position the slot
/// was assigned under (Goalkeeper for fixed keeper slots, the manual
/// assignment for manual draws, unset otherwise).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedPlayer {
    pub uuid: Uuid,
    pub position: Option<PlayerPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualTeamPlayer {
    pub player_id: Uuid,
    pub position: Option<PlayerPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualTeam {
    pub name: String,
    pub color: String,
    pub players: Vec<ManualTeamPlayer>,
}

/// How many slots each team has to fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamSlots {
    /// Everyone drawn from a single pool, goalkeepers included.
    Mixed { players_per_team: usize },
    /// One reserved goalkeeper slot per team, filled from the goalkeeper
    /// partition of the pool; the count applies to line players only.
    FixedGoalkeepers { line_players_per_team: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamShape {
    pub number_of_teams: usize,
    pub slots: TeamSlots,
}

impl TeamShape {
    pub fn per_team_target(&self) -> usize {
        match self.slots {
            TeamSlots::Mixed { players_per_team } => players_per_team,
            TeamSlots::FixedGoalkeepers {
                line_players_per_team,
            } => line_players_per_team,
        }
    }
}

/// Per-request draw configuration. Each variant carries exactly the fields
/// its method uses; there are no optional fields to second-guess.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawConfig {
    Manual { teams: Vec<ManualTeam> },
    AutoRandom { shape: TeamShape },
    AutoBalanced { shape: TeamShape },
}

impl DrawConfig {
    pub fn method(&self) -> DrawMethod {
        match self {
            DrawConfig::Manual { .. } => DrawMethod::Manual,
            DrawConfig::AutoRandom { .. } => DrawMethod::AutoRandom,
            DrawConfig::AutoBalanced { .. } => DrawMethod::AutoBalanced,
        }
    }

    pub fn number_of_teams(&self) -> usize {
        match self {
            DrawConfig::Manual { teams } => teams.len(),
            DrawConfig::AutoRandom { shape } | DrawConfig::AutoBalanced { shape } => {
                shape.number_of_teams
            }
        }
    }

    /// The per-team player target recorded on the draw. For manual draws
    /// this is the size of the largest configured team.
    pub fn players_per_team(&self) -> usize {
        match self {
            DrawConfig::Manual { teams } => {
                teams.iter().map(|t| t.players.len()).max().unwrap_or(0)
            }
            DrawConfig::AutoRandom { shape } | DrawConfig::AutoBalanced { shape } => {
                shape.per_team_target()
            }
        }
    }
}
