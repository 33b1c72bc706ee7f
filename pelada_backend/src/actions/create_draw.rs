use std::collections::HashMap;

use itertools::Itertools;
use sea_orm::prelude::Uuid;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};

use pelada_entities::prelude::*;

use crate::draw::allocation::{allocate, AllocationError};
use crate::draw::datastructures::{AssignedPlayer, DrawCandidate, DrawConfig, TeamSlots};
use crate::draw::{team_color, team_name};

use super::DrawError;

/// Runs a draw for a pelada and persists the result as the new active
/// draw. Deactivating the previous active draw and inserting the new one
/// happen in one transaction, so the pelada never has two active draws,
/// even under concurrent requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDrawAction {
    pub pelada_id: Uuid,
    pub created_by: Uuid,
    pub config: DrawConfig,
}

impl CreateDrawAction {
    pub fn new(pelada_id: Uuid, created_by: Uuid, config: DrawConfig) -> Self {
        CreateDrawAction {
            pelada_id,
            created_by,
            config,
        }
    }

    pub async fn execute<C>(&self, db: &C) -> Result<Draw, DrawError>
    where
        C: TransactionTrait,
    {
        validate_config(&self.config)?;

        let transaction = db.begin().await?;

        Pelada::try_get(&transaction, self.pelada_id)
            .await?
            .ok_or(DrawError::PeladaNotFound(self.pelada_id))?;

        let pool = Player::get_eligible_in_pelada(&transaction, self.pelada_id).await?;
        check_sufficiency(&pool, &self.config)?;

        let candidates = pool.iter().map(DrawCandidate::from).collect_vec();
        let mut rng = rand::thread_rng();
        let assignments = allocate(&candidates, &self.config, &mut rng).map_err(|e| match e {
            AllocationError::UnknownPlayer(_) => DrawError::InvalidConfig(e.to_string()),
        })?;

        let ratings = pool.iter().map(|p| (p.uuid, p.rating)).collect::<HashMap<_, _>>();
        let teams = build_teams(&self.config, assignments, &ratings);

        let draw = Draw::new(
            self.pelada_id,
            self.created_by,
            self.config.method(),
            self.config.number_of_teams() as i32,
            self.config.players_per_team() as i32,
            teams,
        );

        Draw::deactivate_all_in_pelada(&transaction, self.pelada_id).await?;
        draw.save(&transaction, true).await?;
        transaction.commit().await?;

        log::info!(
            "Created draw {} for pelada {} with {} teams",
            draw.uuid,
            self.pelada_id,
            draw.teams.len()
        );
        Ok(draw)
    }
}

fn validate_config(config: &DrawConfig) -> Result<(), DrawError> {
    if config.number_of_teams() < 2 {
        return Err(DrawError::InvalidConfig(format!(
            "A draw needs at least 2 teams, got {}",
            config.number_of_teams()
        )));
    }
    match config {
        DrawConfig::Manual { teams } => {
            let duplicates = teams
                .iter()
                .flat_map(|t| t.players.iter().map(|p| p.player_id))
                .duplicates()
                .collect_vec();
            if !duplicates.is_empty() {
                return Err(DrawError::InvalidConfig(format!(
                    "Player {} is assigned to more than one team",
                    duplicates[0]
                )));
            }
        }
        DrawConfig::AutoRandom { shape } | DrawConfig::AutoBalanced { shape } => {
            if shape.per_team_target() < 1 {
                return Err(DrawError::InvalidConfig(
                    "Each team needs at least 1 player".into(),
                ));
            }
        }
    }
    Ok(())
}

/// Runs before any allocation or write. Goalkeeper-fixed draws only count
/// line players against the requirement; keepers can run short (the UI
/// handles teams without a fixed keeper).
fn check_sufficiency(pool: &[Player], config: &DrawConfig) -> Result<(), DrawError> {
    let shape = match config {
        DrawConfig::Manual { .. } => return Ok(()),
        DrawConfig::AutoRandom { shape } | DrawConfig::AutoBalanced { shape } => shape,
    };
    match shape.slots {
        TeamSlots::Mixed { players_per_team } => {
            let required = shape.number_of_teams * players_per_team;
            if pool.len() < required {
                return Err(DrawError::InsufficientPlayers {
                    required,
                    available: pool.len(),
                    missing: required - pool.len(),
                });
            }
        }
        TeamSlots::FixedGoalkeepers {
            line_players_per_team,
        } => {
            let required = shape.number_of_teams * line_players_per_team;
            let available = pool
                .iter()
                .filter(|p| p.position != Some(PlayerPosition::Goalkeeper))
                .count();
            if available < required {
                return Err(DrawError::InsufficientLinePlayers {
                    required,
                    available,
                    missing: required - available,
                });
            }
        }
    }
    Ok(())
}

fn build_teams(
    config: &DrawConfig,
    assignments: Vec<Vec<AssignedPlayer>>,
    ratings: &HashMap<Uuid, f64>,
) -> Vec<Team> {
    assignments
        .into_iter()
        .enumerate()
        .map(|(idx, members)| {
            let (name, color) = match config {
                DrawConfig::Manual { teams } => {
                    (teams[idx].name.clone(), teams[idx].color.clone())
                }
                _ => (team_name(idx), team_color(idx).to_string()),
            };
            let member_ratings = members
                .iter()
                .filter_map(|m| ratings.get(&m.uuid).copied())
                .collect_vec();
            Team {
                uuid: Uuid::new_v4(),
                name,
                color,
                average_rating: average_rating(&member_ratings),
                players: members
                    .into_iter()
                    .map(|m| TeamPlayer {
                        player_id: m.uuid,
                        position: m.position,
                    })
                    .collect_vec(),
            }
        })
        .collect_vec()
}
