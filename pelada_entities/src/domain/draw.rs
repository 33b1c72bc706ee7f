use std::collections::HashMap;

use async_trait::async_trait;
use itertools::Itertools;
use sea_orm::sea_query::Expr;
use sea_orm::{prelude::*, ActiveValue, QueryOrder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema;

use super::player::PlayerPosition;
use super::PeladaEntity;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DrawMethod {
    Manual,
    AutoRandom,
    AutoBalanced,
}

#[derive(Error, Debug)]
pub enum DrawParseError {
    #[error("Unknown draw method: {0}")]
    UnknownMethod(String),
}

impl DrawMethod {
    pub fn to_column_value(&self) -> Result<String, anyhow::Error> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_column_value(value: &str) -> Result<DrawMethod, DrawParseError> {
        serde_json::from_str(value).map_err(|_| DrawParseError::UnknownMethod(value.to_string()))
    }
}

/// A single player slot within a team. The position is the assignment for
/// this draw only and may differ from the player's roster position.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct TeamPlayer {
    pub player_id: Uuid,
    pub position: Option<PlayerPosition>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Team {
    pub uuid: Uuid,
    pub name: String,
    pub color: String,
    pub average_rating: f64,
    pub players: Vec<TeamPlayer>,
}

/// Arithmetic mean of the given ratings, 0.0 for an empty slice.
pub fn average_rating(ratings: &[f64]) -> f64 {
    if ratings.is_empty() {
        0.0
    } else {
        ratings.iter().sum::<f64>() / ratings.len() as f64
    }
}

/// One immutable team partition of a pelada. Only `is_active` may change
/// after creation; everything else requires a new draw.
#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Draw {
    pub uuid: Uuid,
    pub pelada_id: Uuid,
    pub created_by: Uuid,
    pub method: DrawMethod,
    pub number_of_teams: i32,
    pub players_per_team: i32,
    pub is_active: bool,
    pub created_at: chrono::NaiveDateTime,
    pub teams: Vec<Team>,
}

impl Draw {
    pub fn new(
        pelada_id: Uuid,
        created_by: Uuid,
        method: DrawMethod,
        number_of_teams: i32,
        players_per_team: i32,
        teams: Vec<Team>,
    ) -> Self {
        Draw {
            uuid: Uuid::new_v4(),
            pelada_id,
            created_by,
            method,
            number_of_teams,
            players_per_team,
            is_active: true,
            created_at: chrono::Utc::now().naive_utc(),
            teams,
        }
    }

    pub async fn try_get<C>(db: &C, uuid: Uuid) -> Result<Option<Draw>, anyhow::Error>
    where
        C: ConnectionTrait,
    {
        let model = schema::draw::Entity::find_by_id(uuid).one(db).await?;
        match model {
            Some(model) => Ok(Self::load_for_models(db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// All draws of a pelada, newest first.
    pub async fn get_all_in_pelada<C>(db: &C, pelada_id: Uuid) -> Result<Vec<Draw>, anyhow::Error>
    where
        C: ConnectionTrait,
    {
        let models = schema::draw::Entity::find()
            .filter(schema::draw::Column::PeladaId.eq(pelada_id))
            .order_by_desc(schema::draw::Column::CreatedAt)
            .all(db)
            .await?;
        Self::load_for_models(db, models).await
    }

    pub async fn get_active_in_pelada<C>(
        db: &C,
        pelada_id: Uuid,
    ) -> Result<Option<Draw>, anyhow::Error>
    where
        C: ConnectionTrait,
    {
        let model = schema::draw::Entity::find()
            .filter(
                schema::draw::Column::PeladaId
                    .eq(pelada_id)
                    .and(schema::draw::Column::IsActive.eq(true)),
            )
            .one(db)
            .await?;
        match model {
            Some(model) => Ok(Self::load_for_models(db, vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn load_for_models<C>(
        db: &C,
        models: Vec<schema::draw::Model>,
    ) -> Result<Vec<Draw>, anyhow::Error>
    where
        C: ConnectionTrait,
    {
        let draw_ids = models.iter().map(|m| m.uuid).collect_vec();
        let team_models = schema::team::Entity::find()
            .filter(schema::team::Column::DrawId.is_in(draw_ids))
            .order_by_asc(schema::team::Column::Index)
            .all(db)
            .await?;
        let team_ids = team_models.iter().map(|t| t.uuid).collect_vec();
        let member_models = schema::team_player::Entity::find()
            .filter(schema::team_player::Column::TeamId.is_in(team_ids))
            .order_by_asc(schema::team_player::Column::Index)
            .all(db)
            .await?;

        let mut members_by_team = member_models
            .into_iter()
            .map(|m| (m.team_id, m))
            .into_group_map();
        let mut teams_by_draw = team_models
            .into_iter()
            .map(|t| (t.draw_id, t))
            .into_group_map();

        models
            .into_iter()
            .map(|model| {
                let team_models = teams_by_draw.remove(&model.uuid).unwrap_or_default();
                Self::from_rows(model, team_models, &mut members_by_team)
            })
            .collect()
    }

    fn from_rows(
        model: schema::draw::Model,
        team_models: Vec<schema::team::Model>,
        members_by_team: &mut HashMap<Uuid, Vec<schema::team_player::Model>>,
    ) -> Result<Draw, anyhow::Error> {
        let method = DrawMethod::from_column_value(&model.method)?;
        let teams = team_models
            .into_iter()
            .map(|team| {
                let members = members_by_team.remove(&team.uuid).unwrap_or_default();
                Team {
                    uuid: team.uuid,
                    name: team.name,
                    color: team.color,
                    average_rating: team.average_rating,
                    players: members
                        .into_iter()
                        .map(|member| TeamPlayer {
                            player_id: member.player_id,
                            position: PlayerPosition::from_column_value(&member.position),
                        })
                        .collect_vec(),
                }
            })
            .collect_vec();

        Ok(Draw {
            uuid: model.uuid,
            pelada_id: model.pelada_id,
            created_by: model.created_by,
            method,
            number_of_teams: model.number_of_teams,
            players_per_team: model.players_per_team,
            is_active: model.is_active,
            created_at: model.created_at,
            teams,
        })
    }

    /// Clears the active flag on every draw of the pelada. Run inside the
    /// same transaction as the activation of the replacement draw.
    pub async fn deactivate_all_in_pelada<C>(db: &C, pelada_id: Uuid) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        schema::draw::Entity::update_many()
            .col_expr(schema::draw::Column::IsActive, Expr::value(false))
            .filter(
                schema::draw::Column::PeladaId
                    .eq(pelada_id)
                    .and(schema::draw::Column::IsActive.eq(true)),
            )
            .exec(db)
            .await?;
        Ok(())
    }

    /// Sets the active flag on a single draw. Returns the number of rows
    /// touched so callers can detect a missing draw.
    pub async fn set_active_flag<C>(db: &C, uuid: Uuid) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = schema::draw::Entity::update_many()
            .col_expr(schema::draw::Column::IsActive, Expr::value(true))
            .filter(schema::draw::Column::Uuid.eq(uuid))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Removes the draw together with its teams and team players. There is
    /// no soft delete; the rows are gone afterwards.
    pub async fn delete<C>(db: &C, uuid: Uuid) -> Result<(), DbErr>
    where
        C: ConnectionTrait,
    {
        let team_ids = schema::team::Entity::find()
            .filter(schema::team::Column::DrawId.eq(uuid))
            .all(db)
            .await?
            .into_iter()
            .map(|t| t.uuid)
            .collect_vec();
        schema::team_player::Entity::delete_many()
            .filter(schema::team_player::Column::TeamId.is_in(team_ids))
            .exec(db)
            .await?;
        schema::team::Entity::delete_many()
            .filter(schema::team::Column::DrawId.eq(uuid))
            .exec(db)
            .await?;
        schema::draw::Entity::delete_many()
            .filter(schema::draw::Column::Uuid.eq(uuid))
            .exec(db)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl PeladaEntity for Draw {
    async fn save<C>(&self, db: &C, guarantee_insert: bool) -> Result<(), anyhow::Error>
    where
        C: ConnectionTrait,
    {
        let exists = !guarantee_insert
            && schema::draw::Entity::find_by_id(self.uuid)
                .one(db)
                .await?
                .is_some();

        if exists {
            // Draws are immutable apart from the active flag.
            let model = schema::draw::ActiveModel {
                uuid: ActiveValue::Unchanged(self.uuid),
                is_active: ActiveValue::Set(self.is_active),
                ..Default::default()
            };
            model.update(db).await?;
            return Ok(());
        }

        let draw_model = schema::draw::ActiveModel {
            uuid: ActiveValue::Set(self.uuid),
            pelada_id: ActiveValue::Set(self.pelada_id),
            created_by: ActiveValue::Set(self.created_by),
            method: ActiveValue::Set(self.method.to_column_value()?),
            number_of_teams: ActiveValue::Set(self.number_of_teams),
            players_per_team: ActiveValue::Set(self.players_per_team),
            is_active: ActiveValue::Set(self.is_active),
            created_at: ActiveValue::Set(self.created_at),
        };
        draw_model.insert(db).await?;

        for (team_idx, team) in self.teams.iter().enumerate() {
            let team_model = schema::team::ActiveModel {
                uuid: ActiveValue::Set(team.uuid),
                draw_id: ActiveValue::Set(self.uuid),
                index: ActiveValue::Set(team_idx as i32),
                name: ActiveValue::Set(team.name.clone()),
                color: ActiveValue::Set(team.color.clone()),
                average_rating: ActiveValue::Set(team.average_rating),
            };
            team_model.insert(db).await?;

            for (member_idx, member) in team.players.iter().enumerate() {
                let member_model = schema::team_player::ActiveModel {
                    uuid: ActiveValue::Set(Uuid::new_v4()),
                    team_id: ActiveValue::Set(team.uuid),
                    player_id: ActiveValue::Set(member.player_id),
                    index: ActiveValue::Set(member_idx as i32),
                    position: ActiveValue::Set(PlayerPosition::to_column_value(
                        &member.position,
                    )?),
                };
                member_model.insert(db).await?;
            }
        }

        Ok(())
    }

    async fn get_pelada<C>(&self, _db: &C) -> Result<Option<Uuid>, anyhow::Error>
    where
        C: ConnectionTrait,
    {
        Ok(Some(self.pelada_id))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_average_rating_of_empty_team_is_zero() {
        assert_eq!(average_rating(&[]), 0.0);
    }

    #[test]
    fn test_average_rating_is_arithmetic_mean() {
        assert!((average_rating(&[9.0, 3.0]) - 6.0).abs() < 1e-9);
        assert!((average_rating(&[7.0, 5.0]) - 6.0).abs() < 1e-9);
        assert!((average_rating(&[1.0, 2.0, 4.0]) - 7.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_method_round_trips_through_column_value() -> Result<(), anyhow::Error> {
        for method in [
            DrawMethod::Manual,
            DrawMethod::AutoRandom,
            DrawMethod::AutoBalanced,
        ] {
            let value = method.to_column_value()?;
            assert_eq!(DrawMethod::from_column_value(&value)?, method);
        }
        assert!(DrawMethod::from_column_value("\"LOTTERY\"").is_err());
        Ok(())
    }
}
