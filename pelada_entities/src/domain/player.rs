use async_trait::async_trait;
use itertools::Itertools;
use sea_orm::{prelude::*, ActiveValue};
use serde::{Deserialize, Serialize};

use crate::schema;

use super::PeladaEntity;

/// On-field position of a player. Players without a position are treated
/// as line players in goalkeeper-fixed draws.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone, Copy, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlayerPosition {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PlayerPosition {
    pub fn to_column_value(position: &Option<PlayerPosition>) -> Result<Option<String>, anyhow::Error> {
        position
            .as_ref()
            .map(|p| serde_json::to_string(p).map_err(Into::into))
            .transpose()
    }

    pub fn from_column_value(value: &Option<String>) -> Option<PlayerPosition> {
        value
            .as_ref()
            .map(|v| serde_json::from_str(v).ok())
            .flatten()
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Player {
    pub uuid: Uuid,
    pub pelada_id: Uuid,
    pub name: String,
    pub rating: f64,
    pub position: Option<PlayerPosition>,
    pub is_active: bool,
    pub is_waiting_list: bool,
}

impl Player {
    pub fn from_model(model: schema::player::Model) -> Player {
        Player {
            uuid: model.uuid,
            pelada_id: model.pelada_id,
            name: model.name,
            rating: model.rating,
            position: PlayerPosition::from_column_value(&model.position),
            is_active: model.is_active,
            is_waiting_list: model.is_waiting_list,
        }
    }

    pub async fn get_all_in_pelada<C>(db: &C, pelada_id: Uuid) -> Result<Vec<Player>, DbErr>
    where
        C: ConnectionTrait,
    {
        let players = schema::player::Entity::find()
            .filter(schema::player::Column::PeladaId.eq(pelada_id))
            .all(db)
            .await?;
        Ok(players.into_iter().map(Self::from_model).collect_vec())
    }

    /// The candidate pool for a draw: active players not parked on the
    /// waiting list.
    pub async fn get_eligible_in_pelada<C>(db: &C, pelada_id: Uuid) -> Result<Vec<Player>, DbErr>
    where
        C: ConnectionTrait,
    {
        let players = schema::player::Entity::find()
            .filter(
                schema::player::Column::PeladaId
                    .eq(pelada_id)
                    .and(schema::player::Column::IsActive.eq(true))
                    .and(schema::player::Column::IsWaitingList.eq(false)),
            )
            .all(db)
            .await?;
        Ok(players.into_iter().map(Self::from_model).collect_vec())
    }
}

#[async_trait]
impl PeladaEntity for Player {
    async fn save<C>(&self, db: &C, guarantee_insert: bool) -> Result<(), anyhow::Error>
    where
        C: ConnectionTrait,
    {
        let mut model = schema::player::ActiveModel {
            uuid: ActiveValue::Unchanged(self.uuid),
            pelada_id: ActiveValue::Set(self.pelada_id),
            name: ActiveValue::Set(self.name.clone()),
            rating: ActiveValue::Set(self.rating),
            position: ActiveValue::Set(PlayerPosition::to_column_value(&self.position)?),
            is_active: ActiveValue::Set(self.is_active),
            is_waiting_list: ActiveValue::Set(self.is_waiting_list),
        };
        let exists = !guarantee_insert
            && schema::player::Entity::find_by_id(self.uuid)
                .one(db)
                .await?
                .is_some();
        if exists {
            model.update(db).await?;
        } else {
            model.uuid = ActiveValue::Set(self.uuid);
            model.insert(db).await?;
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

#[test]
fn test_position_round_trips_through_column_value() -> Result<(), anyhow::Error> {
    let value = PlayerPosition::to_column_value(&Some(PlayerPosition::Goalkeeper))?;
    assert_eq!(value, Some("\"GOALKEEPER\"".to_string()));
    assert_eq!(
        PlayerPosition::from_column_value(&value),
        Some(PlayerPosition::Goalkeeper)
    );
    assert_eq!(PlayerPosition::from_column_value(&None), None);
    Ok(())
}

#[test]
fn test_unknown_position_value_is_dropped() {
    assert_eq!(
        PlayerPosition::from_column_value(&Some("\"LIBERO\"".to_string())),
        None
    );
}
