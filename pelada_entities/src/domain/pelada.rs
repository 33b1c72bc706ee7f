use async_trait::async_trait;
use sea_orm::{prelude::*, ActiveValue};
use serde::{Deserialize, Serialize};

use crate::schema;

use super::PeladaEntity;

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Clone)]
pub struct Pelada {
    pub uuid: Uuid,
    pub name: String,
}

impl Pelada {
    pub fn new(name: String) -> Self {
        Pelada {
            uuid: Uuid::new_v4(),
            name,
        }
    }

    pub async fn try_get<C>(db: &C, uuid: Uuid) -> Result<Option<Pelada>, DbErr>
    where
        C: ConnectionTrait,
    {
        let pelada = schema::pelada::Entity::find_by_id(uuid).one(db).await?;
        Ok(pelada.map(|p| Pelada {
            uuid: p.uuid,
            name: p.name,
        }))
    }
}

#[async_trait]
impl PeladaEntity for Pelada {
    async fn save<C>(&self, db: &C, guarantee_insert: bool) -> Result<(), anyhow::Error>
    where
        C: ConnectionTrait,
    {
        let mut model = schema::pelada::ActiveModel {
            uuid: ActiveValue::Unchanged(self.uuid),
            name: ActiveValue::Set(self.name.clone()),
        };
        let exists = !guarantee_insert
            && schema::pelada::Entity::find_by_id(self.uuid)
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
        Ok(Some(self.uuid))
    }
}
