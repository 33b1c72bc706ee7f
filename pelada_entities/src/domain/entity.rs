use async_trait::async_trait;
use sea_orm::{prelude::Uuid, ConnectionTrait};

#[async_trait]
pub trait PeladaEntity: Send + Sync {
    async fn save<C>(&self, db: &C, guarantee_insert: bool) -> Result<(), anyhow::Error>
    where
        C: ConnectionTrait;

    async fn save_many<C>(
        db: &C,
        guarantee_insert: bool,
        entities: &Vec<&Self>,
    ) -> Result<(), anyhow::Error>
    where
        C: ConnectionTrait,
    {
        for entity in entities.iter() {
            entity.save(db, guarantee_insert).await?;
        }
        Ok(())
    }

    async fn get_pelada<C>(&self, db: &C) -> Result<Option<Uuid>, anyhow::Error>
    where
        C: ConnectionTrait;
}
