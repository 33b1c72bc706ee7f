use sea_orm::prelude::Uuid;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};

use pelada_entities::prelude::*;

use super::DrawError;

/// Permanently removes a draw and everything under it. Deleting the active
/// draw is allowed; the pelada then has no active draw until another one
/// is created or activated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDrawAction {
    pub draw_id: Uuid,
}

impl DeleteDrawAction {
    pub fn new(draw_id: Uuid) -> Self {
        DeleteDrawAction { draw_id }
    }

    pub async fn execute<C>(&self, db: &C) -> Result<(), DrawError>
    where
        C: TransactionTrait,
    {
        let transaction = db.begin().await?;

        Draw::try_get(&transaction, self.draw_id)
            .await?
            .ok_or(DrawError::DrawNotFound(self.draw_id))?;

        Draw::delete(&transaction, self.draw_id).await?;
        transaction.commit().await?;

        log::info!("Deleted draw {}", self.draw_id);
        Ok(())
    }
}
