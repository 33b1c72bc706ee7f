use sea_orm::prelude::Uuid;
use sea_orm::TransactionTrait;
use serde::{Deserialize, Serialize};

use pelada_entities::prelude::*;

use super::DrawError;

/// Makes an existing draw the active one for its pelada. Both flag writes
/// run in one transaction; at no point can two draws of the pelada be
/// active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveDrawAction {
    pub pelada_id: Uuid,
    pub draw_id: Uuid,
}

impl SetActiveDrawAction {
    pub fn new(pelada_id: Uuid, draw_id: Uuid) -> Self {
        SetActiveDrawAction { pelada_id, draw_id }
    }

    pub async fn execute<C>(&self, db: &C) -> Result<Draw, DrawError>
    where
        C: TransactionTrait,
    {
        let transaction = db.begin().await?;

        let draw = Draw::try_get(&transaction, self.draw_id)
            .await?
            .ok_or(DrawError::DrawNotFound(self.draw_id))?;
        if draw.pelada_id != self.pelada_id {
            // A draw of another pelada is as good as nonexistent here.
            return Err(DrawError::DrawNotFound(self.draw_id));
        }

        Draw::deactivate_all_in_pelada(&transaction, self.pelada_id).await?;
        Draw::set_active_flag(&transaction, self.draw_id).await?;
        transaction.commit().await?;

        log::info!(
            "Draw {} is now active for pelada {}",
            self.draw_id,
            self.pelada_id
        );
        Ok(Draw {
            is_active: true,
            ..draw
        })
    }
}
