use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "player")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,
    pub pelada_id: Uuid,
    pub name: String,
    pub rating: f64,
    pub position: Option<String>,
    pub is_active: bool,
    pub is_waiting_list: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pelada::Entity",
        from = "Column::PeladaId",
        to = "super::pelada::Column::Uuid"
    )]
    Pelada,
    #[sea_orm(has_many = "super::team_player::Entity")]
    TeamPlayer,
}

impl Related<super::pelada::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pelada.def()
    }
}

impl Related<super::team_player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamPlayer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
