use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "draw")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub uuid: Uuid,
    pub pelada_id: Uuid,
    pub created_by: Uuid,
    pub method: String,
    pub number_of_teams: i32,
    pub players_per_team: i32,
    pub is_active: bool,
    pub created_at: ChronoDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pelada::Entity",
        from = "Column::PeladaId",
        to = "super::pelada::Column::Uuid"
    )]
    Pelada,
    #[sea_orm(has_many = "super::team::Entity")]
    Team,
}

impl Related<super::pelada::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Pelada.def()
    }
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
