use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "proposal")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub author_id: String,
    pub title: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub abstract_text: String,
    #[sea_orm(column_type = "Text")]
    pub background: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub additional: Option<String>,
    pub status: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::ongoing_vote::Entity")]
    OngoingVote,
    #[sea_orm(has_one = "super::concluded_vote::Entity")]
    ConcludedVote,
}

impl Related<super::ongoing_vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OngoingVote.def()
    }
}

impl Related<super::concluded_vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ConcludedVote.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
