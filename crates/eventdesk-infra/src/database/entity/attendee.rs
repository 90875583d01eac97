//! Attendee entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "attendees")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::event::Entity",
        from = "Column::EventId",
        to = "super::event::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Event,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Attendee.
impl From<Model> for eventdesk_core::domain::Attendee {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            event_id: model.event_id,
        }
    }
}

/// Conversion from Domain Attendee to SeaORM ActiveModel.
impl From<eventdesk_core::domain::Attendee> for ActiveModel {
    fn from(attendee: eventdesk_core::domain::Attendee) -> Self {
        Self {
            id: super::primary_key(attendee.id),
            user_id: Set(attendee.user_id),
            event_id: Set(attendee.event_id),
        }
    }
}
