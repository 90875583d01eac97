//! Event entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub date_time: Option<String>,
    pub location: Option<String>,
    pub organizer_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OrganizerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Organizer,
    #[sea_orm(has_many = "super::attendee::Entity")]
    Attendee,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizer.def()
    }
}

impl Related<super::attendee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Event.
impl From<Model> for eventdesk_core::domain::Event {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            date_time: model.date_time,
            location: model.location,
            organizer_id: model.organizer_id,
        }
    }
}

/// Conversion from Domain Event to SeaORM ActiveModel.
impl From<eventdesk_core::domain::Event> for ActiveModel {
    fn from(event: eventdesk_core::domain::Event) -> Self {
        Self {
            id: super::primary_key(event.id),
            title: Set(event.title),
            description: Set(event.description),
            date_time: Set(event.date_time),
            location: Set(event.location),
            organizer_id: Set(event.organizer_id),
        }
    }
}
