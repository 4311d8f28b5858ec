use sea_orm::*;
use uuid::Uuid;

use crate::models::booking_messages::{self, Sender};

pub async fn insert_message(
    db: &DatabaseConnection,
    booking_id: Uuid,
    sender: Sender,
    body: String,
) -> Result<booking_messages::Model, DbErr> {
    booking_messages::ActiveModel {
        id: Set(Uuid::new_v4()),
        booking_id: Set(booking_id),
        sender: Set(sender),
        body: Set(body),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(db)
    .await
}

/// Transcript in chronological order.
pub async fn get_messages_by_booking(
    db: &DatabaseConnection,
    booking_id: Uuid,
) -> Result<Vec<booking_messages::Model>, DbErr> {
    booking_messages::Entity::find()
        .filter(booking_messages::Column::BookingId.eq(booking_id))
        .order_by_asc(booking_messages::Column::CreatedAt)
        .all(db)
        .await
}
