use sea_orm::*;
use uuid::Uuid;

use crate::models::bookings::{self, BookingStatus};

pub async fn get_booking_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<bookings::Model>, DbErr> {
    bookings::Entity::find_by_id(id).one(db).await
}

/// Load a booking under a row lock; every lifecycle mutation goes through
/// this inside a transaction so concurrent transitions serialize.
pub async fn get_booking_for_update<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<bookings::Model>, DbErr> {
    bookings::Entity::find_by_id(id)
        .lock_exclusive()
        .one(db)
        .await
}

pub async fn get_bookings_by_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<bookings::Model>, DbErr> {
    bookings::Entity::find()
        .filter(bookings::Column::UserId.eq(user_id))
        .order_by_desc(bookings::Column::CreatedAt)
        .all(db)
        .await
}

pub async fn get_bookings_by_partner(
    db: &DatabaseConnection,
    partner_id: Uuid,
) -> Result<Vec<bookings::Model>, DbErr> {
    bookings::Entity::find()
        .filter(bookings::Column::PartnerId.eq(partner_id))
        .order_by_desc(bookings::Column::CreatedAt)
        .all(db)
        .await
}

/// Partner's live work queue: assigned or underway.
pub async fn get_active_bookings_by_partner(
    db: &DatabaseConnection,
    partner_id: Uuid,
) -> Result<Vec<bookings::Model>, DbErr> {
    bookings::Entity::find()
        .filter(bookings::Column::PartnerId.eq(partner_id))
        .filter(bookings::Column::Status.is_in([
            BookingStatus::Assigned,
            BookingStatus::Accepted,
            BookingStatus::InProgress,
            BookingStatus::Paused,
        ]))
        .order_by_asc(bookings::Column::ScheduledDate)
        .all(db)
        .await
}

pub async fn get_all_bookings(
    db: &DatabaseConnection,
    status: Option<BookingStatus>,
) -> Result<Vec<bookings::Model>, DbErr> {
    let mut query = bookings::Entity::find().order_by_desc(bookings::Column::CreatedAt);
    if let Some(status) = status {
        query = query.filter(bookings::Column::Status.eq(status));
    }
    query.all(db).await
}
