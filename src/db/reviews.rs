use sea_orm::*;
use uuid::Uuid;

use crate::models::reviews;

pub async fn get_review_by_booking<C: ConnectionTrait>(
    db: &C,
    booking_id: Uuid,
) -> Result<Option<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::BookingId.eq(booking_id))
        .one(db)
        .await
}

pub async fn insert_review<C: ConnectionTrait>(
    db: &C,
    booking_id: Uuid,
    user_id: Uuid,
    partner_id: Option<Uuid>,
    rating: i32,
    comment: Option<String>,
) -> Result<reviews::Model, DbErr> {
    reviews::ActiveModel {
        id: Set(Uuid::new_v4()),
        booking_id: Set(booking_id),
        user_id: Set(user_id),
        partner_id: Set(partner_id),
        rating: Set(rating),
        comment: Set(comment),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(db)
    .await
}

pub async fn get_reviews_by_partner(
    db: &DatabaseConnection,
    partner_id: Uuid,
) -> Result<Vec<reviews::Model>, DbErr> {
    reviews::Entity::find()
        .filter(reviews::Column::PartnerId.eq(partner_id))
        .order_by_desc(reviews::Column::CreatedAt)
        .all(db)
        .await
}
