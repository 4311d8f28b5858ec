use sea_orm::*;
use uuid::Uuid;

use crate::models::users::{self, Roles, UpdateUserProfile};

/// Find a user by phone, creating a bare record on first contact
/// (called by the OTP login flow).
pub async fn find_or_create_by_phone(
    db: &DatabaseConnection,
    phone: &str,
) -> Result<users::Model, DbErr> {
    if let Some(existing) = users::Entity::find()
        .filter(users::Column::Phone.eq(phone))
        .one(db)
        .await?
    {
        return Ok(existing);
    }

    users::ActiveModel {
        id: Set(Uuid::new_v4()),
        phone: Set(phone.to_owned()),
        name: Set(None),
        email: Set(None),
        role: Set(Roles::User),
        addresses: Set(serde_json::json!([])),
        device_token: Set(None),
        otp_code: Set(None),
        otp_expires_at: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    }
    .insert(db)
    .await
}

pub async fn get_user_by_phone(
    db: &DatabaseConnection,
    phone: &str,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find()
        .filter(users::Column::Phone.eq(phone))
        .one(db)
        .await
}

pub async fn get_all_users(db: &DatabaseConnection) -> Result<Vec<users::Model>, DbErr> {
    users::Entity::find().all(db).await
}

pub async fn get_user_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<users::Model>, DbErr> {
    users::Entity::find_by_id(id).one(db).await
}

/// Store a freshly generated OTP with its expiry.
pub async fn set_otp(
    db: &DatabaseConnection,
    id: Uuid,
    code: &str,
    expires_at: chrono::DateTime<chrono::Utc>,
) -> Result<(), DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();
    active.otp_code = Set(Some(code.to_owned()));
    active.otp_expires_at = Set(Some(expires_at));
    active.update(db).await?;
    Ok(())
}

/// Clear OTP fields after successful verification (or expiry).
pub async fn clear_otp(db: &DatabaseConnection, id: Uuid) -> Result<(), DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();
    active.otp_code = Set(None);
    active.otp_expires_at = Set(None);
    active.update(db).await?;
    Ok(())
}

pub async fn update_profile(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateUserProfile,
) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();
    if let Some(name) = input.name {
        active.name = Set(Some(name));
    }
    if let Some(email) = input.email {
        active.email = Set(Some(email));
    }
    if let Some(token) = input.device_token {
        active.device_token = Set(Some(token));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await
}

/// Replace the saved-address list (stored as a JSON array).
pub async fn set_addresses(
    db: &DatabaseConnection,
    id: Uuid,
    addresses: serde_json::Value,
) -> Result<users::Model, DbErr> {
    let user = users::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

    let mut active: users::ActiveModel = user.into();
    active.addresses = Set(addresses);
    active.updated_at = Set(Some(chrono::Utc::now()));
    active.update(db).await
}
