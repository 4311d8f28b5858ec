use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::users as user_db;
use crate::error::{ApiError, ApiResult};
use crate::handlers::ok;
use crate::models::users::{SavedAddress, UpdateUserProfile, UserResponse};

/// GET /api/user/me
pub async fn me(user: AuthenticatedUser) -> HttpResponse {
    ok(UserResponse::from(user.0))
}

/// PUT /api/user/me
pub async fn update_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<UpdateUserProfile>,
) -> ApiResult<HttpResponse> {
    let updated = user_db::update_profile(db.get_ref(), user.0.id, body.into_inner()).await?;
    Ok(ok(UserResponse::from(updated)))
}

/// PUT /api/user/me/addresses — replace the saved-address list.
pub async fn set_addresses(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<Vec<SavedAddress>>,
) -> ApiResult<HttpResponse> {
    let addresses = body.into_inner();
    for addr in &addresses {
        if !crate::booking::geo::GeoPoint::new(addr.lat, addr.lng).is_valid() {
            return Err(ApiError::validation(format!(
                "invalid coordinates for address '{}'",
                addr.label
            )));
        }
    }
    let updated =
        user_db::set_addresses(db.get_ref(), user.0.id, serde_json::json!(addresses)).await?;
    Ok(ok(UserResponse::from(updated)))
}
