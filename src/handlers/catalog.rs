//! Catalog browse (consumer) and catalog CRUD (admin). Catalog items are the
//! only hard-deletable entities in the system.

use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::{AdminUser, AuthenticatedUser};
use crate::db::catalog as catalog_db;
use crate::error::{ApiError, ApiResult};
use crate::handlers::{created, message, ok};
use crate::models::categories::{CreateCategory, UpdateCategory};
use crate::models::services::{CreateService, UpdateService};
use crate::models::sub_services::CreateSubService;
use crate::models::vehicle_types::{CreateVehicleType, UpdateVehicleType};

/// Every rate on a fare profile must be a finite, non-negative number;
/// anything else would flow straight into the fare calculator.
fn ensure_non_negative_rates(rates: &[(&str, Option<f64>)]) -> Result<(), ApiError> {
    for (name, rate) in rates {
        if let Some(v) = rate {
            if !v.is_finite() || *v < 0.0 {
                return Err(ApiError::validation(format!("{name} must be non-negative")));
            }
        }
    }
    Ok(())
}

// ── Consumer browse ──

/// GET /api/user/categories
pub async fn list_categories(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    Ok(ok(catalog_db::get_active_categories(db.get_ref()).await?))
}

/// GET /api/user/categories/{id}/services
pub async fn list_services(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let category_id = path.into_inner();
    Ok(ok(
        catalog_db::get_services_by_category(db.get_ref(), category_id).await?,
    ))
}

/// GET /api/user/services/{id}/sub-services
pub async fn list_sub_services(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let service_id = path.into_inner();
    Ok(ok(
        catalog_db::get_sub_services_by_service(db.get_ref(), service_id).await?,
    ))
}

/// GET /api/user/vehicle-types
pub async fn list_vehicle_types(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    Ok(ok(catalog_db::get_active_vehicle_types(db.get_ref()).await?))
}

// ── Admin CRUD ──

/// POST /api/admin/categories
pub async fn create_category(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateCategory>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    if input.name.trim().is_empty() {
        return Err(ApiError::validation("category name is required"));
    }
    Ok(created(catalog_db::insert_category(db.get_ref(), input).await?))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCategory>,
) -> ApiResult<HttpResponse> {
    Ok(ok(
        catalog_db::update_category(db.get_ref(), path.into_inner(), body.into_inner()).await?,
    ))
}

/// DELETE /api/admin/categories/{id}
pub async fn delete_category(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let result = catalog_db::delete_category(db.get_ref(), path.into_inner()).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("Category not found"));
    }
    Ok(message("category deleted"))
}

/// POST /api/admin/services
pub async fn create_service(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateService>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    if input.name.trim().is_empty() {
        return Err(ApiError::validation("service name is required"));
    }
    catalog_db::get_category_by_id(db.get_ref(), input.category_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Category not found"))?;
    Ok(created(catalog_db::insert_service(db.get_ref(), input).await?))
}

/// PUT /api/admin/services/{id}
pub async fn update_service(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateService>,
) -> ApiResult<HttpResponse> {
    Ok(ok(
        catalog_db::update_service(db.get_ref(), path.into_inner(), body.into_inner()).await?,
    ))
}

/// DELETE /api/admin/services/{id}
pub async fn delete_service(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let result = catalog_db::delete_service(db.get_ref(), path.into_inner()).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("Service not found"));
    }
    Ok(message("service deleted"))
}

/// POST /api/admin/sub-services
pub async fn create_sub_service(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateSubService>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    catalog_db::get_service_by_id(db.get_ref(), input.service_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Service not found"))?;
    Ok(created(
        catalog_db::insert_sub_service(db.get_ref(), input).await?,
    ))
}

/// DELETE /api/admin/sub-services/{id}
pub async fn delete_sub_service(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let result = catalog_db::delete_sub_service(db.get_ref(), path.into_inner()).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("Sub-service not found"));
    }
    Ok(message("sub-service deleted"))
}

/// POST /api/admin/vehicle-types
pub async fn create_vehicle_type(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateVehicleType>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    ensure_non_negative_rates(&[
        ("base_fare", Some(input.base_fare)),
        ("per_km_rate", Some(input.per_km_rate)),
        ("per_minute_rate", input.per_minute_rate),
        ("night_surcharge_rate", input.night_surcharge_rate),
        ("surge_multiplier", input.surge_multiplier),
    ])?;
    Ok(created(
        catalog_db::insert_vehicle_type(db.get_ref(), input).await?,
    ))
}

/// PUT /api/admin/vehicle-types/{id}
pub async fn update_vehicle_type(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateVehicleType>,
) -> ApiResult<HttpResponse> {
    let input = body.into_inner();
    ensure_non_negative_rates(&[
        ("base_fare", input.base_fare),
        ("per_km_rate", input.per_km_rate),
        ("per_minute_rate", input.per_minute_rate),
        ("night_surcharge_rate", input.night_surcharge_rate),
        ("surge_multiplier", input.surge_multiplier),
    ])?;
    Ok(ok(
        catalog_db::update_vehicle_type(db.get_ref(), path.into_inner(), input).await?,
    ))
}

/// DELETE /api/admin/vehicle-types/{id}
pub async fn delete_vehicle_type(
    _admin: AdminUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let result = catalog_db::delete_vehicle_type(db.get_ref(), path.into_inner()).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::not_found("Vehicle type not found"));
    }
    Ok(message("vehicle type deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_rates_are_rejected_on_any_field() {
        for field in [
            "base_fare",
            "per_km_rate",
            "per_minute_rate",
            "night_surcharge_rate",
            "surge_multiplier",
        ] {
            let result = ensure_non_negative_rates(&[(field, Some(-5.0))]);
            assert!(result.is_err(), "{field}");
        }
    }

    #[test]
    fn non_finite_rates_are_rejected() {
        assert!(ensure_non_negative_rates(&[("per_minute_rate", Some(f64::NAN))]).is_err());
        assert!(ensure_non_negative_rates(&[("base_fare", Some(f64::INFINITY))]).is_err());
    }

    #[test]
    fn zero_and_absent_rates_are_allowed() {
        assert!(
            ensure_non_negative_rates(&[
                ("base_fare", Some(0.0)),
                ("per_minute_rate", Some(0.0)),
                ("surge_multiplier", None),
            ])
            .is_ok()
        );
    }
}
