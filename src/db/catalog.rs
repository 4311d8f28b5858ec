//! Admin-curated catalog: categories, services, sub-services and vehicle
//! fare profiles. These are the only entities the API hard-deletes.

use sea_orm::*;
use uuid::Uuid;

use crate::models::categories::{self, CreateCategory, UpdateCategory};
use crate::models::services::{self, CreateService, UpdateService};
use crate::models::sub_services::{self, CreateSubService};
use crate::models::vehicle_types::{self, CreateVehicleType, UpdateVehicleType};

// ── Categories ──

pub async fn insert_category(
    db: &DatabaseConnection,
    input: CreateCategory,
) -> Result<categories::Model, DbErr> {
    categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        is_active: Set(input.is_active.unwrap_or(true)),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(db)
    .await
}

pub async fn get_active_categories(
    db: &DatabaseConnection,
) -> Result<Vec<categories::Model>, DbErr> {
    categories::Entity::find()
        .filter(categories::Column::IsActive.eq(true))
        .all(db)
        .await
}

pub async fn get_category_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<categories::Model>, DbErr> {
    categories::Entity::find_by_id(id).one(db).await
}

pub async fn update_category(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateCategory,
) -> Result<categories::Model, DbErr> {
    let category = categories::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Category not found".to_string()))?;

    let mut active: categories::ActiveModel = category.into();
    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(is_active) = input.is_active {
        active.is_active = Set(is_active);
    }
    active.update(db).await
}

pub async fn delete_category(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    categories::Entity::delete_by_id(id).exec(db).await
}

// ── Services ──

pub async fn insert_service(
    db: &DatabaseConnection,
    input: CreateService,
) -> Result<services::Model, DbErr> {
    services::ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(input.category_id),
        name: Set(input.name),
        price: Set(input.price),
        is_active: Set(input.is_active.unwrap_or(true)),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(db)
    .await
}

pub async fn get_services_by_category(
    db: &DatabaseConnection,
    category_id: Uuid,
) -> Result<Vec<services::Model>, DbErr> {
    services::Entity::find()
        .filter(services::Column::CategoryId.eq(category_id))
        .filter(services::Column::IsActive.eq(true))
        .all(db)
        .await
}

pub async fn get_service_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<services::Model>, DbErr> {
    services::Entity::find_by_id(id).one(db).await
}

pub async fn update_service(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateService,
) -> Result<services::Model, DbErr> {
    let service = services::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Service not found".to_string()))?;

    let mut active: services::ActiveModel = service.into();
    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(price) = input.price {
        active.price = Set(Some(price));
    }
    if let Some(is_active) = input.is_active {
        active.is_active = Set(is_active);
    }
    active.update(db).await
}

pub async fn delete_service(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    services::Entity::delete_by_id(id).exec(db).await
}

// ── Sub-services ──

pub async fn insert_sub_service(
    db: &DatabaseConnection,
    input: CreateSubService,
) -> Result<sub_services::Model, DbErr> {
    sub_services::ActiveModel {
        id: Set(Uuid::new_v4()),
        service_id: Set(input.service_id),
        name: Set(input.name),
        is_active: Set(input.is_active.unwrap_or(true)),
    }
    .insert(db)
    .await
}

pub async fn get_sub_services_by_service(
    db: &DatabaseConnection,
    service_id: Uuid,
) -> Result<Vec<sub_services::Model>, DbErr> {
    sub_services::Entity::find()
        .filter(sub_services::Column::ServiceId.eq(service_id))
        .filter(sub_services::Column::IsActive.eq(true))
        .all(db)
        .await
}

pub async fn get_sub_service_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<sub_services::Model>, DbErr> {
    sub_services::Entity::find_by_id(id).one(db).await
}

pub async fn delete_sub_service(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    sub_services::Entity::delete_by_id(id).exec(db).await
}

// ── Vehicle types / fare profiles ──

pub async fn insert_vehicle_type(
    db: &DatabaseConnection,
    input: CreateVehicleType,
) -> Result<vehicle_types::Model, DbErr> {
    vehicle_types::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(input.name),
        base_fare: Set(input.base_fare),
        per_km_rate: Set(input.per_km_rate),
        per_minute_rate: Set(input.per_minute_rate.unwrap_or(0.0)),
        night_surcharge_rate: Set(input.night_surcharge_rate.unwrap_or(0.2)),
        surge_multiplier: Set(input.surge_multiplier.unwrap_or(1.0)),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
    }
    .insert(db)
    .await
}

pub async fn get_active_vehicle_types(
    db: &DatabaseConnection,
) -> Result<Vec<vehicle_types::Model>, DbErr> {
    vehicle_types::Entity::find()
        .filter(vehicle_types::Column::IsActive.eq(true))
        .all(db)
        .await
}

pub async fn get_vehicle_type_by_id<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<Option<vehicle_types::Model>, DbErr> {
    vehicle_types::Entity::find_by_id(id).one(db).await
}

pub async fn update_vehicle_type(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateVehicleType,
) -> Result<vehicle_types::Model, DbErr> {
    let vehicle_type = vehicle_types::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Vehicle type not found".to_string()))?;

    let mut active: vehicle_types::ActiveModel = vehicle_type.into();
    if let Some(name) = input.name {
        active.name = Set(name);
    }
    if let Some(base_fare) = input.base_fare {
        active.base_fare = Set(base_fare);
    }
    if let Some(per_km_rate) = input.per_km_rate {
        active.per_km_rate = Set(per_km_rate);
    }
    if let Some(per_minute_rate) = input.per_minute_rate {
        active.per_minute_rate = Set(per_minute_rate);
    }
    if let Some(rate) = input.night_surcharge_rate {
        active.night_surcharge_rate = Set(rate);
    }
    if let Some(surge) = input.surge_multiplier {
        active.surge_multiplier = Set(surge);
    }
    if let Some(is_active) = input.is_active {
        active.is_active = Set(is_active);
    }
    active.update(db).await
}

pub async fn delete_vehicle_type(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    vehicle_types::Entity::delete_by_id(id).exec(db).await
}
