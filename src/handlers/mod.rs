pub mod admin;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod partner_bookings;
pub mod partners;
pub mod users;

use actix_web::{HttpResponse, web};
use serde::Serialize;

/// Success envelope: `{"success": true, "data": ...}`.
pub(crate) fn ok(data: impl Serialize) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "success": true, "data": data }))
}

pub(crate) fn created(data: impl Serialize) -> HttpResponse {
    HttpResponse::Created().json(serde_json::json!({ "success": true, "data": data }))
}

pub(crate) fn message(msg: &str) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "success": true, "message": msg }))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Consumer routes ──
    cfg.service(
        web::scope("/user")
            .route("/auth/request-otp", web::post().to(auth::request_user_otp))
            .route("/auth/verify-otp", web::post().to(auth::verify_user_otp))
            .route("/me", web::get().to(users::me))
            .route("/me", web::put().to(users::update_profile))
            .route("/me/addresses", web::put().to(users::set_addresses))
            .route("/categories", web::get().to(catalog::list_categories))
            .route(
                "/categories/{id}/services",
                web::get().to(catalog::list_services),
            )
            .route(
                "/services/{id}/sub-services",
                web::get().to(catalog::list_sub_services),
            )
            .route("/vehicle-types", web::get().to(catalog::list_vehicle_types))
            .route("/partners/search", web::get().to(bookings::search_partners))
            .route(
                "/partners/{id}/reviews",
                web::get().to(bookings::get_partner_reviews),
            )
            .route("/fare-estimate", web::post().to(bookings::fare_estimate))
            .route("/bookings", web::post().to(bookings::create_booking))
            .route("/bookings", web::get().to(bookings::get_my_bookings))
            .route("/bookings/{id}", web::get().to(bookings::get_booking))
            .route("/bookings/{id}", web::put().to(bookings::edit_booking))
            .route("/bookings/{id}/cancel", web::post().to(bookings::cancel_booking))
            .route("/bookings/{id}/review", web::post().to(bookings::review_booking))
            .route("/bookings/{id}/chat", web::get().to(bookings::get_chat))
            .route("/bookings/{id}/chat", web::post().to(bookings::post_chat)),
    );

    // ── Partner routes ──
    cfg.service(
        web::scope("/partner")
            .route("/auth/request-otp", web::post().to(auth::request_partner_otp))
            .route("/auth/verify-otp", web::post().to(auth::verify_partner_otp))
            .route("/me", web::get().to(partners::me))
            .route("/me", web::put().to(partners::complete_profile))
            .route("/duty", web::post().to(partners::toggle_duty))
            .route("/location", web::post().to(partners::update_location))
            .route("/wallet", web::get().to(partners::get_wallet))
            .route(
                "/wallet/transactions",
                web::get().to(partners::get_wallet_transactions),
            )
            .route("/bookings", web::get().to(partner_bookings::get_my_bookings))
            .route(
                "/bookings/active",
                web::get().to(partner_bookings::get_active_bookings),
            )
            .route(
                "/bookings/{id}/accept",
                web::post().to(partner_bookings::accept_booking),
            )
            .route(
                "/bookings/{id}/reject",
                web::post().to(partner_bookings::reject_booking),
            )
            .route(
                "/bookings/{id}/start",
                web::post().to(partner_bookings::start_booking),
            )
            .route(
                "/bookings/{id}/complete",
                web::post().to(partner_bookings::complete_booking),
            )
            .route(
                "/bookings/{id}/pause",
                web::post().to(partner_bookings::pause_booking),
            )
            .route(
                "/bookings/{id}/resume",
                web::post().to(partner_bookings::resume_booking),
            )
            .route(
                "/bookings/{id}/chat",
                web::get().to(partner_bookings::get_chat),
            )
            .route(
                "/bookings/{id}/chat",
                web::post().to(partner_bookings::post_chat),
            ),
    );

    // ── Admin routes (role-gated by the AdminUser extractor) ──
    cfg.service(
        web::scope("/admin")
            .route("/users", web::get().to(admin::list_users))
            .route("/partners", web::get().to(admin::list_partners))
            .route("/partners/{id}/kyc", web::put().to(admin::set_kyc_status))
            .route("/categories", web::post().to(catalog::create_category))
            .route("/categories/{id}", web::put().to(catalog::update_category))
            .route("/categories/{id}", web::delete().to(catalog::delete_category))
            .route("/services", web::post().to(catalog::create_service))
            .route("/services/{id}", web::put().to(catalog::update_service))
            .route("/services/{id}", web::delete().to(catalog::delete_service))
            .route("/sub-services", web::post().to(catalog::create_sub_service))
            .route(
                "/sub-services/{id}",
                web::delete().to(catalog::delete_sub_service),
            )
            .route("/vehicle-types", web::post().to(catalog::create_vehicle_type))
            .route(
                "/vehicle-types/{id}",
                web::put().to(catalog::update_vehicle_type),
            )
            .route(
                "/vehicle-types/{id}",
                web::delete().to(catalog::delete_vehicle_type),
            )
            .route("/bookings", web::get().to(admin::list_bookings))
            .route("/bookings/{id}/assign", web::post().to(admin::assign_booking))
            .route(
                "/bookings/{id}/complete",
                web::post().to(admin::complete_booking),
            )
            .route(
                "/partners/{id}/wallet/recharge",
                web::post().to(admin::recharge_wallet),
            )
            .route(
                "/partners/{id}/wallet/debit",
                web::post().to(admin::debit_wallet),
            ),
    );
}
