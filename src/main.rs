use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use servana_backend::auth::middleware::JwtSecret;
use servana_backend::create_pool;
use servana_backend::handlers;
use servana_backend::notify::{
    DistanceClient, HaversineDistance, HttpDistanceClient, LogNotifier, LogSmsSender,
    PushNotifier, SmsSender, WebhookNotifier,
};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db = create_pool().await;
    let db_data = web::Data::new(db);

    let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let secret_data = web::Data::new(JwtSecret(jwt_secret));

    // Collaborators fall back to logging/haversine stand-ins when their
    // endpoints are not configured.
    let notifier: Arc<dyn PushNotifier> = match (
        std::env::var("PUSH_WEBHOOK_URL"),
        std::env::var("PUSH_API_KEY"),
    ) {
        (Ok(url), Ok(key)) => {
            tracing::info!(%url, "push notifications via webhook");
            Arc::new(WebhookNotifier::new(url, key))
        }
        _ => Arc::new(LogNotifier),
    };
    let notifier_data = web::Data::new(notifier);

    let sms: Arc<dyn SmsSender> = Arc::new(LogSmsSender);
    let sms_data = web::Data::new(sms);

    let distance: Arc<dyn DistanceClient> = match std::env::var("DISTANCE_API_URL") {
        Ok(url) => {
            tracing::info!(%url, "road distance via routing service");
            Arc::new(HttpDistanceClient::new(url))
        }
        Err(_) => Arc::new(HaversineDistance),
    };
    let distance_data = web::Data::new(distance);

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(secret_data.clone())
            .app_data(notifier_data.clone())
            .app_data(sms_data.clone())
            .app_data(distance_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
