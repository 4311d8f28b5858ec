//! Narrow interfaces to external collaborators: push notifications, OTP SMS
//! delivery and road-distance lookup. Each has one HTTP implementation and a
//! logging no-op used when the collaborator is not configured. Failures are
//! logged by the caller and never retried.

use async_trait::async_trait;
use serde_json::Value;

use crate::booking::geo::{GeoPoint, haversine_km};
use crate::error::ApiError;

#[async_trait]
pub trait PushNotifier: Send + Sync {
    async fn send(&self, device_token: &str, title: &str, body: &str, data: Value)
    -> Result<(), ApiError>;
}

#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send(&self, phone: &str, code: &str) -> Result<(), ApiError>;
}

#[async_trait]
pub trait DistanceClient: Send + Sync {
    /// Road distance in kilometers between two points.
    async fn distance_km(&self, origin: GeoPoint, dest: GeoPoint) -> Result<f64, ApiError>;
}

/// Push delivery via an HTTP webhook (FCM-style relay).
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl WebhookNotifier {
    pub fn new(url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            api_key,
        }
    }
}

#[async_trait]
impl PushNotifier for WebhookNotifier {
    async fn send(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        data: Value,
    ) -> Result<(), ApiError> {
        let payload = serde_json::json!({
            "to": device_token,
            "notification": { "title": title, "body": body },
            "data": data,
        });
        let resp = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ApiError::Dependency(format!("push delivery failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(ApiError::Dependency(format!(
                "push delivery rejected: {}",
                resp.status()
            )));
        }
        Ok(())
    }
}

/// Default when no push webhook is configured: log and succeed.
pub struct LogNotifier;

#[async_trait]
impl PushNotifier for LogNotifier {
    async fn send(
        &self,
        device_token: &str,
        title: &str,
        body: &str,
        _data: Value,
    ) -> Result<(), ApiError> {
        tracing::info!(%device_token, %title, %body, "push (log only)");
        Ok(())
    }
}

/// Default SMS sender: log the code instead of dispatching it.
pub struct LogSmsSender;

#[async_trait]
impl SmsSender for LogSmsSender {
    async fn send(&self, phone: &str, code: &str) -> Result<(), ApiError> {
        tracing::info!(%phone, %code, "otp sms (log only)");
        Ok(())
    }
}

/// Distance via an OSRM-style routing endpoint.
pub struct HttpDistanceClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDistanceClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

#[async_trait]
impl DistanceClient for HttpDistanceClient {
    async fn distance_km(&self, origin: GeoPoint, dest: GeoPoint) -> Result<f64, ApiError> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}?overview=false",
            self.base_url, origin.lng, origin.lat, dest.lng, dest.lat
        );
        let resp: Value = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Dependency(format!("distance lookup failed: {e}")))?
            .json()
            .await
            .map_err(|e| ApiError::Dependency(format!("distance response malformed: {e}")))?;
        resp["routes"][0]["distance"]
            .as_f64()
            .map(|meters| meters / 1000.0)
            .ok_or_else(|| ApiError::Dependency("distance response missing routes".to_string()))
    }
}

/// Fallback when no routing service is configured: straight-line distance.
pub struct HaversineDistance;

#[async_trait]
impl DistanceClient for HaversineDistance {
    async fn distance_km(&self, origin: GeoPoint, dest: GeoPoint) -> Result<f64, ApiError> {
        Ok(haversine_km(origin, dest))
    }
}
