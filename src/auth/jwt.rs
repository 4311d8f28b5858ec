use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Principal role carried in the token. Users and partners live in different
/// tables, so the role decides which extractor may accept the token.
pub const ROLE_USER: &str = "user";
pub const ROLE_PARTNER: &str = "partner";
pub const ROLE_ADMIN: &str = "admin";

/// Token lifetime in seconds (30 days — mobile clients stay signed in).
const TOKEN_TTL_SECS: usize = 30 * 24 * 3600;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User or partner UUID.
    pub sub: String,
    pub role: String,
    pub phone: String,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn principal_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("invalid subject: {e}"))
    }
}

/// Mint an HS256 token for a verified principal.
pub fn issue_token(id: Uuid, role: &str, phone: &str, secret: &str) -> Result<String, String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: id.to_string(),
        role: role.to_string(),
        phone: phone.to_string(),
        exp: now + TOKEN_TTL_SECS,
        iat: now,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("{e:?}"))
}

/// Validate signature and expiry, returning the claims.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| format!("{:?}", e.kind()))
}
