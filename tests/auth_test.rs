///! Integration test for JWT auth validation.
///!
///! Tokens are minted locally with the same HS256 secret the server would
///! use, then validated through `validate_token`. No running server or
///! database is needed.
///!
///! Run with: `cargo test --test auth_test`
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

use servana_backend::auth::jwt::{
    Claims, ROLE_ADMIN, ROLE_PARTNER, ROLE_USER, issue_token, validate_token,
};

/// A fake secret for testing — never use the real one in tests committed to git.
const TEST_SECRET: &str = "test-secret-at-least-256-bits-long-for-hs256-xxxxxxx";

#[test]
fn test_issued_token_round_trips() {
    let id = Uuid::new_v4();
    let token = issue_token(id, ROLE_USER, "+15551234567", TEST_SECRET).unwrap();

    let claims = validate_token(&token, TEST_SECRET).expect("Token should be valid");

    assert_eq!(claims.sub, id.to_string());
    assert_eq!(claims.role, ROLE_USER);
    assert_eq!(claims.phone, "+15551234567");
    assert_eq!(claims.principal_id().unwrap(), id);
}

#[test]
fn test_partner_and_admin_roles_survive_round_trip() {
    for role in [ROLE_PARTNER, ROLE_ADMIN] {
        let token = issue_token(Uuid::new_v4(), role, "+15550000000", TEST_SECRET).unwrap();
        let claims = validate_token(&token, TEST_SECRET).unwrap();
        assert_eq!(claims.role, role);
    }
}

#[test]
fn test_expired_token_is_rejected() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: Uuid::new_v4().to_string(),
        role: ROLE_USER.to_string(),
        phone: "+15551234567".to_string(),
        exp: now - 300, // expired 5 minutes ago (well past the 60s default leeway)
        iat: now - 3600,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let result = validate_token(&token, TEST_SECRET);
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("ExpiredSignature"));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = issue_token(
        Uuid::new_v4(),
        ROLE_PARTNER,
        "+15557654321",
        TEST_SECRET,
    )
    .unwrap();

    let result = validate_token(&token, "completely-wrong-secret-xxxxxxxxxxxxxxxxxxx");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("InvalidSignature"));
}

#[test]
fn test_garbage_token_is_rejected() {
    let result = validate_token("not.a.valid.jwt", TEST_SECRET);
    assert!(result.is_err());
}

#[test]
fn test_non_uuid_subject_is_rejected_by_principal_id() {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        sub: "not-a-uuid".to_string(),
        role: ROLE_USER.to_string(),
        phone: "+15551234567".to_string(),
        exp: now + 3600,
        iat: now,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    // Signature and expiry are fine; the subject is not a valid principal.
    let decoded = validate_token(&token, TEST_SECRET).unwrap();
    assert!(decoded.principal_id().is_err());
}
