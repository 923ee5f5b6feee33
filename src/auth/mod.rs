use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub mod password;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(username: impl Into<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: username.into(),
            iat: now.timestamp(),
            exp,
        }
    }
}

pub fn generate_token(claims: &Claims, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())?;
    Ok(token_data.claims)
}

/// Signature-and-expiry check, used by both the gateway layer and the
/// auth service's own diagnostic endpoint.
pub fn validate_token(token: &str, secret: &str) -> bool {
    decode_token(token, secret).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-that-is-long-enough!!";

    #[test]
    fn fresh_token_validates() {
        let claims = Claims::new("ana", 1);
        let token = generate_token(&claims, SECRET).unwrap();

        assert!(validate_token(&token, SECRET));

        let decoded = decode_token(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, "ana");
    }

    #[test]
    fn expired_token_is_rejected() {
        // Past the default 60s decode leeway
        let now = Utc::now();
        let claims = Claims {
            sub: "ana".to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = generate_token(&claims, SECRET).unwrap();

        assert!(!validate_token(&token, SECRET));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let claims = Claims::new("ana", 1);
        let token = generate_token(&claims, SECRET).unwrap();

        assert!(!validate_token(&token, "another-secret-that-is-long-enough!!!"));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(!validate_token("not.a.jwt", SECRET));
    }
}
