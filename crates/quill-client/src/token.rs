//! Admin API token signing.
//!
//! The Admin surface authenticates every request with a short-lived HS256 JWT
//! whose key id is the public half of the admin key and whose signing key is
//! the hex-decoded secret half. Tokens are signed per call and never cached.

use std::fmt;
use std::str::FromStr;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// Audience claim expected by the Admin surface.
pub const TOKEN_AUDIENCE: &str = "/admin/";

/// Longest token lifetime the platform accepts.
pub const MAX_EXPIRY_MINUTES: f64 = 5.0;

/// Scheme prefix of the `Authorization` header value.
pub const AUTH_SCHEME: &str = "Ghost";

/// An admin API key in `id:secret` form.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminKey {
    id: String,
    secret_hex: String,
}

impl AdminKey {
    /// Parse an `id:secret` key, splitting at the first colon.
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        if raw.is_empty() {
            return Err(AuthError::EmptyKey);
        }
        let (id, secret) = raw.split_once(':').ok_or(AuthError::MissingSeparator)?;
        if id.is_empty() {
            return Err(AuthError::EmptyId);
        }
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }
        if !secret.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(AuthError::InvalidSecret);
        }
        Ok(Self {
            id: id.to_string(),
            secret_hex: secret.to_string(),
        })
    }

    /// The key id, sent as the token's `kid` header.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The hex-encoded secret.
    pub fn secret_hex(&self) -> &str {
        &self.secret_hex
    }
}

impl FromStr for AdminKey {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Keep the secret out of logs.
impl fmt::Debug for AdminKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminKey")
            .field("id", &self.id)
            .field("secret_hex", &"<redacted>")
            .finish()
    }
}

/// Decode a hex secret into raw key bytes.
pub fn decode_secret(hex: &str) -> Result<Vec<u8>, AuthError> {
    hex::decode(hex).map_err(|_| AuthError::InvalidSecret)
}

/// JOSE header of an admin token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub kid: String,
    pub typ: String,
}

/// Claims of an admin token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issued-at, whole epoch seconds.
    pub iat: i64,
    /// Expiry, whole epoch seconds.
    pub exp: i64,
    pub aud: String,
}

/// Options for token generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenOptions {
    /// Token lifetime in minutes, above 0 and at most [`MAX_EXPIRY_MINUTES`].
    /// Fractions are allowed and rounded to whole seconds.
    pub expires_in_minutes: f64,
}

impl Default for TokenOptions {
    fn default() -> Self {
        Self {
            expires_in_minutes: MAX_EXPIRY_MINUTES,
        }
    }
}

impl TokenOptions {
    /// Options with the given lifetime.
    pub fn expires_in(minutes: f64) -> Self {
        Self {
            expires_in_minutes: minutes,
        }
    }
}

/// Sign a fresh token issued now.
pub fn generate_token(key: &AdminKey, options: &TokenOptions) -> Result<String, AuthError> {
    generate_token_at(key, options, chrono::Utc::now().timestamp())
}

/// Sign a token with an explicit issue time (epoch seconds).
pub fn generate_token_at(
    key: &AdminKey,
    options: &TokenOptions,
    issued_at: i64,
) -> Result<String, AuthError> {
    let minutes = options.expires_in_minutes;
    let invalid = || AuthError::InvalidExpiry {
        minutes,
        max: MAX_EXPIRY_MINUTES,
    };
    if !minutes.is_finite() || minutes <= 0.0 || minutes > MAX_EXPIRY_MINUTES {
        return Err(invalid());
    }
    let lifetime_secs = (minutes * 60.0).round() as i64;
    let expires_at = issued_at.checked_add(lifetime_secs).ok_or_else(invalid)?;
    let secret = decode_secret(key.secret_hex())?;

    let header = TokenHeader {
        alg: "HS256".to_string(),
        kid: key.id().to_string(),
        typ: "JWT".to_string(),
    };
    let claims = TokenClaims {
        iat: issued_at,
        exp: expires_at,
        aud: TOKEN_AUDIENCE.to_string(),
    };

    let signing_input = format!("{}.{}", encode_segment(&header)?, encode_segment(&claims)?);
    let mut mac = HmacSha256::new_from_slice(&secret).map_err(|_| AuthError::InvalidSecret)?;
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    Ok(format!("{}.{}", signing_input, signature))
}

/// The full `Authorization` header value: `Ghost <token>`.
pub fn authorization_value(key: &AdminKey, options: &TokenOptions) -> Result<String, AuthError> {
    Ok(format!("{} {}", AUTH_SCHEME, generate_token(key, options)?))
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, AuthError> {
    let json = serde_json::to_vec(value).map_err(|e| AuthError::Encoding(e.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "6470e5adf7b2e800012f0001:a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4e5f6a1b2";

    fn key() -> AdminKey {
        AdminKey::parse(KEY).unwrap()
    }

    fn decode<T: serde::de::DeserializeOwned>(segment: &str) -> T {
        serde_json::from_slice(&URL_SAFE_NO_PAD.decode(segment).unwrap()).unwrap()
    }

    #[test]
    fn test_parse_splits_at_first_colon() {
        let key = key();
        assert_eq!(key.id(), "6470e5adf7b2e800012f0001");
        assert!(key.secret_hex().starts_with("a1b2"));
    }

    #[test]
    fn test_parse_second_colon_belongs_to_secret() {
        assert_eq!(AdminKey::parse("id:abcd:ef"), Err(AuthError::InvalidSecret));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(AdminKey::parse(""), Err(AuthError::EmptyKey));
        assert_eq!(AdminKey::parse("noseparator"), Err(AuthError::MissingSeparator));
        assert_eq!(AdminKey::parse(":abcd"), Err(AuthError::EmptyId));
        assert_eq!(AdminKey::parse("id:"), Err(AuthError::EmptySecret));
        assert_eq!(AdminKey::parse("id:xyz"), Err(AuthError::InvalidSecret));
    }

    #[test]
    fn test_parse_accepts_uppercase_hex() {
        let key: AdminKey = "abc:DEADbeef".parse().unwrap();
        assert_eq!(key.secret_hex(), "DEADbeef");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let debug = format!("{:?}", key());
        assert!(debug.contains("6470e5adf7b2e800012f0001"));
        assert!(!debug.contains("a1b2c3"));
    }

    #[test]
    fn test_decode_secret() {
        assert_eq!(decode_secret("").unwrap(), Vec::<u8>::new());
        assert_eq!(decode_secret("00ff10").unwrap(), vec![0x00, 0xff, 0x10]);
        assert!(decode_secret("abc").is_err());
    }

    #[test]
    fn test_token_structure() {
        let token = generate_token_at(&key(), &TokenOptions::default(), 1_700_000_000).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        assert_eq!(parts.len(), 3);

        let header: TokenHeader = decode(parts[0]);
        assert_eq!(header.alg, "HS256");
        assert_eq!(header.kid, "6470e5adf7b2e800012f0001");
        assert_eq!(header.typ, "JWT");

        let claims: TokenClaims = decode(parts[1]);
        assert_eq!(claims.iat, 1_700_000_000);
        assert_eq!(claims.exp, 1_700_000_300);
        assert_eq!(claims.aud, "/admin/");
    }

    #[test]
    fn test_token_signature_verifies() {
        let key = key();
        let token = generate_token_at(&key, &TokenOptions::default(), 1_700_000_000).unwrap();
        let (signing_input, signature) = token.rsplit_once('.').unwrap();

        let mut mac = HmacSha256::new_from_slice(&decode_secret(key.secret_hex()).unwrap()).unwrap();
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&URL_SAFE_NO_PAD.decode(signature).unwrap())
            .unwrap();
    }

    #[test]
    fn test_expiry_window_for_each_valid_lifetime() {
        for minutes in 1..=5 {
            let options = TokenOptions::expires_in(f64::from(minutes));
            let token = generate_token(&key(), &options).unwrap();
            let claims: TokenClaims = decode(token.split('.').nth(1).unwrap());
            assert_eq!(claims.exp - claims.iat, i64::from(minutes) * 60);
        }
    }

    #[test]
    fn test_fractional_lifetimes() {
        for (minutes, seconds) in [(0.5, 30), (2.5, 150), (0.01, 1), (5.0, 300)] {
            let token =
                generate_token_at(&key(), &TokenOptions::expires_in(minutes), 1_700_000_000)
                    .unwrap();
            let claims: TokenClaims = decode(token.split('.').nth(1).unwrap());
            assert_eq!(claims.exp - claims.iat, seconds, "{} minutes", minutes);
        }
    }

    #[test]
    fn test_expiry_out_of_range() {
        for minutes in [0.0, -1.0, 5.0001, 6.0, 60.0, f64::NAN, f64::INFINITY] {
            let err = generate_token(&key(), &TokenOptions::expires_in(minutes)).unwrap_err();
            assert!(matches!(err, AuthError::InvalidExpiry { .. }), "{}", minutes);
        }
    }

    #[test]
    fn test_expiry_overflow_is_rejected() {
        let err = generate_token_at(&key(), &TokenOptions::default(), i64::MAX - 10).unwrap_err();
        assert!(matches!(err, AuthError::InvalidExpiry { .. }));
    }

    #[test]
    fn test_issued_at_is_whole_seconds() {
        let token = generate_token(&key(), &TokenOptions::default()).unwrap();
        let claims: serde_json::Value = decode(token.split('.').nth(1).unwrap());
        let iat = claims["iat"].as_i64().unwrap();
        assert!(iat.to_string().len() <= 10);
        assert!(claims["iat"].is_i64());
    }

    #[test]
    fn test_authorization_value() {
        let value = authorization_value(&key(), &TokenOptions::default()).unwrap();
        let token = value.strip_prefix("Ghost ").unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_odd_length_secret_fails_at_signing() {
        let key = AdminKey::parse("id:abc").unwrap();
        assert_eq!(
            generate_token(&key, &TokenOptions::default()),
            Err(AuthError::InvalidSecret)
        );
    }
}
