//! Zhipu authentication
//!
//! The model-api authenticates every request with a short-lived JWT signed
//! from an API key of the form `id.secret`. The token header carries the
//! vendor-specific `sign_type` field, so the compact JWS is assembled by hand
//! (base64url segments, HMAC-SHA256 signature) rather than through a generic
//! JWT library whose header shape is fixed.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha2::Sha256;
use std::sync::Mutex;
use std::time::Duration;
use wonton_core::error::LlmError;

type HmacSha256 = Hmac<Sha256>;

/// Re-sign this long before the cached token expires.
const EXPIRY_SAFETY_WINDOW_MS: i64 = 30_000;

/// Parsed `id.secret` API key.
#[derive(Debug, Clone)]
pub struct ApiKeyPair {
    /// Public key id, sent in the token claims
    pub key_id: String,
    secret: SecretString,
}

impl ApiKeyPair {
    /// Split an API key at the first `.` into its id and secret halves.
    pub fn parse(api_key: &SecretString) -> Result<Self, LlmError> {
        let raw = api_key.expose_secret();
        let (key_id, secret) = raw.split_once('.').ok_or_else(|| {
            LlmError::AuthenticationError(
                "Zhipu API key must have the form `id.secret`".to_string(),
            )
        })?;
        if key_id.is_empty() || secret.is_empty() {
            return Err(LlmError::AuthenticationError(
                "Zhipu API key must have the form `id.secret`".to_string(),
            ));
        }
        Ok(Self {
            key_id: key_id.to_string(),
            secret: SecretString::from(secret.to_string()),
        })
    }
}

/// Token claims. `exp` and `timestamp` are milliseconds since the epoch, per
/// the vendor protocol.
#[derive(Debug, Serialize)]
struct Claims<'a> {
    api_key: &'a str,
    exp: i64,
    timestamp: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    exp_unix_ms: i64,
}

/// Signs model-api tokens and caches them until shortly before expiry.
#[derive(Debug)]
pub struct TokenSigner {
    api_key: SecretString,
    ttl_ms: i64,
    cache: Mutex<Option<CachedToken>>,
}

impl TokenSigner {
    /// Create a signer for the given raw API key. The key is validated on
    /// first use, not here.
    pub fn new(api_key: SecretString, ttl: Duration) -> Self {
        Self {
            api_key,
            ttl_ms: ttl.as_millis() as i64,
            cache: Mutex::new(None),
        }
    }

    /// Return a signed token, reusing the cached one while it remains valid.
    pub fn token(&self) -> Result<String, LlmError> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        if let Some(token) = self.cached_token(now_ms) {
            return Ok(token);
        }
        let (token, exp_unix_ms) = self.sign(now_ms)?;
        if let Ok(mut guard) = self.cache.lock() {
            *guard = Some(CachedToken {
                token: token.clone(),
                exp_unix_ms,
            });
        }
        Ok(token)
    }

    fn cached_token(&self, now_ms: i64) -> Option<String> {
        let guard = self.cache.lock().ok()?;
        let cached = guard.as_ref()?;
        if cached.exp_unix_ms - EXPIRY_SAFETY_WINDOW_MS > now_ms {
            return Some(cached.token.clone());
        }
        None
    }

    /// Assemble and sign the compact JWS.
    fn sign(&self, now_ms: i64) -> Result<(String, i64), LlmError> {
        let key = ApiKeyPair::parse(&self.api_key)?;
        let exp = now_ms + self.ttl_ms;

        let header = serde_json::json!({ "alg": "HS256", "sign_type": "SIGN" });
        let claims = Claims {
            api_key: &key.key_id,
            exp,
            timestamp: now_ms,
        };

        let header_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&header)?);
        let claims_b64 = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signing_input = format!("{header_b64}.{claims_b64}");

        let mut mac = HmacSha256::new_from_slice(key.secret.expose_secret().as_bytes())
            .map_err(|e| LlmError::AuthenticationError(format!("Failed to key HMAC: {e}")))?;
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok((format!("{signing_input}.{signature}"), exp))
    }
}
