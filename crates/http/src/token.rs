//! Unverified bearer-token inspection
//!
//! Decodes the payload segment of a compact token and derives
//! human-readable expiry facts for display. No signature verification
//! happens here; this is a debugging aid, not a trust boundary.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Local, TimeZone, Utc};
use serde_json::{Map, Value};

/// Placeholder rendered when a claim needed for display is absent.
pub const NOT_AVAILABLE: &str = "n/a";

/// Claims decoded from a token's payload segment.
///
/// Unknown keys are preserved so the frontend can render the full
/// mapping; the recognized keys (`exp`, `iat`, `sub`) get typed
/// accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct Claims(Map<String, Value>);

impl Claims {
    /// Decode the payload (second) segment of a dot-separated
    /// base64url token into a claims mapping.
    ///
    /// The input is untrusted. Any malformation (fewer than two
    /// segments, invalid base64url, invalid JSON, non-object payload)
    /// yields `None` rather than a partial mapping.
    pub fn decode(token: &str) -> Option<Self> {
        let payload = token.split('.').nth(1)?;
        // Token segments are unpadded base64url; tolerate stray padding.
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Object(map)) => Some(Self(map)),
            Ok(_) => {
                debug!("token payload is not a JSON object");
                None
            }
            Err(err) => {
                debug!(%err, "token payload is not valid JSON");
                None
            }
        }
    }

    /// Expiry instant in epoch seconds, if present.
    pub fn exp(&self) -> Option<i64> {
        self.epoch_seconds("exp")
    }

    /// Issuance instant in epoch seconds, if present.
    pub fn iat(&self) -> Option<i64> {
        self.epoch_seconds("iat")
    }

    /// Subject (user identifier), if present.
    pub fn sub(&self) -> Option<&str> {
        self.0.get("sub").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Numeric claims may arrive as integers or floats; floor floats.
    fn epoch_seconds(&self, key: &str) -> Option<i64> {
        let value = self.0.get(key)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|secs| secs as i64))
    }
}

/// Display-ready facts derived from a token's time claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryFacts {
    pub issued_at: String,
    pub expires_at: String,
    pub time_remaining: String,
}

impl ExpiryFacts {
    /// Derive facts relative to the current instant.
    ///
    /// Pure and stateless; callers wanting a live countdown re-invoke
    /// this on a timer.
    pub fn derive(claims: &Claims) -> Self {
        Self::derive_at(claims, Utc::now().timestamp())
    }

    /// Derive facts relative to `now` in epoch seconds.
    pub fn derive_at(claims: &Claims, now: i64) -> Self {
        Self {
            issued_at: format_instant(claims.iat()),
            expires_at: format_instant(claims.exp()),
            time_remaining: format_remaining(claims.exp(), now),
        }
    }
}

fn format_instant(epoch_secs: Option<i64>) -> String {
    epoch_secs
        .and_then(|secs| Local.timestamp_opt(secs, 0).single())
        .map_or_else(
            || NOT_AVAILABLE.to_string(),
            |instant| instant.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
}

fn format_remaining(exp: Option<i64>, now: i64) -> String {
    let Some(exp) = exp else {
        return NOT_AVAILABLE.to_string();
    };
    // Claims are untrusted; an absurd exp must not overflow.
    let remaining = exp.saturating_sub(now);
    if remaining <= 0 {
        return "Expired".to_string();
    }
    let minutes = remaining / 60;
    let seconds = remaining % 60;
    if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
