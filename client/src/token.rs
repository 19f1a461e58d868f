//! Access-token expiry decoding.
//!
//! The client does not hold the signing secret, so it cannot verify tokens;
//! it only needs the `exp` claim out of the payload segment to know when to
//! renew. Verification stays the server's job.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::ClientError;

/// Extracts the embedded expiry from a JWT without verifying it.
pub fn decode_expiry(token: &str) -> Result<DateTime<Utc>, ClientError> {
    let payload = token.split('.').nth(1).ok_or(ClientError::MalformedToken)?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| ClientError::MalformedToken)?;
    let claims: Value =
        serde_json::from_slice(&bytes).map_err(|_| ClientError::MalformedToken)?;

    let exp = claims
        .get("exp")
        .and_then(Value::as_i64)
        .ok_or(ClientError::MalformedToken)?;

    Utc.timestamp_opt(exp, 0)
        .single()
        .ok_or(ClientError::MalformedToken)
}

#[cfg(test)]
pub(crate) fn make_unsigned_token(exp: i64) -> String {
    use serde_json::json;
    let header = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&json!({"alg":"HS256","typ":"JWT"})).unwrap());
    let payload = URL_SAFE_NO_PAD
        .encode(serde_json::to_vec(&json!({"sub": 1, "name": "alice", "exp": exp})).unwrap());
    format!("{header}.{payload}.sig")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_the_embedded_expiry() {
        let token = make_unsigned_token(1_900_000_000);
        let expiry = decode_expiry(&token).unwrap();
        assert_eq!(expiry.timestamp(), 1_900_000_000);
    }

    #[test]
    fn rejects_a_token_without_segments() {
        assert!(matches!(
            decode_expiry("garbage"),
            Err(ClientError::MalformedToken)
        ));
    }

    #[test]
    fn rejects_a_payload_without_exp() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":1}"#);
        let token = format!("h.{payload}.s");
        assert!(matches!(
            decode_expiry(&token),
            Err(ClientError::MalformedToken)
        ));
    }
}
