use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Claims {
    exp: i64,
}

/// Extracts the `exp` claim from a JWT-shaped token.
///
/// The signature is not checked here; the server remains the authority. This
/// only lets the client discard a token that is already past its expiry
/// without a network round trip. Returns `None` for opaque tokens or tokens
/// without a readable `exp` claim.
pub fn expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut segments = token.split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return None,
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp, 0)
}

/// Returns `true` only when the token carries an `exp` claim in the past.
/// Tokens without a readable claim are left for the server to judge.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    expiry(token).is_some_and(|exp| exp <= now)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"exp":{exp}}}"#));
        format!("{header}.{payload}.sig")
    }

    #[test]
    fn reads_exp_claim() {
        let token = jwt_with_exp(1_700_000_000);
        assert_eq!(
            expiry(&token),
            DateTime::from_timestamp(1_700_000_000, 0)
        );
    }

    #[test]
    fn expired_token_is_flagged() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert!(is_expired(&jwt_with_exp(1_600_000_000), now));
        assert!(!is_expired(&jwt_with_exp(1_800_000_000), now));
    }

    #[test]
    fn opaque_token_has_no_expiry() {
        assert_eq!(expiry("not-a-jwt"), None);
        let now = Utc::now();
        assert!(!is_expired("not-a-jwt", now));
    }
}
