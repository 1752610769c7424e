//! Caller identity and ownership
//!
//! The request layer resolves the caller from a bearer token and applies
//! one ownership predicate before touching an existing shift.

use auth::{decode_token, JwtConfig};
use error::AuthError;

use crate::models::Shift;

/// Resolve the authenticated user id from a bearer token.
pub fn caller_id(token: &str, config: &JwtConfig) -> Result<String, AuthError> {
    let claims = decode_token(token, &config.secret, &config.issuer)?;
    Ok(claims.sub)
}

/// Whether the shift belongs to the given user.
pub fn owns(shift: &Shift, user_id: &str) -> bool {
    shift.user_id == user_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{encode_token, Claims};
    use chrono::NaiveDate;

    #[test]
    fn test_caller_id_round_trip() {
        let config = JwtConfig::new("test-secret", "shift-tracker", 3600);
        let claims = Claims::new("user42", &config.issuer, config.expires_in_secs);
        let token = encode_token(&claims, &config.secret).unwrap();

        assert_eq!(caller_id(&token, &config).unwrap(), "user42");
    }

    #[test]
    fn test_caller_id_rejects_garbage_token() {
        let config = JwtConfig::new("test-secret", "shift-tracker", 3600);

        assert!(matches!(
            caller_id("not-a-token", &config),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_owns() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let shift = Shift::new("user1".to_string(), date, 8.0, 0.0, 0.0);

        assert!(owns(&shift, "user1"));
        assert!(!owns(&shift, "user2"));
    }
}
