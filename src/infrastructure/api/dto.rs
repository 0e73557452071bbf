//! Wire DTOs for the rewards backend.
//!
//! The backend contract is a single opaque JSON shape; these types mirror it
//! without interpretation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SigninBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SigninResponseBody {
    pub success: bool,
    #[serde(default)]
    pub session: Option<SessionBody>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionBody {
    pub token: String,
    pub member_id: String,
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusResponseBody {
    pub success: bool,
    #[serde(default)]
    pub points: u64,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signin_response_with_session() {
        let body: SigninResponseBody = serde_json::from_str(
            r#"{"success":true,"session":{"token":"t-1","member_id":"m-1","display_name":"Alice"}}"#,
        )
        .unwrap();
        assert!(body.success);
        assert_eq!(body.session.unwrap().member_id, "m-1");
        assert!(body.message.is_none());
    }

    #[test]
    fn test_rejection_carries_message_only() {
        let body: SigninResponseBody =
            serde_json::from_str(r#"{"success":false,"message":"bad credentials"}"#).unwrap();
        assert!(!body.success);
        assert!(body.session.is_none());
        assert_eq!(body.message.as_deref(), Some("bad credentials"));
    }

    #[test]
    fn test_status_defaults_when_fields_missing() {
        let body: StatusResponseBody = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert_eq!(body.points, 0);
        assert!(body.tier.is_none());
    }
}
