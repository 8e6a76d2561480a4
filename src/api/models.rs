/// Request and response types shared with the backend
///
/// Field names match the server's JSON exactly, so plain serde derives
/// are enough. Timestamps come back as naive UTC datetimes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Opaque bearer credential returned by login/register.
///
/// Authenticated calls take this explicitly; there is no process-wide
/// default header anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(raw: impl Into<String>) -> Self {
        AuthToken(raw.into())
    }

    /// The raw token, for `Authorization: Bearer` attachment
    pub fn secret(&self) -> &str {
        &self.0
    }

    /// Full value of the Authorization header
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

/// A registered account as the server reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub created_at: NaiveDateTime,
}

/// Successful answer from the login and register endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub user: User,
}

/// One stored image, as returned by the list and upload endpoints.
/// `image_data` is the base64-encoded payload; combined with
/// `content_type` it is everything needed to display the image without a
/// separate fetch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRecord {
    pub id: String,
    pub filename: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub is_private: bool,
    pub image_data: String,
    pub content_type: String,
    #[serde(default)]
    pub file_size: u64,
    pub created_at: NaiveDateTime,
}

/// Body for POST /api/login
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body for POST /api/register
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Everything needed for one multipart upload call
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
    pub caption: String,
    pub is_private: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_token_header_value() {
        let token = AuthToken::new("tok1");
        assert_eq!(token.secret(), "tok1");
        assert_eq!(token.header_value(), "Bearer tok1");
    }

    #[test]
    fn test_auth_response_decodes() {
        let json = r#"{
            "access_token": "tok1",
            "token_type": "bearer",
            "user": {
                "id": "u1",
                "username": "alice",
                "email": "alice@example.com",
                "created_at": "2026-08-05T10:30:00.123456"
            }
        }"#;

        let response: AuthResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "tok1");
        assert_eq!(response.user.username, "alice");
    }

    #[test]
    fn test_image_record_decodes() {
        let json = r#"{
            "id": "i1",
            "filename": "cat.jpg",
            "caption": "A cat",
            "is_private": false,
            "image_data": "aGVsbG8=",
            "content_type": "image/jpeg",
            "file_size": 5,
            "created_at": "2026-08-05T10:30:00"
        }"#;

        let image: ImageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(image.id, "i1");
        assert_eq!(image.content_type, "image/jpeg");
        assert!(!image.is_private);
        assert_eq!(image.file_size, 5);
    }

    #[test]
    fn test_image_record_defaults_optional_fields() {
        // Caption and the privacy flag have server-side defaults; a
        // minimal record must still decode.
        let json = r#"{
            "id": "i2",
            "filename": "dog.png",
            "image_data": "aGVsbG8=",
            "content_type": "image/png",
            "created_at": "2026-08-05T10:30:00"
        }"#;

        let image: ImageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(image.caption, "");
        assert!(!image.is_private);
        assert_eq!(image.file_size, 0);
    }
}
