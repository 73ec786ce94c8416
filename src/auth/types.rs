//! Request and response payloads of the `/auth` endpoints

use crate::models::wire;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Tokens and identity returned by login
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "token")]
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default, deserialize_with = "wire::id_string_opt")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// Token pair returned by refresh
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    #[serde(alias = "token")]
    pub access_token: String,
    pub refresh_token: String,
}

/// A reply that may or may not be wrapped in `{ "data": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Wrapped<T> {
    Data { data: T },
    Bare(T),
}

impl<T> Wrapped<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Data { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// The signed-in user as kept in the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "wire::id_string_opt", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, with = "wire::timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, with = "wire::timestamp_opt", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl UserProfile {
    /// Profile subset kept after login; the creation date is the login time
    #[must_use]
    pub fn from_login(response: &LoginResponse, now: DateTime<Utc>) -> Self {
        Self {
            user_id: response.user_id.clone(),
            email: response.email.clone(),
            first_name: response.first_name.clone(),
            last_name: response.last_name.clone(),
            created_date: Some(now),
            last_modified_date: None,
            role: None,
            user_name: None,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }

    /// Apply accepted profile changes
    pub fn apply(&mut self, changes: &ProfileChanges) {
        if let Some(first_name) = &changes.first_name {
            self.first_name.clone_from(first_name);
        }
        if let Some(last_name) = &changes.last_name {
            self.last_name.clone_from(last_name);
        }
        if let Some(email) = &changes.email {
            self.email.clone_from(email);
        }
    }
}

/// Profile update containing only the fields that changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileChanges {
    /// Keep the requested values that differ from `current`
    #[must_use]
    pub fn between(
        current: &UserProfile,
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
    ) -> Self {
        let changed = |value: Option<String>, old: &str| value.filter(|v| v != old);
        Self {
            first_name: changed(first_name, &current.first_name),
            last_name: changed(last_name, &current.last_name),
            email: changed(email, &current.email),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}

/// Generic `{ success, message, errors }` acknowledgement
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BaseResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub errors: Vec<String>,
}

const fn default_success() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_response_wrapped_or_bare() {
        let wrapped: Wrapped<LoginResponse> = serde_json::from_value(json!({
            "data": {
                "accessToken": "a", "refreshToken": "r", "userId": "u1",
                "email": "x@y.z", "firstName": "Ada", "lastName": "L"
            }
        }))
        .unwrap();
        let wrapped = wrapped.into_inner();
        assert_eq!(wrapped.access_token, "a");
        assert_eq!(wrapped.user_id.as_deref(), Some("u1"));

        let bare: Wrapped<LoginResponse> = serde_json::from_value(json!({
            "token": "t", "refreshToken": "r", "email": "x@y.z"
        }))
        .unwrap();
        assert_eq!(bare.into_inner().access_token, "t");
    }

    #[test]
    fn test_request_wire_names() {
        let body = serde_json::to_value(ChangePasswordRequest {
            current_password: "old".into(),
            new_password: "newpassword".into(),
            confirm_password: "newpassword".into(),
        })
        .unwrap();
        assert_eq!(body["currentPassword"], "old");
        assert_eq!(body["confirmPassword"], "newpassword");

        let body = serde_json::to_value(RefreshRequest {
            access_token: "a".into(),
            refresh_token: "r".into(),
        })
        .unwrap();
        assert_eq!(body, json!({ "accessToken": "a", "refreshToken": "r" }));
    }

    #[test]
    fn test_profile_changes_only_differences() {
        let profile: UserProfile = serde_json::from_value(json!({
            "email": "ada@example.com", "firstName": "Ada", "lastName": "Lovelace",
            "createdDate": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        let changes = ProfileChanges::between(
            &profile,
            Some("Ada".into()),
            Some("King".into()),
            None,
        );
        assert_eq!(
            serde_json::to_value(&changes).unwrap(),
            json!({ "lastName": "King" })
        );

        let none = ProfileChanges::between(&profile, Some("Ada".into()), None, None);
        assert!(none.is_empty());
    }

    #[test]
    fn test_profile_apply_and_name() {
        let mut profile = UserProfile::from_login(
            &LoginResponse {
                access_token: "a".into(),
                refresh_token: "r".into(),
                user_id: None,
                email: "ada@example.com".into(),
                first_name: String::new(),
                last_name: String::new(),
            },
            Utc::now(),
        );
        assert_eq!(profile.display_name(), "ada@example.com");

        profile.apply(&ProfileChanges {
            first_name: Some("Ada".into()),
            ..ProfileChanges::default()
        });
        assert_eq!(profile.display_name(), "Ada");
    }

    #[test]
    fn test_base_response_defaults() {
        let response: BaseResponse = serde_json::from_value(json!({ "message": "ok" })).unwrap();
        assert!(response.success);
        assert!(response.errors.is_empty());
    }
}
