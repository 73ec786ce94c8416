//! Authentication session
//!
//! The session is an explicit state store. [`reduce`] is the only function
//! that computes a new [`AuthState`], and [`AuthSession::dispatch`] is the
//! only place that installs it; every operation below is expressed as a
//! sequence of [`AuthAction`]s around one API call. Dispatch also keeps the
//! API client's bearer token in step with the state.
//!
//! # Architecture
//!
//! ```text
//! login/register/...  ──▶  AuthAction  ──▶  reduce(state, action)  ──▶  AuthState
//!        │                                                              │
//!        └──── SessionStore (sled) ◀── persisted on success              └──▶ ApiClient token
//! ```

pub mod error;
pub mod password;
pub mod store;
pub mod types;

pub use error::{AuthError, StoreError};
pub use password::PasswordStrength;
pub use store::{SessionStore, StoredSession};
pub use types::{
    BaseResponse, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse,
    ProfileChanges, RefreshRequest, RegisterRequest, ResetPasswordRequest, TokenPair,
    UserProfile, Wrapped,
};

use crate::api::{ApiClient, ApiError, Method, Transport};
use crate::models::validation::{MIN_PASSWORD_LEN, check_new_password, require};
use crate::models::ValidationError;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;

pub const FORGOT_PASSWORD_SENT: &str =
    "Password reset instructions have been sent to your email address.";
pub const FORGOT_PASSWORD_FAILED: &str =
    "Failed to send reset instructions. Please check your email and try again.";
pub const RESET_PASSWORD_DONE: &str = "Password reset successfully!";
pub const RESET_PASSWORD_FAILED: &str =
    "Failed to reset password. The link may have expired. Please try again.";
pub const CHANGE_PASSWORD_DONE: &str = "Password changed successfully!";
pub const CHANGE_PASSWORD_FAILED: &str =
    "Failed to change password. Please check your current password and try again.";
pub const PROFILE_UPDATED: &str = "Profile updated successfully!";
pub const PROFILE_UPDATE_FAILED: &str = "Failed to update profile. Please try again.";
pub const ACCOUNT_ACTIVATED: &str = "Account activated successfully";

/// Phase of the session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Idle,
    Loading,
    Authenticated,
    Error(String),
}

/// Complete session state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthState {
    pub status: AuthStatus,
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    /// Last success notice, e.g. after a password reset
    pub notice: Option<String>,
}

impl AuthState {
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, AuthStatus::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            AuthStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Status once nothing is in flight
    fn settled(&self) -> AuthStatus {
        if self.is_authenticated() {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Idle
        }
    }
}

/// Every transition of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    LoginStart,
    LoginSuccess {
        user: UserProfile,
        token: String,
        refresh_token: String,
    },
    LoginFailure(String),
    Logout,
    RegisterStart,
    RegisterSuccess,
    RegisterFailure(String),
    RefreshSuccess {
        token: String,
        refresh_token: String,
    },
    /// Profile reloaded from the server
    ProfileLoaded(UserProfile),
    /// Profile changed by the user
    ProfileUpdated(UserProfile),
    /// Start of any other request
    RequestStart,
    /// Failure of any other request; credentials are kept
    RequestFailure(String),
    ChangePasswordSuccess,
    ForgotPasswordSuccess,
    ResetPasswordSuccess,
    ActivateSuccess,
    ClearError,
    SetLoading(bool),
}

/// Compute the state that follows `action`
#[must_use]
pub fn reduce(state: AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::LoginStart | AuthAction::RegisterStart | AuthAction::RequestStart => AuthState {
            status: AuthStatus::Loading,
            notice: None,
            ..state
        },
        AuthAction::LoginSuccess {
            user,
            token,
            refresh_token,
        } => AuthState {
            status: AuthStatus::Authenticated,
            user: Some(user),
            token: Some(token),
            refresh_token: Some(refresh_token),
            notice: None,
        },
        AuthAction::LoginFailure(message) | AuthAction::RegisterFailure(message) => AuthState {
            status: AuthStatus::Error(message),
            ..AuthState::default()
        },
        AuthAction::Logout => AuthState::default(),
        AuthAction::RegisterSuccess => {
            let status = state.settled();
            AuthState { status, ..state }
        }
        AuthAction::RefreshSuccess {
            token,
            refresh_token,
        } => AuthState {
            token: Some(token),
            refresh_token: Some(refresh_token),
            ..state
        },
        AuthAction::ProfileLoaded(user) => {
            let state = AuthState {
                user: Some(user),
                ..state
            };
            AuthState {
                status: state.settled(),
                ..state
            }
        }
        AuthAction::ProfileUpdated(user) => {
            let state = AuthState {
                user: Some(user),
                ..state
            };
            AuthState {
                status: state.settled(),
                notice: Some(PROFILE_UPDATED.to_string()),
                ..state
            }
        }
        AuthAction::RequestFailure(message) => AuthState {
            status: AuthStatus::Error(message),
            ..state
        },
        AuthAction::ChangePasswordSuccess => with_notice(state, CHANGE_PASSWORD_DONE),
        AuthAction::ForgotPasswordSuccess => with_notice(state, FORGOT_PASSWORD_SENT),
        AuthAction::ResetPasswordSuccess => with_notice(state, RESET_PASSWORD_DONE),
        AuthAction::ActivateSuccess => with_notice(state, ACCOUNT_ACTIVATED),
        AuthAction::ClearError => match state.status {
            AuthStatus::Error(_) => AuthState {
                status: state.settled(),
                ..state
            },
            _ => state,
        },
        AuthAction::SetLoading(true) => AuthState {
            status: AuthStatus::Loading,
            ..state
        },
        AuthAction::SetLoading(false) => AuthState {
            status: state.settled(),
            ..state
        },
    }
}

fn with_notice(state: AuthState, notice: &str) -> AuthState {
    AuthState {
        status: state.settled(),
        notice: Some(notice.to_string()),
        ..state
    }
}

fn decode<R: DeserializeOwned>(reply: Option<Value>, what: &str) -> Result<R, AuthError> {
    let value = reply.ok_or_else(|| ApiError::Rejected {
        message: format!("{what} response is empty"),
        errors: Vec::new(),
    })?;
    let wrapped: Wrapped<R> = serde_json::from_value(value).map_err(ApiError::from)?;
    Ok(wrapped.into_inner())
}

/// Fail on a `{ success: false }` acknowledgement
fn acknowledge(reply: Option<Value>) -> Result<Option<String>, AuthError> {
    let Some(value) = reply else {
        return Ok(None);
    };
    match serde_json::from_value::<BaseResponse>(value) {
        Ok(response) if !response.success => Err(ApiError::Rejected {
            message: response.message,
            errors: response.errors,
        }
        .into()),
        Ok(response) => Ok(Some(response.message).filter(|m| !m.is_empty())),
        Err(_) => Ok(None),
    }
}

/// The signed-in session and the operations that change it
pub struct AuthSession<T> {
    client: Arc<ApiClient<T>>,
    store: SessionStore,
    state: AuthState,
}

impl<T: Transport> AuthSession<T> {
    #[must_use]
    pub fn new(client: Arc<ApiClient<T>>, store: SessionStore) -> Self {
        Self {
            client,
            store,
            state: AuthState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AuthState {
        &self.state
    }

    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    #[must_use]
    pub const fn client(&self) -> &Arc<ApiClient<T>> {
        &self.client
    }

    /// Apply one transition
    pub fn dispatch(&mut self, action: AuthAction) {
        log::trace!("auth action: {action:?}");
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
        self.client.set_token(self.state.token.clone());
    }

    /// Run `request` between `RequestStart` and `RequestFailure`
    async fn tracked<V, F>(&mut self, fallback: &str, request: F) -> Result<V, AuthError>
    where
        F: Future<Output = Result<V, AuthError>>,
    {
        self.dispatch(AuthAction::RequestStart);
        let result = request.await;
        if let Err(err) = &result {
            self.dispatch(AuthAction::RequestFailure(err.message_or(fallback)));
        }
        result
    }

    /// Resume the stored session
    ///
    /// A corrupt stored profile clears the session instead of failing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store itself cannot be read.
    pub fn restore(&mut self) -> Result<bool, AuthError> {
        self.dispatch(AuthAction::SetLoading(true));
        match self.store.load_session() {
            Ok(Some(session)) => self.dispatch(AuthAction::LoginSuccess {
                user: session.user,
                token: session.token,
                refresh_token: session.refresh_token,
            }),
            Ok(None) => {}
            Err(StoreError::Corrupt { key, reason }) => {
                log::warn!("discarding stored session, '{key}' is corrupt: {reason}");
                self.store.clear_session()?;
            }
            Err(err) => {
                self.dispatch(AuthAction::SetLoading(false));
                return Err(err.into());
            }
        }
        self.dispatch(AuthAction::SetLoading(false));
        Ok(self.state.is_authenticated())
    }

    /// Sign in and persist the session
    ///
    /// # Errors
    ///
    /// `Invalid` for blank fields, otherwise the remote or storage failure.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&UserProfile, AuthError> {
        require(email, "Email")?;
        require(password, "Password")?;

        self.dispatch(AuthAction::LoginStart);
        let result = self.login_request(email, password).await;
        match result {
            Ok(session) => {
                log::info!("signed in as {}", session.user.email);
                self.dispatch(AuthAction::LoginSuccess {
                    user: session.user,
                    token: session.token,
                    refresh_token: session.refresh_token,
                });
                self.state.user.as_ref().ok_or(AuthError::NotSignedIn)
            }
            Err(err) => {
                self.dispatch(AuthAction::LoginFailure(err.message_or("Login failed")));
                Err(err)
            }
        }
    }

    async fn login_request(&self, email: &str, password: &str) -> Result<StoredSession, AuthError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let reply = self.client.post("/auth/login", &request).await?;
        let response: LoginResponse = decode(reply, "Login")?;

        let session = StoredSession {
            user: UserProfile::from_login(&response, Utc::now()),
            token: response.access_token,
            refresh_token: response.refresh_token,
        };
        self.store.save_session(&session)?;
        Ok(session)
    }

    /// Create an account
    ///
    /// # Errors
    ///
    /// `Invalid` for missing fields, mismatched or short passwords; otherwise
    /// the remote failure.
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<(), AuthError> {
        require(&request.first_name, "First name")?;
        require(&request.last_name, "Last name")?;
        require(&request.email, "Email")?;
        check_new_password(&request.password, &request.confirm_password)?;

        self.dispatch(AuthAction::RegisterStart);
        match self.client.post("/auth/register", request).await {
            Ok(reply) => match acknowledge(reply) {
                Ok(_) => {
                    log::info!("registered {}", request.email);
                    self.dispatch(AuthAction::RegisterSuccess);
                    Ok(())
                }
                Err(err) => {
                    self.dispatch(AuthAction::RegisterFailure(err.message_or("Registration failed")));
                    Err(err)
                }
            },
            Err(err) => {
                let err = AuthError::from(err);
                self.dispatch(AuthAction::RegisterFailure(err.message_or("Registration failed")));
                Err(err)
            }
        }
    }

    /// Forget the session locally
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored session cannot be removed.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        self.store.clear_session()?;
        self.dispatch(AuthAction::Logout);
        log::info!("signed out");
        Ok(())
    }

    /// Exchange the refresh token for a new token pair
    ///
    /// Without a refresh token, or when the exchange fails, the session is
    /// logged out and `Ok(false)` is returned.
    ///
    /// # Errors
    ///
    /// Only storage failures are returned.
    pub async fn refresh(&mut self) -> Result<bool, AuthError> {
        let Some(refresh_token) = self.state.refresh_token.clone() else {
            self.logout()?;
            return Ok(false);
        };

        let request = RefreshRequest {
            access_token: self.state.token.clone().unwrap_or_default(),
            refresh_token,
        };
        let result: Result<TokenPair, AuthError> = async {
            let reply = self.client.post("/auth/refresh", &request).await?;
            decode(reply, "Token refresh")
        }
        .await;

        match result {
            Ok(pair) => {
                self.store.save_tokens(&pair.access_token, &pair.refresh_token)?;
                self.dispatch(AuthAction::RefreshSuccess {
                    token: pair.access_token,
                    refresh_token: pair.refresh_token,
                });
                Ok(true)
            }
            Err(err) => {
                log::warn!("token refresh failed: {err}");
                self.logout()?;
                Ok(false)
            }
        }
    }

    /// Activate the account `user_id`
    ///
    /// # Errors
    ///
    /// `Invalid` for a blank id, otherwise the remote failure.
    pub async fn activate(&mut self, user_id: &str) -> Result<String, AuthError> {
        require(user_id, "User ID")?;
        let client = Arc::clone(&self.client);
        let path = format!("/auth/activate/{}", user_id.trim());
        let message = self
            .tracked("Activation failed", async {
                let reply = client.execute(Method::Get, &path, Vec::new(), None).await?;
                acknowledge(reply)
            })
            .await?;
        self.dispatch(AuthAction::ActivateSuccess);
        Ok(message.unwrap_or_else(|| ACCOUNT_ACTIVATED.to_string()))
    }

    /// Reload the profile from the server
    ///
    /// # Errors
    ///
    /// `NotSignedIn` without a session, otherwise remote or storage failures.
    pub async fn fetch_profile(&mut self) -> Result<UserProfile, AuthError> {
        let current = self.state.user.clone().ok_or(AuthError::NotSignedIn)?;
        let client = Arc::clone(&self.client);
        let mut profile: UserProfile = self
            .tracked("Failed to load profile", async {
                let reply = client.execute(Method::Get, "/auth/profile", Vec::new(), None).await?;
                decode(reply, "Profile")
            })
            .await?;

        if profile.user_id.is_none() {
            profile.user_id = current.user_id;
        }
        self.store.save_user(&profile)?;
        self.dispatch(AuthAction::ProfileLoaded(profile.clone()));
        Ok(profile)
    }

    /// Send the changed profile fields
    ///
    /// # Errors
    ///
    /// `Invalid(NoChanges)` without any request when nothing differs,
    /// `NotSignedIn` without a session, otherwise remote or storage failures.
    pub async fn update_profile(
        &mut self,
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
    ) -> Result<&UserProfile, AuthError> {
        let mut user = self.state.user.clone().ok_or(AuthError::NotSignedIn)?;
        let changes = ProfileChanges::between(&user, first_name, last_name, email);
        if changes.is_empty() {
            return Err(ValidationError::NoChanges.into());
        }

        let client = Arc::clone(&self.client);
        self.tracked(PROFILE_UPDATE_FAILED, async {
            let reply = client.put("/auth/profile", &changes).await?;
            acknowledge(reply)
        })
        .await?;

        user.apply(&changes);
        self.store.save_user(&user)?;
        self.dispatch(AuthAction::ProfileUpdated(user));
        self.state.user.as_ref().ok_or(AuthError::NotSignedIn)
    }

    /// Ask for password reset instructions
    ///
    /// # Errors
    ///
    /// `Invalid` for a blank email, otherwise the remote failure.
    pub async fn forgot_password(&mut self, email: &str) -> Result<(), AuthError> {
        require(email, "Email")?;
        let client = Arc::clone(&self.client);
        let request = ForgotPasswordRequest {
            email: email.trim().to_string(),
        };
        self.tracked(FORGOT_PASSWORD_FAILED, async {
            acknowledge(client.post("/auth/forgotpassword", &request).await?)
        })
        .await?;
        self.dispatch(AuthAction::ForgotPasswordSuccess);
        Ok(())
    }

    /// Set a new password with a reset token
    ///
    /// Any non-empty token is sent as is; only the server can reject it.
    ///
    /// # Errors
    ///
    /// `Invalid` for an empty token, mismatched or short passwords;
    /// otherwise the remote failure.
    pub async fn reset_password(&mut self, token: &str, password: &str, confirm: &str) -> Result<(), AuthError> {
        if token.trim().is_empty() {
            return Err(ValidationError::InvalidResetLink.into());
        }
        check_new_password(password, confirm)?;

        let client = Arc::clone(&self.client);
        let request = ResetPasswordRequest {
            token: token.trim().to_string(),
            new_password: password.to_string(),
        };
        self.tracked(RESET_PASSWORD_FAILED, async {
            acknowledge(client.post("/auth/resetpassword", &request).await?)
        })
        .await?;
        self.dispatch(AuthAction::ResetPasswordSuccess);
        Ok(())
    }

    /// Change the password of the signed-in user
    ///
    /// # Errors
    ///
    /// `NotSignedIn` without a session, `Invalid` for a blank current
    /// password, mismatched or short new passwords; otherwise the remote
    /// failure.
    pub async fn change_password(&mut self, current: &str, password: &str, confirm: &str) -> Result<(), AuthError> {
        if !self.state.is_authenticated() {
            return Err(AuthError::NotSignedIn);
        }
        require(current, "Current password")?;
        if password != confirm {
            return Err(ValidationError::NewPasswordMismatch.into());
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort.into());
        }

        let client = Arc::clone(&self.client);
        let request = ChangePasswordRequest {
            current_password: current.to_string(),
            new_password: password.to_string(),
            confirm_password: confirm.to_string(),
        };
        self.tracked(CHANGE_PASSWORD_FAILED, async {
            acknowledge(client.post("/auth/changepassword", &request).await?)
        })
        .await?;
        self.dispatch(AuthAction::ChangePasswordSuccess);
        Ok(())
    }
}
