//! Account commands - sign in and out, registration, passwords and profile

use super::{Context, Result};
use crate::BoxofficeError;
use crate::api::Transport;
use crate::auth::{
    AuthError, AuthSession, CHANGE_PASSWORD_DONE, CHANGE_PASSWORD_FAILED,
    FORGOT_PASSWORD_FAILED, FORGOT_PASSWORD_SENT, PROFILE_UPDATE_FAILED, PROFILE_UPDATED,
    PasswordStrength, RESET_PASSWORD_DONE, RESET_PASSWORD_FAILED, RegisterRequest, UserProfile,
};
use crate::cli::{AccountCommands, ProfileCommands};
use crate::output;

/// Shown after a successful registration
pub const REGISTERED: &str = "Registration successful! Check your email to activate your account.";

fn failed(err: &AuthError, fallback: &str) -> BoxofficeError {
    BoxofficeError::Failed(err.message_or(fallback))
}

/// Execute an account command
///
/// # Errors
/// Returns an error if a local check rejects the input, the server refuses
/// the request, the session store fails, or a prompt is cancelled
pub async fn execute<T: Transport>(
    session: &mut AuthSession<T>,
    ctx: &Context<'_, T>,
    command: &AccountCommands,
) -> Result<()> {
    match command {
        AccountCommands::Login { email } => {
            let email = ctx.value_or_ask(email.as_ref(), "Email", None)?;
            let password = ctx.ask_password("Password")?;
            let user = session
                .login(&email, &password)
                .await
                .map_err(|e| failed(&e, "Login failed"))?;
            ctx.output.success(&format!("Signed in as {}", user.display_name()));
            Ok(())
        }
        AccountCommands::Register => register(session, ctx).await,
        AccountCommands::Logout => {
            let was_signed_in = session.state().is_authenticated();
            session.logout()?;
            if was_signed_in {
                ctx.output.success("Signed out");
            } else {
                ctx.output.info("Not signed in");
            }
            Ok(())
        }
        AccountCommands::Activate { user_id } => {
            let message = session
                .activate(user_id)
                .await
                .map_err(|e| failed(&e, "Activation failed"))?;
            ctx.output.success(&message);
            Ok(())
        }
        AccountCommands::Refresh => {
            if session.refresh().await? {
                ctx.output.success("Session refreshed");
                Ok(())
            } else {
                Err(BoxofficeError::Failed(
                    "Session expired. Please sign in again.".to_string(),
                ))
            }
        }
        AccountCommands::ForgotPassword { email } => {
            let email = ctx.value_or_ask(email.as_ref(), "Email", None)?;
            session
                .forgot_password(&email)
                .await
                .map_err(|e| failed(&e, FORGOT_PASSWORD_FAILED))?;
            ctx.output.success(FORGOT_PASSWORD_SENT);
            Ok(())
        }
        AccountCommands::ResetPassword { token } => {
            let password = ctx.ask_password("New password")?;
            show_strength(ctx, &password);
            let confirm = ctx.ask_password("Confirm new password")?;
            session
                .reset_password(token, &password, &confirm)
                .await
                .map_err(|e| failed(&e, RESET_PASSWORD_FAILED))?;
            ctx.output.success(RESET_PASSWORD_DONE);
            Ok(())
        }
        AccountCommands::ChangePassword => {
            if !session.state().is_authenticated() {
                return Err(AuthError::NotSignedIn.into());
            }
            let current = ctx.ask_password("Current password")?;
            let password = ctx.ask_password("New password")?;
            show_strength(ctx, &password);
            let confirm = ctx.ask_password("Confirm new password")?;
            session
                .change_password(&current, &password, &confirm)
                .await
                .map_err(|e| failed(&e, CHANGE_PASSWORD_FAILED))?;
            ctx.output.success(CHANGE_PASSWORD_DONE);
            Ok(())
        }
        AccountCommands::Profile { command } => match command {
            None | Some(ProfileCommands::Show) => show_profile(session, ctx).await,
            Some(ProfileCommands::Update {
                first_name,
                last_name,
                email,
            }) => {
                let user = session.state().user.clone().ok_or(AuthError::NotSignedIn)?;
                let (first_name, last_name, email) =
                    if first_name.is_none() && last_name.is_none() && email.is_none() {
                        (
                            Some(ctx.ask("First name", Some(user.first_name.as_str()))?),
                            Some(ctx.ask("Last name", Some(user.last_name.as_str()))?),
                            Some(ctx.ask("Email", Some(user.email.as_str()))?),
                        )
                    } else {
                        (first_name.clone(), last_name.clone(), email.clone())
                    };
                session
                    .update_profile(first_name, last_name, email)
                    .await
                    .map_err(|e| failed(&e, PROFILE_UPDATE_FAILED))?;
                ctx.output.success(PROFILE_UPDATED);
                Ok(())
            }
        },
    }
}

fn show_strength<T>(ctx: &Context<'_, T>, password: &str) {
    ctx.output
        .info(&format!("Password strength: {}", PasswordStrength::of(password)));
}

async fn register<T: Transport>(session: &mut AuthSession<T>, ctx: &Context<'_, T>) -> Result<()> {
    let first_name = ctx.ask("First name", None)?;
    let last_name = ctx.ask("Last name", None)?;
    let email = ctx.ask("Email", None)?;
    let password = ctx.ask_password("Password")?;
    show_strength(ctx, &password);
    let confirm_password = ctx.ask_password("Confirm password")?;

    let request = RegisterRequest {
        email,
        password,
        confirm_password,
        first_name,
        last_name,
    };
    session
        .register(&request)
        .await
        .map_err(|e| failed(&e, "Registration failed"))?;
    ctx.output.success(REGISTERED);
    Ok(())
}

async fn show_profile<T: Transport>(session: &mut AuthSession<T>, ctx: &Context<'_, T>) -> Result<()> {
    let profile = match session.fetch_profile().await {
        Ok(profile) => profile,
        Err(AuthError::NotSignedIn) => return Err(AuthError::NotSignedIn.into()),
        Err(err) => {
            ctx.output
                .warning(&format!("{}; showing saved profile", err.message_or("Failed to load profile")));
            session.state().user.clone().ok_or(AuthError::NotSignedIn)?
        }
    };
    print_profile(ctx, &profile);
    Ok(())
}

fn print_profile<T>(ctx: &Context<'_, T>, profile: &UserProfile) {
    ctx.output.write(&profile.display_name());
    ctx.output.write(&output::field("Email", &profile.email));
    if let Some(id) = &profile.user_id {
        ctx.output.write(&output::field("User ID", id));
    }
    if let Some(role) = &profile.role {
        ctx.output.write(&output::field("Role", role));
    }
    ctx.output
        .write(&output::field("Member since", &output::timestamp(profile.created_date, "-")));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::Harness;
    use crate::auth::SessionStore;
    use crate::testing::MockTransport;
    use crate::ui::MessageLevel;
    use crate::ui::mock::ScriptedInput;
    use serde_json::json;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn session(harness: &Harness, dir: &TempDir) -> AuthSession<MockTransport> {
        let store = SessionStore::open(dir.path().join("session")).unwrap();
        AuthSession::new(Arc::clone(&harness.client), store)
    }

    fn login_reply() -> serde_json::Value {
        json!({
            "accessToken": "access-1",
            "refreshToken": "refresh-1",
            "userId": "u1",
            "email": "ada@example.com",
            "firstName": "Ada",
            "lastName": "Lovelace"
        })
    }

    #[tokio::test]
    async fn test_login_announces_user() {
        let harness = Harness::new(ScriptedInput::texts(["ada@example.com", "hunter22"]));
        let dir = TempDir::new().unwrap();
        let mut session = session(&harness, &dir);
        harness.transport().push_json(200, login_reply());

        let command = AccountCommands::Login { email: None };
        execute(&mut session, &harness.context(), &command).await.unwrap();

        assert_eq!(harness.lines(MessageLevel::Success), vec!["Signed in as Ada Lovelace"]);
        assert_eq!(harness.client.token().as_deref(), Some("access-1"));
        assert_eq!(harness.input.prompts(), vec!["Email", "Password"]);
    }

    #[tokio::test]
    async fn test_login_failure_uses_server_text() {
        let harness = Harness::new(ScriptedInput::texts(["hunter22"]));
        let dir = TempDir::new().unwrap();
        let mut session = session(&harness, &dir);
        harness.transport().push_text(401, "Invalid credentials");

        let command = AccountCommands::Login {
            email: Some("ada@example.com".to_string()),
        };
        let err = execute(&mut session, &harness.context(), &command).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid credentials");
        assert!(harness.client.token().is_none());
    }

    #[tokio::test]
    async fn test_register_mismatch_is_local() {
        let harness = Harness::new(ScriptedInput::texts([
            "Ada",
            "Lovelace",
            "ada@example.com",
            "Analytical1!",
            "Analytical2!",
        ]));
        let dir = TempDir::new().unwrap();
        let mut session = session(&harness, &dir);

        let err = execute(&mut session, &harness.context(), &AccountCommands::Register)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Passwords do not match.");
        assert!(harness.transport().requests().is_empty());
        assert_eq!(
            harness.lines(MessageLevel::Info),
            vec!["Password strength: Very Strong (5/5)"]
        );
    }

    #[tokio::test]
    async fn test_forgot_password_messages() {
        let harness = Harness::new(ScriptedInput::default());
        let dir = TempDir::new().unwrap();
        let mut session = session(&harness, &dir);
        harness.transport().push_empty(200);
        harness.transport().push_error("");

        let command = AccountCommands::ForgotPassword {
            email: Some("ada@example.com".to_string()),
        };
        execute(&mut session, &harness.context(), &command).await.unwrap();
        assert_eq!(harness.lines(MessageLevel::Success), vec![FORGOT_PASSWORD_SENT]);

        let err = execute(&mut session, &harness.context(), &command).await.unwrap_err();
        assert_eq!(err.to_string(), FORGOT_PASSWORD_FAILED);
    }

    #[tokio::test]
    async fn test_change_password_requires_session() {
        let harness = Harness::new(ScriptedInput::default());
        let dir = TempDir::new().unwrap();
        let mut session = session(&harness, &dir);

        let err = execute(&mut session, &harness.context(), &AccountCommands::ChangePassword)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Not signed in");
        assert!(harness.input.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_without_session_fails() {
        let harness = Harness::new(ScriptedInput::default());
        let dir = TempDir::new().unwrap();
        let mut session = session(&harness, &dir);

        let err = execute(&mut session, &harness.context(), &AccountCommands::Refresh)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Session expired. Please sign in again.");
        assert!(harness.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_profile_update_without_changes() {
        let harness = Harness::new(ScriptedInput::default());
        let dir = TempDir::new().unwrap();
        let mut session = session(&harness, &dir);
        harness.transport().push_json(200, login_reply());
        session.login("ada@example.com", "hunter22").await.unwrap();

        let command = AccountCommands::Profile {
            command: Some(ProfileCommands::Update {
                first_name: Some("Ada".to_string()),
                last_name: None,
                email: None,
            }),
        };
        let err = execute(&mut session, &harness.context(), &command).await.unwrap_err();

        assert_eq!(err.to_string(), "No changes to save");
        assert_eq!(harness.transport().requests().len(), 1);
    }

    #[tokio::test]
    async fn test_logout_clears_token() {
        let harness = Harness::new(ScriptedInput::default());
        let dir = TempDir::new().unwrap();
        let mut session = session(&harness, &dir);
        harness.transport().push_json(200, login_reply());
        session.login("ada@example.com", "hunter22").await.unwrap();

        execute(&mut session, &harness.context(), &AccountCommands::Logout)
            .await
            .unwrap();

        assert!(harness.client.token().is_none());
        assert_eq!(harness.lines(MessageLevel::Success), vec!["Signed out"]);
    }
}
