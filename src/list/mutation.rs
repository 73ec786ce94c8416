//! Create, update and delete for remote lists
//!
//! Every mutation validates locally first; a failing check never reaches
//! the network. Deletion additionally asks a [`Confirmer`], and declining
//! is a silent no-op.

use super::resource::Resource;
use crate::api::{ApiClient, ApiError, Transport};
use crate::models::{Validate, ValidationError};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Why a mutation did not happen
#[derive(Debug, Error)]
pub enum MutationError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl MutationError {
    /// Banner text, with `fallback` for failures that carry no message
    #[must_use]
    pub fn message_or(&self, fallback: &str) -> String {
        match self {
            Self::Invalid(err) => err.to_string(),
            Self::Api(err) => err.message_or(fallback),
        }
    }
}

/// Which mutation ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Remove,
}

impl MutationKind {
    #[must_use]
    pub const fn past_tense(self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update => "updated",
            Self::Remove => "deleted",
        }
    }

    /// e.g. `Category created successfully`
    #[must_use]
    pub fn success_message<R: Resource>(self) -> String {
        format!("{} {} successfully", R::LABEL, self.past_tense())
    }

    /// Banner text when the server gave no reason
    #[must_use]
    pub fn fallback_message<R: Resource>(self) -> String {
        match self {
            Self::Create | Self::Update => "Operation failed".to_string(),
            Self::Remove => format!("Failed to delete {}", R::LABEL.to_lowercase()),
        }
    }
}

/// Normalized reply of a mutation endpoint
///
/// The API answers with a bare identifier, no content, or a
/// `{ success, message, errors }` object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationReceipt {
    pub id: Option<String>,
    pub message: Option<String>,
}

impl MutationReceipt {
    /// Interpret a mutation reply
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` for `{ success: false }`.
    pub fn from_reply(reply: Option<Value>) -> Result<Self, ApiError> {
        let Some(value) = reply else {
            return Ok(Self::default());
        };

        match value {
            Value::String(id) => Ok(Self {
                id: Some(id),
                message: None,
            }),
            Value::Number(id) => Ok(Self {
                id: Some(id.to_string()),
                message: None,
            }),
            Value::Object(map) => {
                let message = map.get("message").and_then(Value::as_str).map(str::to_string);

                if map.get("success").and_then(Value::as_bool) == Some(false) {
                    let errors = map
                        .get("errors")
                        .and_then(Value::as_array)
                        .map(|errors| {
                            errors
                                .iter()
                                .filter_map(Value::as_str)
                                .map(str::to_string)
                                .collect()
                        })
                        .unwrap_or_default();
                    return Err(ApiError::Rejected {
                        message: message.unwrap_or_default(),
                        errors,
                    });
                }

                let id = ["id", "categoryId", "eventId", "orderId", "data"]
                    .iter()
                    .find_map(|key| match map.get(*key) {
                        Some(Value::String(id)) => Some(id.clone()),
                        Some(Value::Number(id)) => Some(id.to_string()),
                        _ => None,
                    });
                Ok(Self { id, message })
            }
            _ => Ok(Self::default()),
        }
    }
}

/// Result of a mutation that may have been declined
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied(MutationReceipt),
    /// The user declined the confirmation; nothing was sent
    Declined,
}

impl From<MutationReceipt> for MutationOutcome {
    fn from(receipt: MutationReceipt) -> Self {
        Self::Applied(receipt)
    }
}

/// Asks the user to confirm a destructive action
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Fixed answer, for `--yes` and for dialogs answered elsewhere
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoConfirm(pub bool);

impl AutoConfirm {
    #[must_use]
    pub const fn yes() -> Self {
        Self(true)
    }

    #[must_use]
    pub const fn no() -> Self {
        Self(false)
    }
}

impl Confirmer for AutoConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Runs mutations against the API
#[derive(Debug)]
pub struct MutationCoordinator<T> {
    client: Arc<ApiClient<T>>,
}

impl<T> Clone for MutationCoordinator<T> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<T: Transport> MutationCoordinator<T> {
    #[must_use]
    pub const fn new(client: Arc<ApiClient<T>>) -> Self {
        Self { client }
    }

    /// Create an entity
    ///
    /// # Errors
    ///
    /// `Invalid` without any request when the draft fails validation,
    /// otherwise `Api` for remote failures.
    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> Result<MutationReceipt, MutationError> {
        draft.validate()?;
        let reply = self.client.post(&R::create_path(), draft).await?;
        let receipt = MutationReceipt::from_reply(reply)?;
        log::info!("{} created ({})", R::LABEL, receipt.id.as_deref().unwrap_or("no id"));
        Ok(receipt)
    }

    /// Update the entity `id`
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`].
    pub async fn update<R: Resource>(&self, id: &str, draft: &R::Draft) -> Result<MutationReceipt, MutationError> {
        draft.validate()?;
        let (path, body) = R::update_request(id, draft).map_err(ApiError::from)?;
        let reply = self.client.put(&path, &body).await?;
        let receipt = MutationReceipt::from_reply(reply)?;
        log::info!("{} {id} updated", R::LABEL);
        Ok(receipt)
    }

    /// Delete the entity `id` after confirmation
    ///
    /// # Errors
    ///
    /// `Api` for remote failures. Declining is not an error.
    pub async fn remove<R: Resource, C: Confirmer + ?Sized>(
        &self,
        id: &str,
        confirmer: &C,
    ) -> Result<MutationOutcome, MutationError> {
        let prompt = format!(
            "Are you sure you want to delete this {}?",
            R::LABEL.to_lowercase()
        );
        if !confirmer.confirm(&prompt) {
            log::debug!("delete of {} {id} declined", R::LABEL);
            return Ok(MutationOutcome::Declined);
        }

        let reply = self.client.delete(&R::item_path(id)).await?;
        let receipt = MutationReceipt::from_reply(reply)?;
        log::info!("{} {id} deleted", R::LABEL);
        Ok(MutationOutcome::Applied(receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryDraft, Event, EventDraft};
    use crate::testing::MockTransport;
    use serde_json::json;

    fn coordinator(transport: MockTransport) -> MutationCoordinator<MockTransport> {
        MutationCoordinator::new(Arc::new(ApiClient::new(transport, "http://localhost")))
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            MutationKind::Create.success_message::<Category>(),
            "Category created successfully"
        );
        assert_eq!(
            MutationKind::Remove.fallback_message::<Category>(),
            "Failed to delete category"
        );
        assert_eq!(MutationKind::Update.fallback_message::<Event>(), "Operation failed");
    }

    #[test]
    fn test_receipt_shapes() {
        assert_eq!(MutationReceipt::from_reply(None).unwrap(), MutationReceipt::default());
        assert_eq!(
            MutationReceipt::from_reply(Some(json!("abc"))).unwrap().id.as_deref(),
            Some("abc")
        );
        let receipt = MutationReceipt::from_reply(Some(json!({
            "success": true, "message": "Saved", "categoryId": "c5"
        })))
        .unwrap();
        assert_eq!(receipt.id.as_deref(), Some("c5"));
        assert_eq!(receipt.message.as_deref(), Some("Saved"));
    }

    #[test]
    fn test_receipt_rejected() {
        let err = MutationReceipt::from_reply(Some(json!({
            "success": false, "message": "Duplicate name", "errors": ["name"]
        })))
        .unwrap_err();
        assert_eq!(err.message_or("Operation failed"), "Duplicate name");
    }

    #[tokio::test]
    async fn test_invalid_draft_makes_no_request() {
        let coordinator = coordinator(MockTransport::new());
        let err = coordinator
            .create::<Category>(&CategoryDraft { name: " ".into() })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Category name is required");
        assert!(coordinator.client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_posts_draft() {
        let transport = MockTransport::new();
        transport.push_json(200, json!("c42"));
        let coordinator = coordinator(transport);

        let receipt = coordinator
            .create::<Category>(&CategoryDraft { name: "Jazz".into() })
            .await
            .unwrap();
        assert_eq!(receipt.id.as_deref(), Some("c42"));

        let requests = coordinator.client.transport().requests();
        assert_eq!(requests[0].url, "http://localhost/api/category");
        assert_eq!(requests[0].body, Some(json!({ "name": "Jazz" })));
    }

    #[tokio::test]
    async fn test_event_update_targets_collection() {
        let transport = MockTransport::new();
        transport.push_empty(204);
        let coordinator = coordinator(transport);

        let draft = EventDraft {
            name: "Gala".into(),
            category_id: "c1".into(),
            price: 10.0,
            ..EventDraft::default()
        };
        coordinator.update::<Event>("e3", &draft).await.unwrap();

        let requests = coordinator.client.transport().requests();
        assert_eq!(requests[0].url, "http://localhost/api/event");
        assert_eq!(requests[0].body.as_ref().unwrap()["eventId"], "e3");
    }

    #[tokio::test]
    async fn test_declined_remove_sends_nothing() {
        let coordinator = coordinator(MockTransport::new());
        let outcome = coordinator
            .remove::<Category, _>("c1", &AutoConfirm::no())
            .await
            .unwrap();

        assert_eq!(outcome, MutationOutcome::Declined);
        assert!(coordinator.client.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_remove_failure_keeps_server_message() {
        let transport = MockTransport::new();
        transport.push_text(409, "Category has events");
        let coordinator = coordinator(transport);

        let err = coordinator
            .remove::<Category, _>("c1", &AutoConfirm::yes())
            .await
            .unwrap_err();
        assert_eq!(
            err.message_or(&MutationKind::Remove.fallback_message::<Category>()),
            "Category has events"
        );
    }
}
