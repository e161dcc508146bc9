use std::sync::Arc;

use models::{
    Resource,
    envelope::{decode_entity, decode_message},
    review::{ModerationPayload, Review, ReviewStatus},
};
use thiserror::Error;
use tracing::{info, warn};

use super::{
    notification::Notifier,
    query::{QueryClient, QueryError},
};

pub const DEFAULT_MODERATOR_NOTES: &str = "No additional notes provided.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModerationDecision {
    #[default]
    Approved,
    Rejected,
}

impl From<ModerationDecision> for ReviewStatus {
    fn from(decision: ModerationDecision) -> Self {
        match decision {
            ModerationDecision::Approved => ReviewStatus::Approved,
            ModerationDecision::Rejected => ReviewStatus::Rejected,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModerationForm {
    pub decision: ModerationDecision,
    pub notes: String,
}

impl ModerationForm {
    pub fn new(decision: ModerationDecision, notes: impl Into<String>) -> Self {
        Self {
            decision,
            notes: notes.into(),
        }
    }

    pub fn to_payload(&self) -> ModerationPayload {
        let notes = self.notes.trim();
        ModerationPayload {
            status: self.decision.into(),
            moderator_notes: if notes.is_empty() {
                DEFAULT_MODERATOR_NOTES.to_string()
            } else {
                notes.to_string()
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("review {id} is already {status}")]
    AlreadyModerated { id: String, status: ReviewStatus },
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Moderates pending reviews. Moderation is one-shot: approved and rejected
/// reviews are never sent again.
pub struct ReviewModerator {
    query: QueryClient,
    notifier: Arc<dyn Notifier>,
}

impl ReviewModerator {
    pub fn new(query: QueryClient, notifier: Arc<dyn Notifier>) -> Self {
        Self { query, notifier }
    }

    /// Returns the updated review when the server echoes it back.
    pub async fn moderate(
        &self,
        review: &Review,
        form: &ModerationForm,
    ) -> Result<Option<Review>, ModerationError> {
        if review.status.is_terminal() {
            return Err(ModerationError::AlreadyModerated {
                id: review.id.clone(),
                status: review.status,
            });
        }

        let payload = form.to_payload();
        match self.query.moderate_review(&review.id, &payload).await {
            Ok(body) => {
                info!(review = %review.id, status = %payload.status, "review moderated");
                let message = decode_message(&body)
                    .unwrap_or_else(|| format!("Review {} successfully", payload.status));
                self.notifier.success(&message);
                Ok(decode_entity::<Review>(Resource::Reviews, &body).ok())
            }
            Err(e) => {
                warn!(review = %review.id, error = %e, "moderation failed");
                self.notifier.error(&e.user_message());
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use client::ClientError;
    use models::ListParams;
    use serde_json::json;

    use super::*;
    use crate::services::{
        notification::{MemoryNotifier, NoticeLevel},
        query::QueryKey,
        test_support::FakeApi,
    };

    fn pending_review() -> Review {
        serde_json::from_value(json!({ "_id": "r1", "rating": 4, "title": "Solid lamp" })).unwrap()
    }

    fn setup() -> (Arc<FakeApi>, MemoryNotifier, ReviewModerator, QueryClient) {
        let api = Arc::new(FakeApi::new());
        api.seed(
            Resource::Reviews,
            vec![json!({ "_id": "r1", "rating": 4, "title": "Solid lamp", "status": "pending" })],
        );
        let notifier = MemoryNotifier::new();
        let query = QueryClient::new(api.clone());
        let moderator = ReviewModerator::new(query.clone(), Arc::new(notifier.clone()));
        (api, notifier, moderator, query)
    }

    #[test]
    fn test_blank_notes_get_default_text() {
        let payload = ModerationForm::new(ModerationDecision::Approved, "   ").to_payload();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "status": "approved", "moderatorNotes": "No additional notes provided." })
        );
    }

    #[test]
    fn test_notes_are_trimmed() {
        let payload = ModerationForm::new(ModerationDecision::Rejected, " spam link ").to_payload();
        assert_eq!(payload.status, ReviewStatus::Rejected);
        assert_eq!(payload.moderator_notes, "spam link");
    }

    #[tokio::test]
    async fn test_moderate_sends_payload_and_refreshes_reviews() {
        let (api, notifier, moderator, query) = setup();
        let key = QueryKey::list(Resource::Reviews, ListParams::new(0, 10));
        query.read(key.clone()).await.unwrap();

        let updated = moderator
            .moderate(&pending_review(), &ModerationForm::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, ReviewStatus::Approved);
        assert_eq!(
            updated.moderator_notes.as_deref(),
            Some(DEFAULT_MODERATOR_NOTES)
        );
        assert_eq!(
            api.last_body().and_then(|b| b.as_json().cloned()).unwrap()["status"],
            "approved"
        );
        assert_eq!(notifier.notices()[0].level, NoticeLevel::Success);
        assert!(query.cached(key).await.is_none());
    }

    #[tokio::test]
    async fn test_terminal_review_is_refused() {
        let (api, notifier, moderator, _) = setup();
        let mut review = pending_review();
        review.status = ReviewStatus::Rejected;

        let err = moderator
            .moderate(&review, &ModerationForm::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ModerationError::AlreadyModerated { .. }));
        assert_eq!(api.mutation_calls(), 0);
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_failure_is_notified() {
        let (api, notifier, moderator, _) = setup();
        api.fail_next(ClientError::Unauthorized);

        let err = moderator
            .moderate(&pending_review(), &ModerationForm::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ModerationError::Query(_)));
        assert_eq!(notifier.notices()[0].level, NoticeLevel::Error);
    }
}
