//! Right-of-reply service.

use std::sync::Arc;

use rapport_common::{AppError, AppResult};
use rapport_db::entities::reply;
use rapport_db::store::{NewReply, ReportStore};
use serde::Deserialize;
use validator::Validate;

/// Input for a subject's reply to a report.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReplyInput {
    pub report_id: String,
    pub subject_id: String,
    #[validate(length(min = 1, max = 2000))]
    pub content: String,
}

/// Service for creating replies.
#[derive(Clone)]
pub struct ReplyService {
    store: Arc<dyn ReportStore>,
}

impl ReplyService {
    /// Create a new reply service.
    #[must_use]
    pub fn new(store: Arc<dyn ReportStore>) -> Self {
        Self { store }
    }

    /// Create a reply. The reply enters the moderation queue as pending and
    /// becomes publicly visible only once approved.
    ///
    /// Whether the parent report is currently visible is a display concern;
    /// only its existence is checked here.
    pub async fn create(&self, input: CreateReplyInput) -> AppResult<reply::Model> {
        input.validate()?;

        if self.store.find_report(&input.report_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Report {} not found",
                input.report_id
            )));
        }

        if self.store.find_subject(&input.subject_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Subject {} not found",
                input.subject_id
            )));
        }

        self.store
            .create_reply(NewReply {
                report_id: input.report_id,
                subject_id: input.subject_id,
                content: input.content,
            })
            .await
    }
}
