//! Test utilities: model factories for repository and service tests.

use chrono::Utc;

use crate::entities::{
    evidence, reply,
    report::{self, ModerationStatus, ReportKind},
    subject::{self, SubjectKind},
    user,
};

/// Build a subject row for tests.
#[must_use]
pub fn test_subject(id: &str, name: &str, kind: SubjectKind) -> subject::Model {
    subject::Model {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        description: None,
        location: None,
        verified: false,
        created_at: Utc::now().into(),
    }
}

/// Build a report row for tests.
#[must_use]
pub fn test_report(id: &str, subject_id: &str, status: ModerationStatus) -> report::Model {
    report::Model {
        id: id.to_string(),
        subject_id: subject_id.to_string(),
        reporter_id: "user-test".to_string(),
        kind: ReportKind::Positive,
        category: "Other".to_string(),
        title: "Test report".to_string(),
        description: "A description long enough for display purposes.".to_string(),
        original_description: "A description long enough for display purposes.".to_string(),
        status,
        is_anonymous: false,
        created_at: Utc::now().into(),
    }
}

/// Build a reply row for tests.
#[must_use]
pub fn test_reply(id: &str, report_id: &str, status: ModerationStatus) -> reply::Model {
    reply::Model {
        id: id.to_string(),
        report_id: report_id.to_string(),
        subject_id: "subject-test".to_string(),
        content: "We have looked into this and resolved the issue.".to_string(),
        status,
        created_at: Utc::now().into(),
    }
}

/// Build an evidence row for tests.
#[must_use]
pub fn test_evidence(id: &str, report_id: &str) -> evidence::Model {
    evidence::Model {
        id: id.to_string(),
        report_id: report_id.to_string(),
        file_path: format!("{report_id}/123_abc.jpg"),
        file_name: "receipt.jpg".to_string(),
        file_type: "image/jpeg".to_string(),
        created_at: Utc::now().into(),
    }
}

/// Build a user row for tests.
#[must_use]
pub fn test_user(id: &str, email: &str, is_admin: bool) -> user::Model {
    user::Model {
        id: id.to_string(),
        email: email.to_string(),
        password_hash: String::new(),
        token: Some(format!("token-{id}")),
        is_admin,
        created_at: Utc::now().into(),
    }
}
