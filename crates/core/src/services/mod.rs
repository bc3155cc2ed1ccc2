//! Business services.

pub mod account;
pub mod evidence;
pub mod moderation;
pub mod reply;
pub mod report;
pub mod stats;
pub mod subject;

pub use account::{AccountService, LoginInput, RegisterInput, Session};
pub use evidence::{
    ALLOWED_FILE_TYPES, EvidenceService, EvidenceUpload, MAX_FILE_SIZE, MAX_FILES_PER_REPORT,
};
pub use moderation::{Decision, ModerationService};
pub use reply::{CreateReplyInput, ReplyService};
pub use report::{ReportService, SubmitReportInput};
pub use stats::StatsService;
pub use subject::{CreateSubjectInput, SubjectService};
