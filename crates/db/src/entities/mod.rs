//! Database entities.

pub mod evidence;
pub mod moderation_log;
pub mod reply;
pub mod report;
pub mod subject;
pub mod user;

pub use evidence::Entity as Evidence;
pub use moderation_log::Entity as ModerationLog;
pub use reply::Entity as Reply;
pub use report::Entity as Report;
pub use subject::Entity as Subject;
pub use user::Entity as User;
