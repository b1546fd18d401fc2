pub mod comments;
pub mod follows;
pub mod groups;
pub mod posts;
pub mod users;

use time::OffsetDateTime;

/// The current time truncated to whole seconds, so stored timestamps share
/// one textual format and sort correctly.
pub(crate) fn now() -> OffsetDateTime {
    let now = OffsetDateTime::now_utc();
    now - time::Duration::nanoseconds(i64::from(now.nanosecond()))
}
