//! Application services for notification fanout and inbox access.

mod fanout;
mod inbox;

pub use fanout::{FANOUT_CHUNK_SIZE, NotificationFanout};
pub use inbox::{DEFAULT_INBOX_PAGE_SIZE, InboxPage, InboxService};
