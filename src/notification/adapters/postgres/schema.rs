//! Diesel schema for notification persistence.

diesel::table! {
    /// Per-receiver notification records derived from task lifecycle events.
    notifications (id) {
        /// Internal notification identifier.
        id -> Uuid,
        /// Lifecycle event kind.
        #[max_length = 50]
        kind -> Varchar,
        /// Sender roll number.
        #[max_length = 50]
        sender -> Varchar,
        /// Sender display name.
        #[max_length = 255]
        sender_name -> Varchar,
        /// Receiver roll number.
        #[max_length = 50]
        receiver -> Varchar,
        /// Message text.
        message -> Text,
        /// Referenced task identifier.
        task_id -> Uuid,
        /// Whether the receiver has read the record.
        read -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
