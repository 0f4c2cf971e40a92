//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records with lifecycle and acceptance metadata.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Free-text request description.
        request -> Text,
        /// Completion deadline.
        deadline -> Timestamptz,
        /// Free-text reward description.
        #[max_length = 255]
        reward -> Varchar,
        /// Poster roll number.
        #[max_length = 50]
        posted_by -> Varchar,
        /// Poster display name.
        #[max_length = 255]
        posted_by_name -> Varchar,
        /// Acceptor roll number; NULL until accepted.
        #[max_length = 50]
        accepted_by -> Nullable<Varchar>,
        /// Acceptor display name; NULL until accepted.
        #[max_length = 255]
        accepted_by_name -> Nullable<Varchar>,
        /// Task lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Deliverable reference; NULL until completion.
        #[max_length = 255]
        file_link -> Nullable<Varchar>,
        /// Completion timestamp; NULL until completion.
        completed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}
