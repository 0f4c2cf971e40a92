//! Diesel schema for the user directory.
//!
//! The `users` table is owned by the authentication surface; this crate only
//! reads it and increments `points`.

diesel::table! {
    /// User identity and points records.
    users (roll_number) {
        /// Unique campus roll number.
        #[max_length = 50]
        roll_number -> Varchar,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Accumulated points.
        points -> Int8,
    }
}
