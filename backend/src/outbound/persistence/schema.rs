//! Diesel table definitions. Must match `migrations/` exactly.

diesel::table! {
    /// User records.
    users (id) {
        /// UUID v4 assigned on insert.
        id -> Uuid,
        name -> Varchar,
        /// Unique across rows (`users_email_key`).
        email -> Varchar,
        /// Non-negative (`users_age_check`).
        age -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
