//! Diesel table definitions for the relationship store.
//!
//! Kept in sync with the SQL under `backend/migrations`. Only the columns this
//! service reads are meaningful here; `email` and `password_hash` are declared
//! so the table definition stays complete but are never selected.

diesel::table! {
    /// Registered users.
    users (id) {
        id -> Uuid,
        first_name -> Varchar,
        last_name -> Nullable<Varchar>,
        email -> Varchar,
        password_hash -> Text,
        photo_url -> Nullable<Text>,
        age -> Nullable<Int4>,
        gender -> Nullable<Varchar>,
        about -> Nullable<Text>,
        skills -> Array<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed connection requests between two users.
    connection_requests (id) {
        id -> Uuid,
        from_user_id -> Uuid,
        to_user_id -> Uuid,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, connection_requests);
