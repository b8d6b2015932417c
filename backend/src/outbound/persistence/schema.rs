//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When migrations
//! change, regenerate with `diesel print-schema` or update by hand.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Unique handle, at most 32 characters.
        username -> Varchar,
        /// argon2id PHC string.
        password_digest -> Text,
        /// Current session token; unique and never empty.
        session_token -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Directed follow edges. Composite primary key on the ordered pair.
    follows (follower_id, followee_id) {
        follower_id -> Uuid,
        followee_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    tweets (id) {
        id -> Uuid,
        author_id -> Uuid,
        body -> Text,
        /// Cleared when the mentioned user is deleted.
        mentioned_user_id -> Nullable<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(tweets -> users (author_id));

diesel::allow_tables_to_appear_in_same_query!(follows, tweets, users);
