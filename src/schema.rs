//! Static description of the `favorites` relation.
//!
//! The column set here must stay identical to the end state of
//! `migrations/` and to [`crate::entity::favorites::Model`]. `created_at` is
//! a zone-less `timestamp` holding UTC regardless of the session TimeZone.

pub const FAVORITES_TABLE: &str = "favorites";

/// Idempotent DDL executed when the migration directory cannot be applied.
pub const CREATE_FAVORITES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS favorites (
    id SERIAL PRIMARY KEY,
    user_id TEXT NOT NULL,
    recipe_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    image TEXT,
    cook_time TEXT,
    servings TEXT,
    created_at TIMESTAMP DEFAULT (NOW() AT TIME ZONE 'UTC')
)
"#;
