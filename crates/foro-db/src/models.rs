//! Database row types. These map directly to SQLite rows; timestamps stay
//! as stored text until converted into the `foro-types` models.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use foro_types::models::{Message, Topic, User};

use crate::{DbError, Result};

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub registered_at: String,
}

pub struct TopicRow {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub created_at: String,
    pub author_id: i64,
    pub author_username: String,
    pub category_id: i64,
}

pub struct MessageRow {
    pub id: i64,
    pub body: String,
    pub created_at: String,
    pub author_id: i64,
    pub author_username: String,
    pub topic_id: i64,
}

impl TryFrom<UserRow> for User {
    type Error = DbError;

    fn try_from(row: UserRow) -> Result<Self> {
        Ok(User {
            registered_at: parse_timestamp(&row.registered_at)?,
            id: row.id,
            username: row.username,
            display_name: row.display_name,
        })
    }
}

impl TryFrom<TopicRow> for Topic {
    type Error = DbError;

    fn try_from(row: TopicRow) -> Result<Self> {
        Ok(Topic {
            created_at: parse_timestamp(&row.created_at)?,
            id: row.id,
            title: row.title,
            body: row.body,
            author_id: row.author_id,
            author_username: row.author_username,
            category_id: row.category_id,
        })
    }
}

impl TryFrom<MessageRow> for Message {
    type Error = DbError;

    fn try_from(row: MessageRow) -> Result<Self> {
        Ok(Message {
            created_at: parse_timestamp(&row.created_at)?,
            id: row.id,
            body: row.body,
            author_id: row.author_id,
            author_username: row.author_username,
            topic_id: row.topic_id,
        })
    }
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Accepts RFC 3339 as written by [`format_timestamp`], and SQLite's
/// `datetime('now')` form ("YYYY-MM-DD HH:MM:SS", implicitly UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc()))
        .map_err(|e| DbError::CorruptRow(format!("bad timestamp '{}': {}", raw, e)))
}
