use chrono::Utc;
use foro_types::models::{Category, Message, Topic, User};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::info;

use crate::error::is_unique_violation;
use crate::models::{MessageRow, TopicRow, UserRow, format_timestamp, parse_timestamp};
use crate::{Database, DbError, Result};

impl Database {
    // -- Users --

    /// Returns the user named `username`, inserting it (without a display
    /// name) first if absent. The insert is an upsert on the UNIQUE username
    /// column, so two racing callers still end up with a single row.
    pub fn find_or_create_user(&self, username: &str) -> Result<User> {
        if username.trim().is_empty() {
            return Err(DbError::InvalidInput("username must not be empty".into()));
        }

        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT INTO users (username, registered_at) VALUES (?1, ?2)
                 ON CONFLICT(username) DO NOTHING",
                params![username, format_timestamp(Utc::now())],
            )?;
            if inserted > 0 {
                info!("Registered new user '{}'", username);
            }

            query_user_by_username(conn, username)?
                .ok_or_else(|| DbError::CorruptRow(format!("user '{}' missing after upsert", username)))
        })
    }

    pub fn get_user(&self, id: i64) -> Result<User> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT id, username, display_name, registered_at FROM users WHERE id = ?1",
                    [id],
                    user_row,
                )
                .optional()?;

            row.map(User::try_from)
                .transpose()?
                .ok_or(DbError::not_found("user", id))
        })
    }

    // -- Categories --

    pub fn list_categories(&self) -> Result<Vec<Category>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT id, name, description FROM categories ORDER BY id")?;
            let rows = stmt
                .query_map([], category_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn count_categories(&self) -> Result<i64> {
        self.with_conn(|conn| count_categories(conn))
    }

    /// Fails with [`DbError::Duplicate`] when a category with exactly this
    /// name exists; the existing row is left untouched.
    pub fn create_category(&self, name: &str, description: Option<&str>) -> Result<Category> {
        if name.trim().is_empty() {
            return Err(DbError::InvalidInput("category name must not be empty".into()));
        }

        self.with_conn(|conn| {
            match conn.execute(
                "INSERT INTO categories (name, description) VALUES (?1, ?2)",
                params![name, description],
            ) {
                Ok(_) => {}
                Err(e) if is_unique_violation(&e) => {
                    return Err(DbError::Duplicate(format!("category '{}' already exists", name)));
                }
                Err(e) => return Err(e.into()),
            }

            let id = conn.last_insert_rowid();
            info!("Created category {} '{}'", id, name);

            Ok(Category {
                id,
                name: name.to_string(),
                description: description.map(str::to_string),
            })
        })
    }

    pub fn get_category(&self, id: i64) -> Result<Category> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, name, description FROM categories WHERE id = ?1",
                [id],
                category_row,
            )
            .optional()?
            .ok_or(DbError::not_found("category", id))
        })
    }

    // -- Topics --

    pub fn create_topic(
        &self,
        title: &str,
        body: &str,
        author: &User,
        category: &Category,
    ) -> Result<Topic> {
        let created_at = format_timestamp(Utc::now());

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO topics (title, body, created_at, author_id, category_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![title, body, &created_at, author.id, category.id],
            )?;

            let id = conn.last_insert_rowid();
            info!(
                "Created topic {} '{}' in category {} by '{}'",
                id, title, category.id, author.username
            );

            Ok(Topic {
                id,
                title: title.to_string(),
                body: body.to_string(),
                created_at: parse_timestamp(&created_at)?,
                author_id: author.id,
                author_username: author.username.clone(),
                category_id: category.id,
            })
        })
    }

    pub fn get_topic(&self, id: i64) -> Result<Topic> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    "SELECT t.id, t.title, t.body, t.created_at, t.author_id, u.username, t.category_id
                     FROM topics t
                     JOIN users u ON u.id = t.author_id
                     WHERE t.id = ?1",
                    [id],
                    topic_row,
                )
                .optional()?;

            row.map(Topic::try_from)
                .transpose()?
                .ok_or(DbError::not_found("topic", id))
        })
    }

    pub fn list_topics_by_category(&self, category_id: i64) -> Result<Vec<Topic>> {
        self.with_conn(|conn| {
            // JOIN users to fetch the author's username in a single query
            let mut stmt = conn.prepare(
                "SELECT t.id, t.title, t.body, t.created_at, t.author_id, u.username, t.category_id
                 FROM topics t
                 JOIN users u ON u.id = t.author_id
                 WHERE t.category_id = ?1
                 ORDER BY t.id",
            )?;

            let rows = stmt
                .query_map([category_id], topic_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.into_iter().map(Topic::try_from).collect()
        })
    }

    // -- Messages --

    pub fn create_message(&self, body: &str, author: &User, topic: &Topic) -> Result<Message> {
        let created_at = format_timestamp(Utc::now());

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO messages (body, created_at, author_id, topic_id) VALUES (?1, ?2, ?3, ?4)",
                params![body, &created_at, author.id, topic.id],
            )?;

            let id = conn.last_insert_rowid();
            info!("Created message {} in topic {} by '{}'", id, topic.id, author.username);

            Ok(Message {
                id,
                body: body.to_string(),
                created_at: parse_timestamp(&created_at)?,
                author_id: author.id,
                author_username: author.username.clone(),
                topic_id: topic.id,
            })
        })
    }

    pub fn list_messages_by_topic(&self, topic_id: i64) -> Result<Vec<Message>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT m.id, m.body, m.created_at, m.author_id, u.username, m.topic_id
                 FROM messages m
                 JOIN users u ON u.id = m.author_id
                 WHERE m.topic_id = ?1
                 ORDER BY m.id",
            )?;

            let rows = stmt
                .query_map([topic_id], message_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            rows.into_iter().map(Message::try_from).collect()
        })
    }
}

pub(crate) fn count_categories(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?)
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<User>> {
    let row = conn
        .query_row(
            "SELECT id, username, display_name, registered_at FROM users WHERE username = ?1",
            [username],
            user_row,
        )
        .optional()?;

    row.map(User::try_from).transpose()
}

fn user_row(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        display_name: row.get(2)?,
        registered_at: row.get(3)?,
    })
}

fn category_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
    })
}

fn topic_row(row: &Row<'_>) -> rusqlite::Result<TopicRow> {
    Ok(TopicRow {
        id: row.get(0)?,
        title: row.get(1)?,
        body: row.get(2)?,
        created_at: row.get(3)?,
        author_id: row.get(4)?,
        author_username: row.get(5)?,
        category_id: row.get(6)?,
    })
}

fn message_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        body: row.get(1)?,
        created_at: row.get(2)?,
        author_id: row.get(3)?,
        author_username: row.get(4)?,
        topic_id: row.get(5)?,
    })
}
