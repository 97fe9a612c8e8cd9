/// Persistence for submissions, slides and contacts (SQLite via sqlx)
use crate::error::AnnounceError;
use crate::models::{Audience, Contact, NewContact, NewSubmission, Slide, Submission};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn create_submission(&self, new: &NewSubmission) -> Result<Submission, AnnounceError>;
    async fn get_submission(&self, id: i64) -> Result<Option<Submission>, AnnounceError>;
    /// All submissions, most recent start date first
    async fn list_submissions(&self) -> Result<Vec<Submission>, AnnounceError>;
    async fn count_submissions(&self) -> Result<i64, AnnounceError>;
    /// Delete a submission and its slides; returns the removed slides,
    /// or `None` when no such submission exists
    async fn delete_submission(&self, id: i64) -> Result<Option<Vec<Slide>>, AnnounceError>;

    async fn create_slide(&self, submission_id: i64, image: &str) -> Result<Slide, AnnounceError>;
    async fn list_slides(&self, submission_id: i64) -> Result<Vec<Slide>, AnnounceError>;

    async fn create_contact(&self, new: &NewContact) -> Result<Contact, AnnounceError>;
    async fn list_contacts(&self) -> Result<Vec<Contact>, AnnounceError>;
    async fn delete_contact(&self, id: i64) -> Result<bool, AnnounceError>;
    /// Contacts flagged for `audience`, in id order
    async fn contacts_for(&self, audience: Audience) -> Result<Vec<Contact>, AnnounceError>;

    async fn ping(&self) -> Result<(), AnnounceError>;
}

const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS submissions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        email TEXT,
        description TEXT,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        chapel INTEGER NOT NULL DEFAULT 0,
        praise INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL,
        CHECK (chapel = 1 OR praise = 1)
    )"#,
    r#"CREATE TABLE IF NOT EXISTS submission_slides (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        submission_id INTEGER NOT NULL REFERENCES submissions(id) ON DELETE CASCADE,
        image TEXT NOT NULL
    )"#,
    "CREATE INDEX IF NOT EXISTS idx_submission_slides_submission ON submission_slides(submission_id)",
    r#"CREATE TABLE IF NOT EXISTS contacts (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        is_chapel INTEGER NOT NULL DEFAULT 0,
        is_praise INTEGER NOT NULL DEFAULT 0
    )"#,
];

const SUBMISSION_COLUMNS: &str =
    "id, title, email, description, start_date, end_date, chapel, praise, created_at";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect to `database_url`, creating the file and schema if missing
    pub async fn connect(database_url: &str) -> Result<Self, AnnounceError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    /// Private in-memory database, mainly for tests
    ///
    /// Pinned to a single connection that is never recycled: every SQLite
    /// memory connection is its own database.
    pub async fn in_memory() -> Result<Self, AnnounceError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: SqlitePool) -> Result<Self, AnnounceError> {
        let store = Self { pool };
        store.bootstrap().await?;
        Ok(store)
    }

    async fn bootstrap(&self) -> Result<(), AnnounceError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::debug!("Database schema ready");
        Ok(())
    }

    fn submission_from_row(row: &SqliteRow) -> Result<Submission, sqlx::Error> {
        Ok(Submission {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            email: row.try_get("email")?,
            description: row.try_get("description")?,
            start_date: row.try_get("start_date")?,
            end_date: row.try_get("end_date")?,
            chapel: row.try_get("chapel")?,
            praise: row.try_get("praise")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn slide_from_row(row: &SqliteRow) -> Result<Slide, sqlx::Error> {
        Ok(Slide {
            id: row.try_get("id")?,
            submission_id: row.try_get("submission_id")?,
            image: row.try_get("image")?,
        })
    }

    fn contact_from_row(row: &SqliteRow) -> Result<Contact, sqlx::Error> {
        Ok(Contact {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            is_chapel: row.try_get("is_chapel")?,
            is_praise: row.try_get("is_praise")?,
        })
    }
}

#[async_trait]
impl SubmissionStore for SqliteStore {
    async fn create_submission(&self, new: &NewSubmission) -> Result<Submission, AnnounceError> {
        if !new.chapel && !new.praise {
            return Err(AnnounceError::Validation(
                "Submission must target chapel or praise".to_string(),
            ));
        }

        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO submissions \
             (title, email, description, start_date, end_date, chapel, praise, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&new.title)
        .bind(&new.email)
        .bind(&new.description)
        .bind(new.start_date)
        .bind(new.end_date)
        .bind(new.chapel)
        .bind(new.praise)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let submission = Submission {
            id: result.last_insert_rowid(),
            title: new.title.clone(),
            email: new.email.clone(),
            description: new.description.clone(),
            start_date: new.start_date,
            end_date: new.end_date,
            chapel: new.chapel,
            praise: new.praise,
            created_at,
        };

        tracing::debug!(submission_id = submission.id, "Inserted submission");
        Ok(submission)
    }

    async fn get_submission(&self, id: i64) -> Result<Option<Submission>, AnnounceError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM submissions WHERE id = ?",
            SUBMISSION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::submission_from_row).transpose()?)
    }

    async fn list_submissions(&self) -> Result<Vec<Submission>, AnnounceError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM submissions ORDER BY start_date DESC, id DESC",
            SUBMISSION_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(Self::submission_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn count_submissions(&self) -> Result<i64, AnnounceError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM submissions")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn delete_submission(&self, id: i64) -> Result<Option<Vec<Slide>>, AnnounceError> {
        let mut tx = self.pool.begin().await?;

        let slides = sqlx::query(
            "SELECT id, submission_id, image FROM submission_slides \
             WHERE submission_id = ? ORDER BY id",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?
        .iter()
        .map(Self::slide_from_row)
        .collect::<Result<Vec<_>, _>>()?;

        // Slides go with the submission via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM submissions WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        tracing::debug!(
            submission_id = id,
            slides = slides.len(),
            "Deleted submission"
        );
        Ok(Some(slides))
    }

    async fn create_slide(&self, submission_id: i64, image: &str) -> Result<Slide, AnnounceError> {
        let result = sqlx::query("INSERT INTO submission_slides (submission_id, image) VALUES (?, ?)")
            .bind(submission_id)
            .bind(image)
            .execute(&self.pool)
            .await?;

        Ok(Slide {
            id: result.last_insert_rowid(),
            submission_id,
            image: image.to_string(),
        })
    }

    async fn list_slides(&self, submission_id: i64) -> Result<Vec<Slide>, AnnounceError> {
        let rows = sqlx::query(
            "SELECT id, submission_id, image FROM submission_slides \
             WHERE submission_id = ? ORDER BY id",
        )
        .bind(submission_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(Self::slide_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn create_contact(&self, new: &NewContact) -> Result<Contact, AnnounceError> {
        let result = sqlx::query(
            "INSERT INTO contacts (name, email, is_chapel, is_praise) VALUES (?, ?, ?, ?)",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(new.is_chapel)
        .bind(new.is_praise)
        .execute(&self.pool)
        .await?;

        Ok(Contact {
            id: result.last_insert_rowid(),
            name: new.name.clone(),
            email: new.email.clone(),
            is_chapel: new.is_chapel,
            is_praise: new.is_praise,
        })
    }

    async fn list_contacts(&self) -> Result<Vec<Contact>, AnnounceError> {
        let rows = sqlx::query("SELECT id, name, email, is_chapel, is_praise FROM contacts ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(Self::contact_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn delete_contact(&self, id: i64) -> Result<bool, AnnounceError> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn contacts_for(&self, audience: Audience) -> Result<Vec<Contact>, AnnounceError> {
        let sql = match audience {
            Audience::Chapel => {
                "SELECT id, name, email, is_chapel, is_praise FROM contacts \
                 WHERE is_chapel = 1 ORDER BY id"
            }
            Audience::Praise => {
                "SELECT id, name, email, is_chapel, is_praise FROM contacts \
                 WHERE is_praise = 1 ORDER BY id"
            }
        };

        let rows = sqlx::query(sql).fetch_all(&self.pool).await?;

        Ok(rows
            .iter()
            .map(Self::contact_from_row)
            .collect::<Result<Vec<_>, _>>()?)
    }

    async fn ping(&self) -> Result<(), AnnounceError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
