use anyhow::{Context as _, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Row, postgres::PgRow, types::Json};

use crate::extractor::{ContactInfo, DocumentLink, InstrumentType, Publication};
use crate::store::{PublicationStore, UpsertOutcome, checksum};

/// PostgreSQL-backed store over the `publications` table.
#[derive(Clone)]
pub struct PgPublicationStore {
    pool: PgPool,
}

impl PgPublicationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PublicationStore for PgPublicationStore {
    /// One statement: an identical checksum leaves the row untouched and
    /// returns nothing; otherwise `xmax = 0` tells an insert from an update.
    async fn upsert(&self, publication: &Publication) -> Result<UpsertOutcome> {
        let sum = checksum(publication)?;

        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO publications
                  (identifier, institution, type, date, title, description,
                   documents, contact, feedback_days, max_feedback_date, checksum, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, now())
            ON CONFLICT (identifier) DO UPDATE
              SET institution       = EXCLUDED.institution,
                  type              = EXCLUDED.type,
                  date              = EXCLUDED.date,
                  title             = EXCLUDED.title,
                  description       = EXCLUDED.description,
                  documents         = EXCLUDED.documents,
                  contact           = EXCLUDED.contact,
                  feedback_days     = EXCLUDED.feedback_days,
                  max_feedback_date = EXCLUDED.max_feedback_date,
                  checksum          = EXCLUDED.checksum,
                  updated_at        = now()
              WHERE publications.checksum IS DISTINCT FROM EXCLUDED.checksum
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(&publication.identifier)
        .bind(&publication.institution)
        .bind(publication.kind.code())
        .bind(publication.date)
        .bind(&publication.title)
        .bind(&publication.description)
        .bind(Json(&publication.documents))
        .bind(Json(&publication.contact))
        .bind(publication.feedback_days.map(i64::from))
        .bind(publication.max_feedback_date)
        .bind(&sum)
        .fetch_optional(&self.pool)
        .await?;

        Ok(match inserted {
            None => UpsertOutcome::Unchanged,
            Some(true) => UpsertOutcome::Inserted,
            Some(false) => UpsertOutcome::Updated,
        })
    }

    async fn get(&self, identifier: &str) -> Result<Option<Publication>> {
        let row = sqlx::query(
            "SELECT identifier, institution, type, date, title, description,
                    documents, contact, feedback_days, max_feedback_date
             FROM publications WHERE identifier = $1",
        )
        .bind(identifier)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|row| publication_from_row(&row)).transpose()
    }

    async fn count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM publications")
            .fetch_one(&self.pool)
            .await?;

        Ok(usize::try_from(count)?)
    }
}

fn publication_from_row(row: &PgRow) -> Result<Publication> {
    let code: String = row.try_get("type")?;
    let kind = InstrumentType::from_code(&code)
        .ok_or_else(|| anyhow!("unknown publication type '{code}'"))?;
    let Json(documents): Json<Vec<DocumentLink>> = row.try_get("documents")?;
    let Json(contact): Json<ContactInfo> = row.try_get("contact")?;
    let feedback_days: Option<i64> = row.try_get("feedback_days")?;

    Ok(Publication {
        institution: row.try_get("institution")?,
        identifier: row.try_get("identifier")?,
        kind,
        date: row.try_get::<Option<NaiveDate>, _>("date")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        documents,
        contact,
        feedback_days: feedback_days
            .map(u32::try_from)
            .transpose()
            .context("feedback_days out of range")?,
        max_feedback_date: row.try_get("max_feedback_date")?,
    })
}
