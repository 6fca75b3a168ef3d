use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use crate::error::{DataValidationError, ServiceError};
use crate::models::{Recommendation, RecommendationType};

#[derive(Debug, Clone)]
pub struct DBClient {
    pool: Pool<Sqlite>,
}

impl DBClient {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        DBClient { pool }
    }
}

/// Creates the recommendations table when it does not exist yet.
pub async fn init_db(pool: &Pool<Sqlite>) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recommendations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_id INTEGER NOT NULL,
            rec_product_id INTEGER NOT NULL,
            type INTEGER NOT NULL DEFAULT 0,
            interested INTEGER NOT NULL DEFAULT 0
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

#[async_trait]
pub trait RecommendationExt {
    async fn all(&self) -> Result<Vec<Recommendation>, ServiceError>;

    async fn find(&self, rec_id: i64) -> Result<Option<Recommendation>, ServiceError>;

    async fn find_or_404(&self, rec_id: i64) -> Result<Recommendation, ServiceError>;

    async fn find_by_filter(
        &self,
        product_id: Option<i64>,
        rec_product_id: Option<i64>,
        rec_type: Option<RecommendationType>,
    ) -> Result<Vec<Recommendation>, ServiceError>;

    /// Inserts a new row; any id on the instance is discarded so the store
    /// always assigns a fresh key.
    async fn create(&self, rec: &Recommendation) -> Result<Recommendation, ServiceError>;

    /// Persists all current field values to the existing row. The instance
    /// must carry a non-empty id.
    async fn update(&self, rec: &Recommendation) -> Result<Recommendation, ServiceError>;

    async fn delete(&self, rec_id: i64) -> Result<(), ServiceError>;
}

#[async_trait]
impl RecommendationExt for DBClient {
    async fn all(&self) -> Result<Vec<Recommendation>, ServiceError> {
        let recs = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT id, product_id, rec_product_id, type, interested
            FROM recommendations
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(recs)
    }

    async fn find(&self, rec_id: i64) -> Result<Option<Recommendation>, ServiceError> {
        let rec = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT id, product_id, rec_product_id, type, interested
            FROM recommendations
            WHERE id = ?1
            "#,
        )
        .bind(rec_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rec)
    }

    async fn find_or_404(&self, rec_id: i64) -> Result<Recommendation, ServiceError> {
        self.find(rec_id)
            .await?
            .ok_or(ServiceError::NotFound(rec_id))
    }

    async fn find_by_filter(
        &self,
        product_id: Option<i64>,
        rec_product_id: Option<i64>,
        rec_type: Option<RecommendationType>,
    ) -> Result<Vec<Recommendation>, ServiceError> {
        let recs = sqlx::query_as::<_, Recommendation>(
            r#"
            SELECT id, product_id, rec_product_id, type, interested
            FROM recommendations
            WHERE (?1 IS NULL OR product_id = ?1)
              AND (?2 IS NULL OR rec_product_id = ?2)
              AND (?3 IS NULL OR type = ?3)
            "#,
        )
        .bind(product_id)
        .bind(rec_product_id)
        .bind(rec_type)
        .fetch_all(&self.pool)
        .await?;

        Ok(recs)
    }

    async fn create(&self, rec: &Recommendation) -> Result<Recommendation, ServiceError> {
        let created = sqlx::query_as::<_, Recommendation>(
            r#"
            INSERT INTO recommendations (product_id, rec_product_id, type, interested)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, product_id, rec_product_id, type, interested
            "#,
        )
        .bind(rec.product_id)
        .bind(rec.rec_product_id)
        .bind(rec.rec_type)
        .bind(rec.interested)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn update(&self, rec: &Recommendation) -> Result<Recommendation, ServiceError> {
        let rec_id = match rec.id {
            Some(rec_id) if rec_id != 0 => rec_id,
            _ => {
                return Err(ServiceError::Validation(DataValidationError(
                    "Update called with empty ID field".to_string(),
                )))
            }
        };

        let updated = sqlx::query_as::<_, Recommendation>(
            r#"
            UPDATE recommendations
            SET product_id = ?1, rec_product_id = ?2, type = ?3, interested = ?4
            WHERE id = ?5
            RETURNING id, product_id, rec_product_id, type, interested
            "#,
        )
        .bind(rec.product_id)
        .bind(rec.rec_product_id)
        .bind(rec.rec_type)
        .bind(rec.interested)
        .bind(rec_id)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or(ServiceError::NotFound(rec_id))
    }

    async fn delete(&self, rec_id: i64) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            DELETE FROM recommendations
            WHERE id = ?1
            "#,
        )
        .bind(rec_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
