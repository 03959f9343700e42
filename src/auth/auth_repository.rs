use crate::error::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::auth_models::{RefreshToken, VerificationToken};

#[derive(Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_with_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken> {
        let row = sqlx::query_as::<_, RefreshToken>(
            "INSERT INTO refresh_tokens (user_id, token, expires_at)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .fetch_one(&mut **tx)
        .await?;

        Ok(row)
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>> {
        let row = sqlx::query_as::<_, RefreshToken>(
            "SELECT * FROM refresh_tokens WHERE token = $1 AND expires_at > NOW()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn delete_by_token(&self, token: &str) -> Result<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn create_verification_token_with_tx(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: Uuid,
        token_hash: &str,
        token_type: &str,
    ) -> Result<VerificationToken> {
        let row = sqlx::query_as::<_, VerificationToken>(
            "INSERT INTO verification_tokens (user_id, token_hash, token_type)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(user_id)
        .bind(token_hash)
        .bind(token_type)
        .fetch_one(&mut **tx)
        .await?;

        Ok(row)
    }

    /// Marks a pending verification token consumed and returns it. Returns
    /// None when the token does not exist, has the wrong type, or was
    /// already used.
    pub async fn consume_verification_token(
        &self,
        token_hash: &str,
        token_type: &str,
    ) -> Result<Option<VerificationToken>> {
        let row = sqlx::query_as::<_, VerificationToken>(
            "UPDATE verification_tokens SET consumed_at = NOW()
             WHERE token_hash = $1 AND token_type = $2 AND consumed_at IS NULL
             RETURNING *",
        )
        .bind(token_hash)
        .bind(token_type)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
