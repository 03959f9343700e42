use crate::auth::auth_repository::RefreshTokenRepository;
use crate::auth::{create_access_token, create_refresh_token, hash_password, verify_jwt, verify_password};
use crate::db::DbPool;
use crate::email::email_repository::EmailRepository;
use crate::error::{AppError, Result};
use crate::user::user_models::User;
use crate::user::user_repository::UserRepository;
use chrono::{Duration, Utc};
use uuid::Uuid;

#[derive(Clone)]
pub struct AuthService {
    db: DbPool,
    user_repo: UserRepository,
    refresh_token_repo: RefreshTokenRepository,
    email_repo: EmailRepository,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(
        db: DbPool,
        user_repo: UserRepository,
        refresh_token_repo: RefreshTokenRepository,
        email_repo: EmailRepository,
        jwt_secret: String,
    ) -> Self {
        Self {
            db,
            user_repo,
            refresh_token_repo,
            email_repo,
            jwt_secret,
        }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<(User, String, String)> {
        let password_hash = hash_password(password)?;

        let mut tx = self.db.begin().await?;

        let user = self
            .user_repo
            .create_with_tx(&mut tx, email, full_name, &password_hash)
            .await?;

        let access_token = create_access_token(user.id, &user.email, &self.jwt_secret)?;
        let refresh_token = create_refresh_token(user.id, &user.email, &self.jwt_secret)?;

        let expires_at = Utc::now() + Duration::days(7);
        self.refresh_token_repo
            .create_with_tx(&mut tx, user.id, &refresh_token, expires_at)
            .await?;

        let verification_token = Uuid::new_v4().simple().to_string();
        self.refresh_token_repo
            .create_verification_token_with_tx(&mut tx, user.id, &verification_token, "email")
            .await?;

        tx.commit().await?;

        // Delivery is delegated to the mail queue; a failure here must not
        // undo the registration.
        if let Err(e) = self
            .email_repo
            .schedule(
                user.id,
                None,
                &user.email,
                "Verify your Roki account",
                &format!(
                    "Hi {}! Confirm your email with this link token: {}",
                    user.display_name(),
                    verification_token
                ),
                Utc::now(),
            )
            .await
        {
            tracing::warn!("Failed to queue verification email: {:?}", e);
        }

        Ok((user, access_token, refresh_token))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String, String)> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid credentials".into()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Authentication("Invalid credentials".into()));
        }

        let access_token = create_access_token(user.id, &user.email, &self.jwt_secret)?;
        let refresh_token = create_refresh_token(user.id, &user.email, &self.jwt_secret)?;

        let mut tx = self.db.begin().await?;

        let expires_at = Utc::now() + Duration::days(7);
        self.refresh_token_repo
            .create_with_tx(&mut tx, user.id, &refresh_token, expires_at)
            .await?;

        tx.commit().await?;

        Ok((user, access_token, refresh_token))
    }

    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<(String, String)> {
        let claims = verify_jwt(refresh_token, &self.jwt_secret)?;

        self.refresh_token_repo
            .find_by_token(refresh_token)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid refresh token".into()))?;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Authentication("Invalid token claims".into()))?;

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Authentication("User not found".into()))?;

        let new_access_token = create_access_token(user.id, &user.email, &self.jwt_secret)?;
        let new_refresh_token = create_refresh_token(user.id, &user.email, &self.jwt_secret)?;

        self.refresh_token_repo.delete_by_token(refresh_token).await?;

        let mut tx = self.db.begin().await?;

        let expires_at = Utc::now() + Duration::days(7);
        self.refresh_token_repo
            .create_with_tx(&mut tx, user.id, &new_refresh_token, expires_at)
            .await?;

        tx.commit().await?;

        Ok((new_access_token, new_refresh_token))
    }

    pub async fn logout(&self, refresh_token: &str) -> Result<()> {
        self.refresh_token_repo.delete_by_token(refresh_token).await?;
        Ok(())
    }

    /// Email-link verification callback. Consumes the token and flips the
    /// user's verified flag.
    pub async fn verify_email(&self, token_hash: &str, token_type: &str) -> Result<User> {
        let token = self
            .refresh_token_repo
            .consume_verification_token(token_hash, token_type)
            .await?
            .ok_or_else(|| AppError::NotFound("Verification token not found".into()))?;

        self.user_repo
            .mark_email_verified(token.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    pub async fn current_user(&self, user_id: Uuid) -> Result<User> {
        self.user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }
}
