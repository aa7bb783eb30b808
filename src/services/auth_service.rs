use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use rand::Rng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ColumnTrait, DatabaseConnection, Set};
use uuid::Uuid;

use crate::{
    dto::auth::{AuthResponse, Claims, TokenPair},
    entity::{
        Users, Verifications,
        users::{ActiveModel as UserActive, Column as UserCol},
        verifications::{ActiveModel as VerificationActive, Column as VerificationCol},
    },
    error::{AppError, AppResult},
    repository::Repository,
};

const ACCESS_TOKEN_HOURS: i64 = 24;
const REFRESH_TOKEN_DAYS: i64 = 7;
/// Password-reset codes are one-time and short-lived.
const RESET_CODE_MINUTES: i64 = 5;

#[derive(Clone)]
pub struct AuthService {
    users: Repository<Users>,
    verifications: Repository<Verifications>,
    jwt_secret: String,
}

impl AuthService {
    pub fn new(conn: DatabaseConnection, jwt_secret: String) -> Self {
        Self {
            users: Repository::new(conn.clone()),
            verifications: Repository::new(conn),
            jwt_secret,
        }
    }

    pub async fn signup(&self, name: String, email: String, password: String) -> AppResult<AuthResponse> {
        let existing = self.users.find_first(UserCol::Email.eq(email.clone())).await?;
        if existing.is_some() {
            return Err(AppError::Conflict("email already exists".into()));
        }

        let password_hash = hash_password(&password)?;
        let user = self
            .users
            .create(UserActive {
                id: Set(Uuid::new_v4()),
                name: Set(name),
                email: Set(email),
                role: Set("user".into()),
                password_hash: Set(password_hash),
                image: Set(None),
                gender: Set(None),
                phone: Set(None),
                address: Set(None),
                refresh_token: Set(None),
                created_at: NotSet,
                updated_at: NotSet,
            })
            .await?;

        let tokens = self.rotate_tokens(&user).await?;
        Ok(AuthResponse {
            tokens,
            user: user.into(),
        })
    }

    pub async fn login(&self, email: String, password: String) -> AppResult<AuthResponse> {
        let user = self
            .users
            .find_first(UserCol::Email.eq(email))
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid email or password".into()))?;

        verify_password(&password, &user.password_hash)
            .map_err(|_| AppError::Unauthorized("invalid email or password".into()))?;

        let tokens = self.rotate_tokens(&user).await?;
        Ok(AuthResponse {
            tokens,
            user: user.into(),
        })
    }

    /// The stored refresh token must match the presented one; rotation
    /// invalidates every previously issued refresh token.
    pub async fn refresh(&self, refresh_token: String) -> AppResult<TokenPair> {
        let claims = self.verify_token(&refresh_token)?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("invalid refresh token".into()))?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("invalid refresh token".into()))?;

        if user.refresh_token.as_deref() != Some(refresh_token.as_str()) {
            return Err(AppError::Unauthorized("invalid refresh token".into()));
        }

        self.rotate_tokens(&user).await
    }

    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: String,
        new_password: String,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound("User"))?;

        verify_password(&current_password, &user.password_hash)
            .map_err(|_| AppError::Unauthorized("current password is incorrect".into()))?;

        let patch = UserActive {
            password_hash: Set(hash_password(&new_password)?),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        self.users.update_by_id(user_id, patch).await?;
        Ok(())
    }

    /// Issues a fresh one-time code, superseding any outstanding one for the
    /// user. Delivery (mail) is an external concern; the code is only logged.
    pub async fn request_password_reset(&self, email: String) -> AppResult<()> {
        let user = self
            .users
            .find_first(UserCol::Email.eq(email))
            .await?
            .ok_or(AppError::NotFound("User"))?;

        self.verifications
            .delete(sea_orm::Condition::all().add(VerificationCol::UserId.eq(user.id)))
            .await?;

        let code = format!("{:06}", rand::thread_rng().gen_range(0..1_000_000));
        self.verifications
            .create(VerificationActive {
                id: Set(Uuid::new_v4()),
                user_id: Set(user.id),
                code: Set(code.clone()),
                expires_at: Set((Utc::now() + Duration::minutes(RESET_CODE_MINUTES)).into()),
                created_at: NotSet,
            })
            .await?;

        tracing::info!(user_id = %user.id, code, "password reset code issued");
        Ok(())
    }

    pub async fn reset_password(
        &self,
        email: String,
        code: String,
        new_password: String,
    ) -> AppResult<()> {
        let user = self
            .users
            .find_first(UserCol::Email.eq(email))
            .await?
            .ok_or(AppError::NotFound("User"))?;

        let verification = self
            .verifications
            .find_first(VerificationCol::UserId.eq(user.id))
            .await?
            .ok_or(AppError::NotFound("Verification code"))?;

        if verification.code != code {
            return Err(AppError::InvalidInput("invalid verification code".into()));
        }
        if verification.expires_at < Utc::now() {
            return Err(AppError::InvalidInput("verification code expired".into()));
        }

        let patch = UserActive {
            password_hash: Set(hash_password(&new_password)?),
            refresh_token: Set(None),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        self.users.update_by_id(user.id, patch).await?;

        // The code is one-time; drop it on success.
        self.verifications.delete_by_id(verification.id).await?;
        Ok(())
    }

    async fn rotate_tokens(&self, user: &crate::entity::users::Model) -> AppResult<TokenPair> {
        let access = self.issue_token(user, Duration::hours(ACCESS_TOKEN_HOURS))?;
        let refresh = self.issue_token(user, Duration::days(REFRESH_TOKEN_DAYS))?;

        let patch = UserActive {
            refresh_token: Set(Some(refresh.clone())),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };
        self.users.update_by_id(user.id, patch).await?;

        Ok(TokenPair { access, refresh })
    }

    fn issue_token(
        &self,
        user: &crate::entity::users::Model,
        ttl: Duration,
    ) -> AppResult<String> {
        let expiration = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("failed to set expiration")))?;

        let claims = Claims {
            sub: user.id.to_string(),
            role: user.role.clone(),
            exp: expiration.timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::Unauthorized("invalid or expired token".into()))
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

fn verify_password(password: &str, hash: &str) -> Result<(), argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Argon2::default().verify_password(password.as_bytes(), &parsed)
}
