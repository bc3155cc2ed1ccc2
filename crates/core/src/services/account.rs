//! Account service: registration, login, and token authentication.
//!
//! When the database is unavailable the service degrades to a JSON
//! file-backed credential store seeded with demo accounts, so login keeps
//! working in fallback mode.

use std::path::PathBuf;
use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use rapport_common::{AppError, AppResult, IdGenerator};
use rapport_db::entities::user;
use rapport_db::repositories::UserRepository;
use sea_orm::Set;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use validator::Validate;

/// Input for registering an account.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Input for logging in.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// A login result: the user row plus a fresh bearer token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: user::Model,
    pub token: String,
}

/// One entry in the file-backed credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCredential {
    user: user::Model,
    password_hash: String,
}

/// Email-keyed credential table persisted as a JSON file.
struct CredentialFile {
    path: PathBuf,
    entries: Mutex<std::collections::HashMap<String, StoredCredential>>,
}

impl CredentialFile {
    fn load(path: PathBuf) -> Self {
        let entries = std::fs::read(&path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default();

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    async fn find(&self, email: &str) -> Option<StoredCredential> {
        self.entries.lock().await.get(email).cloned()
    }

    async fn find_by_token(&self, token: &str) -> Option<user::Model> {
        self.entries
            .lock()
            .await
            .values()
            .find(|c| c.user.token.as_deref() == Some(token))
            .map(|c| c.user.clone())
    }

    async fn upsert(&self, credential: StoredCredential) -> AppResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(credential.user.email.clone(), credential);

        let bytes = serde_json::to_vec_pretty(&*entries)
            .map_err(|e| AppError::Internal(format!("Failed to encode credentials: {e}")))?;
        drop(entries);

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Internal(format!("Failed to create directory: {e}")))?;
        }
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to persist credentials: {e}")))
    }
}

/// Service managing accounts against the database, with a local credential
/// fallback for degraded mode.
#[derive(Clone)]
pub struct AccountService {
    users: Option<UserRepository>,
    credentials: Arc<CredentialFile>,
    id_gen: IdGenerator,
}

impl AccountService {
    /// Create an account service. `users` is `None` when the service runs
    /// without a database; every operation then uses the credential file.
    #[must_use]
    pub fn new(users: Option<UserRepository>, credentials_path: PathBuf) -> Self {
        Self {
            users,
            credentials: Arc::new(CredentialFile::load(credentials_path)),
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new account.
    pub async fn register(&self, input: RegisterInput) -> AppResult<Session> {
        input.validate()?;

        let password_hash = hash_password(&input.password)?;
        let token = self.id_gen.generate_token();
        let now = Utc::now();

        if let Some(ref users) = self.users {
            if users.find_by_email(&input.email).await?.is_some() {
                return Err(AppError::Conflict("Email already registered".to_string()));
            }

            let model = user::ActiveModel {
                id: Set(self.id_gen.generate()),
                email: Set(input.email),
                password_hash: Set(password_hash),
                token: Set(Some(token.clone())),
                is_admin: Set(false),
                created_at: Set(now.into()),
            };

            let created = users.create(model).await?;
            return Ok(Session {
                user: created,
                token,
            });
        }

        // Degraded mode: credential file only.
        if self.credentials.find(&input.email).await.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let user = user::Model {
            id: self.id_gen.generate(),
            email: input.email,
            password_hash: String::new(),
            token: Some(token.clone()),
            is_admin: false,
            created_at: now.into(),
        };

        self.credentials
            .upsert(StoredCredential {
                user: user.clone(),
                password_hash,
            })
            .await?;

        Ok(Session { user, token })
    }

    /// Log in with email and password, rotating the bearer token.
    pub async fn login(&self, input: LoginInput) -> AppResult<Session> {
        if let Some(ref users) = self.users {
            match users.find_by_email(&input.email).await {
                Ok(found) => {
                    let user = found.ok_or(AppError::Unauthorized)?;

                    if !verify_password(&input.password, &user.password_hash)? {
                        return Err(AppError::Unauthorized);
                    }

                    let token = self.id_gen.generate_token();
                    let mut model: user::ActiveModel = user.into();
                    model.token = Set(Some(token.clone()));
                    let updated = users.update(model).await?;

                    return Ok(Session {
                        user: updated,
                        token,
                    });
                }
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(error = %e, "user lookup failed, trying credential fallback");
                }
                Err(e) => return Err(e),
            }
        }

        self.login_from_file(&input).await
    }

    /// Resolve the user behind a bearer token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        if let Some(ref users) = self.users {
            match users.find_by_token(token).await {
                Ok(Some(user)) => return Ok(user),
                Ok(None) => {}
                Err(e) if e.is_recoverable() => {
                    tracing::warn!(error = %e, "token lookup failed, trying credential fallback");
                }
                Err(e) => return Err(e),
            }
        }

        self.credentials
            .find_by_token(token)
            .await
            .ok_or(AppError::Unauthorized)
    }

    async fn login_from_file(&self, input: &LoginInput) -> AppResult<Session> {
        let mut credential = self
            .credentials
            .find(&input.email)
            .await
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(&input.password, &credential.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        let token = self.id_gen.generate_token();
        credential.user.token = Some(token.clone());
        let user = credential.user.clone();
        self.credentials.upsert(credential).await?;

        Ok(Session { user, token })
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
