// src/application/commands/auth.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::{
    application::{
        dto::{AuthenticatedUser, LoginResult, SessionRecord, SessionUserDto},
        error::{ApplicationError, ApplicationResult},
        ports::{
            security::{PasswordHasher, SessionStore},
            time::Clock,
        },
    },
    domain::user::{NewUser, PasswordHash, UserId, UserRepository, Username},
};

const MIN_PASSWORD_LEN: usize = 8;
const MAX_USERNAME_LEN: usize = 64;
const MAX_PASSWORD_LEN: usize = 256;

pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

/// Outcome of provisioning an admin account from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminProvisioning {
    Created,
    PasswordReset,
}

pub struct AuthCommandService {
    user_repo: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    sessions: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    session_ttl_secs: u64,
}

impl AuthCommandService {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        sessions: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        session_ttl_secs: u64,
    ) -> Self {
        Self {
            user_repo,
            password_hasher,
            sessions,
            clock,
            session_ttl_secs,
        }
    }

    pub fn session_ttl_secs(&self) -> u64 {
        self.session_ttl_secs
    }

    pub async fn login(&self, command: LoginCommand) -> ApplicationResult<LoginResult> {
        let LoginCommand { username, password } = command;
        if username.trim().is_empty()
            || password.is_empty()
            || username.len() > MAX_USERNAME_LEN
            || password.len() > MAX_PASSWORD_LEN
        {
            return Err(ApplicationError::validation("missing_fields"));
        }

        // Malformed usernames fail the same way as unknown ones.
        let username =
            Username::new(username).map_err(|_| ApplicationError::unauthorized("invalid_credentials"))?;
        let user = self
            .user_repo
            .find_by_username(&username)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("invalid_credentials"))?;

        self.password_hasher
            .verify(&password, user.password_hash.as_str())
            .await
            .map_err(|_| ApplicationError::unauthorized("invalid_credentials"))?;

        let session_id = Uuid::new_v4().simple().to_string();
        let record = SessionRecord {
            user_id: user.id.into(),
            username: user.username.to_string(),
            created_at: self.clock.now(),
        };
        self.sessions
            .put(&session_id, &record, self.session_ttl_secs)
            .await?;

        tracing::info!(user_id = record.user_id, "admin logged in");
        Ok(LoginResult {
            session_id,
            user: SessionUserDto {
                username: record.username,
            },
            ttl_secs: self.session_ttl_secs,
        })
    }

    pub async fn logout(&self, session_id: &str) -> ApplicationResult<()> {
        self.sessions.remove(session_id).await
    }

    /// Resolve a session id taken from a verified cookie.
    pub async fn authenticate(&self, session_id: &str) -> ApplicationResult<AuthenticatedUser> {
        let record = self
            .sessions
            .get(session_id)
            .await?
            .ok_or_else(|| ApplicationError::unauthorized("session expired or unknown"))?;
        let id = UserId::new(record.user_id)
            .map_err(|_| ApplicationError::unauthorized("session is corrupt"))?;
        Ok(AuthenticatedUser {
            id,
            username: record.username,
            session_id: session_id.to_string(),
        })
    }

    /// Create the admin account, or reset its password when it already exists.
    pub async fn provision_admin(
        &self,
        username: &str,
        password: &str,
    ) -> ApplicationResult<AdminProvisioning> {
        let username = Username::new(username)?;
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApplicationError::validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let hash = PasswordHash::new(self.password_hasher.hash(password).await?)?;

        match self.user_repo.find_by_username(&username).await? {
            Some(user) => {
                self.user_repo.set_password(user.id, hash).await?;
                Ok(AdminProvisioning::PasswordReset)
            }
            None => {
                self.user_repo
                    .insert(NewUser::new(username, hash, self.clock.now()))
                    .await?;
                Ok(AdminProvisioning::Created)
            }
        }
    }
}
