use tracing::{debug, info};

use shared_database::{AppState, Database};
use shared_models::auth::{LoginRequest, LoginResponse, RegisterRequest, Role};
use shared_utils::password::{hash_password, verify_password};

use crate::models::UserError;

pub struct AccountService {
    db: Database,
}

impl AccountService {
    pub fn new(state: &AppState) -> Self {
        Self {
            db: state.db.clone(),
        }
    }

    pub fn login(&self, request: &LoginRequest) -> Result<LoginResponse, UserError> {
        let user = self
            .db
            .session(|s| s.find_user_by_username(&request.usuario))?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(&request.password, &user.password_hash) {
            debug!("Rejected password for user {}", user.id);
            return Err(UserError::InvalidCredentials);
        }

        info!("User {} logged in", user.id);
        Ok(LoginResponse {
            usr_id: user.id,
            usr_name: user.username,
            r_name: user.role,
        })
    }

    /// Creates a patient-role account; the username is trimmed first.
    pub fn register(&self, request: &RegisterRequest) -> Result<i64, UserError> {
        let username = request.usuario.trim();
        if username.is_empty() {
            return Err(UserError::EmptyUsername);
        }

        let id = self.db.transaction(|s| {
            if s.find_user_by_username(username)?.is_some() {
                return Err(UserError::UsernameTaken);
            }
            Ok(s.insert_user(username, &hash_password(&request.password), Role::Patient)?)
        })?;

        info!("Registered user {} as {}", id, Role::Patient);
        Ok(id)
    }

    pub fn update_username(&self, user_id: i64, username: &str) -> Result<(), UserError> {
        let username = username.trim();
        self.db.transaction(|s| {
            if s.find_user(user_id)?.is_none() {
                return Err(UserError::NotFound);
            }
            if username.is_empty() {
                return Err(UserError::EmptyUsername);
            }
            if let Some(other) = s.find_user_by_username(username)? {
                if other.id != user_id {
                    return Err(UserError::UsernameTaken);
                }
            }
            s.set_username(user_id, username)?;
            Ok(())
        })?;

        info!("Username updated for user {}", user_id);
        Ok(())
    }

    pub fn update_password(&self, user_id: i64, password: &str) -> Result<(), UserError> {
        let updated = self
            .db
            .session(|s| s.set_password_hash(user_id, &hash_password(password)))?;
        if !updated {
            return Err(UserError::NotFound);
        }

        info!("Password updated for user {}", user_id);
        Ok(())
    }
}
