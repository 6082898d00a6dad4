use tracing::info;

use shared_database::{Database, DbResult};
use shared_models::auth::Role;

use crate::password::hash_password;

pub struct DefaultUser {
    pub username: &'static str,
    pub password: &'static str,
    pub role: Role,
}

/// Accounts created at startup when missing.
pub const DEFAULT_USERS: [DefaultUser; 2] = [
    DefaultUser {
        username: "admin",
        password: "admin123",
        role: Role::Admin,
    },
    DefaultUser {
        username: "agente",
        password: "agente123",
        role: Role::Agent,
    },
];

/// Creates the default accounts that do not exist yet and returns how many were added.
pub fn seed_default_users(db: &Database) -> DbResult<usize> {
    db.transaction(|s| {
        let mut added = 0;
        for user in &DEFAULT_USERS {
            if s.find_user_by_username(user.username)?.is_none() {
                s.insert_user(user.username, &hash_password(user.password), user.role)?;
                info!("Seeded default user {} ({})", user.username, user.role);
                added += 1;
            }
        }
        Ok(added)
    })
}
