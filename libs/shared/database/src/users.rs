//! User account queries.

use rusqlite::{params, OptionalExtension, Row};

use shared_models::auth::Role;

use crate::{DbResult, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Option<String>,
}

const USER_SELECT: &str = r#"
    SELECT u.id, u.username, u.password_hash, r.name
    FROM users u
    LEFT JOIN roles r ON r.id = u.role_id
"#;

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        role: row.get(3)?,
    })
}

impl Session<'_> {
    pub fn insert_user(&self, username: &str, password_hash: &str, role: Role) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO users (username, password_hash, role_id)
            VALUES (?1, ?2, (SELECT id FROM roles WHERE name = ?3))
            "#,
            params![username, password_hash, role.label()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn find_user(&self, id: i64) -> DbResult<Option<UserRecord>> {
        self.conn
            .query_row(&format!("{} WHERE u.id = ?1", USER_SELECT), params![id], user_from_row)
            .optional()
            .map_err(Into::into)
    }

    pub fn find_user_by_username(&self, username: &str) -> DbResult<Option<UserRecord>> {
        self.conn
            .query_row(
                &format!("{} WHERE u.username = ?1", USER_SELECT),
                params![username],
                user_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    pub fn set_username(&self, id: i64, username: &str) -> DbResult<bool> {
        let rows = self.conn.execute(
            "UPDATE users SET username = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, username],
        )?;
        Ok(rows > 0)
    }

    pub fn set_password_hash(&self, id: i64, password_hash: &str) -> DbResult<bool> {
        let rows = self.conn.execute(
            "UPDATE users SET password_hash = ?2, updated_at = datetime('now') WHERE id = ?1",
            params![id, password_hash],
        )?;
        Ok(rows > 0)
    }
}
