use std::fmt;

use serde::{Deserialize, Serialize};

/// Roles seeded at startup. The label is what the store and the wire carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    #[serde(rename = "Agente")]
    Agent,
    #[serde(rename = "Paciente")]
    Patient,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Agent, Role::Patient];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Agent => "Agente",
            Role::Patient => "Paciente",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.label() == label)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub usuario: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub usuario: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub usr_id: i64,
    pub usr_name: String,
    pub r_name: Option<String>,
}

impl LoginResponse {
    pub fn role(&self) -> Option<Role> {
        self.r_name.as_deref().and_then(Role::from_label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUsernameRequest {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}
