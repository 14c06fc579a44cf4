use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoleType {
    Admin,
    Moderator,
    User,
}

impl RoleType {
    pub fn from_name(role_name: &str) -> anyhow::Result<Self> {
        match role_name.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(RoleType::Admin),
            "moderator" | "mod" => Ok(RoleType::Moderator),
            "user" => Ok(RoleType::User),
            _ => Err(anyhow::anyhow!("Invalid role name: {role_name}")),
        }
    }

    /// Whether this role may remove content authored by other users.
    pub fn can_moderate(&self) -> bool {
        match self {
            RoleType::Admin | RoleType::Moderator => true,
            RoleType::User => false,
        }
    }
}
