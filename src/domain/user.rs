use diesel::{Queryable, Selectable};
use serde_derive::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{domain::auth::role::RoleType, schema::users};

/// Public part of a user, attached to each listed comment as its seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = users)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub user_name: String,
    pub user_bio: Option<String>,
    pub user_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub profile: UserProfile,
    pub role: RoleType,
    pub following: Vec<Uuid>,
}

impl User {
    pub fn new(profile: UserProfile, role: RoleType, following: Vec<Uuid>) -> Self {
        Self {
            profile,
            role,
            following,
        }
    }

    pub fn get_user_id(&self) -> Uuid {
        self.profile.user_id
    }

    pub fn is_following(&self, user_id: Uuid) -> bool {
        self.following.contains(&user_id)
    }
}
