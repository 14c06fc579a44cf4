use chrono::{DateTime, Utc};
use diesel::{Queryable, Selectable};
use serde_derive::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    domain::user::{User, UserProfile},
    schema::comments,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = comments)]
pub struct Comment {
    pub comment_id: Uuid,
    pub item_id: Uuid,
    pub seller_id: Uuid,
    pub comment_body: String,
    pub comment_created_at: DateTime<Utc>,
}

/// A comment with its seller's profile joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedComment {
    pub comment: Comment,
    pub seller: UserProfile,
}

/// What rendering a comment needs to know about whoever is looking at it.
pub trait CommentViewer {
    fn viewer_id(&self) -> Uuid;
    fn follows(&self, user_id: Uuid) -> bool;
    fn can_moderate(&self) -> bool;

    fn can_delete(&self, comment: &Comment) -> bool {
        self.viewer_id() == comment.seller_id || self.can_moderate()
    }
}

impl CommentViewer for User {
    fn viewer_id(&self) -> Uuid {
        self.get_user_id()
    }

    fn follows(&self, user_id: Uuid) -> bool {
        self.is_following(user_id)
    }

    fn can_moderate(&self) -> bool {
        self.role.can_moderate()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerView {
    pub username: String,
    pub bio: Option<String>,
    pub image: Option<String>,
    pub following: bool,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: Uuid,
    pub item_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub seller: SellerView,
    pub can_delete: bool,
}

pub fn render_comment<V: CommentViewer>(
    populated: PopulatedComment,
    viewer: Option<&V>,
) -> CommentView {
    let PopulatedComment { comment, seller } = populated;

    let following = viewer.is_some_and(|v| v.follows(seller.user_id));
    let can_delete = viewer.is_some_and(|v| v.can_delete(&comment));

    CommentView {
        id: comment.comment_id,
        item_id: comment.item_id,
        body: comment.comment_body,
        created_at: comment.comment_created_at,
        seller: SellerView {
            username: seller.user_name,
            bio: seller.user_bio,
            image: seller.user_image,
            following,
        },
        can_delete,
    }
}
