use std::collections::HashMap;

use serde_derive::Deserialize;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    comment::{Comment, PopulatedComment},
    pagination::Pagination,
    user::User,
};

use super::ports::{CommentStore, UserStore};

/// Process-local store for local development and tests.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    comments: RwLock<HashMap<Uuid, Comment>>,
}

#[derive(Deserialize)]
struct MemorySeed {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    comments: Vec<Comment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads users and comments from a JSON file shaped `{"users": [...], "comments": [...]}`.
    pub async fn from_seed_file(path: &str) -> anyhow::Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Could not read seed file {path}: {e}"))?;
        let seed: MemorySeed = serde_json::from_str(&raw)?;

        let store = Self::new();
        let (user_count, comment_count) = (seed.users.len(), seed.comments.len());
        for user in seed.users {
            store.insert_user(user).await;
        }
        for comment in seed.comments {
            store.insert_comment(comment).await?;
        }

        info!(path, user_count, comment_count, "Memory store seeded");
        Ok(store)
    }

    pub async fn insert_user(&self, user: User) {
        self.users.write().await.insert(user.get_user_id(), user);
    }

    /// Fails when the seller is unknown, mirroring the foreign key on `comments.seller_id`.
    pub async fn insert_comment(&self, comment: Comment) -> anyhow::Result<()> {
        if !self.users.read().await.contains_key(&comment.seller_id) {
            return Err(anyhow::anyhow!(
                "Seller {} does not exist for comment {}",
                comment.seller_id,
                comment.comment_id
            ));
        }

        self.comments
            .write()
            .await
            .insert(comment.comment_id, comment);
        Ok(())
    }

    pub async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> anyhow::Result<()> {
        let mut users = self.users.write().await;
        let follower = users
            .get_mut(&follower_id)
            .ok_or_else(|| anyhow::anyhow!("User {follower_id} does not exist"))?;

        if !follower.is_following(followee_id) {
            follower.following.push(followee_id);
        }
        Ok(())
    }
}

impl CommentStore for MemoryStore {
    async fn find_comments(&self, page: Pagination) -> anyhow::Result<Vec<PopulatedComment>> {
        let comments = self.comments.read().await;
        let users = self.users.read().await;

        let mut sorted: Vec<&Comment> = comments.values().collect();
        sorted.sort_by(|a, b| {
            b.comment_created_at
                .cmp(&a.comment_created_at)
                .then_with(|| b.comment_id.cmp(&a.comment_id))
        });

        let page_items = sorted
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .filter_map(|comment| {
                users.get(&comment.seller_id).map(|seller| PopulatedComment {
                    comment: comment.clone(),
                    seller: seller.profile.clone(),
                })
            })
            .collect();

        Ok(page_items)
    }

    async fn count_comments(&self) -> anyhow::Result<i64> {
        Ok(self.comments.read().await.len() as i64)
    }

    async fn find_comment(&self, comment_id: Uuid) -> anyhow::Result<Option<Comment>> {
        Ok(self.comments.read().await.get(&comment_id).cloned())
    }

    async fn delete_comment(&self, comment_id: Uuid) -> anyhow::Result<bool> {
        Ok(self.comments.write().await.remove(&comment_id).is_some())
    }
}

impl UserStore for MemoryStore {
    async fn find_user(&self, user_id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().await.get(&user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;
    use crate::domain::{auth::role::RoleType, user::UserProfile};

    fn user(name: &str) -> User {
        User::new(
            UserProfile {
                user_id: Uuid::new_v4(),
                user_name: name.to_string(),
                user_bio: None,
                user_image: None,
            },
            RoleType::User,
            vec![],
        )
    }

    async fn seeded(count: i64) -> (MemoryStore, Uuid) {
        let store = MemoryStore::new();
        let seller = user("alice");
        let seller_id = seller.get_user_id();
        store.insert_user(seller).await;

        let base = Utc::now();
        for i in 0..count {
            store
                .insert_comment(Comment {
                    comment_id: Uuid::new_v4(),
                    item_id: Uuid::new_v4(),
                    seller_id,
                    comment_body: format!("comment {i}"),
                    comment_created_at: base + Duration::seconds(i),
                })
                .await
                .unwrap();
        }

        (store, seller_id)
    }

    #[tokio::test]
    async fn pages_newest_first() {
        let (store, _) = seeded(5).await;

        let page = store
            .find_comments(Pagination::new(2, 1).unwrap())
            .await
            .unwrap();
        let bodies: Vec<&str> = page
            .iter()
            .map(|c| c.comment.comment_body.as_str())
            .collect();

        assert_eq!(bodies, vec!["comment 3", "comment 2"]);
        assert_eq!(store.count_comments().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn offset_past_end_is_empty() {
        let (store, _) = seeded(3).await;

        let page = store
            .find_comments(Pagination::new(10, 50).unwrap())
            .await
            .unwrap();

        assert!(page.is_empty());
        assert_eq!(store.count_comments().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn rejects_comment_from_unknown_seller() {
        let store = MemoryStore::new();
        let result = store
            .insert_comment(Comment {
                comment_id: Uuid::new_v4(),
                item_id: Uuid::new_v4(),
                seller_id: Uuid::new_v4(),
                comment_body: "orphan".to_string(),
                comment_created_at: Utc::now(),
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let (store, _) = seeded(1).await;
        let id = store.find_comments(Pagination::default()).await.unwrap()[0]
            .comment
            .comment_id;

        assert!(store.delete_comment(id).await.unwrap());
        assert!(!store.delete_comment(id).await.unwrap());
        assert!(store.find_comment(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn follow_is_recorded_once() {
        let (store, seller_id) = seeded(0).await;
        let bob = user("bob");
        let bob_id = bob.get_user_id();
        store.insert_user(bob).await;

        store.follow(bob_id, seller_id).await.unwrap();
        store.follow(bob_id, seller_id).await.unwrap();

        let bob = store.find_user(bob_id).await.unwrap().unwrap();
        assert_eq!(bob.following, vec![seller_id]);
    }
}
