use std::fmt;

use uuid::Uuid;

use crate::domain::{
    comment::{Comment, PopulatedComment},
    pagination::Pagination,
    user::User,
};

pub trait CommentStore: Send + Sync + 'static {
    /// One page of comments, newest first, each with its seller populated.
    fn find_comments(
        &self,
        page: Pagination,
    ) -> impl Future<Output = anyhow::Result<Vec<PopulatedComment>>> + Send;

    /// Total number of comments, independent of any page window.
    fn count_comments(&self) -> impl Future<Output = anyhow::Result<i64>> + Send;

    fn find_comment(
        &self,
        comment_id: Uuid,
    ) -> impl Future<Output = anyhow::Result<Option<Comment>>> + Send;

    /// Returns whether a row was removed.
    fn delete_comment(&self, comment_id: Uuid) -> impl Future<Output = anyhow::Result<bool>> + Send;
}

pub trait UserStore: Send + Sync + 'static {
    fn find_user(&self, user_id: Uuid) -> impl Future<Output = anyhow::Result<Option<User>>> + Send;
}

/// No connection could be checked out of the pool. Kept apart from query
/// failures so handlers can answer with `POOL_ERROR`.
#[derive(Debug)]
pub struct PoolUnavailable(pub String);

impl fmt::Display for PoolUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PoolUnavailable {}
