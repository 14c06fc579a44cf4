use uuid::Uuid;

use crate::domain::{
    comment::{Comment, PopulatedComment},
    pagination::Pagination,
    user::User,
};

use super::{
    memory_store::MemoryStore,
    pg_store::PgStore,
    ports::{CommentStore, UserStore},
};

/// The backend selected at startup through `STORE_BACKEND`.
pub enum AppStore {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl AppStore {
    pub fn backend_name(&self) -> &'static str {
        match self {
            AppStore::Postgres(_) => "postgres",
            AppStore::Memory(_) => "memory",
        }
    }

    pub async fn check_connection(&self) -> anyhow::Result<()> {
        match self {
            AppStore::Postgres(store) => {
                let conn = store.get_conn().await?;
                drop(conn);
                Ok(())
            }
            AppStore::Memory(_) => Ok(()),
        }
    }
}

impl CommentStore for AppStore {
    async fn find_comments(&self, page: Pagination) -> anyhow::Result<Vec<PopulatedComment>> {
        match self {
            AppStore::Postgres(store) => store.find_comments(page).await,
            AppStore::Memory(store) => store.find_comments(page).await,
        }
    }

    async fn count_comments(&self) -> anyhow::Result<i64> {
        match self {
            AppStore::Postgres(store) => store.count_comments().await,
            AppStore::Memory(store) => store.count_comments().await,
        }
    }

    async fn find_comment(&self, comment_id: Uuid) -> anyhow::Result<Option<Comment>> {
        match self {
            AppStore::Postgres(store) => store.find_comment(comment_id).await,
            AppStore::Memory(store) => store.find_comment(comment_id).await,
        }
    }

    async fn delete_comment(&self, comment_id: Uuid) -> anyhow::Result<bool> {
        match self {
            AppStore::Postgres(store) => store.delete_comment(comment_id).await,
            AppStore::Memory(store) => store.delete_comment(comment_id).await,
        }
    }
}

impl UserStore for AppStore {
    async fn find_user(&self, user_id: Uuid) -> anyhow::Result<Option<User>> {
        match self {
            AppStore::Postgres(store) => store.find_user(user_id).await,
            AppStore::Memory(store) => store.find_user(user_id).await,
        }
    }
}
