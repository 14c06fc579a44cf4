use diesel::dsl::{AsSelect, InnerJoin, IntoBoxed, Select};
use diesel::pg::Pg;
use diesel::{ExpressionMethods, OptionalExtension, QueryDsl, SelectableHelper};
use diesel_async::pooled_connection::bb8::{Pool, PooledConnection};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::{
    domain::{
        auth::role::RoleType,
        comment::{Comment, PopulatedComment},
        pagination::Pagination,
        user::{User, UserProfile},
    },
    schema::{comments, user_follows, user_roles, users},
};

use super::ports::{CommentStore, PoolUnavailable, UserStore};

type CommentPageQuery = IntoBoxed<
    'static,
    Select<
        InnerJoin<comments::table, users::table>,
        (AsSelect<Comment, Pg>, AsSelect<UserProfile, Pg>),
    >,
    Pg,
>;

/// Newest first; ties on the timestamp fall back to the id so pages never overlap.
fn comment_page_query(page: Pagination) -> CommentPageQuery {
    comments::table
        .inner_join(users::table)
        .select((Comment::as_select(), UserProfile::as_select()))
        .into_boxed()
        .order(comments::comment_created_at.desc())
        .then_order_by(comments::comment_id.desc())
        .limit(page.limit())
        .offset(page.offset())
}

pub struct PgStore {
    pool: Pool<AsyncPgConnection>,
}

impl PgStore {
    pub fn new(pool: Pool<AsyncPgConnection>) -> Self {
        Self { pool }
    }

    pub async fn get_conn(&self) -> anyhow::Result<PooledConnection<'_, AsyncPgConnection>> {
        self.pool
            .get()
            .await
            .map_err(|e| anyhow::Error::new(PoolUnavailable(e.to_string())))
    }
}

impl CommentStore for PgStore {
    async fn find_comments(&self, page: Pagination) -> anyhow::Result<Vec<PopulatedComment>> {
        let mut conn = self.get_conn().await?;

        let rows: Vec<(Comment, UserProfile)> =
            comment_page_query(page).load(&mut conn).await?;

        drop(conn);

        Ok(rows
            .into_iter()
            .map(|(comment, seller)| PopulatedComment { comment, seller })
            .collect())
    }

    async fn count_comments(&self) -> anyhow::Result<i64> {
        let mut conn = self.get_conn().await?;

        let count: i64 = comments::table.count().get_result(&mut conn).await?;

        Ok(count)
    }

    async fn find_comment(&self, comment_id: Uuid) -> anyhow::Result<Option<Comment>> {
        let mut conn = self.get_conn().await?;

        let comment: Option<Comment> = comments::table
            .find(comment_id)
            .select(Comment::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        Ok(comment)
    }

    async fn delete_comment(&self, comment_id: Uuid) -> anyhow::Result<bool> {
        let mut conn = self.get_conn().await?;

        let deleted: usize = diesel::delete(comments::table.find(comment_id))
            .execute(&mut conn)
            .await?;

        Ok(deleted > 0)
    }
}

impl UserStore for PgStore {
    async fn find_user(&self, user_id: Uuid) -> anyhow::Result<Option<User>> {
        let mut conn = self.get_conn().await?;

        let profile: Option<UserProfile> = users::table
            .find(user_id)
            .select(UserProfile::as_select())
            .first(&mut conn)
            .await
            .optional()?;

        let Some(profile) = profile else {
            return Ok(None);
        };

        // users without a role row are plain users
        let role = match user_roles::table
            .find(user_id)
            .select(user_roles::role_name)
            .first::<String>(&mut conn)
            .await
            .optional()?
        {
            Some(role_name) => RoleType::from_name(&role_name)?,
            None => RoleType::User,
        };

        let following: Vec<Uuid> = user_follows::table
            .filter(user_follows::follower_id.eq(user_id))
            .select(user_follows::followee_id)
            .load(&mut conn)
            .await?;

        drop(conn);

        Ok(Some(User::new(profile, role, following)))
    }
}
