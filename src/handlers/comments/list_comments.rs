use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    domain::{
        comment::{CommentView, render_comment},
        user::User,
    },
    dto::{
        requests::comments::list_comments_request::ListCommentsRequest,
        responses::comments::list_comments_response::ListCommentsResponse,
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, store_err},
    init::state::ServerState,
    routers::middleware::is_logged_in::AuthStatus,
    store::ports::{CommentStore, UserStore},
};

#[utoipa::path(
    get,
    path = "/api/comments",
    tag = "comments",
    params(ListCommentsRequest),
    responses(
        (status = 200, description = "One page of comments, newest first", body = ListCommentsResponse),
        (status = 400, description = "Invalid pagination parameters", body = CodeErrorResp),
        (status = 500, description = "Internal server error", body = CodeErrorResp)
    )
)]
pub async fn list_comments(
    Extension(auth_status): Extension<AuthStatus>,
    State(state): State<Arc<ServerState>>,
    Query(request): Query<ListCommentsRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let page = request.into_pagination()?;
    let store = state.store();

    // An id that no longer resolves renders the page anonymously.
    let viewer: Option<User> = match auth_status {
        AuthStatus::LoggedIn(user_id) => store
            .find_user(user_id)
            .await
            .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?,
        AuthStatus::LoggedOut => None,
    };

    let (comments, comments_count) =
        tokio::try_join!(store.find_comments(page), store.count_comments())
            .map_err(|e| store_err(CodeError::DB_QUERY_ERROR, e))?;

    let comments: Vec<CommentView> = comments
        .into_iter()
        .map(|comment| render_comment(comment, viewer.as_ref()))
        .collect();

    tracing::debug!(
        limit = page.limit(),
        offset = page.offset(),
        returned = comments.len(),
        comments_count,
        "Listed comments"
    );

    Ok(Json(ListCommentsResponse {
        comments,
        comments_count,
    }))
}
