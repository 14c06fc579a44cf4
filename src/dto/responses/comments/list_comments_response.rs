use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::domain::comment::CommentView;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsResponse {
    pub comments: Vec<CommentView>,
    pub comments_count: i64,
}
