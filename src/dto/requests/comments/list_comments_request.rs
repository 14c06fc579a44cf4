use utoipa::IntoParams;

use crate::{
    domain::pagination::Pagination,
    errors::code_error::{CodeError, CodeErrorResp, code_err},
};

/// Raw query string; values stay strings until `into_pagination` validates them.
#[derive(Debug, Default, serde_derive::Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListCommentsRequest {
    /// Page size. Defaults to 20, clamped to 100.
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
    /// Number of comments to skip. Defaults to 0.
    #[param(value_type = Option<i64>)]
    pub offset: Option<String>,
}

impl ListCommentsRequest {
    pub fn into_pagination(self) -> Result<Pagination, CodeErrorResp> {
        Pagination::parse(self.limit.as_deref(), self.offset.as_deref())
            .map_err(|e| code_err(CodeError::INVALID_PAGINATION, e))
    }
}
