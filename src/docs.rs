//! OpenAPI documentation registration for Swagger UI.
//!
//! Important: Utoipa only exposes operations you list in `#[openapi(paths(...))]`.
//! Handler functions still need their own `#[utoipa::path(...)]` attributes.

use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

use crate::domain::comment::{CommentView, SellerView};
use crate::dto::responses::comments::list_comments_response::ListCommentsResponse;
use crate::errors::code_error::CodeErrorResp;
use crate::handlers::{
    comments::{delete_comment, list_comments},
    server::{healthcheck, root},
};

/// Central OpenAPI document for Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        list_comments::list_comments,
        delete_comment::delete_comment,
        healthcheck::healthcheck,
        root::root_handler,
    ),
    components(schemas(
        CommentView,
        SellerView,
        ListCommentsResponse,
        CodeErrorResp,
        healthcheck::ServerHealthcheckResponse,
        root::RootHandlerResponse,
    )),
    modifiers(&TokenSecurity),
    tags(
        (name = "comments", description = "Comment listing and deletion"),
        (name = "server", description = "Health and state checks")
    )
)]
pub struct ApiDoc;

/// `Authorization: Token <jwt>`; `Bearer` is accepted too.
struct TokenSecurity;

impl Modify for TokenSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "token",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("Authorization"))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_comment_routes() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/comments"));
        assert!(doc.paths.paths.contains_key("/api/comments/{comment_id}"));
    }
}
