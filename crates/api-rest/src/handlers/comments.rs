use super::object_id;
use crate::error::ApiResult;
use crate::extract::DriveContext;
use api_shared::{CommentReq, MessageRes, ReplyReq};
use axum::extract::Path;
use axum::response::Json;
use serde_json::Value;

#[utoipa::path(
    get,
    path = "/drive/{id}/comment",
    params(("id" = String, Path, description = "File identifier")),
    responses((status = 200, description = "Comments on the file", body = serde_json::Value))
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn list_comments(ctx: DriveContext, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let id = object_id(&id)?;
    Ok(Json(ctx.office.comments(&id).await?))
}

#[utoipa::path(
    post,
    path = "/drive/{id}/comment",
    params(("id" = String, Path, description = "File identifier")),
    request_body = CommentReq,
    responses((status = 200, description = "Created comment", body = serde_json::Value))
)]
/// Comment on a file
///
/// The optional anchor is forwarded without validation.
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn add_comment(
    ctx: DriveContext,
    Path(id): Path<String>,
    Json(req): Json<CommentReq>,
) -> ApiResult<Json<Value>> {
    let id = object_id(&id)?;
    let comment = ctx
        .office
        .add_comment(&id, &req.content, req.anchor.as_deref())
        .await?;
    Ok(Json(comment))
}

#[utoipa::path(
    get,
    path = "/drive/{id}/comment/{comment_id}",
    params(
        ("id" = String, Path, description = "File identifier"),
        ("comment_id" = String, Path, description = "Comment identifier")
    ),
    responses((status = 200, description = "The comment", body = serde_json::Value))
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn get_comment(
    ctx: DriveContext,
    Path((id, comment_id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let (id, comment_id) = (object_id(&id)?, object_id(&comment_id)?);
    Ok(Json(ctx.office.comment(&id, &comment_id).await?))
}

#[utoipa::path(
    delete,
    path = "/drive/{id}/comment/{comment_id}",
    params(
        ("id" = String, Path, description = "File identifier"),
        ("comment_id" = String, Path, description = "Comment identifier")
    ),
    responses((status = 200, description = "Comment deleted", body = MessageRes))
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn delete_comment(
    ctx: DriveContext,
    Path((id, comment_id)): Path<(String, String)>,
) -> ApiResult<Json<MessageRes>> {
    let (id, comment_id) = (object_id(&id)?, object_id(&comment_id)?);
    ctx.office.delete_comment(&id, &comment_id).await?;
    Ok(Json(MessageRes::new(format!(
        "Comment {comment_id} deleted successfully"
    ))))
}

#[utoipa::path(
    post,
    path = "/drive/{id}/comment/{comment_id}/reply",
    params(
        ("id" = String, Path, description = "File identifier"),
        ("comment_id" = String, Path, description = "Comment identifier")
    ),
    request_body = ReplyReq,
    responses((status = 200, description = "Created reply", body = serde_json::Value))
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn add_reply(
    ctx: DriveContext,
    Path((id, comment_id)): Path<(String, String)>,
    Json(req): Json<ReplyReq>,
) -> ApiResult<Json<Value>> {
    let (id, comment_id) = (object_id(&id)?, object_id(&comment_id)?);
    Ok(Json(ctx.office.reply(&id, &comment_id, &req.content).await?))
}

#[utoipa::path(
    post,
    path = "/drive/{id}/comment/{comment_id}/resolve",
    params(
        ("id" = String, Path, description = "File identifier"),
        ("comment_id" = String, Path, description = "Comment identifier")
    ),
    responses((status = 200, description = "Updated comment", body = serde_json::Value))
)]
/// Mark a comment as resolved
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn resolve_comment(
    ctx: DriveContext,
    Path((id, comment_id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let (id, comment_id) = (object_id(&id)?, object_id(&comment_id)?);
    Ok(Json(ctx.office.resolve_comment(&id, &comment_id).await?))
}
