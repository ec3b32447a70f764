//! Document, spreadsheet and presentation proxies. Bodies are the remote API's own JSON.

use super::object_id;
use crate::error::ApiResult;
use crate::extract::DriveContext;
use api_shared::NewSheetReq;
use axum::extract::Path;
use axum::response::Json;
use serde_json::Value;

#[utoipa::path(
    post,
    path = "/drive/document",
    responses((status = 200, description = "Created document", body = serde_json::Value))
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn create_document(ctx: DriveContext) -> ApiResult<Json<Value>> {
    Ok(Json(ctx.office.create_document().await?))
}

#[utoipa::path(
    get,
    path = "/drive/document/{id}",
    params(("id" = String, Path, description = "Document identifier")),
    responses(
        (status = 200, description = "Document resource", body = serde_json::Value),
        (status = 400, description = "Object is not a document", body = api_shared::ErrorRes),
        (status = 404, description = "No such object", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn get_document(ctx: DriveContext, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let id = object_id(&id)?;
    Ok(Json(ctx.office.document(&id).await?))
}

#[utoipa::path(
    post,
    path = "/drive/spreadsheets",
    responses((status = 200, description = "Created spreadsheet", body = serde_json::Value))
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn create_spreadsheet(ctx: DriveContext) -> ApiResult<Json<Value>> {
    Ok(Json(ctx.office.create_spreadsheet().await?))
}

#[utoipa::path(
    get,
    path = "/drive/spreadsheets/{id}",
    params(("id" = String, Path, description = "Spreadsheet identifier")),
    responses((status = 200, description = "Spreadsheet resource", body = serde_json::Value))
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn get_spreadsheet(ctx: DriveContext, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let id = object_id(&id)?;
    Ok(Json(ctx.office.spreadsheet(&id).await?))
}

#[utoipa::path(
    post,
    path = "/drive/spreadsheets/{id}/sheets",
    params(("id" = String, Path, description = "Spreadsheet identifier")),
    request_body = NewSheetReq,
    responses(
        (status = 200, description = "Batch update reply", body = serde_json::Value),
        (status = 400, description = "Empty sheet name", body = api_shared::ErrorRes)
    )
)]
/// Add an empty sheet to a spreadsheet
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn add_sheet(
    ctx: DriveContext,
    Path(id): Path<String>,
    Json(req): Json<NewSheetReq>,
) -> ApiResult<Json<Value>> {
    let id = object_id(&id)?;
    Ok(Json(ctx.office.add_sheet(&id, &req.name).await?))
}

#[utoipa::path(
    get,
    path = "/drive/spreadsheets/{id}/sheets/{name}",
    params(
        ("id" = String, Path, description = "Spreadsheet identifier"),
        ("name" = String, Path, description = "Sheet title")
    ),
    responses(
        (status = 200, description = "Sheet resource", body = serde_json::Value),
        (status = 404, description = "No sheet with that title", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn get_sheet(
    ctx: DriveContext,
    Path((id, name)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    let id = object_id(&id)?;
    Ok(Json(ctx.office.sheet(&id, &name).await?))
}

#[utoipa::path(
    get,
    path = "/drive/spreadsheet/{id}",
    params(("id" = String, Path, description = "Spreadsheet identifier")),
    responses(
        (status = 200, description = "Values of the first sheet", body = serde_json::Value),
        (status = 400, description = "Object is not a spreadsheet", body = api_shared::ErrorRes)
    )
)]
/// Values of the first sheet
///
/// Answers `{"values": []}` for a spreadsheet without sheets.
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn first_sheet_values(
    ctx: DriveContext,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = object_id(&id)?;
    Ok(Json(ctx.office.first_sheet_values(&id).await?))
}

#[utoipa::path(
    post,
    path = "/drive/slides",
    responses((status = 200, description = "Created presentation", body = serde_json::Value))
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn create_presentation(ctx: DriveContext) -> ApiResult<Json<Value>> {
    Ok(Json(ctx.office.create_presentation().await?))
}

#[utoipa::path(
    get,
    path = "/drive/slides/{id}",
    params(("id" = String, Path, description = "Presentation identifier")),
    responses(
        (status = 200, description = "Presentation resource", body = serde_json::Value),
        (status = 400, description = "Object is not a presentation", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn get_presentation(ctx: DriveContext, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let id = object_id(&id)?;
    Ok(Json(ctx.office.presentation(&id).await?))
}
