use super::object_id;
use crate::error::{ApiError, ApiResult};
use crate::extract::DriveContext;
use api_shared::{drive_objects, DriveObject, FileNamesRes, MessageRes, NavigateParams, SearchParams};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use drive_core::{FolderPath, SearchFilter};

const NO_FILES: &str = "No files found.";

#[utoipa::path(
    get,
    path = "/drive/files",
    responses(
        (status = 200, description = "Names of the first files, or a message when there are none", body = FileNamesRes),
        (status = 401, description = "Not authenticated", body = api_shared::ErrorRes)
    )
)]
/// Quick listing of up to ten file names
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn list_files(ctx: DriveContext) -> ApiResult<Response> {
    let files = ctx.drive.quick_list().await?;
    if files.is_empty() {
        return Ok(Json(MessageRes::new(NO_FILES)).into_response());
    }
    Ok(Json(FileNamesRes { files }).into_response())
}

#[utoipa::path(
    get,
    path = "/drive/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matches with full paths", body = [DriveObject]),
        (status = 404, description = "A name filter matched nothing", body = api_shared::ErrorRes),
        (status = 401, description = "Not authenticated", body = api_shared::ErrorRes),
        (status = 502, description = "An ancestor of a match could not be fetched", body = api_shared::ErrorRes)
    )
)]
/// Search by name substring and/or MIME type
///
/// Every match is annotated with its full path. Without any filter the children of the root
/// folder are returned.
///
/// # Errors
/// - `404 Not Found` if a name filter matched nothing.
/// - `502 Bad Gateway` if an ancestor of a match could not be fetched; the detail names the match.
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn search(ctx: DriveContext, Query(params): Query<SearchParams>) -> ApiResult<Response> {
    let filter = SearchFilter::new(params.name, params.mime_type);
    let results = ctx.drive.search(&filter).await?;

    if results.is_empty() {
        if let Some(name) = filter.name() {
            return Err(ApiError::new(
                StatusCode::NOT_FOUND,
                format!("No objects found matching name '{name}'"),
            ));
        }
        if filter.is_empty() {
            return Ok(Json(MessageRes::new(NO_FILES)).into_response());
        }
    }
    Ok(Json(drive_objects(results)).into_response())
}

#[utoipa::path(
    get,
    path = "/drive/navigate/{path}",
    params(
        ("path" = String, Path, description = "Slash-delimited folder path below the root"),
        NavigateParams
    ),
    responses(
        (status = 200, description = "Children of the folder", body = [DriveObject]),
        (status = 404, description = "A path segment does not exist", body = api_shared::ErrorRes),
        (status = 409, description = "A path segment matches several folders", body = api_shared::ErrorRes)
    )
)]
/// List the children of the folder at `path`
///
/// # Errors
/// Returns `404 Not Found` naming the first unresolved segment, or `409 Conflict` when a segment
/// is ambiguous and the server rejects ambiguous paths.
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn navigate(
    ctx: DriveContext,
    Path(path): Path<String>,
    Query(params): Query<NavigateParams>,
) -> ApiResult<Json<Vec<DriveObject>>> {
    list_children(&ctx, &FolderPath::parse(&path), params).await
}

#[utoipa::path(
    get,
    path = "/drive/navigate",
    params(NavigateParams),
    responses(
        (status = 200, description = "Children of the root folder", body = [DriveObject])
    )
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn navigate_root(
    ctx: DriveContext,
    Query(params): Query<NavigateParams>,
) -> ApiResult<Json<Vec<DriveObject>>> {
    list_children(&ctx, &FolderPath::root(), params).await
}

async fn list_children(
    ctx: &DriveContext,
    path: &FolderPath,
    params: NavigateParams,
) -> ApiResult<Json<Vec<DriveObject>>> {
    let listing = ctx
        .drive
        .navigate(path, params.mime_type.as_deref())
        .await?;
    Ok(Json(drive_objects(listing.children)))
}

#[utoipa::path(
    delete,
    path = "/drive/{id}",
    params(("id" = String, Path, description = "Object identifier")),
    responses(
        (status = 204, description = "Object deleted"),
        (status = 404, description = "No such object", body = api_shared::ErrorRes)
    )
)]
#[axum::debug_handler(state = crate::state::AppState)]
pub async fn delete_object(ctx: DriveContext, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let id = object_id(&id)?;
    ctx.drive.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
