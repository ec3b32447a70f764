//! Constants used throughout the drive core crate.
//!
//! This module contains the remote API's MIME types, field selectors and endpoints so that
//! the query builders, HTTP clients and tests agree on them.

/// Well-known alias the remote store accepts for the user's root folder.
pub const ROOT_FOLDER_ID: &str = "root";

/// MIME type the remote store assigns to folders.
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";

/// MIME type of native text documents.
pub const DOCUMENT_MIME_TYPE: &str = "application/vnd.google-apps.document";

/// MIME type of native spreadsheets.
pub const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";

/// MIME type of native presentations.
pub const PRESENTATION_MIME_TYPE: &str = "application/vnd.google-apps.presentation";

/// Field selector for list calls.
pub const LIST_FIELDS: &str = "nextPageToken, files(id, name, mimeType, parents)";

/// Field selector for single-object fetches.
pub const OBJECT_FIELDS: &str = "id, name, mimeType, parents";

/// Field selector for comment resources.
pub const COMMENT_FIELDS: &str =
    "id,createdTime,modifiedTime,author,content,htmlContent,deleted,resolved,anchor,quotedFileContent";

/// Field selector for comment list calls.
pub const COMMENT_LIST_FIELDS: &str =
    "comments(id,createdTime,modifiedTime,author,content,htmlContent,deleted,resolved,anchor,quotedFileContent)";

/// Field selector for reply resources.
pub const REPLY_FIELDS: &str = "id,createdTime,modifiedTime,author,content,htmlContent,deleted,action";

/// Upper bound on ancestor hops when rebuilding a path.
pub const DEFAULT_MAX_PATH_DEPTH: usize = 64;

/// Number of names returned by the quick file listing.
pub const QUICK_LIST_PAGE_SIZE: u32 = 10;

/// Titles given to freshly created office files.
pub const NEW_DOCUMENT_TITLE: &str = "New Document";
pub const NEW_SPREADSHEET_TITLE: &str = "New Spreadsheet";
pub const NEW_PRESENTATION_TITLE: &str = "New Presentation";

pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
pub const DOCS_API_BASE: &str = "https://docs.googleapis.com/v1";
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4";
pub const SLIDES_API_BASE: &str = "https://slides.googleapis.com/v1";

/// Scopes requested at login unless overridden.
pub const DEFAULT_SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/userinfo.email",
    "https://www.googleapis.com/auth/userinfo.profile",
    "https://www.googleapis.com/auth/drive.readonly",
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive.file",
    "https://www.googleapis.com/auth/documents",
    "https://www.googleapis.com/auth/drive",
    "openid",
];
