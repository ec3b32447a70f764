//! Typed proxies for documents, spreadsheets, presentations and comments.
//!
//! Resource bodies are passed through as [`serde_json::Value`]; the service only inspects the
//! parts it needs (sheet titles, the object's MIME type) and otherwise forwards what the remote
//! API returned.

use crate::constants::{
    DOCUMENT_MIME_TYPE, NEW_DOCUMENT_TITLE, NEW_PRESENTATION_TITLE, NEW_SPREADSHEET_TITLE,
    PRESENTATION_MIME_TYPE, SPREADSHEET_MIME_TYPE,
};
use crate::store::RemoteStore;
use crate::{DriveError, DriveResult};
use async_trait::async_trait;
use drive_types::ObjectId;
use serde_json::{json, Value};
use std::sync::Arc;

/// Office-suite calls made on behalf of one credential.
#[async_trait]
pub trait OfficeApi: Send + Sync {
    async fn create_document(&self, title: &str) -> DriveResult<Value>;
    async fn get_document(&self, id: &str) -> DriveResult<Value>;

    async fn create_spreadsheet(&self, title: &str) -> DriveResult<Value>;
    async fn get_spreadsheet(&self, id: &str) -> DriveResult<Value>;
    async fn batch_update_spreadsheet(&self, id: &str, body: Value) -> DriveResult<Value>;
    async fn get_values(&self, id: &str, range: &str) -> DriveResult<Value>;

    async fn create_presentation(&self, title: &str) -> DriveResult<Value>;
    async fn get_presentation(&self, id: &str) -> DriveResult<Value>;

    async fn list_comments(&self, file_id: &str) -> DriveResult<Value>;
    async fn get_comment(&self, file_id: &str, comment_id: &str) -> DriveResult<Value>;
    async fn create_comment(&self, file_id: &str, body: Value) -> DriveResult<Value>;
    async fn update_comment(&self, file_id: &str, comment_id: &str, body: Value)
        -> DriveResult<Value>;
    async fn delete_comment(&self, file_id: &str, comment_id: &str) -> DriveResult<()>;
    async fn create_reply(&self, file_id: &str, comment_id: &str, body: Value)
        -> DriveResult<Value>;
}

/// The native office file kinds a typed endpoint can require.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OfficeKind {
    Document,
    Spreadsheet,
    Presentation,
}

impl OfficeKind {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Document => DOCUMENT_MIME_TYPE,
            Self::Spreadsheet => SPREADSHEET_MIME_TYPE,
            Self::Presentation => PRESENTATION_MIME_TYPE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Spreadsheet => "spreadsheet",
            Self::Presentation => "presentation",
        }
    }
}

/// Quotes a sheet title for use as an A1 range.
pub fn sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Finds a sheet by its title in a spreadsheet resource.
pub fn find_sheet<'v>(spreadsheet: &'v Value, title: &str) -> Option<&'v Value> {
    spreadsheet
        .get("sheets")?
        .as_array()?
        .iter()
        .find(|sheet| sheet["properties"]["title"].as_str() == Some(title))
}

fn first_sheet_title(spreadsheet: &Value) -> Option<&str> {
    spreadsheet
        .get("sheets")?
        .as_array()?
        .first()?
        .pointer("/properties/title")?
        .as_str()
}

pub struct OfficeService {
    store: Arc<dyn RemoteStore>,
    api: Arc<dyn OfficeApi>,
}

impl OfficeService {
    pub fn new(store: Arc<dyn RemoteStore>, api: Arc<dyn OfficeApi>) -> Self {
        Self { store, api }
    }

    /// Fails with [`DriveError::WrongKind`] unless `id` names an object of `kind`.
    pub async fn ensure_kind(&self, id: &ObjectId, kind: OfficeKind) -> DriveResult<()> {
        let object = self.store.get(id.as_str()).await?;
        if object.mime_type != kind.mime_type() {
            tracing::debug!(%id, mime_type = %object.mime_type, expected = kind.label(), "kind mismatch");
            return Err(DriveError::WrongKind {
                id: id.to_string(),
                expected: kind.label(),
            });
        }
        Ok(())
    }

    pub async fn create_document(&self) -> DriveResult<Value> {
        self.api.create_document(NEW_DOCUMENT_TITLE).await
    }

    pub async fn document(&self, id: &ObjectId) -> DriveResult<Value> {
        self.ensure_kind(id, OfficeKind::Document).await?;
        self.api.get_document(id.as_str()).await
    }

    pub async fn create_spreadsheet(&self) -> DriveResult<Value> {
        self.api.create_spreadsheet(NEW_SPREADSHEET_TITLE).await
    }

    pub async fn spreadsheet(&self, id: &ObjectId) -> DriveResult<Value> {
        self.api.get_spreadsheet(id.as_str()).await
    }

    /// Adds an empty sheet titled `name`.
    pub async fn add_sheet(&self, id: &ObjectId, name: &str) -> DriveResult<Value> {
        if name.trim().is_empty() {
            return Err(DriveError::InvalidInput("sheet name must not be empty".into()));
        }
        let body = json!({
            "requests": [
                { "addSheet": { "properties": { "title": name } } }
            ]
        });
        self.api.batch_update_spreadsheet(id.as_str(), body).await
    }

    pub async fn sheet(&self, id: &ObjectId, name: &str) -> DriveResult<Value> {
        let spreadsheet = self.api.get_spreadsheet(id.as_str()).await?;
        find_sheet(&spreadsheet, name)
            .cloned()
            .ok_or_else(|| DriveError::SheetNotFound(name.to_string()))
    }

    /// Values of the first sheet, or `{"values": []}` for a spreadsheet without sheets.
    pub async fn first_sheet_values(&self, id: &ObjectId) -> DriveResult<Value> {
        self.ensure_kind(id, OfficeKind::Spreadsheet).await?;
        let spreadsheet = self.api.get_spreadsheet(id.as_str()).await?;
        match first_sheet_title(&spreadsheet) {
            Some(title) => self.api.get_values(id.as_str(), &sheet_range(title)).await,
            None => Ok(json!({ "values": [] })),
        }
    }

    pub async fn create_presentation(&self) -> DriveResult<Value> {
        self.api.create_presentation(NEW_PRESENTATION_TITLE).await
    }

    pub async fn presentation(&self, id: &ObjectId) -> DriveResult<Value> {
        self.ensure_kind(id, OfficeKind::Presentation).await?;
        self.api.get_presentation(id.as_str()).await
    }

    pub async fn comments(&self, file_id: &ObjectId) -> DriveResult<Value> {
        self.api.list_comments(file_id.as_str()).await
    }

    pub async fn comment(&self, file_id: &ObjectId, comment_id: &ObjectId) -> DriveResult<Value> {
        self.api
            .get_comment(file_id.as_str(), comment_id.as_str())
            .await
    }

    /// Creates a comment. The anchor is forwarded untouched when present.
    pub async fn add_comment(
        &self,
        file_id: &ObjectId,
        content: &str,
        anchor: Option<&str>,
    ) -> DriveResult<Value> {
        let mut body = json!({ "content": content });
        if let Some(anchor) = anchor.filter(|a| !a.is_empty()) {
            body["anchor"] = Value::String(anchor.to_string());
        }
        self.api.create_comment(file_id.as_str(), body).await
    }

    pub async fn delete_comment(&self, file_id: &ObjectId, comment_id: &ObjectId) -> DriveResult<()> {
        self.api
            .delete_comment(file_id.as_str(), comment_id.as_str())
            .await?;
        tracing::info!(%file_id, %comment_id, "deleted comment");
        Ok(())
    }

    pub async fn reply(
        &self,
        file_id: &ObjectId,
        comment_id: &ObjectId,
        content: &str,
    ) -> DriveResult<Value> {
        self.api
            .create_reply(
                file_id.as_str(),
                comment_id.as_str(),
                json!({ "content": content }),
            )
            .await
    }

    pub async fn resolve_comment(
        &self,
        file_id: &ObjectId,
        comment_id: &ObjectId,
    ) -> DriveResult<Value> {
        self.api
            .update_comment(
                file_id.as_str(),
                comment_id.as_str(),
                json!({ "resolved": true }),
            )
            .await
    }
}
