use super::{check_status, not_found_as};
use crate::constants::{DRIVE_API_BASE, LIST_FIELDS, OBJECT_FIELDS};
use crate::object::RemoteObject;
use crate::query::DriveQuery;
use crate::store::RemoteStore;
use crate::DriveResult;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<RemoteObject>,
    next_page_token: Option<String>,
}

/// Drive v3 files API, authenticated with one access token.
#[derive(Clone)]
pub struct GoogleDrive {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl GoogleDrive {
    pub fn new(http: reqwest::Client, token: impl Into<String>) -> Self {
        Self {
            http,
            token: token.into(),
            base_url: DRIVE_API_BASE.to_string(),
        }
    }

    /// Points the client at another API root (a proxy or a local stand-in).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn files_url(&self) -> String {
        format!("{}/files", self.base_url)
    }

    fn file_url(&self, id: &str) -> String {
        format!("{}/files/{}", self.base_url, id)
    }
}

#[async_trait]
impl RemoteStore for GoogleDrive {
    async fn list(&self, query: &DriveQuery) -> DriveResult<Vec<RemoteObject>> {
        let q = query.render();
        let mut page_token: Option<String> = None;
        let mut objects = Vec::new();

        loop {
            let mut request = self
                .http
                .get(self.files_url())
                .bearer_auth(&self.token)
                .query(&[("fields", LIST_FIELDS)]);
            if let Some(q) = &q {
                request = request.query(&[("q", q)]);
            }
            if let Some(size) = query.page_size() {
                request = request.query(&[("pageSize", size)]);
            }
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token)]);
            }

            let page: FileList = check_status(request.send().await?).await?.json().await?;
            objects.extend(page.files);

            match (query.page_size(), page.next_page_token) {
                (None, Some(next)) => page_token = Some(next),
                _ => break,
            }
        }

        tracing::debug!(query = %query, count = objects.len(), "listed remote objects");
        Ok(objects)
    }

    async fn get(&self, id: &str) -> DriveResult<RemoteObject> {
        let request = self
            .http
            .get(self.file_url(id))
            .bearer_auth(&self.token)
            .query(&[("fields", OBJECT_FIELDS)]);
        let response = check_status(request.send().await?)
            .await
            .map_err(|e| not_found_as(id, e))?;
        Ok(response.json().await?)
    }

    async fn delete(&self, id: &str) -> DriveResult<()> {
        let request = self.http.delete(self.file_url(id)).bearer_auth(&self.token);
        check_status(request.send().await?)
            .await
            .map_err(|e| not_found_as(id, e))?;
        tracing::info!(id, "deleted remote object");
        Ok(())
    }
}
