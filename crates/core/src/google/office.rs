use super::check_status;
use crate::constants::{
    COMMENT_FIELDS, COMMENT_LIST_FIELDS, DOCS_API_BASE, DRIVE_API_BASE, REPLY_FIELDS,
    SHEETS_API_BASE, SLIDES_API_BASE,
};
use crate::office::OfficeApi;
use crate::{DriveError, DriveResult};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Docs, Sheets, Slides and Drive comments APIs, authenticated with one access token.
#[derive(Clone)]
pub struct GoogleOffice {
    http: reqwest::Client,
    token: String,
}

impl GoogleOffice {
    pub fn new(http: reqwest::Client, token: impl Into<String>) -> Self {
        Self {
            http,
            token: token.into(),
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> DriveResult<Value> {
        let response = check_status(request.bearer_auth(&self.token).send().await?).await?;
        Ok(response.json().await?)
    }

    fn comments_url(file_id: &str) -> String {
        format!("{DRIVE_API_BASE}/files/{file_id}/comments")
    }

    fn comment_url(file_id: &str, comment_id: &str) -> String {
        format!("{DRIVE_API_BASE}/files/{file_id}/comments/{comment_id}")
    }
}

/// `…/spreadsheets/{id}/values/{range}` with the range percent-encoded as one path segment.
fn values_url(id: &str, range: &str) -> DriveResult<reqwest::Url> {
    let mut url = reqwest::Url::parse(&format!("{SHEETS_API_BASE}/spreadsheets/{id}/values"))
        .map_err(|e| DriveError::InvalidInput(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| DriveError::InvalidInput("values url cannot be a base".into()))?
        .push(range);
    Ok(url)
}

#[async_trait]
impl OfficeApi for GoogleOffice {
    async fn create_document(&self, title: &str) -> DriveResult<Value> {
        let request = self
            .http
            .post(format!("{DOCS_API_BASE}/documents"))
            .json(&json!({ "title": title }));
        self.send(request).await
    }

    async fn get_document(&self, id: &str) -> DriveResult<Value> {
        self.send(self.http.get(format!("{DOCS_API_BASE}/documents/{id}")))
            .await
    }

    async fn create_spreadsheet(&self, title: &str) -> DriveResult<Value> {
        let request = self
            .http
            .post(format!("{SHEETS_API_BASE}/spreadsheets"))
            .json(&json!({ "properties": { "title": title } }));
        self.send(request).await
    }

    async fn get_spreadsheet(&self, id: &str) -> DriveResult<Value> {
        self.send(self.http.get(format!("{SHEETS_API_BASE}/spreadsheets/{id}")))
            .await
    }

    async fn batch_update_spreadsheet(&self, id: &str, body: Value) -> DriveResult<Value> {
        let request = self
            .http
            .post(format!("{SHEETS_API_BASE}/spreadsheets/{id}:batchUpdate"))
            .json(&body);
        self.send(request).await
    }

    async fn get_values(&self, id: &str, range: &str) -> DriveResult<Value> {
        self.send(self.http.get(values_url(id, range)?)).await
    }

    async fn create_presentation(&self, title: &str) -> DriveResult<Value> {
        let request = self
            .http
            .post(format!("{SLIDES_API_BASE}/presentations"))
            .json(&json!({ "title": title }));
        self.send(request).await
    }

    async fn get_presentation(&self, id: &str) -> DriveResult<Value> {
        self.send(self.http.get(format!("{SLIDES_API_BASE}/presentations/{id}")))
            .await
    }

    async fn list_comments(&self, file_id: &str) -> DriveResult<Value> {
        let request = self
            .http
            .get(Self::comments_url(file_id))
            .query(&[("fields", COMMENT_LIST_FIELDS)]);
        self.send(request).await
    }

    async fn get_comment(&self, file_id: &str, comment_id: &str) -> DriveResult<Value> {
        let request = self
            .http
            .get(Self::comment_url(file_id, comment_id))
            .query(&[("fields", COMMENT_FIELDS)]);
        self.send(request).await
    }

    async fn create_comment(&self, file_id: &str, body: Value) -> DriveResult<Value> {
        let request = self
            .http
            .post(Self::comments_url(file_id))
            .query(&[("fields", COMMENT_FIELDS)])
            .json(&body);
        self.send(request).await
    }

    async fn update_comment(
        &self,
        file_id: &str,
        comment_id: &str,
        body: Value,
    ) -> DriveResult<Value> {
        let request = self
            .http
            .patch(Self::comment_url(file_id, comment_id))
            .query(&[("fields", COMMENT_FIELDS)])
            .json(&body);
        self.send(request).await
    }

    async fn delete_comment(&self, file_id: &str, comment_id: &str) -> DriveResult<()> {
        let request = self
            .http
            .delete(Self::comment_url(file_id, comment_id))
            .bearer_auth(&self.token);
        check_status(request.send().await?).await?;
        Ok(())
    }

    async fn create_reply(
        &self,
        file_id: &str,
        comment_id: &str,
        body: Value,
    ) -> DriveResult<Value> {
        let request = self
            .http
            .post(format!("{}/replies", Self::comment_url(file_id, comment_id)))
            .query(&[("fields", REPLY_FIELDS)])
            .json(&body);
        self.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_range_is_one_encoded_segment() {
        let url = values_url("abc", "'Q1 / draft'").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc/values/'Q1%20%2F%20draft'"
        );
    }
}
