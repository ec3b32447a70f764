//! Request and response bodies of the REST API.

use drive_core::PathedObject;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// A remote object annotated with its full path.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct DriveObject {
    #[schema(example = "1a2b3c")]
    pub id: String,
    #[schema(example = "summary.txt")]
    pub name: String,
    #[serde(rename = "mimeType")]
    #[schema(example = "text/plain")]
    pub mime_type: String,
    /// `folder` or `file`.
    #[schema(example = "file")]
    pub kind: String,
    #[schema(example = "/Reports/Q1/summary.txt")]
    pub path: String,
    pub parent_id: Option<String>,
}

impl From<PathedObject> for DriveObject {
    fn from(p: PathedObject) -> Self {
        let kind = p.kind().as_str().to_string();
        let parent_id = p.object.first_parent().map(str::to_string);
        Self {
            id: p.object.id,
            name: p.object.name,
            mime_type: p.object.mime_type,
            kind,
            path: p.path,
            parent_id,
        }
    }
}

pub fn drive_objects(objects: Vec<PathedObject>) -> Vec<DriveObject> {
    objects.into_iter().map(DriveObject::from).collect()
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct MessageRes {
    pub message: String,
}

impl MessageRes {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ErrorRes {
    pub detail: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct FileNamesRes {
    pub files: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct NewSheetReq {
    #[schema(example = "Totals")]
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentReq {
    pub content: String,
    /// Anchor string forwarded as-is to the comments API.
    #[serde(default)]
    pub anchor: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ReplyReq {
    pub content: String,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Substring the object name must contain.
    pub name: Option<String>,
    /// Exact MIME type.
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NavigateParams {
    /// Only list children with this MIME type.
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    /// Set by the provider when the user denies consent.
    pub error: Option<String>,
}
