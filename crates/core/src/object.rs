//! Remote object model.
//!
//! A [`RemoteObject`] is one node of the remote store's flat object graph, as returned by list
//! and get calls. The hierarchy is only implied by `parents`; the first parent is authoritative
//! for every path computation in this crate.

use crate::constants::FOLDER_MIME_TYPE;
use serde::{Deserialize, Serialize};

/// Coarse kind of a remote object, derived from its MIME type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Folder,
    File,
}

impl ObjectKind {
    pub fn from_mime_type(mime_type: &str) -> Self {
        if mime_type == FOLDER_MIME_TYPE {
            Self::Folder
        } else {
            Self::File
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Folder => "folder",
            Self::File => "file",
        }
    }
}

/// A node in the remote store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteObject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub parents: Vec<String>,
}

impl RemoteObject {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        parents: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            mime_type: mime_type.into(),
            parents,
        }
    }

    pub fn folder(id: impl Into<String>, name: impl Into<String>, parent: &str) -> Self {
        Self::new(id, name, FOLDER_MIME_TYPE, vec![parent.to_string()])
    }

    pub fn file(
        id: impl Into<String>,
        name: impl Into<String>,
        mime_type: impl Into<String>,
        parent: &str,
    ) -> Self {
        Self::new(id, name, mime_type, vec![parent.to_string()])
    }

    pub fn kind(&self) -> ObjectKind {
        ObjectKind::from_mime_type(&self.mime_type)
    }

    /// The effective parent used for path building.
    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }
}

/// A remote object annotated with its position in the hierarchy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathedObject {
    pub object: RemoteObject,
    pub path: String,
}

impl PathedObject {
    pub fn kind(&self) -> ObjectKind {
        self.object.kind()
    }
}

/// Joins a parent path and a name. The root contributes the empty path, so children of the root
/// come out as `/name`.
pub fn compose_path(parent_path: &str, name: &str) -> String {
    format!("{parent_path}/{name}")
}
