//! Folder path resolution.
//!
//! Walks a [`FolderPath`] from the configured root, one remote query per segment, turning the
//! path into the identifier of its last folder. Each segment must name exactly one folder under
//! the folder resolved so far; what happens on name collisions is decided by
//! [`AmbiguityPolicy`].

use crate::config::{AmbiguityPolicy, CoreConfig};
use crate::constants::FOLDER_MIME_TYPE;
use crate::object::RemoteObject;
use crate::query::{Clause, DriveQuery};
use crate::store::RemoteStore;
use crate::{DriveError, DriveResult};
use drive_types::FolderPath;

/// A folder path together with the identifier it resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedFolder {
    pub id: String,
    pub path: FolderPath,
}

pub struct PathResolver<'a> {
    store: &'a dyn RemoteStore,
    cfg: &'a CoreConfig,
}

impl<'a> PathResolver<'a> {
    pub fn new(store: &'a dyn RemoteStore, cfg: &'a CoreConfig) -> Self {
        Self { store, cfg }
    }

    /// Resolves `path` to a folder identifier.
    ///
    /// The root path resolves to the configured root identifier without any remote call.
    ///
    /// # Errors
    ///
    /// - [`DriveError::PathNotFound`] if a segment has no matching folder; segments after it are
    ///   not queried.
    /// - [`DriveError::AmbiguousPath`] if a segment matches several folders and the policy is
    ///   [`AmbiguityPolicy::Reject`].
    /// - Any error from the remote store.
    pub async fn resolve_folder(&self, path: &FolderPath) -> DriveResult<ResolvedFolder> {
        let mut current = self.cfg.root_folder_id().as_str().to_string();

        for (depth, segment) in path.segments().iter().enumerate() {
            let candidates = self
                .store
                .list(&folder_segment_query(&current, segment))
                .await?;
            let matched = self.pick(candidates, path, depth)?;
            tracing::debug!(segment = %segment, id = %matched.id, "resolved path segment");
            current = matched.id;
        }

        Ok(ResolvedFolder {
            id: current,
            path: path.clone(),
        })
    }

    fn pick(
        &self,
        candidates: Vec<RemoteObject>,
        path: &FolderPath,
        depth: usize,
    ) -> DriveResult<RemoteObject> {
        let segment = &path.segments()[depth];
        let count = candidates.len();

        if count > 1 {
            match self.cfg.ambiguity() {
                AmbiguityPolicy::Reject => {
                    return Err(DriveError::AmbiguousPath {
                        resolved: path.prefix(depth).to_string(),
                        segment: segment.clone(),
                        candidates: count,
                    });
                }
                AmbiguityPolicy::FirstMatch => {
                    tracing::warn!(
                        segment = %segment,
                        candidates = count,
                        "ambiguous path segment, taking first match"
                    );
                }
            }
        }

        candidates
            .into_iter()
            .next()
            .ok_or_else(|| DriveError::PathNotFound {
                resolved: path.prefix(depth).to_string(),
                segment: segment.clone(),
            })
    }
}

/// Query for folders named `segment` directly under `parent_id`.
pub fn folder_segment_query(parent_id: &str, segment: &str) -> DriveQuery {
    DriveQuery::new()
        .and(Clause::InParents(parent_id.to_string()))
        .and(Clause::NameEquals(segment.to_string()))
        .and(Clause::MimeTypeEquals(FOLDER_MIME_TYPE.to_string()))
}
