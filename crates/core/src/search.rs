//! Search and folder listing.
//!
//! Both operations produce flat result sets annotated with each object's full path. Search
//! rebuilds paths through an [`AncestorPathBuilder`] created for the call; listing already knows
//! the folder path it resolved, so it composes child paths directly.

use crate::ancestry::AncestorPathBuilder;
use crate::config::CoreConfig;
use crate::object::{compose_path, PathedObject};
use crate::query::{Clause, DriveQuery};
use crate::resolver::{PathResolver, ResolvedFolder};
use crate::store::RemoteStore;
use crate::{DriveError, DriveResult};
use drive_types::FolderPath;

/// Optional search filters. Blank strings count as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchFilter {
    name: Option<String>,
    mime_type: Option<String>,
}

impl SearchFilter {
    pub fn new(name: Option<String>, mime_type: Option<String>) -> Self {
        fn present(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.trim().is_empty())
        }
        Self {
            name: present(name),
            mime_type: present(mime_type),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.mime_type.is_none()
    }
}

/// A listed folder and its immediate children.
#[derive(Clone, Debug)]
pub struct FolderListing {
    pub folder: ResolvedFolder,
    pub children: Vec<PathedObject>,
}

pub struct SearchComposer<'a> {
    store: &'a dyn RemoteStore,
    cfg: &'a CoreConfig,
}

impl<'a> SearchComposer<'a> {
    pub fn new(store: &'a dyn RemoteStore, cfg: &'a CoreConfig) -> Self {
        Self { store, cfg }
    }

    /// Builds the remote query for `filter`: `name contains` and/or `mimeType =`, or the
    /// children of the root when no filter is given.
    pub fn search_query(&self, filter: &SearchFilter) -> DriveQuery {
        if filter.is_empty() {
            return DriveQuery::new().and(Clause::InParents(
                self.cfg.root_folder_id().as_str().to_string(),
            ));
        }
        DriveQuery::new()
            .and_if(filter.name.clone(), Clause::NameContains)
            .and_if(filter.mime_type.clone(), Clause::MimeTypeEquals)
    }

    /// Runs the search and attaches a full path to every match, in remote order.
    ///
    /// # Errors
    ///
    /// A failure rebuilding one match's path aborts the call with
    /// [`DriveError::AncestorLookup`] naming that match; no match is silently dropped.
    pub async fn search(&self, filter: &SearchFilter) -> DriveResult<Vec<PathedObject>> {
        let query = self.search_query(filter);
        let matches = self.store.list(&query).await?;
        tracing::info!(%query, matches = matches.len(), "search");

        let mut builder = AncestorPathBuilder::new(self.store, self.cfg);
        let mut results = Vec::with_capacity(matches.len());
        for object in matches {
            let path = builder
                .full_path(&object)
                .await
                .map_err(|e| DriveError::AncestorLookup {
                    id: object.id.clone(),
                    source: Box::new(e),
                })?;
            results.push(PathedObject { object, path });
        }
        Ok(results)
    }

    /// Resolves `path` and lists the folder's immediate children, optionally restricted to one
    /// MIME type.
    pub async fn list_folder(
        &self,
        path: &FolderPath,
        mime_type: Option<&str>,
    ) -> DriveResult<FolderListing> {
        let folder = PathResolver::new(self.store, self.cfg)
            .resolve_folder(path)
            .await?;

        let query = DriveQuery::new()
            .and(Clause::InParents(folder.id.clone()))
            .and_if(
                mime_type.filter(|m| !m.trim().is_empty()),
                |m| Clause::MimeTypeEquals(m.to_string()),
            );
        let objects = self.store.list(&query).await?;
        tracing::info!(path = %folder.path, id = %folder.id, children = objects.len(), "list folder");

        let parent_path = folder.path.to_string();
        let children = objects
            .into_iter()
            .map(|object| PathedObject {
                path: compose_path(&parent_path, &object.name),
                object,
            })
            .collect();

        Ok(FolderListing { folder, children })
    }
}
