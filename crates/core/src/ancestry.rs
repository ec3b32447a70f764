//! Ancestor path reconstruction.
//!
//! The remote store only knows parent links. [`AncestorPathBuilder`] walks them upward to
//! rebuild slash paths, memoizing every identifier it visits in a [`PathCache`].
//!
//! A builder and its cache live for one logical operation (one search, one listing) and are
//! dropped with it. Objects that share ancestors then cost one remote fetch per distinct
//! ancestor, and nothing outlives the request that computed it.
//!
//! Path rules:
//! - no identifier → `""`
//! - the configured root folder → `""`
//! - parentless object (a hierarchy root) → `""`
//! - otherwise → `path_of(first parent) + "/" + name`

use crate::config::CoreConfig;
use crate::object::{compose_path, RemoteObject};
use crate::store::RemoteStore;
use crate::{DriveError, DriveResult};
use std::collections::{HashMap, HashSet};

/// Identifier → resolved path, scoped to one operation.
#[derive(Debug, Default)]
pub struct PathCache {
    paths: HashMap<String, String>,
}

impl PathCache {
    pub fn get(&self, id: &str) -> Option<&str> {
        self.paths.get(id).map(String::as_str)
    }

    fn insert(&mut self, id: String, path: String) {
        self.paths.insert(id, path);
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

pub struct AncestorPathBuilder<'a> {
    store: &'a dyn RemoteStore,
    root_id: String,
    max_depth: usize,
    cache: PathCache,
}

impl<'a> AncestorPathBuilder<'a> {
    pub fn new(store: &'a dyn RemoteStore, cfg: &CoreConfig) -> Self {
        Self {
            store,
            root_id: cfg.root_folder_id().as_str().to_string(),
            max_depth: cfg.max_path_depth(),
            cache: PathCache::default(),
        }
    }

    pub fn cache(&self) -> &PathCache {
        &self.cache
    }

    /// Returns the slash path of the object `id`.
    ///
    /// The walk is iterative: it climbs until it meets a cached identifier, the configured root
    /// or a parentless object, then fills the cache on the way back down. Paths are therefore
    /// relative to the same root that folder paths are resolved from.
    ///
    /// # Errors
    ///
    /// - Any error fetching an ancestor (for example [`DriveError::ObjectNotFound`] when an
    ///   ancestor was deleted concurrently).
    /// - [`DriveError::DepthExceeded`] if the chain is longer than the configured maximum.
    /// - [`DriveError::CyclicAncestry`] if the chain revisits an identifier.
    pub async fn path_of(&mut self, id: Option<&str>) -> DriveResult<String> {
        let Some(start) = id else {
            return Ok(String::new());
        };
        if let Some(cached) = self.cache.get(start) {
            return Ok(cached.to_string());
        }

        // (id, name) pairs from `start` upward, excluding the hierarchy root.
        let mut chain: Vec<(String, String)> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let mut next = start.to_string();

        let base = loop {
            if let Some(cached) = self.cache.get(&next) {
                break cached.to_string();
            }
            if next == self.root_id {
                self.cache.insert(next, String::new());
                break String::new();
            }
            if !visited.insert(next.clone()) {
                return Err(DriveError::CyclicAncestry {
                    id: start.to_string(),
                    repeated: next,
                });
            }

            let object = self.store.get(&next).await?;
            tracing::debug!(id = %object.id, name = %object.name, "fetched ancestor");

            match object.first_parent() {
                None => {
                    self.cache.insert(next, String::new());
                    break String::new();
                }
                Some(parent) => {
                    let parent = parent.to_string();
                    chain.push((next, object.name));
                    if chain.len() > self.max_depth {
                        return Err(DriveError::DepthExceeded {
                            id: start.to_string(),
                            max_depth: self.max_depth,
                        });
                    }
                    next = parent;
                }
            }
        };

        let mut path = base;
        for (id, name) in chain.into_iter().rev() {
            path = compose_path(&path, &name);
            self.cache.insert(id, path.clone());
        }
        Ok(path)
    }

    /// Full path of `object` itself: its first parent's path plus its own name.
    ///
    /// Parentless objects come out as `/name`.
    pub async fn full_path(&mut self, object: &RemoteObject) -> DriveResult<String> {
        let parent_path = self.path_of(object.first_parent()).await?;
        Ok(compose_path(&parent_path, &object.name))
    }
}
