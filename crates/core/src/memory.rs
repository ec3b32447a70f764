//! In-memory remote store.
//!
//! [`MemoryStore`] evaluates [`DriveQuery`] clauses against an insertion-ordered object table
//! and records every call it serves. It backs the test suites (call-count assertions on the
//! resolver and the ancestor cache) and the offline demo backend.

use crate::constants::{FOLDER_MIME_TYPE, ROOT_FOLDER_ID};
use crate::object::RemoteObject;
use crate::query::DriveQuery;
use crate::store::RemoteStore;
use crate::{DriveError, DriveResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    objects: Vec<RemoteObject>,
    list_queries: Vec<DriveQuery>,
    gets: Vec<String>,
    deletes: Vec<String>,
}

/// A remote store held entirely in memory.
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates a store containing only the root folder (`root`, no parents).
    pub fn new() -> Self {
        let root = RemoteObject::new(ROOT_FOLDER_ID, "My Drive", FOLDER_MIME_TYPE, Vec::new());
        Self {
            inner: Mutex::new(Inner {
                objects: vec![root],
                ..Inner::default()
            }),
        }
    }

    /// Inserts or replaces an object. Listing order follows first insertion.
    pub fn insert(&self, object: RemoteObject) {
        let mut inner = self.lock();
        match inner.objects.iter_mut().find(|o| o.id == object.id) {
            Some(existing) => *existing = object,
            None => inner.objects.push(object),
        }
    }

    pub fn with(self, object: RemoteObject) -> Self {
        self.insert(object);
        self
    }

    /// Removes an object without recording a delete call.
    pub fn remove(&self, id: &str) -> Option<RemoteObject> {
        let mut inner = self.lock();
        let idx = inner.objects.iter().position(|o| o.id == id)?;
        Some(inner.objects.remove(idx))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lock().objects.iter().any(|o| o.id == id)
    }

    pub fn list_calls(&self) -> usize {
        self.lock().list_queries.len()
    }

    /// Queries served by `list`, in call order.
    pub fn list_queries(&self) -> Vec<DriveQuery> {
        self.lock().list_queries.clone()
    }

    pub fn get_calls(&self) -> usize {
        self.lock().gets.len()
    }

    /// Number of `get` calls per object id.
    pub fn get_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for id in &self.lock().gets {
            *counts.entry(id.clone()).or_insert(0) += 1;
        }
        counts
    }

    pub fn delete_calls(&self) -> usize {
        self.lock().deletes.len()
    }

    pub fn reset_calls(&self) {
        let mut inner = self.lock();
        inner.list_queries.clear();
        inner.gets.clear();
        inner.deletes.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means a test panicked mid-call; the table is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn list(&self, query: &DriveQuery) -> DriveResult<Vec<RemoteObject>> {
        let mut inner = self.lock();
        inner.list_queries.push(query.clone());
        let matches = inner.objects.iter().filter(|o| query.matches(o)).cloned();
        Ok(match query.page_size() {
            Some(n) => matches.take(n as usize).collect(),
            None => matches.collect(),
        })
    }

    async fn get(&self, id: &str) -> DriveResult<RemoteObject> {
        let mut inner = self.lock();
        inner.gets.push(id.to_string());
        inner
            .objects
            .iter()
            .find(|o| o.id == id)
            .cloned()
            .ok_or_else(|| DriveError::ObjectNotFound(id.to_string()))
    }

    async fn delete(&self, id: &str) -> DriveResult<()> {
        let mut inner = self.lock();
        inner.deletes.push(id.to_string());
        let idx = inner
            .objects
            .iter()
            .position(|o| o.id == id)
            .ok_or_else(|| DriveError::ObjectNotFound(id.to_string()))?;
        inner.objects.remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Clause;

    #[tokio::test]
    async fn list_filters_and_records_queries() {
        let store = MemoryStore::new()
            .with(RemoteObject::folder("a", "Reports", ROOT_FOLDER_ID))
            .with(RemoteObject::file("b", "notes.txt", "text/plain", ROOT_FOLDER_ID));

        let q = DriveQuery::new().and(Clause::MimeTypeEquals(FOLDER_MIME_TYPE.into()));
        let found = store.list(&q).await.unwrap();

        // The root itself is a folder too.
        let ids: Vec<_> = found.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["root", "a"]);
        assert_eq!(store.list_queries(), vec![q]);
    }

    #[tokio::test]
    async fn list_honours_page_size() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store.insert(RemoteObject::file(format!("f{i}"), "x", "text/plain", "root"));
        }
        let q = DriveQuery::new().and(Clause::InParents("root".into())).limit(3);
        assert_eq!(store.list(&q).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn get_and_delete_report_missing_objects() {
        let store = MemoryStore::new().with(RemoteObject::folder("a", "A", "root"));

        assert!(matches!(
            store.get("zzz").await,
            Err(DriveError::ObjectNotFound(id)) if id == "zzz"
        ));
        store.delete("a").await.unwrap();
        assert!(!store.contains("a"));
        assert!(matches!(
            store.delete("a").await,
            Err(DriveError::ObjectNotFound(_))
        ));
        assert_eq!(store.get_calls(), 1);
        assert_eq!(store.delete_calls(), 2);
    }

    #[tokio::test]
    async fn insert_replaces_in_place() {
        let store = MemoryStore::new()
            .with(RemoteObject::folder("a", "A", "root"))
            .with(RemoteObject::folder("b", "B", "root"));
        store.insert(RemoteObject::folder("a", "Renamed", "root"));

        let all = store.list(&DriveQuery::new()).await.unwrap();
        let names: Vec<_> = all.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["My Drive", "Renamed", "B"]);
    }
}
