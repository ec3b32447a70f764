//! Drive operations exposed to the HTTP layer and the CLI.
//!
//! [`DriveService`] ties one remote store handle to the process configuration. It is cheap to
//! build and is created per request from the caller's credential.

use crate::ancestry::AncestorPathBuilder;
use crate::config::CoreConfig;
use crate::constants::QUICK_LIST_PAGE_SIZE;
use crate::object::PathedObject;
use crate::query::DriveQuery;
use crate::resolver::{PathResolver, ResolvedFolder};
use crate::search::{FolderListing, SearchComposer, SearchFilter};
use crate::store::RemoteStore;
use crate::DriveResult;
use drive_types::{FolderPath, ObjectId};
use std::sync::Arc;

#[derive(Clone)]
pub struct DriveService {
    cfg: Arc<CoreConfig>,
    store: Arc<dyn RemoteStore>,
}

impl DriveService {
    pub fn new(cfg: Arc<CoreConfig>, store: Arc<dyn RemoteStore>) -> Self {
        Self { cfg, store }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    pub async fn resolve_folder(&self, path: &FolderPath) -> DriveResult<ResolvedFolder> {
        PathResolver::new(self.store.as_ref(), &self.cfg)
            .resolve_folder(path)
            .await
    }

    /// Full path of the object `id` itself.
    pub async fn path_of(&self, id: &ObjectId) -> DriveResult<String> {
        AncestorPathBuilder::new(self.store.as_ref(), &self.cfg)
            .path_of(Some(id.as_str()))
            .await
    }

    pub async fn search(&self, filter: &SearchFilter) -> DriveResult<Vec<PathedObject>> {
        SearchComposer::new(self.store.as_ref(), &self.cfg)
            .search(filter)
            .await
    }

    pub async fn navigate(
        &self,
        path: &FolderPath,
        mime_type: Option<&str>,
    ) -> DriveResult<FolderListing> {
        SearchComposer::new(self.store.as_ref(), &self.cfg)
            .list_folder(path, mime_type)
            .await
    }

    pub async fn delete(&self, id: &ObjectId) -> DriveResult<()> {
        self.store.delete(id.as_str()).await
    }

    /// Names of the first few files visible to the credential, in remote order.
    pub async fn quick_list(&self) -> DriveResult<Vec<String>> {
        let query = DriveQuery::new().limit(QUICK_LIST_PAGE_SIZE);
        let objects = self.store.list(&query).await?;
        Ok(objects.into_iter().map(|o| o.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::object::RemoteObject;
    use crate::DriveError;

    fn service(store: Arc<MemoryStore>) -> DriveService {
        DriveService::new(Arc::new(CoreConfig::default()), store)
    }

    fn reports() -> Arc<MemoryStore> {
        Arc::new(
            MemoryStore::new()
                .with(RemoteObject::folder("reports", "Reports", "root"))
                .with(RemoteObject::folder("q1", "Q1", "reports"))
                .with(RemoteObject::file("sum", "summary.txt", "text/plain", "q1")),
        )
    }

    #[tokio::test]
    async fn resolve_then_path_of_round_trips() {
        let svc = service(reports());
        let folder = svc.resolve_folder(&FolderPath::parse("/Reports/Q1/")).await.unwrap();
        let id = ObjectId::parse(&folder.id).unwrap();
        assert_eq!(svc.path_of(&id).await.unwrap(), "/Reports/Q1");
    }

    #[tokio::test]
    async fn navigate_lists_children_with_paths() {
        let svc = service(reports());
        let listing = svc
            .navigate(&FolderPath::parse("Reports/Q1"), None)
            .await
            .unwrap();
        assert_eq!(listing.children.len(), 1);
        assert_eq!(listing.children[0].path, "/Reports/Q1/summary.txt");
    }

    #[tokio::test]
    async fn delete_removes_and_reports_missing() {
        let store = reports();
        let svc = service(store.clone());
        let id = ObjectId::parse("sum").unwrap();

        svc.delete(&id).await.unwrap();
        assert!(!store.contains("sum"));
        assert!(matches!(
            svc.delete(&id).await,
            Err(DriveError::ObjectNotFound(_))
        ));
    }

    #[tokio::test]
    async fn quick_list_is_capped() {
        let store = MemoryStore::new();
        for i in 0..15 {
            store.insert(RemoteObject::file(
                format!("f{i}"),
                format!("file-{i}.txt"),
                "text/plain",
                "root",
            ));
        }
        let names = service(Arc::new(store)).quick_list().await.unwrap();
        assert_eq!(names.len(), QUICK_LIST_PAGE_SIZE as usize);
        assert_eq!(names[0], "My Drive");
    }
}
