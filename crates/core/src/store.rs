//! The remote object store capability.
//!
//! Everything in the core talks to the remote hierarchy through [`RemoteStore`]. A handle is
//! built per request from the caller's credential, so implementations carry no user state
//! beyond the request.

use crate::object::RemoteObject;
use crate::query::DriveQuery;
use crate::DriveResult;
use async_trait::async_trait;

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Returns every object matching `query`, in the remote store's order.
    ///
    /// Implementations follow pagination unless the query carries a page size.
    async fn list(&self, query: &DriveQuery) -> DriveResult<Vec<RemoteObject>>;

    /// Fetches one object. Fails with [`crate::DriveError::ObjectNotFound`] if it does not exist.
    async fn get(&self, id: &str) -> DriveResult<RemoteObject>;

    /// Deletes one object. Fails with [`crate::DriveError::ObjectNotFound`] if it does not exist.
    async fn delete(&self, id: &str) -> DriveResult<()>;
}
