//! Per-request construction of remote handles from a credential.
//!
//! The HTTP layer holds one [`DriveBackend`] for the life of the process and asks it for store
//! and office handles each time a request arrives with a session credential.

use crate::credential::Credential;
use crate::google::drive::GoogleDrive;
use crate::google::office::GoogleOffice;
use crate::office::OfficeApi;
use crate::store::RemoteStore;
use std::sync::Arc;

pub trait DriveBackend: Send + Sync {
    fn store(&self, credential: &Credential) -> Arc<dyn RemoteStore>;
    fn office(&self, credential: &Credential) -> Arc<dyn OfficeApi>;
}

/// Backend talking to the hosted APIs. The HTTP client (and its connection pool) is shared.
#[derive(Clone)]
pub struct GoogleBackend {
    http: reqwest::Client,
}

impl GoogleBackend {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl DriveBackend for GoogleBackend {
    fn store(&self, credential: &Credential) -> Arc<dyn RemoteStore> {
        Arc::new(GoogleDrive::new(self.http.clone(), credential.token.clone()))
    }

    fn office(&self, credential: &Credential) -> Arc<dyn OfficeApi> {
        Arc::new(GoogleOffice::new(self.http.clone(), credential.token.clone()))
    }
}

/// Backend that hands out the same handles regardless of credential.
pub struct SharedBackend {
    store: Arc<dyn RemoteStore>,
    office: Arc<dyn OfficeApi>,
}

impl SharedBackend {
    pub fn new(store: Arc<dyn RemoteStore>, office: Arc<dyn OfficeApi>) -> Self {
        Self { store, office }
    }
}

impl DriveBackend for SharedBackend {
    fn store(&self, _credential: &Credential) -> Arc<dyn RemoteStore> {
        self.store.clone()
    }

    fn office(&self, _credential: &Credential) -> Arc<dyn OfficeApi> {
        self.office.clone()
    }
}
