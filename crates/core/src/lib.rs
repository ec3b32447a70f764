//! # Drive Core
//!
//! Core logic for the drive path façade.
//!
//! The remote store addresses everything by opaque identifier and only records parent links.
//! This crate turns that flat graph into a path-based view:
//! - [`resolver::PathResolver`] walks a `/`-delimited folder path down from the root, one remote
//!   query per segment
//! - [`ancestry::AncestorPathBuilder`] walks parent links up to rebuild an object's full path,
//!   memoized per operation
//! - [`search::SearchComposer`] runs searches and folder listings and annotates every result with
//!   its path
//!
//! Remote access goes through the [`store::RemoteStore`] and [`office::OfficeApi`] traits. The
//! hosted implementations live in [`google`]; [`memory::MemoryStore`] is the in-process stand-in.
//!
//! **No API concerns**: sessions, HTTP routing and response shapes belong in `api-rest` and
//! `api-shared`.

pub mod ancestry;
pub mod backend;
pub mod config;
pub mod constants;
pub mod credential;
pub mod drive;
pub mod error;
pub mod google;
pub mod memory;
pub mod object;
pub mod office;
pub mod query;
pub mod resolver;
pub mod search;
pub mod store;

pub use backend::{DriveBackend, GoogleBackend, SharedBackend};
pub use config::{core_config_from_env_values, AmbiguityPolicy, CoreConfig};
pub use credential::Credential;
pub use drive::DriveService;
pub use error::{DriveError, DriveResult};
pub use object::{ObjectKind, PathedObject, RemoteObject};
pub use office::{OfficeApi, OfficeService};
pub use search::{FolderListing, SearchFilter};
pub use store::RemoteStore;

pub use drive_types::{FolderPath, ObjectId};
