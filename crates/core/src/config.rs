//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services as an
//! `Arc<CoreConfig>`. Request handling never reads environment variables.

use crate::constants::DEFAULT_MAX_PATH_DEPTH;
use crate::{DriveError, DriveResult};
use drive_types::ObjectId;
use std::str::FromStr;

/// What the path resolver does when several folders under one parent share a name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AmbiguityPolicy {
    /// Fail with [`DriveError::AmbiguousPath`].
    #[default]
    Reject,
    /// Take the first candidate in the order the remote store returned them.
    FirstMatch,
}

impl FromStr for AmbiguityPolicy {
    type Err = DriveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" | "strict" => Ok(Self::Reject),
            "first" | "first-match" | "first_match" => Ok(Self::FirstMatch),
            other => Err(DriveError::InvalidInput(format!(
                "unknown ambiguity policy '{other}' (expected 'reject' or 'first')"
            ))),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    root_folder_id: ObjectId,
    ambiguity: AmbiguityPolicy,
    max_path_depth: usize,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(
        root_folder_id: ObjectId,
        ambiguity: AmbiguityPolicy,
        max_path_depth: usize,
    ) -> DriveResult<Self> {
        if max_path_depth == 0 {
            return Err(DriveError::InvalidInput(
                "max_path_depth must be at least 1".into(),
            ));
        }

        Ok(Self {
            root_folder_id,
            ambiguity,
            max_path_depth,
        })
    }

    pub fn root_folder_id(&self) -> &ObjectId {
        &self.root_folder_id
    }

    pub fn ambiguity(&self) -> AmbiguityPolicy {
        self.ambiguity
    }

    pub fn max_path_depth(&self) -> usize {
        self.max_path_depth
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            root_folder_id: ObjectId::root(),
            ambiguity: AmbiguityPolicy::default(),
            max_path_depth: DEFAULT_MAX_PATH_DEPTH,
        }
    }
}

/// Build a `CoreConfig` from optional raw string values (typically environment variables).
///
/// Missing or blank values fall back to the defaults.
pub fn core_config_from_env_values(
    root_folder_id: Option<String>,
    ambiguity: Option<String>,
    max_path_depth: Option<String>,
) -> DriveResult<CoreConfig> {
    fn non_blank(value: Option<String>) -> Option<String> {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    let defaults = CoreConfig::default();

    let root = non_blank(root_folder_id)
        .map(ObjectId::parse)
        .transpose()?
        .unwrap_or_else(|| defaults.root_folder_id.clone());
    let ambiguity = non_blank(ambiguity)
        .map(|v| v.parse::<AmbiguityPolicy>())
        .transpose()?
        .unwrap_or(defaults.ambiguity);
    let depth = non_blank(max_path_depth)
        .map(|v| {
            v.parse::<usize>().map_err(|_| {
                DriveError::InvalidInput(format!("max path depth '{v}' is not a number"))
            })
        })
        .transpose()?
        .unwrap_or(defaults.max_path_depth);

    CoreConfig::new(root, ambiguity, depth)
}
