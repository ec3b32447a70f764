#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("folder '{segment}' not found in path '{resolved}'")]
    PathNotFound { resolved: String, segment: String },
    #[error("{candidates} folders named '{segment}' in path '{resolved}'")]
    AmbiguousPath {
        resolved: String,
        segment: String,
        candidates: usize,
    },
    #[error("object not found: {0}")]
    ObjectNotFound(String),
    #[error("sheet '{0}' not found")]
    SheetNotFound(String),
    #[error("object {id} is not a {expected}")]
    WrongKind { id: String, expected: &'static str },
    #[error("ancestor chain of {id} exceeds {max_depth} levels")]
    DepthExceeded { id: String, max_depth: usize },
    #[error("ancestor chain of {id} loops back to {repeated}")]
    CyclicAncestry { id: String, repeated: String },
    #[error("failed to build path for {id}: {source}")]
    AncestorLookup {
        id: String,
        #[source]
        source: Box<DriveError>,
    },
    #[error("not authenticated")]
    Unauthenticated,
    #[error("remote API returned {status}: {detail}")]
    Remote { status: u16, detail: String },
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to decode remote response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read file: {0}")]
    FileRead(std::io::Error),
}

impl DriveError {
    /// Whether the error means the addressed thing does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::PathNotFound { .. } | Self::ObjectNotFound(_) | Self::SheetNotFound(_) => true,
            Self::AncestorLookup { source, .. } => source.is_not_found(),
            _ => false,
        }
    }
}

impl From<drive_types::TypeError> for DriveError {
    fn from(e: drive_types::TypeError) -> Self {
        Self::InvalidInput(e.to_string())
    }
}

pub type DriveResult<T> = std::result::Result<T, DriveError>;
