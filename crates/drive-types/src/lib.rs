//! Validated value types shared by the drive crates.
//!
//! Two inputs cross the HTTP/CLI boundary and end up interpolated into remote queries or URLs:
//! object identifiers and slash-delimited folder paths. Both are parsed once here so the rest of
//! the workspace can rely on their shape.

/// Errors that can occur when creating validated types.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TypeError {
    /// The input was empty or contained only whitespace
    #[error("identifier cannot be empty")]
    Empty,
    /// The identifier is longer than the remote store ever issues
    #[error("identifier exceeds maximum length of {max} characters")]
    TooLong { max: usize },
    /// The identifier contains a character outside the remote store's identifier alphabet
    #[error("identifier contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// An opaque object identifier as issued by the remote store.
///
/// Remote identifiers are drawn from `[A-Za-z0-9_-]`. Rejecting everything else keeps the
/// identifier safe to embed in query expressions (`'<id>' in parents`) and URL paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    const MAX_LEN: usize = 256;

    /// The alias the remote store accepts for the user's root folder.
    pub fn root() -> Self {
        Self("root".to_owned())
    }

    /// Parses an identifier, trimming surrounding whitespace.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TypeError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TypeError::Empty);
        }
        if trimmed.len() > Self::MAX_LEN {
            return Err(TypeError::TooLong { max: Self::MAX_LEN });
        }
        if let Some(c) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(TypeError::InvalidCharacter(c));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ObjectId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for ObjectId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ObjectId::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A virtual folder path made of `/`-delimited segment names.
///
/// Parsing strips leading and trailing slashes and drops empty segments, so `"/a//b/"` and
/// `"a/b"` are the same path. Segment names are otherwise kept verbatim: remote names may
/// legitimately contain spaces or punctuation.
///
/// The root path has no segments and renders as the empty string; any other path renders with a
/// leading slash (`/Reports/Q1`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FolderPath {
    segments: Vec<String>,
}

impl FolderPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn parse(input: &str) -> Self {
        Self {
            segments: input
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a new path with `name` appended as the last segment.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    /// The path made of the first `n` segments.
    pub fn prefix(&self, n: usize) -> Self {
        Self {
            segments: self.segments[..n.min(self.segments.len())].to_vec(),
        }
    }
}

impl std::fmt::Display for FolderPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for FolderPath {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}
