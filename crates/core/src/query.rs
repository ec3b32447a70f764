//! Structured remote queries.
//!
//! The resolver and composers build a [`DriveQuery`] out of typed clauses instead of formatting
//! query strings inline. [`DriveQuery::render`] produces the remote store's query language
//! (`'<id>' in parents and name = '<name>'`), escaping user-supplied values; in-memory stores
//! evaluate the clauses directly with [`DriveQuery::matches`].

use crate::object::RemoteObject;

/// One conjunct of a remote query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Clause {
    /// `'<id>' in parents`
    InParents(String),
    /// `name = '<name>'`
    NameEquals(String),
    /// `name contains '<text>'`
    NameContains(String),
    /// `mimeType = '<mime>'`
    MimeTypeEquals(String),
}

impl Clause {
    fn render(&self) -> String {
        match self {
            Self::InParents(id) => format!("'{}' in parents", escape(id)),
            Self::NameEquals(name) => format!("name = '{}'", escape(name)),
            Self::NameContains(text) => format!("name contains '{}'", escape(text)),
            Self::MimeTypeEquals(mime) => format!("mimeType = '{}'", escape(mime)),
        }
    }

    fn matches(&self, object: &RemoteObject) -> bool {
        match self {
            Self::InParents(id) => object.parents.iter().any(|p| p == id),
            Self::NameEquals(name) => object.name == *name,
            Self::NameContains(text) => object.name.contains(text.as_str()),
            Self::MimeTypeEquals(mime) => object.mime_type == *mime,
        }
    }
}

/// A conjunction of clauses plus paging hints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DriveQuery {
    clauses: Vec<Clause>,
    page_size: Option<u32>,
}

impl DriveQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    /// Adds the clause only when `value` is present.
    pub fn and_if<T>(self, value: Option<T>, clause: impl FnOnce(T) -> Clause) -> Self {
        match value {
            Some(v) => self.and(clause(v)),
            None => self,
        }
    }

    /// Caps the number of results. A capped query returns a single page.
    pub fn limit(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size
    }

    pub fn is_unfiltered(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Renders the query in the remote store's query language, or `None` for an unfiltered query.
    pub fn render(&self) -> Option<String> {
        if self.clauses.is_empty() {
            return None;
        }
        Some(
            self.clauses
                .iter()
                .map(Clause::render)
                .collect::<Vec<_>>()
                .join(" and "),
        )
    }

    pub fn matches(&self, object: &RemoteObject) -> bool {
        self.clauses.iter().all(|c| c.matches(object))
    }
}

impl std::fmt::Display for DriveQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.render() {
            Some(q) => f.write_str(&q),
            None => f.write_str("<all>"),
        }
    }
}

/// Escapes a value for use inside a single-quoted query literal.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
