//! Graph sources.
//!
//! A `GraphSource` hands the core an immutable `DependencyGraph`. The text
//! format is a whitespace-delimited token stream:
//!
//! ```text
//! N  v1 .. vN  E  (tail head kind) x E
//! ```
//!
//! Each edge is stored under its head, so relevance flows from head to tail.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::model::{DependencyGraph, Edge, EdgeKind};

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Malformed graph input: expected {expected} at token {position}, found end of input")]
    UnexpectedEnd { expected: &'static str, position: usize },
    #[error("Malformed graph input: expected integer {what} at token {position}, found '{token}'")]
    InvalidInteger { what: &'static str, token: String, position: usize },
    #[error("Malformed graph input: {what} must be non-negative, got {value}")]
    NegativeCount { what: &'static str, value: i64 },
    #[error("Failed to read graph description at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies a dependency graph to the slicing core.
pub trait GraphSource {
    fn load(&self) -> Result<DependencyGraph, GraphError>;

    /// Short human-readable description for logs and reports.
    fn describe(&self) -> String;
}

/// In-memory graph description.
#[derive(Debug, Clone)]
pub struct TokenStreamSource {
    text: String,
}

impl TokenStreamSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl GraphSource for TokenStreamSource {
    fn load(&self) -> Result<DependencyGraph, GraphError> {
        parse_graph(&self.text)
    }

    fn describe(&self) -> String {
        "<inline>".to_string()
    }
}

/// Graph description stored in a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GraphSource for FileSource {
    fn load(&self) -> Result<DependencyGraph, GraphError> {
        let text = std::fs::read_to_string(&self.path)
            .map_err(|source| GraphError::Io { path: self.path.clone(), source })?;
        let graph = parse_graph(&text)?;
        debug!(
            path = %self.path.display(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "loaded graph"
        );
        Ok(graph)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse the token-stream graph format. Empty input yields an empty graph.
pub fn parse_graph(text: &str) -> Result<DependencyGraph, GraphError> {
    let mut tokens = Tokens::new(text);
    if tokens.is_exhausted() {
        return Ok(DependencyGraph::default());
    }

    let n = tokens.count("vertex count")?;
    let mut vertices = Vec::new();
    for _ in 0..n {
        vertices.push(tokens.next("vertex name")?.to_string());
    }
    let mut graph = DependencyGraph::new(vertices);

    let e = tokens.count("edge count")?;
    for _ in 0..e {
        let tail = tokens.next("edge tail")?;
        let head = tokens.next("edge head")?;
        let kind = tokens.integer("edge kind")?;
        graph.add_edge(Edge::new(tail, head, EdgeKind::from_code(kind)));
    }

    Ok(graph)
}

struct Tokens<'a> {
    inner: std::iter::Peekable<std::str::SplitWhitespace<'a>>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(text: &'a str) -> Self {
        Self { inner: text.split_whitespace().peekable(), position: 0 }
    }

    fn is_exhausted(&mut self) -> bool {
        self.inner.peek().is_none()
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a str, GraphError> {
        let token = self
            .inner
            .next()
            .ok_or(GraphError::UnexpectedEnd { expected, position: self.position })?;
        self.position += 1;
        Ok(token)
    }

    fn integer(&mut self, what: &'static str) -> Result<i64, GraphError> {
        let position = self.position;
        let token = self.next(what)?;
        token.parse::<i64>().map_err(|_| GraphError::InvalidInteger {
            what,
            token: token.to_string(),
            position,
        })
    }

    fn count(&mut self, what: &'static str) -> Result<usize, GraphError> {
        let value = self.integer(what)?;
        usize::try_from(value).map_err(|_| GraphError::NegativeCount { what, value })
    }
}
