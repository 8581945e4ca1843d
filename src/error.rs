use std::fmt::Display;

pub type Result<T> = std::result::Result<T, DefinitionError>;

/// Raised while turning route declarations into a [crate::RouteTable].
/// Any of these aborts the construction of the whole table.
#[derive(Debug)]
pub enum DefinitionError {
    /// A `{...}` segment does not follow the `{name}` or `{name:pattern}` grammar.
    InvalidPath { path: String, segment: String },
    /// The same parameter name appears twice within one template.
    DuplicateParameter { path: String, name: String },
    /// The parameter pattern is not a valid regular expression.
    InvalidPattern {
        path: String,
        name: String,
        source: regex::Error,
    },
}

impl DefinitionError {
    pub fn path(&self) -> &str {
        match self {
            Self::InvalidPath { path, .. }
            | Self::DuplicateParameter { path, .. }
            | Self::InvalidPattern { path, .. } => path,
        }
    }
}

impl Display for DefinitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPath { path, segment } => {
                write!(f, "Invalid route path '{path}': malformed segment '{segment}'")
            }
            Self::DuplicateParameter { path, name } => {
                write!(f, "Duplicate path parameter '{name}' in '{path}'")
            }
            Self::InvalidPattern { path, name, source } => {
                write!(f, "Invalid pattern for parameter '{name}' in '{path}': {source}")
            }
        }
    }
}

impl std::error::Error for DefinitionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidPattern { source, .. } => Some(source),
            _ => None,
        }
    }
}
