use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors from the persistence and configuration layers.
///
/// Editing operations themselves never fail; a missing selection or an
/// empty url makes them no-ops instead.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum RichTextError {
    #[error("failed to access {}", path.display())]
    #[diagnostic(code(richtext::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid document json")]
    #[diagnostic(code(richtext::json))]
    Json(#[from] serde_json::Error),

    #[error("document store failed for key `{key}`: {message}")]
    #[diagnostic(code(richtext::store))]
    Store { key: String, message: String },

    #[error("invalid config at {}", path.display())]
    #[diagnostic(
        code(richtext::config),
        help("see EditorConfig for the accepted fields")
    )]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = RichTextError> = std::result::Result<T, E>;
