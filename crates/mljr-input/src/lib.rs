//! mljr-input: the `key : value` input file format, its typed configuration
//! records and the built-in templates.

pub mod lexer;
pub mod schema;
pub mod template;
pub mod validate;

pub use lexer::{Entry, lex};
pub use schema::*;
pub use template::{CHOLINE_CHLORIDE, CHOLINE_CHLORIDE_GLYCEROL, Template, write_unique};
pub use validate::{ValidationError, build_config};

use std::path::{Path, PathBuf};
use tracing::debug;

/// Input files above this size are refused before reading.
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

pub type InputResult<T> = Result<T, InputError>;

#[derive(thiserror::Error, Debug)]
pub enum InputError {
    #[error("Failed to read input file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file {path} is {size} bytes, larger than the {limit} byte limit")]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("Error in line {line}: < {text} > ({reason})")]
    Syntax {
        line: usize,
        text: String,
        reason: &'static str,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Read, lex and validate an input file.
pub fn load_file(path: &Path) -> InputResult<CalcConfig> {
    let read_err = |source| InputError::Read {
        path: path.to_path_buf(),
        source,
    };
    let size = std::fs::metadata(path).map_err(read_err)?.len();
    if size > MAX_FILE_BYTES {
        return Err(InputError::FileTooLarge {
            path: path.to_path_buf(),
            size,
            limit: MAX_FILE_BYTES,
        });
    }
    let content = std::fs::read_to_string(path).map_err(read_err)?;
    debug!(path = %path.display(), size, "loaded input file");
    parse_str(&content)
}

/// Lex and validate input text.
pub fn parse_str(text: &str) -> InputResult<CalcConfig> {
    let entries = lex(text)?;
    Ok(build_config(&entries)?)
}
