//! Reading notes, queries and grammar configuration from disk.

use std::fmt::Display;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use notemark_lib::{Grammar, GrammarError, GrammarExtension};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid extensions file {}: {source}", path.display())]
    Extensions {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

/// Reads `path`, or stdin for `-`.
pub fn load_source(path: &Path) -> Result<String, InputError> {
    let read_error = |source| InputError::Read {
        path: path.to_path_buf(),
        source,
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).map_err(read_error)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(read_error)
}

/// The default grammar, or one extended from a JSON file.
pub fn load_grammar(extensions: Option<&Path>) -> Result<Grammar, InputError> {
    let Some(path) = extensions else {
        return Ok(Grammar::default());
    };
    let text = load_source(path)?;
    let extensions: Vec<GrammarExtension> =
        serde_json::from_str(&text).map_err(|source| InputError::Extensions {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(Grammar::builder().extensions(extensions).build()?)
}

/// Display name for diagnostics headers.
pub fn display_path(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

pub fn fail(err: impl Display) -> ! {
    eprintln!("error: {err}");
    std::process::exit(1);
}
