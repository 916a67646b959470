//! Grammar configuration.
//!
//! The document grammar itself is fixed. A [`Grammar`] carries what embedding
//! applications may change: extra inline constructs recognized by an anchored
//! regular expression, and the nesting limit past which constructs degrade to
//! text. Build one with [`GrammarBuilder`]; the result is immutable and cheap
//! to clone and share across threads.

use std::sync::Arc;

use indexmap::IndexMap;
use regex_automata::meta::Regex;
use regex_automata::{Anchored, Input};
use serde::Deserialize;

use super::cst::{EXTENSION_BASE, SyntaxKind};

pub const DEFAULT_MAX_DEPTH: u32 = 64;

const MAX_EXTENSIONS: usize = (u16::MAX - EXTENSION_BASE) as usize;

/// An additional inline node kind recognized by an embedding application.
///
/// `pattern` is matched anchored at the current position. `trigger`, when set,
/// restricts matching to positions starting with that character.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarExtension {
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub trigger: Option<char>,
}

impl GrammarExtension {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            trigger: None,
        }
    }

    pub fn with_trigger(mut self, trigger: char) -> Self {
        self.trigger = Some(trigger);
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GrammarError {
    #[error("extension name must not be empty")]
    EmptyName,

    #[error("extension `{0}` is registered twice")]
    DuplicateExtension(String),

    #[error("extension `{0}` shadows a built-in node kind")]
    ShadowsBuiltin(String),

    #[error("extension `{name}` has an invalid pattern: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: Box<regex_automata::meta::BuildError>,
    },

    #[error("too many extensions: at most {MAX_EXTENSIONS} are supported")]
    TooManyExtensions,
}

#[derive(Debug)]
struct CompiledExtension {
    regex: Regex,
    trigger: Option<char>,
}

#[derive(Debug)]
struct GrammarInner {
    extensions: IndexMap<String, CompiledExtension>,
    max_depth: u32,
}

/// Immutable parser configuration.
#[derive(Debug, Clone)]
pub struct Grammar {
    inner: Arc<GrammarInner>,
}

impl Default for Grammar {
    fn default() -> Self {
        Self {
            inner: Arc::new(GrammarInner {
                extensions: IndexMap::new(),
                max_depth: DEFAULT_MAX_DEPTH,
            }),
        }
    }
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    pub fn max_depth(&self) -> u32 {
        self.inner.max_depth
    }

    /// Extension names in registration order.
    pub fn extension_names(&self) -> impl Iterator<Item = &str> {
        self.inner.extensions.keys().map(String::as_str)
    }

    pub fn extension_name(&self, index: usize) -> Option<&str> {
        self.inner
            .extensions
            .get_index(index)
            .map(|(name, _)| name.as_str())
    }

    pub fn has_extensions(&self) -> bool {
        !self.inner.extensions.is_empty()
    }

    /// First extension, in registration order, matching a non-empty prefix of
    /// `source[at..limit]`. Returns its index and the match end.
    pub(crate) fn match_extension(
        &self,
        source: &str,
        at: usize,
        limit: usize,
    ) -> Option<(usize, usize)> {
        let first = source[at..limit].chars().next()?;
        self.inner
            .extensions
            .values()
            .enumerate()
            .filter(|(_, ext)| ext.trigger.is_none_or(|t| t == first))
            .find_map(|(index, ext)| {
                let input = Input::new(source).range(at..limit).anchored(Anchored::Yes);
                let m = ext.regex.find(input)?;
                (m.end() > at).then_some((index, m.end()))
            })
    }
}

/// Builds a [`Grammar`] from ordered extensions and limits.
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    extensions: Vec<GrammarExtension>,
    max_depth: Option<u32>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extension(mut self, extension: GrammarExtension) -> Self {
        self.extensions.push(extension);
        self
    }

    pub fn extensions(mut self, extensions: impl IntoIterator<Item = GrammarExtension>) -> Self {
        self.extensions.extend(extensions);
        self
    }

    /// Nesting limit for lists, quotes, directives and inline constructs.
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn build(self) -> Result<Grammar, GrammarError> {
        if self.extensions.len() > MAX_EXTENSIONS {
            return Err(GrammarError::TooManyExtensions);
        }

        let mut extensions = IndexMap::with_capacity(self.extensions.len());
        for GrammarExtension {
            name,
            pattern,
            trigger,
        } in self.extensions
        {
            if name.is_empty() {
                return Err(GrammarError::EmptyName);
            }
            if is_builtin_kind(&name) {
                return Err(GrammarError::ShadowsBuiltin(name));
            }
            if extensions.contains_key(&name) {
                return Err(GrammarError::DuplicateExtension(name));
            }
            let regex = match Regex::new(&pattern) {
                Ok(regex) => regex,
                Err(source) => {
                    return Err(GrammarError::InvalidPattern {
                        name,
                        source: Box::new(source),
                    });
                }
            };
            extensions.insert(name, CompiledExtension { regex, trigger });
        }

        Ok(Grammar {
            inner: Arc::new(GrammarInner {
                extensions,
                max_depth: self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            }),
        })
    }
}

/// Builds a grammar recognizing `extensions` with default limits.
pub fn build_grammar(
    extensions: impl IntoIterator<Item = GrammarExtension>,
) -> Result<Grammar, GrammarError> {
    GrammarBuilder::new().extensions(extensions).build()
}

fn is_builtin_kind(name: &str) -> bool {
    (0..SyntaxKind::__LAST as u16).any(|raw| {
        let kind = <super::cst::NoteLang as rowan::Language>::kind_from_raw(rowan::SyntaxKind(raw));
        format!("{kind:?}") == name
    })
}
