//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::queries::QueriesArgs;
use crate::commands::query::QueryArgs;
use crate::commands::tree::TreeArgs;

pub struct TreeParams {
    pub source_path: PathBuf,
    pub extensions: Option<PathBuf>,
    pub spans: bool,
    pub json: bool,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: source_path(m),
            extensions: m.get_one::<PathBuf>("extensions").cloned(),
            spans: m.get_flag("spans"),
            json: m.get_flag("json"),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            source_path: p.source_path,
            extensions: p.extensions,
            spans: p.spans,
            json: p.json,
        }
    }
}

pub struct QueryParams {
    pub query_text: Option<String>,
    pub query_path: Option<PathBuf>,
    pub color: ColorChoice,
}

impl QueryParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            query_text: m.get_one::<String>("query_text").cloned(),
            query_path: m.get_one::<PathBuf>("query_path").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<QueryParams> for QueryArgs {
    fn from(p: QueryParams) -> Self {
        Self {
            query_text: p.query_text,
            query_path: p.query_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct QueriesParams {
    pub source_path: PathBuf,
    pub extensions: Option<PathBuf>,
    pub color: ColorChoice,
}

impl QueriesParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: source_path(m),
            extensions: m.get_one::<PathBuf>("extensions").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<QueriesParams> for QueriesArgs {
    fn from(p: QueriesParams) -> Self {
        Self {
            source_path: p.source_path,
            extensions: p.extensions,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub source_path: PathBuf,
    pub extensions: Option<PathBuf>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: source_path(m),
            extensions: m.get_one::<PathBuf>("extensions").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            source_path: p.source_path,
            extensions: p.extensions,
            color: p.color.should_colorize(),
        }
    }
}

fn source_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("source_path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("-"))
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
