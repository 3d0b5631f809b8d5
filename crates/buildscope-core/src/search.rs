//! Record search: wildcard, regex and fuzzy matching, ranked by fuzzy score

use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::SearchConfig;
use crate::fuzzy::{approximately_equals, fuzzy_score, MetricOptionSet};
use crate::records::{file_name_only, Record};

/// How a query is matched against record names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// `*` and `?` wildcards over the whole name
    #[default]
    Basic,
    Regex,
    /// Approximate equality under the configured tolerance
    Fuzzy,
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Basic => "basic",
            Self::Regex => "regex",
            Self::Fuzzy => "fuzzy",
        })
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "basic" | "wildcard" => Ok(Self::Basic),
            "regex" => Ok(Self::Regex),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(format!("unknown search mode: {}", other)),
        }
    }
}

enum Matcher<'a> {
    Pattern(Regex),
    Fuzzy {
        query: &'a str,
        config: &'a SearchConfig,
    },
}

impl Matcher<'_> {
    fn is_match(&self, input: &str) -> bool {
        match self {
            Self::Pattern(re) => re.is_match(input),
            Self::Fuzzy { query, config } => approximately_equals(
                input,
                query,
                config.tolerance,
                // fuzzy search ignores the case-sensitivity setting
                &config.metrics.case_sensitive(false),
            ),
        }
    }
}

/// Translate a wildcard pattern to an anchored regex source
pub fn wildcard_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    out.push('^');
    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                out.push_str(&regex::escape(&literal));
                literal.clear();
                out.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    out.push_str(&regex::escape(&literal));
    out.push('$');
    out
}

fn build_matcher<'a>(query: &'a str, config: &'a SearchConfig) -> Option<Matcher<'a>> {
    let source = match config.mode {
        SearchMode::Fuzzy => return Some(Matcher::Fuzzy { query, config }),
        SearchMode::Regex => query.to_owned(),
        SearchMode::Basic => wildcard_to_regex(query),
    };

    match RegexBuilder::new(&source)
        .case_insensitive(!config.case_sensitive)
        .build()
    {
        Ok(re) => Some(Matcher::Pattern(re)),
        Err(e) => {
            warn!(mode = %config.mode, query, error = %e, "invalid search pattern, nothing matches");
            None
        }
    }
}

/// Records of `records` matching `query`, most relevant first.
///
/// An empty query or a pattern that fails to compile yields no results.
pub fn search<R: Record + Clone>(records: &[R], query: &str, config: &SearchConfig) -> Vec<R> {
    if query.is_empty() {
        return Vec::new();
    }
    let Some(matcher) = build_matcher(query, config) else {
        return Vec::new();
    };

    let matches: Vec<R> = records
        .iter()
        .filter(|record| {
            let input = if config.filename_only {
                file_name_only(record.name())
            } else {
                record.name()
            };
            !input.is_empty() && matcher.is_match(input)
        })
        .cloned()
        .collect();

    debug!(
        mode = %config.mode,
        query,
        searched = records.len(),
        matched = matches.len(),
        "search complete"
    );

    rank_by_search(&matches, query, &config.metrics)
}

/// Fuzzy distance of `query` to a record name.
///
/// Empty names score 0. A name no selected metric can score ranks last.
fn search_score(query: &str, name: &str, metrics: &MetricOptionSet) -> f64 {
    if name.is_empty() {
        return 0.0;
    }
    match fuzzy_score(query, name, metrics) {
        Ok(score) => {
            trace!(name, score, "search score");
            score
        }
        Err(e) => {
            trace!(name, error = %e, "name not scorable, ranked last");
            f64::INFINITY
        }
    }
}

/// New vector ordered by ascending fuzzy distance to `query`; ties keep
/// their input order
pub fn rank_by_search<R: Record + Clone>(records: &[R], query: &str, metrics: &MetricOptionSet) -> Vec<R> {
    let mut scored: Vec<(f64, &R)> = records
        .iter()
        .map(|record| (search_score(query, record.name(), metrics), record))
        .collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));
    scored.into_iter().map(|(_, record)| record.clone()).collect()
}

pub fn rank_by_search_in_place<R: Record + Clone>(records: &mut [R], query: &str, metrics: &MetricOptionSet) {
    let ranked = rank_by_search(records, query, metrics);
    records.clone_from_slice(&ranked);
}
