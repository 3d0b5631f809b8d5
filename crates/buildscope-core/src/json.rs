//! JSON string entry points for embedding hosts
//!
//! Each function takes a JSON request and returns a JSON response. They never
//! panic: bad input comes back as `{"error": "..."}`.

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;
use crate::error::Result;
use crate::fuzzy::{approximately_equals, fuzzy_score, MetricOptionSet, Tolerance};
use crate::metrics::{score_distance, MetricTag, StringPair};
use crate::records::{AssetEntry, AuxTable};
use crate::search::search;
use crate::sort::{sort_records, SortSpec};

fn error_json(context: &str, err: impl std::fmt::Display) -> String {
    serde_json::json!({ "error": format!("{}: {}", context, err) }).to_string()
}

fn respond<T: Serialize>(result: Result<T>, context: &str) -> String {
    match result.and_then(|out| Ok(serde_json::to_string(&out)?)) {
        Ok(json) => json,
        Err(e) => error_json(context, e),
    }
}

// ============================================================================
// Scoring
// ============================================================================

#[derive(Debug, Deserialize)]
struct ScoreInput {
    source: Option<String>,
    target: Option<String>,
    #[serde(flatten)]
    options: MetricOptionSet,
    #[serde(default)]
    tolerance: Tolerance,
}

#[derive(Debug, Serialize)]
struct MetricValue {
    metric: MetricTag,
    value: f64,
}

#[derive(Debug, Serialize)]
struct ScoreOutput {
    score: f64,
    matches: bool,
    /// Raw per-metric values; Hamming is left out on a length mismatch
    raw: Vec<MetricValue>,
}

/// Fuzzy score, match flag and raw metric values for one string pair.
///
/// Request: `{"source", "target", "metrics": [...], "case_sensitive", "tolerance"}`.
/// A missing or `null` string is rejected as invalid input.
pub fn score_json(input: &str) -> String {
    let parsed: ScoreInput = match serde_json::from_str(input) {
        Ok(p) => p,
        Err(e) => return error_json("invalid score input", e),
    };
    respond(score(&parsed), "score failed")
}

fn score(input: &ScoreInput) -> Result<ScoreOutput> {
    let pair = StringPair::new(input.source.as_deref(), input.target.as_deref())?;
    let score = fuzzy_score(pair.source, pair.target, &input.options)?;
    let raw = input
        .options
        .iter()
        .filter_map(|metric| {
            score_distance(&pair, metric)
                .ok()
                .map(|value| MetricValue { metric, value })
        })
        .collect();

    Ok(ScoreOutput {
        score,
        matches: approximately_equals(pair.source, pair.target, input.tolerance, &input.options),
        raw,
    })
}

// ============================================================================
// Search
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchInput {
    records: Vec<AssetEntry>,
    query: String,
    #[serde(default)]
    config: SearchConfig,
}

#[derive(Debug, Serialize)]
struct SearchOutput {
    results: Vec<AssetEntry>,
    total: usize,
}

/// Search request: `{"records": [...], "query": "...", "config": {...}}`
pub fn search_json(input: &str) -> String {
    let parsed: SearchInput = match serde_json::from_str(input) {
        Ok(p) => p,
        Err(e) => return error_json("invalid search input", e),
    };
    let results = search(&parsed.records, &parsed.query, &parsed.config);
    let total = results.len();
    respond(Ok(SearchOutput { results, total }), "serialization failed")
}

// ============================================================================
// Sort
// ============================================================================

#[derive(Debug, Deserialize)]
struct SortInput {
    records: Vec<AssetEntry>,
    spec: SortSpec,
    #[serde(default)]
    aux: AuxTable,
}

#[derive(Debug, Serialize)]
struct SortOutput {
    records: Vec<AssetEntry>,
}

/// Sort request: `{"records": [...], "spec": {"field", "order"}, "aux": {...}}`
pub fn sort_json(input: &str) -> String {
    let mut parsed: SortInput = match serde_json::from_str(input) {
        Ok(p) => p,
        Err(e) => return error_json("invalid sort input", e),
    };
    sort_records(&mut parsed.records, &parsed.spec, &parsed.aux);
    respond(
        Ok(SortOutput {
            records: parsed.records,
        }),
        "serialization failed",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn call(f: fn(&str) -> String, input: Value) -> Value {
        serde_json::from_str(&f(&input.to_string())).unwrap()
    }

    #[test]
    fn test_score_json() {
        let out = call(
            score_json,
            json!({"source": "abc", "target": "abc", "metrics": ["jaro", "levenshtein"]}),
        );
        assert!(out["error"].is_null(), "unexpected error: {}", out);
        assert_eq!(out["score"], 0.0);
        assert_eq!(out["matches"], true);
        assert_eq!(out["raw"][0]["metric"], "jaro");
        assert_eq!(out["raw"][0]["value"], 1.0);
    }

    #[test]
    fn test_score_json_null_string_is_invalid_input() {
        let out = call(score_json, json!({"source": null, "target": "abc", "metrics": ["jaro"]}));
        let msg = out["error"].as_str().unwrap();
        assert!(msg.contains("invalid input"), "{}", msg);
    }

    #[test]
    fn test_score_json_empty_options() {
        let out = call(score_json, json!({"source": "a", "target": "b"}));
        assert!(out["error"].as_str().unwrap().contains("no metric"));
    }

    #[test]
    fn test_score_json_not_json() {
        let out: Value = serde_json::from_str(&score_json("not json")).unwrap();
        assert!(out["error"].as_str().unwrap().starts_with("invalid score input"));
    }

    #[test]
    fn test_search_json() {
        let out = call(
            search_json,
            json!({
                "records": [
                    {"name": "Assets/dog.png", "raw_size": 1},
                    {"name": "Assets/cat.png", "raw_size": 2}
                ],
                "query": "*cat*"
            }),
        );
        assert_eq!(out["total"], 1);
        assert_eq!(out["results"][0]["name"], "Assets/cat.png");
    }

    #[test]
    fn test_sort_json_with_aux() {
        let out = call(
            sort_json,
            json!({
                "records": [
                    {"name": "a.png", "raw_size": 1},
                    {"name": "b.png", "raw_size": 1}
                ],
                "spec": {"field": {"aux": {"id": "max", "kind": {"type": "int"}}}},
                "aux": {"b.png": {"max": 4096}, "a.png": {"max": 512}}
            }),
        );
        assert_eq!(out["records"][0]["name"], "b.png");
        assert_eq!(out["records"][1]["name"], "a.png");
    }
}
