//! Integration tests for query parsing, search ordering and result limits.

use postdex::ingest::{ingest_rows, SourceRow};
use postdex::{EngineConfig, EngineError, Field, SearchEngine};
use tempfile::TempDir;

fn engine_with(rows: Vec<SourceRow>) -> (TempDir, SearchEngine) {
    let tmp = TempDir::new().unwrap();
    let engine = SearchEngine::open(EngineConfig::new(tmp.path())).unwrap();
    if !rows.is_empty() {
        ingest_rows(&engine, rows).unwrap();
    }
    (tmp, engine)
}

#[test]
fn test_market_scenario() {
    let (_tmp, engine) = engine_with(vec![
        SourceRow::new("news", "market falls today", "2021-01-01 00:00:00"),
        SourceRow::new("news", "market rises tomorrow", "2021-01-02 00:00:00"),
    ]);

    let results = engine.search("market").unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].created_date_str(), "2021-01-01 00:00:00");
    assert_eq!(results[1].created_date_str(), "2021-01-02 00:00:00");

    let falls = engine.search("falls").unwrap();
    assert_eq!(falls.len(), 1);
    assert_eq!(falls[0].text, "market falls today");

    assert!(engine.delete(&falls[0].id).unwrap());
    let after = engine.search("market").unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].text, "market rises tomorrow");
}

#[test]
fn test_results_sorted_ascending_by_date() {
    let (_tmp, engine) = engine_with(vec![
        SourceRow::new("news", "storm warning issued", "2021-06-01 12:00:00"),
        SourceRow::new("news", "storm passes the coast", "2021-02-01 12:00:00"),
        SourceRow::new("news", "storm damage assessed", "2021-04-01 12:00:00"),
    ]);

    let dates: Vec<String> = engine
        .search("storm")
        .unwrap()
        .iter()
        .map(|d| d.created_date_str())
        .collect();
    assert_eq!(
        dates,
        vec![
            "2021-02-01 12:00:00",
            "2021-04-01 12:00:00",
            "2021-06-01 12:00:00",
        ]
    );
}

#[test]
fn test_equal_dates_tie_break_by_id() {
    let (_tmp, engine) = engine_with(vec![
        SourceRow::new("news", "flood report north", "2021-01-01 00:00:00"),
        SourceRow::new("news", "flood report south", "2021-01-01 00:00:00"),
        SourceRow::new("news", "flood report east", "2021-01-01 00:00:00"),
    ]);

    let ids: Vec<String> = engine
        .search("flood")
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
}

#[test]
fn test_limit_truncates_but_never_pads() {
    let rows = (1..=5)
        .map(|day| {
            SourceRow::new(
                "news",
                "daily digest",
                format!("2021-01-{:02} 08:00:00", day),
            )
        })
        .collect();
    let (_tmp, engine) = engine_with(rows);

    // Default limit 20 against 5 matches returns exactly 5
    assert_eq!(engine.search("digest").unwrap().len(), 5);

    let query = engine.parse_query("digest").unwrap();
    let top2 = engine.search_with(&query, 2, Field::CreatedDate);
    assert_eq!(top2.len(), 2);
    assert_eq!(top2[0].created_date_str(), "2021-01-01 08:00:00");
    assert_eq!(top2[1].created_date_str(), "2021-01-02 08:00:00");

    assert!(engine.search_with(&query, 0, Field::CreatedDate).is_empty());
}

#[test]
fn test_conjunction_requires_all_terms() {
    let (_tmp, engine) = engine_with(vec![
        SourceRow::new("news", "market falls today", "2021-01-01 00:00:00"),
        SourceRow::new("news", "market rises tomorrow", "2021-01-02 00:00:00"),
    ]);

    let both = engine.search("market falls").unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].text, "market falls today");

    assert!(engine.search("market crashes").unwrap().is_empty());
}

#[test]
fn test_or_keyword_unions_branches() {
    let (_tmp, engine) = engine_with(vec![
        SourceRow::new("news", "market falls today", "2021-01-01 00:00:00"),
        SourceRow::new("news", "market rises tomorrow", "2021-01-02 00:00:00"),
        SourceRow::new("sport", "match ends in a draw", "2021-01-03 00:00:00"),
    ]);

    let results = engine.search("falls OR draw").unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].text, "market falls today");
    assert_eq!(results[1].text, "match ends in a draw");
}

#[test]
fn test_field_qualifier_targets_rubrics() {
    let (_tmp, engine) = engine_with(vec![
        SourceRow::new("economy", "market falls today", "2021-01-01 00:00:00"),
        SourceRow::new("sport", "market street marathon", "2021-01-02 00:00:00"),
    ]);

    let economy = engine.search("rubrics:economy").unwrap();
    assert_eq!(economy.len(), 1);
    assert_eq!(economy[0].rubrics, "economy");

    let scoped = engine.search("rubrics:sport market").unwrap();
    assert_eq!(scoped.len(), 1);
    assert_eq!(scoped[0].rubrics, "sport");
}

#[test]
fn test_query_normalization_matches_index() {
    let (_tmp, engine) = engine_with(vec![SourceRow::new(
        "news",
        "Markets FALL; traders retreat",
        "2021-01-01 00:00:00",
    )]);

    // Case and punctuation differences must not matter
    assert_eq!(engine.search("markets").unwrap().len(), 1);
    assert_eq!(engine.search("FALL").unwrap().len(), 1);
    assert_eq!(engine.search("traders!").unwrap().len(), 1);
}

#[test]
fn test_zero_matches_is_empty_not_error() {
    let (_tmp, engine) = engine_with(vec![SourceRow::new(
        "news",
        "market falls today",
        "2021-01-01 00:00:00",
    )]);

    assert!(engine.search("absent").unwrap().is_empty());
}

#[test]
fn test_malformed_queries() {
    let (_tmp, engine) = engine_with(vec![SourceRow::new(
        "news",
        "market falls today",
        "2021-01-01 00:00:00",
    )]);

    for bad in ["", "   ", "!!!", "text:", "author:smith", "market OR"] {
        assert!(
            matches!(engine.search(bad), Err(EngineError::MalformedQuery(_))),
            "expected MalformedQuery for {:?}",
            bad
        );
    }
}

#[test]
fn test_stored_fields_returned_verbatim() {
    let (_tmp, engine) = engine_with(vec![SourceRow::new(
        "News & Politics",
        "The Market FALLS; details inside...",
        "2021-01-01 00:00:00",
    )]);

    let results = engine.search("market").unwrap();
    assert_eq!(results[0].rubrics, "News & Politics");
    assert_eq!(results[0].text, "The Market FALLS; details inside...");
}
