use anyhow::Result;
use docsearch_search::MatchKind;
use docsearch_search::ResultType;
use docsearch_search::SearchConfig;
use docsearch_search::SearchEngine;
use docsearch_search::SearchQuery;
use docsearch_test_support::MATHEMATICS;
use docsearch_test_support::RECIPES;
use docsearch_test_support::sample_corpus;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn engine() -> Result<SearchEngine> {
    Ok(SearchEngine::new(
        SearchConfig::default(),
        Arc::new(sample_corpus()),
    )?)
}

#[test_log::test(tokio::test)]
async fn misspelled_filename_still_matches() -> Result<()> {
    let results = engine()?.search(&SearchQuery::fuzzy("mathematcs")).await?;

    assert_eq!(results.len(), 1);
    let result = &results.results[0];
    assert_eq!(result.file, MATHEMATICS);
    assert_eq!(result.result_type(), ResultType::Fuzzy);
    // "mathematics.md" is four edits away: 1 - 4/14
    let MatchKind::Fuzzy { similarity } = result.kind else {
        panic!("expected a fuzzy filename match, got {:?}", result.kind);
    };
    assert!((similarity - 0.714_285_7).abs() < 1e-4);
    assert_eq!(result.relevance, similarity);
    assert_eq!(result.confidence, similarity);
    assert!(result.score > 0.5);
    Ok(())
}

#[tokio::test]
async fn near_identical_content_matches() -> Result<()> {
    let results = engine()?
        .search(&SearchQuery::fuzzy("pancakes need flour, eggs and mlk"))
        .await?;

    let content = results
        .results
        .iter()
        .find(|r| r.result_type() == ResultType::FuzzyContent)
        .expect("fuzzy content match");
    assert_eq!(content.file, RECIPES);
    assert!(content.relevance > 0.9);
    assert!(!content.snippet.is_empty());
    Ok(())
}

#[tokio::test]
async fn distant_queries_find_nothing() -> Result<()> {
    let results = engine()?.search(&SearchQuery::fuzzy("zzzzzzzz")).await?;
    assert!(results.is_empty());
    Ok(())
}
