use anyhow::Result;
use docsearch_search::MatchKind;
use docsearch_search::ResultType;
use docsearch_search::SearchConfig;
use docsearch_search::SearchEngine;
use docsearch_search::SearchError;
use docsearch_search::SearchQuery;
use docsearch_test_support::CountingDocumentStore;
use docsearch_test_support::MATHEMATICS;
use docsearch_test_support::PHYSICS;
use docsearch_test_support::sample_corpus;
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test_log::test(tokio::test)]
async fn invalid_pattern_is_rejected_without_touching_the_store() -> Result<()> {
    let store = Arc::new(CountingDocumentStore::new(Arc::new(sample_corpus())));
    let engine = SearchEngine::new(SearchConfig::default(), store.clone())?;

    let err = engine
        .search(&SearchQuery::regex("(unclosed"))
        .await
        .expect_err("pattern does not compile");

    let SearchError::InvalidPattern { pattern, .. } = err else {
        panic!("expected InvalidPattern, got {err:?}");
    };
    assert_eq!(pattern, "(unclosed");
    assert_eq!(store.total_calls(), 0);
    Ok(())
}

#[tokio::test]
async fn matches_filenames_and_content() -> Result<()> {
    let engine = SearchEngine::new(SearchConfig::default(), Arc::new(sample_corpus()))?;

    let results = engine.search(&SearchQuery::regex(r"math\w*")).await?;

    let filename = results
        .results
        .iter()
        .find(|r| r.result_type() == ResultType::RegexFilename)
        .expect("filename match");
    assert_eq!(filename.file, MATHEMATICS);
    // 1.0 × 0.8 × (1 + 1.0 × 0.2)
    assert!((filename.score - 0.96).abs() < 1e-6);

    let physics = results
        .results
        .iter()
        .find(|r| r.file == PHYSICS)
        .expect("content match");
    assert_eq!(
        physics.kind,
        MatchKind::RegexContent {
            pattern: r"math\w*".to_string(),
            matches: 2,
        }
    );
    assert_eq!(
        physics.highlights,
        vec!["mathematics".to_string(), "mathematics".to_string()]
    );
    assert!(physics.snippet.contains("uses mathematics"));
    Ok(())
}

#[tokio::test]
async fn patterns_are_case_sensitive() -> Result<()> {
    let engine = SearchEngine::new(SearchConfig::default(), Arc::new(sample_corpus()))?;

    let results = engine.search(&SearchQuery::regex("MATH")).await?;
    assert!(results.is_empty());

    let results = engine.search(&SearchQuery::regex("(?i)MATH")).await?;
    assert!(!results.is_empty());
    Ok(())
}
