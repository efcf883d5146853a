use anyhow::Result;
use docsearch_documents::MemoryDocumentStore;
use docsearch_search::MatchKind;
use docsearch_search::ResultType;
use docsearch_search::SearchConfig;
use docsearch_search::SearchEngine;
use docsearch_search::SearchError;
use docsearch_search::SearchQuery;
use docsearch_test_support::FlakyReadStore;
use docsearch_test_support::MATHEMATICS;
use docsearch_test_support::PHYSICS;
use docsearch_test_support::RECIPES;
use docsearch_test_support::SHOPPING;
use docsearch_test_support::UnreachableStore;
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
async fn filename_match_leads_the_results() -> Result<()> {
    let results = engine()?.search(&SearchQuery::text("math")).await?;

    let top = &results.results[0];
    assert_eq!(top.file, MATHEMATICS);
    assert_eq!(top.kind, MatchKind::Filename);
    assert_eq!(top.relevance, 0.9);
    assert_eq!(top.confidence, 1.0);
    // 0.9 × 0.3 × (1 + 1.0 × 0.2)
    assert!((top.score - 0.324).abs() < 1e-6);

    let content: Vec<&str> = results
        .results
        .iter()
        .filter(|r| r.result_type() == ResultType::Content)
        .map(|r| r.file.as_str())
        .collect();
    // physics mentions "math" twice, mathematics once
    assert_eq!(content, vec![PHYSICS, MATHEMATICS]);
    Ok(())
}

#[tokio::test]
async fn content_results_carry_document_structure() -> Result<()> {
    let results = engine()?.search(&SearchQuery::text("motion")).await?;

    assert_eq!(results.len(), 1);
    let result = &results.results[0];
    assert_eq!(result.file, PHYSICS);
    assert_eq!(result.kind, MatchKind::Content { occurrences: 1 });
    assert!(result.snippet.contains("describe motion"));
    assert_eq!(result.highlights.len(), 1);
    assert!(result.highlights[0].contains("motion"));
    assert_eq!(result.tags, vec!["science".to_string()]);
    assert_eq!(result.headers, vec!["Physics".to_string()]);
    assert_eq!(result.links, vec!["mathematics".to_string()]);
    assert_eq!(result.word_count, Some(11));
    Ok(())
}

#[tokio::test]
async fn repeated_query_tokens_count_every_time() -> Result<()> {
    let store = MemoryDocumentStore::from_documents([("a.md", "math math math")]);
    let engine = SearchEngine::new(SearchConfig::default(), Arc::new(store))?;

    let results = engine.search(&SearchQuery::text("math math")).await?;

    assert_eq!(results.len(), 1);
    let result = &results.results[0];
    // two query tokens, three occurrences each
    assert_eq!(result.kind, MatchKind::Content { occurrences: 6 });
    assert!((result.relevance - 0.6).abs() < 1e-6);
    assert_eq!(result.highlights.len(), 1);
    Ok(())
}

#[tokio::test]
async fn only_markdown_documents_are_read_for_content() -> Result<()> {
    let results = engine()?.search(&SearchQuery::text("milk")).await?;

    let files: Vec<&str> = results.results.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, vec![RECIPES]);
    assert!(!files.contains(&SHOPPING));
    assert_eq!(results.stats.documents_scanned, 3);
    Ok(())
}

#[tokio::test]
async fn unreadable_documents_are_skipped() -> Result<()> {
    let store = FlakyReadStore::new(Arc::new(sample_corpus()), &[PHYSICS]);
    let engine = SearchEngine::new(SearchConfig::default(), Arc::new(store))?;

    let results = engine.search(&SearchQuery::text("mathematics")).await?;

    assert!(results.results.iter().all(|r| r.file != PHYSICS));
    assert!(
        results
            .results
            .iter()
            .any(|r| r.file == MATHEMATICS && r.result_type() == ResultType::Content)
    );
    assert_eq!(results.stats.documents_skipped, 1);
    Ok(())
}

#[tokio::test]
async fn listing_failure_is_reported() -> Result<()> {
    let engine = SearchEngine::new(SearchConfig::default(), Arc::new(UnreachableStore))?;

    let err = engine
        .search(&SearchQuery::text("math"))
        .await
        .expect_err("listing failed");
    assert!(matches!(err, SearchError::CollaboratorUnavailable(_)));
    Ok(())
}

#[tokio::test]
async fn no_match_is_an_empty_result_set() -> Result<()> {
    let results = engine()?.search(&SearchQuery::text("astronomy")).await?;

    assert!(results.is_empty());
    assert_eq!(results.total_candidates, 0);
    Ok(())
}
