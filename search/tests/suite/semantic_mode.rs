use anyhow::Result;
use docsearch_search::MatchKind;
use docsearch_search::SearchConfig;
use docsearch_search::SearchEngine;
use docsearch_search::SearchError;
use docsearch_search::SearchQuery;
use docsearch_test_support::BrokenEmbedder;
use docsearch_test_support::KeywordEmbedder;
use docsearch_test_support::MATHEMATICS;
use docsearch_test_support::PHYSICS;
use docsearch_test_support::SelectiveEmbedder;
use docsearch_test_support::sample_corpus;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn engine(embedder: Arc<KeywordEmbedder>) -> Result<SearchEngine> {
    Ok(SearchEngine::builder(Arc::new(sample_corpus()))
        .embedder(embedder)
        .build()?)
}

#[test_log::test(tokio::test)]
async fn ranks_documents_by_embedding_similarity() -> Result<()> {
    let engine = engine(Arc::new(KeywordEmbedder::for_sample_corpus()))?;

    let results = engine.search(&SearchQuery::semantic("physics motion")).await?;

    assert_eq!(results.len(), 1);
    let result = &results.results[0];
    assert_eq!(result.file, PHYSICS);
    let MatchKind::Semantic { similarity } = result.kind else {
        panic!("expected a semantic match, got {:?}", result.kind);
    };
    // (physics 2, mathematics 2, motion 1) · (physics 1, motion 1)
    assert!((similarity - 3.0 / (3.0 * 2f32.sqrt())).abs() < 1e-5);
    assert_eq!(result.relevance, similarity);
    assert_eq!(result.tags, vec!["science".to_string()]);
    Ok(())
}

#[tokio::test]
async fn documents_below_threshold_are_dropped() -> Result<()> {
    let engine = engine(Arc::new(KeywordEmbedder::for_sample_corpus()))?;

    let results = engine.search(&SearchQuery::semantic("patterns")).await?;

    let files: Vec<&str> = results.results.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, vec![MATHEMATICS]);
    Ok(())
}

#[tokio::test]
async fn document_embeddings_are_reused_across_searches() -> Result<()> {
    let embedder = Arc::new(KeywordEmbedder::for_sample_corpus());
    let engine = engine(embedder.clone())?;

    engine.search(&SearchQuery::semantic("patterns")).await?;
    // one query plus the three markdown documents
    assert_eq!(embedder.calls(), 4);

    engine.search(&SearchQuery::semantic("flour")).await?;
    assert_eq!(embedder.calls(), 5);

    engine.invalidate_document(MATHEMATICS).await;
    engine.search(&SearchQuery::semantic("milk")).await?;
    assert_eq!(embedder.calls(), 7);
    Ok(())
}

#[tokio::test]
async fn document_embedding_failure_skips_only_that_document() -> Result<()> {
    let embedder = SelectiveEmbedder::new(KeywordEmbedder::for_sample_corpus(), "motion");
    let engine = SearchEngine::builder(Arc::new(sample_corpus()))
        .embedder(Arc::new(embedder))
        .build()?;

    let results = engine
        .search(&SearchQuery::semantic("mathematics physics"))
        .await?;

    let files: Vec<&str> = results.results.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, vec![MATHEMATICS]);
    assert_eq!(results.stats.documents_skipped, 1);
    Ok(())
}

#[tokio::test]
async fn missing_embedder_is_unavailable() -> Result<()> {
    let engine = SearchEngine::new(SearchConfig::default(), Arc::new(sample_corpus()))?;

    let err = engine
        .search(&SearchQuery::semantic("patterns"))
        .await
        .expect_err("no embedder");
    assert!(matches!(err, SearchError::EmbeddingUnavailable(_)));
    Ok(())
}

#[tokio::test]
async fn failing_embedder_is_unavailable() -> Result<()> {
    let engine = SearchEngine::builder(Arc::new(sample_corpus()))
        .embedder(Arc::new(BrokenEmbedder))
        .build()?;

    let err = engine
        .search(&SearchQuery::semantic("patterns"))
        .await
        .expect_err("embedding service down");
    let SearchError::EmbeddingUnavailable(reason) = err else {
        panic!("expected EmbeddingUnavailable, got {err:?}");
    };
    assert!(reason.contains("503"));
    Ok(())
}
