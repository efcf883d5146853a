use anyhow::Result;
use docsearch_search::SearchConfig;
use docsearch_search::SearchEngine;
use docsearch_search::SearchMode;
use docsearch_search::SearchQuery;
use docsearch_test_support::CountingDocumentStore;
use docsearch_test_support::MATHEMATICS;
use docsearch_test_support::sample_corpus;
use docsearch_utils_cache::ManualClock;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn counting_store() -> Arc<CountingDocumentStore> {
    Arc::new(CountingDocumentStore::new(Arc::new(sample_corpus())))
}

#[test_log::test(tokio::test)]
async fn repeated_query_is_served_from_cache() -> Result<()> {
    let store = counting_store();
    let engine = SearchEngine::new(SearchConfig::default(), store.clone())?;

    let first = engine.search(&SearchQuery::text("math")).await?;
    let calls = store.total_calls();
    assert!(calls > 0);
    assert!(!first.stats.cache_hit);

    let second = engine.search(&SearchQuery::text("math")).await?;
    assert_eq!(store.total_calls(), calls);
    assert!(second.stats.cache_hit);
    assert_eq!(second.results, first.results);
    assert_eq!(engine.cache_stats().await.size, 1);
    Ok(())
}

#[tokio::test]
async fn text_keyed_cache_shares_entries_across_modes() -> Result<()> {
    let store = counting_store();
    let engine = SearchEngine::new(SearchConfig::text_keyed_cache(), store.clone())?;

    engine.search(&SearchQuery::text("math")).await?;
    let calls = store.total_calls();

    let regex = engine.search(&SearchQuery::regex("math")).await?;
    assert_eq!(store.total_calls(), calls);
    assert!(regex.stats.cache_hit);
    assert_eq!(regex.mode, SearchMode::Text);
    Ok(())
}

#[tokio::test]
async fn full_cache_key_separates_modes() -> Result<()> {
    let store = counting_store();
    let engine = SearchEngine::new(SearchConfig::default(), store.clone())?;

    engine.search(&SearchQuery::text("math")).await?;
    let lists = store.list_calls();

    let regex = engine.search(&SearchQuery::regex("math")).await?;
    assert_eq!(store.list_calls(), lists + 1);
    assert!(!regex.stats.cache_hit);
    assert_eq!(regex.mode, SearchMode::Regex);
    assert_eq!(engine.cache_stats().await.size, 2);
    Ok(())
}

#[tokio::test]
async fn cached_results_expire() -> Result<()> {
    let store = counting_store();
    let clock = Arc::new(ManualClock::default());
    let engine = SearchEngine::builder(store.clone())
        .clock(clock.clone())
        .build()?;

    engine.search(&SearchQuery::text("math")).await?;
    clock.advance(Duration::from_secs(599));
    assert!(engine.search(&SearchQuery::text("math")).await?.stats.cache_hit);

    clock.advance(Duration::from_secs(2));
    let lists = store.list_calls();
    let expired = engine.search(&SearchQuery::text("math")).await?;
    assert!(!expired.stats.cache_hit);
    assert_eq!(store.list_calls(), lists + 1);
    Ok(())
}

#[tokio::test]
async fn content_index_serves_repeat_reads() -> Result<()> {
    let store = counting_store();
    let config = SearchConfig {
        enable_cache: false,
        ..Default::default()
    };
    let engine = SearchEngine::new(config, store.clone())?;

    engine.search(&SearchQuery::text("math")).await?;
    let reads = store.read_calls();
    assert_eq!(reads, 3);

    let again = engine.search(&SearchQuery::text("math")).await?;
    assert!(!again.stats.cache_hit);
    assert_eq!(store.read_calls(), reads);
    assert_eq!(store.list_calls(), 2);
    Ok(())
}

#[tokio::test]
async fn uncached_engine_reads_every_time() -> Result<()> {
    let store = counting_store();
    let engine = SearchEngine::new(SearchConfig::uncached(), store.clone())?;

    engine.search(&SearchQuery::text("math")).await?;
    engine.search(&SearchQuery::text("math")).await?;
    assert_eq!(store.read_calls(), 6);
    Ok(())
}

#[tokio::test]
async fn invalidated_documents_are_reread() -> Result<()> {
    let corpus = Arc::new(sample_corpus());
    let engine = SearchEngine::new(SearchConfig::default(), corpus.clone())?;

    assert!(engine.search(&SearchQuery::text("structure")).await?.is_empty());

    corpus
        .insert(MATHEMATICS, "mathematics is the study of structure", None)
        .await;
    engine.invalidate_document(MATHEMATICS).await;

    let results = engine.search(&SearchQuery::text("structure")).await?;
    let files: Vec<&str> = results.results.iter().map(|r| r.file.as_str()).collect();
    assert_eq!(files, vec![MATHEMATICS]);
    Ok(())
}

#[tokio::test]
async fn clear_cache_forces_a_fresh_search() -> Result<()> {
    let store = counting_store();
    let engine = SearchEngine::new(SearchConfig::default(), store.clone())?;

    engine.search(&SearchQuery::text("math")).await?;
    engine.clear_cache().await;
    assert_eq!(engine.cache_stats().await.size, 0);

    let again = engine.search(&SearchQuery::text("math")).await?;
    assert!(!again.stats.cache_hit);
    assert_eq!(store.list_calls(), 2);
    Ok(())
}
