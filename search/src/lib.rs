/*!
# Document Search

Multi-mode search over a collection of text documents:
- **Text**: case-insensitive substring matching on filenames and content
- **Fuzzy**: Levenshtein similarity against filenames and content
- **Regex**: pattern matching on filenames and content
- **Semantic**: cosine similarity between query and document embeddings

## Architecture

```text
SearchQuery
  ├─> validate (length, filters)
  ├─> result cache ──hit──> SearchResults
  └─> strategy (text | fuzzy | regex | semantic)
        ├─> DocumentStore (list, read) via ContentIndex
        └─> unranked candidates
              └─> Ranker (type weight × confidence boost)
                    └─> FilterSet + max_results
                          └─> cache store ──> SearchResults
```

## Example

```rust,no_run
use docsearch_documents::FsDocumentStore;
use docsearch_search::{SearchConfig, SearchEngine, SearchQuery};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let store = Arc::new(FsDocumentStore::new("notes").recursive(true));
    let engine = SearchEngine::new(SearchConfig::default(), store)?;

    let results = engine.search(&SearchQuery::fuzzy("mathematcs")).await?;
    for (i, result) in results.top(5).iter().enumerate() {
        println!("{}. {} (score: {:.2})", i + 1, result.file, result.score);
    }

    Ok(())
}
```

## Ranking

Each strategy reports `relevance` and `confidence` per candidate. The ranker
rescores every candidate as
`min(relevance × weight(type) × (1 + confidence × boost), 1.0)` and sorts
descending, keeping ties in discovery order.
*/

mod cache;
mod config;
mod engine;
mod error;
mod filter;
mod fuzzy;
mod query;
mod rank;
mod result;
mod snippet;
mod strategy;

pub use cache::{CacheKey, ResultCache};
pub use config::{CacheKeyScope, RankingWeights, SearchConfig};
pub use docsearch_utils_cache::CacheStats;
pub use docsearch_vector_store::cosine_similarity;
pub use engine::{SearchEngine, SearchEngineBuilder};
pub use error::{Result, SearchError};
pub use filter::{Filter, FilterSet};
pub use fuzzy::{fuzzy_score, levenshtein};
pub use query::{SearchMode, SearchQuery};
pub use rank::Ranker;
pub use result::{MatchKind, ResultType, SearchResult, SearchResults, SearchStats};
pub use snippet::{extract_snippet, highlight};
