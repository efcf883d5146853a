use crate::config::RankingWeights;
use crate::config::SearchConfig;
use crate::result::ResultType;
use crate::result::SearchResult;
use log::debug;

/// Rescores candidates by type weight and confidence, then orders them.
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: RankingWeights,
    confidence_boost: f32,
}

impl Ranker {
    pub fn new(weights: RankingWeights, confidence_boost: f32) -> Self {
        Self {
            weights,
            confidence_boost,
        }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.ranking, config.confidence_boost)
    }

    pub fn weight_for(&self, result_type: ResultType) -> f32 {
        match result_type {
            ResultType::Filename => self.weights.filename,
            ResultType::Content | ResultType::Semantic => self.weights.content,
            ResultType::Fuzzy | ResultType::FuzzyContent => self.weights.fuzzy,
            ResultType::RegexFilename | ResultType::RegexContent => self.weights.regex,
        }
    }

    /// `score = min(relevance × weight × (1 + confidence × boost), 1.0)`,
    /// sorted descending. Equal scores keep their incoming order.
    pub fn rank(&self, mut results: Vec<SearchResult>) -> Vec<SearchResult> {
        for result in &mut results {
            let weighted = result.relevance * self.weight_for(result.result_type());
            result.score = (weighted * (1.0 + result.confidence * self.confidence_boost)).min(1.0);
        }
        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!("Ranked {} results", results.len());
        results
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}
