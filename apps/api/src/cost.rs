//! Cost estimation — static rate tables, pure arithmetic.
//!
//! Estimates are advisory: they feed harness reports and logs, never
//! control flow. A model missing from the tables costs 0 by policy, so
//! new model names never break a run.

use serde::Serialize;

use crate::llm_client::{SearchTier, Usage};

/// One model call, as far as billing is concerned.
#[derive(Debug, Clone, Serialize)]
pub struct CostRecord {
    pub model: String,
    pub search_tier: Option<SearchTier>,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl CostRecord {
    pub fn from_usage(model: &str, search_tier: Option<SearchTier>, usage: &Usage) -> Self {
        Self {
            model: model.to_string(),
            search_tier,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        }
    }
}

struct SearchRate {
    models: &'static [&'static str],
    low: f64,
    medium: f64,
    high: f64,
}

/// Flat per-call surcharge for web-search tool use, in USD.
const SEARCH_RATES: &[SearchRate] = &[
    SearchRate {
        models: &["gpt-4.1", "gpt-4o", "gpt-4o-search-preview"],
        low: 0.03,
        medium: 0.035,
        high: 0.05,
    },
    SearchRate {
        models: &["gpt-4.1-mini", "gpt-4o-mini", "gpt-4o-mini-search-preview"],
        low: 0.025,
        medium: 0.0275,
        high: 0.03,
    },
];

struct GenerationRate {
    models: &'static [&'static str],
    prompt_per_1k: f64,
    completion_per_1k: f64,
}

/// Token rates in USD per 1K tokens, keyed by model alias and dated
/// snapshot name.
const GENERATION_RATES: &[GenerationRate] = &[
    GenerationRate {
        models: &["gpt-4.1", "gpt-4.1-2025-04-14"],
        prompt_per_1k: 0.002,
        completion_per_1k: 0.008,
    },
    GenerationRate {
        models: &["gpt-4.1-mini", "gpt-4.1-mini-2025-04-14"],
        prompt_per_1k: 0.0004,
        completion_per_1k: 0.0016,
    },
    GenerationRate {
        models: &["gpt-4.1-nano", "gpt-4.1-nano-2025-04-14"],
        prompt_per_1k: 0.0001,
        completion_per_1k: 0.0004,
    },
    GenerationRate {
        models: &["gpt-4.5-preview", "gpt-4.5-preview-2025-02-27"],
        prompt_per_1k: 0.075,
        completion_per_1k: 0.15,
    },
    GenerationRate {
        models: &["gpt-4o", "gpt-4o-2024-08-06"],
        prompt_per_1k: 0.0025,
        completion_per_1k: 0.01,
    },
];

/// Estimated cost of one call in USD.
pub fn estimate(record: &CostRecord) -> f64 {
    let model = record.model.as_str();
    let mut total = 0.0;

    if let Some(tier) = record.search_tier {
        if let Some(rate) = SEARCH_RATES.iter().find(|rate| rate.models.contains(&model)) {
            total += match tier {
                SearchTier::Low => rate.low,
                SearchTier::Medium => rate.medium,
                SearchTier::High => rate.high,
            };
        }
    }

    if let Some(rate) = GENERATION_RATES
        .iter()
        .find(|rate| rate.models.contains(&model))
    {
        total += record.prompt_tokens as f64 / 1000.0 * rate.prompt_per_1k
            + record.completion_tokens as f64 / 1000.0 * rate.completion_per_1k;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn record(model: &str, tier: Option<SearchTier>, prompt: u32, completion: u32) -> CostRecord {
        CostRecord {
            model: model.to_string(),
            search_tier: tier,
            prompt_tokens: prompt,
            completion_tokens: completion,
        }
    }

    #[test]
    fn test_generation_cost_gpt_4o() {
        let cost = estimate(&record("gpt-4o", None, 1000, 500));
        assert!(close(cost, 0.0025 + 0.005));
    }

    #[test]
    fn test_dated_snapshot_uses_same_rate() {
        let alias = estimate(&record("gpt-4.1", None, 2000, 1000));
        let dated = estimate(&record("gpt-4.1-2025-04-14", None, 2000, 1000));
        assert!(close(alias, dated));
        assert!(close(alias, 0.004 + 0.008));
    }

    #[test]
    fn test_search_surcharge_added_to_generation() {
        let cost = estimate(&record("gpt-4o", Some(SearchTier::High), 1000, 0));
        assert!(close(cost, 0.05 + 0.0025));
    }

    #[test]
    fn test_mini_search_tiers() {
        let low = estimate(&record("gpt-4o-mini", Some(SearchTier::Low), 0, 0));
        let medium = estimate(&record("gpt-4o-mini", Some(SearchTier::Medium), 0, 0));
        let high = estimate(&record("gpt-4o-mini", Some(SearchTier::High), 0, 0));
        assert!(close(low, 0.025));
        assert!(close(medium, 0.0275));
        assert!(close(high, 0.03));
    }

    #[test]
    fn test_unknown_model_costs_zero() {
        let cost = estimate(&record("gpt-99-ultra", Some(SearchTier::High), 5000, 5000));
        assert!(close(cost, 0.0));
    }

    #[test]
    fn test_zero_tokens_cost_zero_without_search() {
        assert!(close(estimate(&record("gpt-4.1-nano", None, 0, 0)), 0.0));
    }

    #[test]
    fn test_estimate_is_pure() {
        let r = record("gpt-4.5-preview", Some(SearchTier::Medium), 100, 100);
        assert!(close(estimate(&r), estimate(&r)));
    }
}
