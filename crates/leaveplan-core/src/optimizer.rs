//! Optimization orchestrator.
//!
//! Runs the four strategies, merges their candidates, drops overlaps
//! greedily and turns the survivors into ranked [`Recommendation`]s.
//!
//! A strategy that errors or panics contributes nothing; the run goes on
//! with whatever the others produced. An empty result is a valid outcome.

use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;

use crate::config::OptimizationConfig;
use crate::error::{StrategyError, ValidationError};
use crate::fractionation::{find_optimal_split, MIN_SPLIT_DAYS};
use crate::recommendation::{build_recommendation, Recommendation};
use crate::strategy::{by_raw_score_desc, ScoredPeriod, StrategyKind};

/// Outcome of one optimization run.
#[derive(Debug, Default, Serialize)]
pub struct OptimizationReport {
    pub recommendations: Vec<Recommendation>,
    /// Candidates handed over by the strategies that succeeded
    pub candidate_count: usize,
    /// Strategies that failed and were left out
    #[serde(serialize_with = "serialize_failures")]
    pub failures: Vec<StrategyError>,
}

fn serialize_failures<S: serde::Serializer>(
    failures: &[StrategyError],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(failures.iter().map(|f| f.to_string()))
}

type StrategyOutcome = Result<Vec<ScoredPeriod>, StrategyError>;

/// Borrowing front end over a validated [`OptimizationConfig`].
pub struct Optimizer<'a> {
    config: &'a OptimizationConfig,
}

impl<'a> Optimizer<'a> {
    /// # Errors
    ///
    /// Returns the first invalid setting in `config`.
    pub fn new(config: &'a OptimizationConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &OptimizationConfig {
        self.config
    }

    pub fn run(&self) -> OptimizationReport {
        let (candidates, failures) = collect_candidates(self.config);
        let candidate_count = candidates.len();
        let selected = select_non_overlapping(candidates);

        let mut recommendations: Vec<Recommendation> = selected
            .iter()
            .map(|period| self.recommend(period))
            .collect();
        recommendations.sort_by(|a, b| {
            b.final_score
                .total_cmp(&a.final_score)
                .then_with(|| a.suggested_range.start().cmp(&b.suggested_range.start()))
        });
        recommendations.truncate(self.config.max_results);

        tracing::info!(
            candidates = candidate_count,
            selected = selected.len(),
            returned = recommendations.len(),
            failed = failures.len(),
            "optimization finished"
        );

        OptimizationReport {
            recommendations,
            candidate_count,
            failures,
        }
    }

    fn recommend(&self, period: &ScoredPeriod) -> Recommendation {
        let recommendation = build_recommendation(period);
        if period.kind != StrategyKind::Continuous || period.metrics.total_days < MIN_SPLIT_DAYS {
            return recommendation;
        }

        match find_optimal_split(&period.metrics, &self.config.holidays) {
            Ok(Some(split)) => recommendation.with_fractions(vec![split.first, split.second]),
            Ok(None) => recommendation,
            Err(e) => {
                tracing::warn!(period = %period.range(), "split search failed: {e}");
                recommendation
            }
        }
    }
}

/// Run every strategy and return the ranked recommendations.
///
/// # Errors
///
/// Returns a [`ValidationError`] if `config` is invalid. Failures inside a
/// strategy are never returned; they are logged and skipped.
pub fn generate_recommendations(
    config: &OptimizationConfig,
) -> Result<Vec<Recommendation>, ValidationError> {
    Ok(Optimizer::new(config)?.run().recommendations)
}

fn run_strategy(kind: StrategyKind, config: &OptimizationConfig) -> StrategyOutcome {
    kind.find_periods(config)
        .map_err(|source| StrategyError::Execution {
            strategy: kind,
            source,
        })
}

fn run_sequential<F>(config: &OptimizationConfig, run: F) -> Vec<StrategyOutcome>
where
    F: Fn(StrategyKind, &OptimizationConfig) -> StrategyOutcome,
{
    StrategyKind::ALL
        .into_iter()
        .map(|kind| {
            panic::catch_unwind(AssertUnwindSafe(|| run(kind, config)))
                .unwrap_or(Err(StrategyError::Panicked { strategy: kind }))
        })
        .collect()
}

fn run_parallel<F>(config: &OptimizationConfig, run: F) -> Vec<StrategyOutcome>
where
    F: Fn(StrategyKind, &OptimizationConfig) -> StrategyOutcome + Sync,
{
    let run = &run;
    std::thread::scope(|scope| {
        let handles: Vec<_> = StrategyKind::ALL
            .into_iter()
            .map(|kind| (kind, scope.spawn(move || run(kind, config))))
            .collect();

        handles
            .into_iter()
            .map(|(kind, handle)| {
                handle
                    .join()
                    .unwrap_or(Err(StrategyError::Panicked { strategy: kind }))
            })
            .collect()
    })
}

/// Run all strategies and concatenate what succeeded.
pub fn collect_candidates(config: &OptimizationConfig) -> (Vec<ScoredPeriod>, Vec<StrategyError>) {
    collect_with(config, run_strategy)
}

fn collect_with<F>(config: &OptimizationConfig, run: F) -> (Vec<ScoredPeriod>, Vec<StrategyError>)
where
    F: Fn(StrategyKind, &OptimizationConfig) -> StrategyOutcome + Sync,
{
    let outcomes = if config.parallel {
        run_parallel(config, run)
    } else {
        run_sequential(config, run)
    };

    let mut candidates = Vec::new();
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(periods) => candidates.extend(periods),
            Err(e) => {
                tracing::warn!(strategy = %e.strategy(), "strategy skipped: {e}");
                failures.push(e);
            }
        }
    }
    (candidates, failures)
}

/// Greedy overlap removal: best raw score first, keep a candidate only if it
/// shares no day with one already kept.
pub fn select_non_overlapping(mut candidates: Vec<ScoredPeriod>) -> Vec<ScoredPeriod> {
    candidates.sort_by(by_raw_score_desc);

    let mut selected: Vec<ScoredPeriod> = Vec::new();
    for candidate in candidates {
        let range = candidate.range();
        if selected.iter().any(|kept| kept.range().overlaps(&range)) {
            continue;
        }
        selected.push(candidate);
    }
    selected
}
