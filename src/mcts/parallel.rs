//! Root-parallel search.
//!
//! Runs independent `MCTSSearch` trees on scoped threads, each seeded from
//! its own stream, and merges their root visit counts.

use std::thread;

use rustc_hash::FxHashMap;

use crate::core::rng::derive_seed;
use crate::core::GameRng;
use crate::error::{Error, Result};
use crate::rules::RulesEngine;

use super::config::MCTSConfig;
use super::search::{choose_by_visits, MCTSSearch, SearchLimit};
use super::stats::SearchStats;

/// Result of a (possibly multi-worker) search.
#[derive(Clone, Debug)]
pub struct SearchOutcome<A> {
    /// The chosen action.
    pub action: A,

    /// Merged root visit counts in `generate_actions` order.
    pub visits: Vec<(A, u32)>,

    /// Merged statistics across workers.
    pub stats: SearchStats,
}

/// Search `state` with `config.workers` independent trees.
///
/// Worker `i` uses `derive_seed(config.seed, i)`, so worker 0 reproduces a
/// single-threaded search with the same config. Visits are summed per
/// action; ties fall to the earlier legal action.
pub fn parallel_search<E: RulesEngine>(
    engine: &E,
    state: &E::State,
    config: &MCTSConfig,
    limit: SearchLimit,
) -> Result<SearchOutcome<E::Action>> {
    let workers = config.workers.max(1);

    let results: Vec<Result<(Vec<(E::Action, u32)>, SearchStats)>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|worker| {
                let worker_config = config
                    .clone()
                    .with_seed(derive_seed(config.seed, worker as u64));
                scope.spawn(move || -> Result<(Vec<(E::Action, u32)>, SearchStats)> {
                    let mut search = MCTSSearch::new(engine.clone(), worker_config);
                    search.search(state, limit)?;
                    Ok((search.action_visits(), search.stats().clone()))
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| {
                handle
                    .join()
                    .unwrap_or_else(|_| Err(Error::Agent("search worker panicked".to_string())))
            })
            .collect()
    });

    let mut totals: FxHashMap<E::Action, u32> = FxHashMap::default();
    let mut stats = SearchStats::default();
    for result in results {
        let (visits, worker_stats) = result?;
        for (action, count) in visits {
            *totals.entry(action).or_insert(0) += count;
        }
        stats.merge(&worker_stats);
    }

    let visits: Vec<(E::Action, u32)> = engine
        .generate_actions(state)
        .into_iter()
        .map(|action| {
            let count = totals.get(&action).copied().unwrap_or(0);
            (action, count)
        })
        .collect();

    let counts: Vec<u32> = visits.iter().map(|(_, v)| *v).collect();
    let mut rng = GameRng::new(derive_seed(config.seed, workers as u64));
    let idx = choose_by_visits(&counts, config.temperature, &mut rng).ok_or(Error::NoLegalActions)?;

    Ok(SearchOutcome {
        action: visits[idx].0.clone(),
        visits,
        stats,
    })
}
