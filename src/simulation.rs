//! Core battle simulation and Monte Carlo strategy evaluation

use crate::attacker::AttackerState;
use crate::config::{AnalysisConfig, ConfigError, PartSpec};
use crate::stats::{rank, EvaluatedStrategy, StrategyRow};
use crate::strategy::enumerate_orders;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Optional progress hook, called as (orders_done, orders_total)
pub type ProgressFn<'a> = &'a (dyn Fn(usize, usize) + Sync);

/// Run one randomized battle for an attack order, returning the total hits
/// needed to destroy every part.
///
/// `order` holds indices into `parts`. Each part's HP is copied into a local
/// value, so repeated calls against the same config stay independent. The
/// part's reward is applied exactly once, after its HP drops to or below
/// zero, and persists for the rest of the battle.
pub fn simulate_battle(
    order: &[usize],
    parts: &[PartSpec],
    base_damage: f64,
    base_crit_rate_percent: f64,
    rng: &mut impl Rng,
) -> u32 {
    let mut attacker = AttackerState::new(base_crit_rate_percent);

    for &idx in order {
        let part = &parts[idx];
        let mut remaining_hp = part.hp;

        // Overshoot below zero is fine; there is no partial-hit accounting
        while remaining_hp > 0.0 {
            remaining_hp -= attacker.roll_hit(base_damage, rng);
        }

        attacker.apply_reward(part.reward);
    }

    attacker.hits
}

/// Evaluate one attack order with a specific RNG (for deterministic testing)
pub fn evaluate_order_with_rng(
    order: &[usize],
    config: &AnalysisConfig,
    rng: &mut impl Rng,
) -> EvaluatedStrategy {
    let sample: Vec<u32> = (0..config.run_count)
        .map(|_| {
            simulate_battle(
                order,
                &config.parts,
                config.base_damage,
                config.base_crit_rate_percent,
                rng,
            )
        })
        .collect();

    let path = order.iter().map(|&i| config.parts[i].name.clone()).collect();
    EvaluatedStrategy::from_sample(path, sample)
}

/// Evaluate one attack order with an entropy-seeded RNG
pub fn evaluate_order(order: &[usize], config: &AnalysisConfig) -> EvaluatedStrategy {
    let mut rng = SmallRng::from_entropy();
    evaluate_order_with_rng(order, config, &mut rng)
}

/// Evaluate every permutation of the part set, in enumeration order.
///
/// The parallel path gives each order its own entropy-seeded RNG, so the
/// random streams are independent and nothing is shared across threads.
/// Parallelism changes only the wall clock, never the statistics.
pub fn evaluate_all_orders(
    config: &AnalysisConfig,
    parallel: bool,
    progress: Option<ProgressFn>,
) -> Vec<EvaluatedStrategy> {
    let orders = enumerate_orders(config.parts.len());
    let total = orders.len();

    if parallel {
        let num_threads = num_cpus::get().min(8);
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .unwrap_or_else(|_| ThreadPoolBuilder::new().build().unwrap());

        let done = AtomicUsize::new(0);
        pool.install(|| {
            orders
                .par_iter()
                .map(|order| {
                    let result = evaluate_order(order, config);
                    if let Some(report) = progress {
                        report(done.fetch_add(1, Ordering::Relaxed) + 1, total);
                    }
                    result
                })
                .collect()
        })
    } else {
        let mut rng = SmallRng::from_entropy();
        orders
            .iter()
            .enumerate()
            .map(|(i, order)| {
                let result = evaluate_order_with_rng(order, config, &mut rng);
                if let Some(report) = progress {
                    report(i + 1, total);
                }
                result
            })
            .collect()
    }
}

/// Evaluate every permutation with a fixed seed, for reproducible runs.
/// Always sequential: a single RNG stream is what makes replay exact.
pub fn evaluate_all_orders_seeded(config: &AnalysisConfig, seed: u64) -> Vec<EvaluatedStrategy> {
    let mut rng = SmallRng::seed_from_u64(seed);
    enumerate_orders(config.parts.len())
        .iter()
        .map(|order| evaluate_order_with_rng(order, config, &mut rng))
        .collect()
}

/// Validate the config and produce evaluated strategies for every order.
///
/// This is the expensive half of an analysis. The returned strategies keep
/// their raw samples, so `stats::rank` can re-rank them for any ammo budget
/// without resimulating.
pub fn evaluate_strategies(
    config: &AnalysisConfig,
    parallel: bool,
    seed: Option<u64>,
    progress: Option<ProgressFn>,
) -> Result<Vec<EvaluatedStrategy>, ConfigError> {
    config.validate()?;
    Ok(match seed {
        Some(seed) => evaluate_all_orders_seeded(config, seed),
        None => evaluate_all_orders(config, parallel, progress),
    })
}

/// Full analysis pipeline: validate, enumerate, simulate, rank, truncate
pub fn run_analysis(
    config: &AnalysisConfig,
    parallel: bool,
    seed: Option<u64>,
    progress: Option<ProgressFn>,
) -> Result<Vec<StrategyRow>, ConfigError> {
    let evaluated = evaluate_strategies(config, parallel, seed, progress)?;
    Ok(rank(&evaluated, config.ammo_budget, config.top_n))
}
