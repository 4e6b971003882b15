//! Python bindings for the Kraken optimizer using PyO3

use crate::config::AnalysisConfig;
use crate::simulation::{evaluate_strategies, run_analysis};
use crate::stats::rank;
use pyo3::prelude::*;
use serde_json::json;

/// Python-callable analysis: config JSON in, ranked rows JSON out
#[pyfunction]
#[pyo3(signature = (config_json, parallel=false))]
fn analyze(py: Python<'_>, config_json: &str, parallel: bool) -> PyResult<String> {
    let config = AnalysisConfig::from_json(config_json)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Invalid config JSON: {}", e)))?;

    // Release GIL during computation to prevent GUI freezing
    let rows = py
        .allow_threads(|| run_analysis(&config, parallel, None, None))
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Invalid configuration: {}", e)))?;

    serde_json::to_string(&rows)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!("Failed to serialize results: {}", e)))
}

/// Python-callable analysis from a YAML or JSON config file
#[pyfunction]
#[pyo3(signature = (config_path, parallel=false))]
fn analyze_from_file(py: Python<'_>, config_path: &str, parallel: bool) -> PyResult<String> {
    let config = AnalysisConfig::from_file(config_path)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyIOError, _>(format!("Failed to load config: {}", e)))?;

    let rows = py
        .allow_threads(|| run_analysis(&config, parallel, None, None))
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Invalid configuration: {}", e)))?;

    serde_json::to_string(&rows)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!("Failed to serialize results: {}", e)))
}

/// Rank the same simulation pass against several ammo budgets.
///
/// Simulates once, then re-ranks the cached samples per budget. This is the
/// hook for a GUI budget slider: moving it costs a recount, not a rerun.
#[pyfunction]
#[pyo3(signature = (config_json, budgets, parallel=false))]
fn analyze_budgets(
    py: Python<'_>,
    config_json: &str,
    budgets: Vec<u32>,
    parallel: bool,
) -> PyResult<String> {
    let config = AnalysisConfig::from_json(config_json)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Invalid config JSON: {}", e)))?;

    let evaluated = py
        .allow_threads(|| evaluate_strategies(&config, parallel, None, None))
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Invalid configuration: {}", e)))?;

    let mut by_budget = serde_json::Map::new();
    for budget in budgets {
        let rows = rank(&evaluated, budget, config.top_n);
        by_budget.insert(budget.to_string(), json!(rows));
    }

    serde_json::to_string(&by_budget)
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!("Failed to serialize results: {}", e)))
}

/// Get number of threads being used for parallel simulation
#[pyfunction]
fn get_thread_count() -> PyResult<usize> {
    Ok(rayon::current_num_threads())
}

/// Get number of available CPU cores
#[pyfunction]
fn get_available_cores() -> PyResult<usize> {
    Ok(std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1))
}

/// Python module definition
#[pymodule]
fn kraken_sim_lib(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(analyze, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_from_file, m)?)?;
    m.add_function(wrap_pyfunction!(analyze_budgets, m)?)?;
    m.add_function(wrap_pyfunction!(get_thread_count, m)?)?;
    m.add_function(wrap_pyfunction!(get_available_cores, m)?)?;
    Ok(())
}
