//! Python bindings.
//!
//! Results come back as plain dicts in the same shape as the JSON output,
//! so a web layer can return them unchanged.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::bracket::{BracketResult, TeamRef};
use crate::constants::{DEFAULT_MADNESS, REGION_KEYS, STATUS_MESSAGE};
use crate::error::BracketError;
use crate::overrides::OverridesMap;
use crate::region::RegionResult;
use crate::seed::{MadnessLevel, Matchup, Seed};
use crate::tournament::BracketSimulator;
use crate::win_prob::calculate_win_prob;

impl From<BracketError> for PyErr {
    fn from(err: BracketError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn seeds(values: &[Seed]) -> Vec<u8> {
    values.iter().map(|s| s.get()).collect()
}

fn region_to_dict<'py>(py: Python<'py>, result: &RegionResult) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("region", &result.region)?;
    dict.set_item("round_of_32", seeds(&result.round_of_32))?;
    dict.set_item("sweet_16", seeds(&result.sweet_16))?;
    dict.set_item("elite_8", seeds(&result.elite_8))?;
    dict.set_item("regional_champ", result.regional_champ.get())?;
    Ok(dict)
}

fn team_to_dict<'py>(py: Python<'py>, team: &TeamRef) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("region", &team.region)?;
    dict.set_item("seed", team.seed.get())?;
    Ok(dict)
}

fn bracket_to_dict<'py>(py: Python<'py>, bracket: &BracketResult) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    for (key, region) in REGION_KEYS.iter().zip(bracket.regions()) {
        dict.set_item(*key, region_to_dict(py, region)?)?;
    }

    let final_four = PyDict::new_bound(py);
    final_four.set_item("left", team_to_dict(py, &bracket.final_four.left)?)?;
    final_four.set_item("right", team_to_dict(py, &bracket.final_four.right)?)?;
    dict.set_item("final_four", final_four)?;
    dict.set_item("national_champion", team_to_dict(py, &bracket.national_champion)?)?;
    Ok(dict)
}

/// Simulate one region.
#[pyfunction]
#[pyo3(signature = (name, madness_level = DEFAULT_MADNESS as i64, seed = None))]
fn simulate_region<'py>(
    py: Python<'py>,
    name: &str,
    madness_level: i64,
    seed: Option<u64>,
) -> PyResult<Bound<'py, PyDict>> {
    let madness = MadnessLevel::new(madness_level)?;
    let sim = BracketSimulator::new(OverridesMap::historical(), seed);
    region_to_dict(py, &sim.simulate_region(name, madness))
}

/// Simulate a full bracket.
#[pyfunction]
#[pyo3(signature = (madness_level = DEFAULT_MADNESS as i64, seed = None))]
fn simulate_bracket<'py>(
    py: Python<'py>,
    madness_level: i64,
    seed: Option<u64>,
) -> PyResult<Bound<'py, PyDict>> {
    let madness = MadnessLevel::new(madness_level)?;
    let sim = BracketSimulator::new(OverridesMap::historical(), seed);
    bracket_to_dict(py, &sim.simulate_bracket(madness))
}

/// Probability that seed_a beats seed_b.
#[pyfunction]
#[pyo3(signature = (seed_a, seed_b, madness_level = DEFAULT_MADNESS as i64))]
fn win_probability(seed_a: i64, seed_b: i64, madness_level: i64) -> PyResult<f64> {
    let (a, b) = (Seed::new(seed_a)?, Seed::new(seed_b)?);
    Matchup::new(a, b)?;
    let madness = MadnessLevel::new(madness_level)?;
    Ok(calculate_win_prob(a, b, madness, Some(&OverridesMap::historical())))
}

/// Health check message
#[pyfunction]
fn status() -> &'static str {
    STATUS_MESSAGE
}

/// Python module definition
#[pymodule]
#[pyo3(name = "bracket_core")]
fn bracket_core_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(simulate_region, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_bracket, m)?)?;
    m.add_function(wrap_pyfunction!(win_probability, m)?)?;
    m.add_function(wrap_pyfunction!(status, m)?)?;

    m.add("DEFAULT_MADNESS", DEFAULT_MADNESS)?;
    m.add("REGION_KEYS", REGION_KEYS.to_vec())?;

    Ok(())
}
