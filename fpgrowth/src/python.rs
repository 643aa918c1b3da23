use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
use pyo3::exceptions::{PyMemoryError, PyValueError};
use pyo3::prelude::*;

use crate::fp::io::transactions_from_matrix;
use crate::fp::{FPGrowth, MiningError};

fn to_py_err(err: MiningError) -> PyErr {
    match err {
        MiningError::ResourceExhaustion(_) => PyMemoryError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

type LevelArrays<'py> = (Bound<'py, PyArray2<u32>>, Bound<'py, PyArray1<u64>>);

/// Mines a one-hot transaction matrix. Returns, for every non-empty level,
/// the itemsets as rows of item indices and their absolute supports.
#[pyfunction]
#[pyo3(name = "fp_growth")]
fn fp_growth_py<'py>(
    py: Python<'py>,
    transactions: PyReadonlyArray2<'py, i32>,
    min_support: f64,
) -> PyResult<Vec<LevelArrays<'py>>> {
    let transactions = transactions_from_matrix(transactions.as_array()).map_err(to_py_err)?;
    let result = py
        .allow_threads(|| FPGrowth::new(min_support)?.run(&transactions))
        .map_err(to_py_err)?;

    let mut levels = Vec::new();
    for (itemset_size, level) in result.itemsets.levels().iter().enumerate() {
        if level.is_empty() {
            continue;
        }

        let data: Vec<u32> = level.iter().flat_map(|itemset| itemset.items().iter().copied()).collect();
        let supports: Vec<u64> = level.iter().map(|itemset| itemset.support() as u64).collect();
        let items = Array2::from_shape_vec((level.len(), itemset_size), data)
            .map_err(|_| PyValueError::new_err("Failed to create array"))?;

        levels.push((items.into_pyarray(py), Array1::from(supports).into_pyarray(py)));
    }

    Ok(levels)
}

#[pymodule]
fn fpgrowth(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(fp_growth_py, m)?)?;
    Ok(())
}
