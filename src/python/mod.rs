use crate::config::ScenarioConfig;
use crate::simulation::IntegratedSimulation;
use coastal_core::errors::CoastalError;
use numpy::PyArray1;
use pyo3::exceptions::{PyKeyError, PyValueError};
use pyo3::prelude::*;
use pythonize::pythonize;

fn to_py_err(err: CoastalError) -> PyErr {
    match err {
        CoastalError::MissingVariable(_) => PyKeyError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// Integrated coastal simulation
///
/// Example:
///     sim = IntegratedSimulation()
///     results = sim.advance_to_end()
///     results["resilience_index"]
#[pyclass]
#[pyo3(name = "IntegratedSimulation")]
pub struct PyIntegratedSimulation(IntegratedSimulation);

#[pymethods]
impl PyIntegratedSimulation {
    /// Create a simulation from an optional TOML scenario document
    #[new]
    #[pyo3(signature = (config_toml=None))]
    fn new(config_toml: Option<&str>) -> PyResult<Self> {
        let config = match config_toml {
            Some(content) => ScenarioConfig::from_toml_str(content).map_err(to_py_err)?,
            None => ScenarioConfig::default(),
        };
        Ok(Self(config.build().map_err(to_py_err)?))
    }

    /// Advance one year. Raises ValueError at the end of the horizon.
    fn step(&mut self, py: Python<'_>) -> PyResult<PyObject> {
        let record = self.0.step().map_err(to_py_err)?;
        Ok(pythonize(py, &record)?.into())
    }

    fn advance_to_end(&mut self, py: Python<'_>) -> PyResult<PyObject> {
        let record = self.0.advance_to_end().map_err(to_py_err)?;
        Ok(pythonize(py, &record)?.into())
    }

    fn current_state(&self, py: Python<'_>) -> PyResult<PyObject> {
        Ok(pythonize(py, &self.0.current_state())?.into())
    }

    fn reset(&mut self) -> PyResult<()> {
        self.0.reset().map_err(to_py_err)
    }

    #[getter]
    fn current_year(&self) -> i32 {
        self.0.current_year()
    }

    fn years<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<i32>> {
        PyArray1::from_vec_bound(py, self.0.time_axis().years())
    }

    fn __repr__(&self) -> String {
        format!(
            "<IntegratedSimulation year={} horizon={}>",
            self.0.current_year(),
            self.0.time_axis()
        )
    }
}

#[pymodule]
#[pyo3(name = "_lib")]
fn coastal(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_class::<PyIntegratedSimulation>()?;
    Ok(())
}
