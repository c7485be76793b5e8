//! Variable definitions for leaf-model quantities.
//!
//! Every quantity a leaf model tracks is described by a [`VariableDefinition`]. Definitions
//! are produced by the `StateVector` derive from the field attributes of a domain's state
//! struct, so a model's trajectories, state snapshots and output records all share one
//! source of names and units.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Definition of a tracked quantity.
///
/// # Example
///
/// ```rust
/// use coastal_core::variable::VariableDefinition;
///
/// let sea_level = VariableDefinition::new(
///     "sea_level",
///     "cm",
///     "Sea level rise relative to the start year",
/// );
///
/// assert_eq!(sea_level.name, "sea_level");
/// assert_eq!(sea_level.unit, "cm");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableDefinition {
    /// Unique identifier within a model (e.g. "mangrove_coverage")
    pub name: String,
    /// Unit of the quantity (e.g. "%", "billion USD")
    pub unit: String,
    /// Human-readable description
    pub description: String,
}

impl VariableDefinition {
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            description: description.into(),
        }
    }
}

impl fmt::Display for VariableDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.unit.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} [{}]", self.name, self.unit)
        }
    }
}
