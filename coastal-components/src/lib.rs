//! Domain models of a coastal zone.
//!
//! Each domain is split into a parameter record ([`parameters`]) and the dynamics that
//! advance its typed state one year at a time ([`components`]). The dynamics are driven by
//! the generic [`coastal_core::model::LeafModel`] engine; the aliases below name the
//! resulting models.

pub mod components;
pub mod parameters;

use coastal_core::model::LeafModel;

pub type ClimateModel = LeafModel<components::Climate>;
pub type EnvironmentalModel = LeafModel<components::Environmental>;
pub type SocioeconomicModel = LeafModel<components::Socioeconomic>;
pub type BlueEconomyModel = LeafModel<components::BlueEconomy>;
pub type PolicyModel = LeafModel<components::Policy>;
