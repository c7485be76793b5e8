//! Dynamics of the five coastal domains
//!
//! Each domain has no dependency on the others; they are coupled only through the
//! composite indices computed by the integration layer.

mod blue_economy;
mod climate;
mod environment;
mod policy;
mod socioeconomic;

pub use blue_economy::{BlueEconomy, BlueEconomyState};
pub use climate::{Climate, ClimateState};
pub use environment::{Environmental, EnvironmentalState};
pub use policy::{Policy, PolicyState};
pub use socioeconomic::{Socioeconomic, SocioeconomicState};
