//! Common types used across the application.

pub mod fuel;
pub mod grams;
pub mod id;

pub use fuel::{
    BiofuelFeedstock, BiofuelGeneration, CarbonSource, EFuelProductionMethod, FuelCategory,
    FuelType, RenewableElectricitySource,
};
pub use grams::GramsCo2e;
pub use id::*;
