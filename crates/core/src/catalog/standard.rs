//! Built-in `standard-2024` fuel table (DNV / LR / ABS defaults).

use std::collections::HashMap;

use rust_decimal::Decimal;
use tidemark_shared::types::{BiofuelFeedstock, BiofuelGeneration, FuelType};

use super::properties::FuelPropertySpec;

/// Version tag of the built-in table.
pub const STANDARD_VERSION: &str = "standard-2024";

/// Columns, all in tenths: density, LCV, S %, C %, WtW, TtW, WtT.
const FUEL_ROWS: [(FuelType, [i64; 7]); 22] = [
    (FuelType::Mgo, [8400, 427, 1, 860, 890, 770, 120]),
    (FuelType::Mdo, [8500, 426, 5, 862, 900, 780, 120]),
    (FuelType::Hfo, [9800, 402, 35, 870, 940, 820, 120]),
    (FuelType::Vlsfo, [9200, 425, 1, 865, 910, 790, 120]),
    (FuelType::Lng, [4500, 480, 0, 750, 850, 560, 290]),
    (FuelType::Lpg, [5100, 460, 0, 820, 820, 660, 160]),
    (FuelType::BioMgo, [8400, 427, 1, 860, 250, 770, -520]),
    (FuelType::BioMdo, [8500, 426, 5, 862, 300, 780, -480]),
    (FuelType::Fame, [8800, 370, 0, 770, 200, 700, -500]),
    (FuelType::Hvo, [7800, 440, 0, 850, 150, 750, -600]),
    (FuelType::BioLng, [4500, 480, 0, 750, 80, 560, -480]),
    (FuelType::BioMethanol, [7900, 199, 0, 375, 150, 700, -550]),
    (FuelType::BioEthanol, [7900, 264, 0, 520, 120, 650, -530]),
    (FuelType::EMethanol, [7900, 199, 0, 375, 0, 700, -700]),
    (FuelType::EAmmonia, [6800, 186, 0, 0, 0, 0, 0]),
    (FuelType::EHydrogen, [700, 1200, 0, 0, 0, 0, 0]),
    (FuelType::EDiesel, [8400, 428, 0, 850, 0, 770, -770]),
    (FuelType::ELng, [4500, 480, 0, 750, 0, 560, -560]),
    (FuelType::Methanol, [7900, 199, 0, 375, 750, 700, 50]),
    (FuelType::Ammonia, [6800, 186, 0, 0, 820, 0, 820]),
    (FuelType::Hydrogen, [700, 1200, 0, 0, 900, 0, 900]),
    (FuelType::MgoBioBlend, [8400, 427, 1, 850, 650, 770, -120]),
];

/// Lifecycle factor per feedstock (gCO2e/MJ).
const FEEDSTOCK_ROWS: [(BiofuelFeedstock, i64); 10] = [
    (BiofuelFeedstock::Rapeseed, 25),
    (BiofuelFeedstock::Palm, 35),
    (BiofuelFeedstock::Soy, 30),
    (BiofuelFeedstock::Sunflower, 20),
    (BiofuelFeedstock::WasteCookingOil, 10),
    (BiofuelFeedstock::AnimalFat, 15),
    (BiofuelFeedstock::Algae, 5),
    (BiofuelFeedstock::WoodResidue, 8),
    (BiofuelFeedstock::AgriculturalWaste, 12),
    (BiofuelFeedstock::MunicipalWaste, 18),
];

/// ILUC-risk multiplier per generation, in tenths.
const GENERATION_ROWS: [(BiofuelGeneration, i64); 4] = [
    (BiofuelGeneration::FirstGeneration, 12),
    (BiofuelGeneration::SecondGeneration, 8),
    (BiofuelGeneration::ThirdGeneration, 5),
    (BiofuelGeneration::FourthGeneration, 2),
];

fn tenths(value: i64) -> Decimal {
    Decimal::new(value, 1)
}

pub(super) fn fuels() -> HashMap<FuelType, FuelPropertySpec> {
    FUEL_ROWS
        .iter()
        .map(|&(fuel, [density, lcv, sulphur, carbon, wtw, ttw, wtt])| {
            let spec = FuelPropertySpec::new(
                tenths(density),
                tenths(lcv),
                tenths(sulphur),
                tenths(carbon),
                tenths(wtw),
                tenths(ttw),
                tenths(wtt),
            );
            (fuel, spec)
        })
        .collect()
}

pub(super) fn feedstock_factors() -> HashMap<BiofuelFeedstock, Decimal> {
    FEEDSTOCK_ROWS
        .iter()
        .map(|&(feedstock, factor)| (feedstock, Decimal::from(factor)))
        .collect()
}

pub(super) fn generation_multipliers() -> HashMap<BiofuelGeneration, Decimal> {
    GENERATION_ROWS
        .iter()
        .map(|&(generation, multiplier)| (generation, tenths(multiplier)))
        .collect()
}
