//! Closed fuel classification sets.
//!
//! Every fuel a record can declare is a variant here, so adding a new fuel or
//! category is a compile-time-checked change for every `match` downstream.

use serde::{Deserialize, Serialize};

/// Marine fuel types recognised by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    /// Marine gas oil.
    Mgo,
    /// Marine diesel oil.
    Mdo,
    /// Heavy fuel oil.
    Hfo,
    /// Very low sulphur fuel oil.
    Vlsfo,
    /// Liquefied natural gas.
    Lng,
    /// Liquefied petroleum gas.
    Lpg,
    /// Bio-derived marine gas oil.
    BioMgo,
    /// Bio-derived marine diesel oil.
    BioMdo,
    /// Bio-derived heavy fuel oil.
    BioHfo,
    /// Fatty acid methyl esters.
    Fame,
    /// Hydrotreated vegetable oil.
    Hvo,
    /// Bio-LNG.
    BioLng,
    /// Bio-methanol.
    BioMethanol,
    /// Bio-ethanol.
    BioEthanol,
    /// Electro-methanol.
    EMethanol,
    /// Electro-ammonia.
    EAmmonia,
    /// Electrolytic hydrogen.
    EHydrogen,
    /// Electro-diesel.
    EDiesel,
    /// Electro-LNG.
    ELng,
    /// Fossil methanol.
    Methanol,
    /// Fossil ammonia.
    Ammonia,
    /// Fossil hydrogen.
    Hydrogen,
    /// Dimethyl ether.
    DimethylEther,
    /// MGO blended with a biofuel component.
    MgoBioBlend,
    /// MDO blended with a biofuel component.
    MdoBioBlend,
    /// HFO blended with a biofuel component.
    HfoBioBlend,
}

impl FuelType {
    /// All fuel types, in declaration order.
    pub const ALL: [Self; 26] = [
        Self::Mgo,
        Self::Mdo,
        Self::Hfo,
        Self::Vlsfo,
        Self::Lng,
        Self::Lpg,
        Self::BioMgo,
        Self::BioMdo,
        Self::BioHfo,
        Self::Fame,
        Self::Hvo,
        Self::BioLng,
        Self::BioMethanol,
        Self::BioEthanol,
        Self::EMethanol,
        Self::EAmmonia,
        Self::EHydrogen,
        Self::EDiesel,
        Self::ELng,
        Self::Methanol,
        Self::Ammonia,
        Self::Hydrogen,
        Self::DimethylEther,
        Self::MgoBioBlend,
        Self::MdoBioBlend,
        Self::HfoBioBlend,
    ];

    /// Returns the wire code (e.g. `"BIO_MGO"`).
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Mgo => "MGO",
            Self::Mdo => "MDO",
            Self::Hfo => "HFO",
            Self::Vlsfo => "VLSFO",
            Self::Lng => "LNG",
            Self::Lpg => "LPG",
            Self::BioMgo => "BIO_MGO",
            Self::BioMdo => "BIO_MDO",
            Self::BioHfo => "BIO_HFO",
            Self::Fame => "FAME",
            Self::Hvo => "HVO",
            Self::BioLng => "BIO_LNG",
            Self::BioMethanol => "BIO_METHANOL",
            Self::BioEthanol => "BIO_ETHANOL",
            Self::EMethanol => "E_METHANOL",
            Self::EAmmonia => "E_AMMONIA",
            Self::EHydrogen => "E_HYDROGEN",
            Self::EDiesel => "E_DIESEL",
            Self::ELng => "E_LNG",
            Self::Methanol => "METHANOL",
            Self::Ammonia => "AMMONIA",
            Self::Hydrogen => "HYDROGEN",
            Self::DimethylEther => "DIMETHYL_ETHER",
            Self::MgoBioBlend => "MGO_BIO_BLEND",
            Self::MdoBioBlend => "MDO_BIO_BLEND",
            Self::HfoBioBlend => "HFO_BIO_BLEND",
        }
    }

    /// The fossil fuel a blend is built on, used for the fossil share of a
    /// hybrid calculation.
    #[must_use]
    pub const fn fossil_base(self) -> Option<Self> {
        match self {
            Self::MgoBioBlend => Some(Self::Mgo),
            Self::MdoBioBlend => Some(Self::Mdo),
            Self::HfoBioBlend => Some(Self::Hfo),
            _ => None,
        }
    }

    /// The category a record of this fuel type is expected to declare.
    ///
    /// Methanol, ammonia, hydrogen and DME without a `BIO_`/`E_` prefix are
    /// the conventional, fossil-derived products.
    #[must_use]
    pub const fn natural_category(self) -> FuelCategory {
        match self {
            Self::Mgo
            | Self::Mdo
            | Self::Hfo
            | Self::Vlsfo
            | Self::Lng
            | Self::Lpg
            | Self::Methanol
            | Self::Ammonia
            | Self::Hydrogen
            | Self::DimethylEther => FuelCategory::Fossil,
            Self::BioMgo
            | Self::BioMdo
            | Self::BioHfo
            | Self::Fame
            | Self::Hvo
            | Self::BioLng
            | Self::BioMethanol
            | Self::BioEthanol => FuelCategory::Biofuel,
            Self::EMethanol | Self::EAmmonia | Self::EHydrogen | Self::EDiesel | Self::ELng => {
                FuelCategory::EFuel
            }
            Self::MgoBioBlend | Self::MdoBioBlend | Self::HfoBioBlend => FuelCategory::Hybrid,
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for FuelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|fuel| fuel.code() == wanted)
            .ok_or_else(|| format!("Unknown fuel type: {s}"))
    }
}

/// Regulatory fuel category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelCategory {
    /// Fossil-derived fuel.
    Fossil,
    /// Biologically derived fuel.
    Biofuel,
    /// Electrofuel produced from renewable electricity.
    EFuel,
    /// Blend of a fossil and a biofuel component.
    Hybrid,
}

impl std::fmt::Display for FuelCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fossil => write!(f, "FOSSIL"),
            Self::Biofuel => write!(f, "BIOFUEL"),
            Self::EFuel => write!(f, "E_FUEL"),
            Self::Hybrid => write!(f, "HYBRID"),
        }
    }
}

/// Biofuel feedstock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BiofuelFeedstock {
    /// Rapeseed oil.
    Rapeseed,
    /// Palm oil.
    Palm,
    /// Soybean oil.
    Soy,
    /// Sunflower oil.
    Sunflower,
    /// Used cooking oil.
    WasteCookingOil,
    /// Rendered animal fat.
    AnimalFat,
    /// Algal oil.
    Algae,
    /// Forestry residue.
    WoodResidue,
    /// Agricultural residue.
    AgriculturalWaste,
    /// Municipal solid waste.
    MunicipalWaste,
}

/// Biofuel technology generation.
///
/// Later generations carry lower indirect land-use-change risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BiofuelGeneration {
    /// Food-crop based.
    FirstGeneration,
    /// Waste and residue based.
    SecondGeneration,
    /// Algae based.
    ThirdGeneration,
    /// Engineered carbon-capturing feedstock.
    FourthGeneration,
}

/// E-fuel production pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EFuelProductionMethod {
    /// Water electrolysis.
    Electrolysis,
    /// Generic power-to-X synthesis.
    PowerToX,
    /// Fischer-Tropsch synthesis.
    FischerTropsch,
    /// Methanol synthesis.
    MethanolSynthesis,
    /// Haber-Bosch ammonia synthesis.
    AmmoniaSynthesis,
}

/// Electricity source feeding an e-fuel plant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenewableElectricitySource {
    /// Solar PV.
    Solar,
    /// Wind.
    Wind,
    /// Hydro power.
    Hydro,
    /// Geothermal.
    Geothermal,
    /// Nuclear.
    Nuclear,
    /// Certified renewable mix.
    MixedRenewable,
}

/// Origin of the carbon bound into a synthetic fuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarbonSource {
    /// Direct air capture.
    DirectAirCapture,
    /// Biogenic CO2.
    Biogenic,
    /// Captured industrial point-source CO2.
    IndustrialCapture,
    /// Carbon-free fuel (ammonia, hydrogen).
    CarbonFree,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(FuelType::Mgo, "MGO")]
    #[case(FuelType::BioMgo, "BIO_MGO")]
    #[case(FuelType::EMethanol, "E_METHANOL")]
    #[case(FuelType::DimethylEther, "DIMETHYL_ETHER")]
    #[case(FuelType::HfoBioBlend, "HFO_BIO_BLEND")]
    fn test_fuel_type_code_matches_serde(#[case] fuel: FuelType, #[case] code: &str) {
        assert_eq!(fuel.code(), code);
        assert_eq!(fuel.to_string(), code);
        assert_eq!(serde_json::to_string(&fuel).unwrap(), format!("\"{code}\""));
    }

    #[test]
    fn test_fuel_type_from_str() {
        assert_eq!(FuelType::from_str("hvo").unwrap(), FuelType::Hvo);
        assert_eq!(FuelType::from_str(" E_AMMONIA ").unwrap(), FuelType::EAmmonia);
        assert!(FuelType::from_str("DIESEL").is_err());
        assert!(FuelType::from_str("").is_err());
    }

    #[test]
    fn test_every_code_parses_back() {
        for fuel in FuelType::ALL {
            assert_eq!(FuelType::from_str(fuel.code()).unwrap(), fuel);
        }
    }

    #[test]
    fn test_fossil_base_only_for_blends() {
        assert_eq!(FuelType::MgoBioBlend.fossil_base(), Some(FuelType::Mgo));
        assert_eq!(FuelType::MdoBioBlend.fossil_base(), Some(FuelType::Mdo));
        assert_eq!(FuelType::HfoBioBlend.fossil_base(), Some(FuelType::Hfo));
        assert_eq!(FuelType::Hvo.fossil_base(), None);
    }

    #[rstest]
    #[case(FuelType::Vlsfo, FuelCategory::Fossil)]
    #[case(FuelType::Methanol, FuelCategory::Fossil)]
    #[case(FuelType::BioMethanol, FuelCategory::Biofuel)]
    #[case(FuelType::Hvo, FuelCategory::Biofuel)]
    #[case(FuelType::ELng, FuelCategory::EFuel)]
    #[case(FuelType::HfoBioBlend, FuelCategory::Hybrid)]
    fn test_natural_category(#[case] fuel: FuelType, #[case] category: FuelCategory) {
        assert_eq!(fuel.natural_category(), category);
    }

    #[test]
    fn test_category_serde() {
        assert_eq!(
            serde_json::to_string(&FuelCategory::EFuel).unwrap(),
            "\"E_FUEL\""
        );
        let parsed: FuelCategory = serde_json::from_str("\"HYBRID\"").unwrap();
        assert_eq!(parsed, FuelCategory::Hybrid);
        assert_eq!(FuelCategory::Biofuel.to_string(), "BIOFUEL");
    }
}
