//! Efficiency-technology adjustments and onshore power accounting.

use rust_decimal::Decimal;

use super::checked::{add, div, mul, sub};
use super::error::CalculationError;
use super::types::{EfficiencyGains, ShorePowerImpact};
use crate::record::EfficiencyTechnologies;

/// Auxiliary load share credited while connected to shore power (%).
pub const SHORE_POWER_AUXILIARY_CREDIT_PCT: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Upper bound of the applied gain (%).
pub const MAX_EFFICIENCY_GAIN_PCT: Decimal = Decimal::ONE_HUNDRED;

/// Default shore power draw (kW).
pub const DEFAULT_SHORE_POWER_KW: Decimal = Decimal::ONE_THOUSAND;

/// Default grid emission factor (gCO2e/kWh).
pub const DEFAULT_GRID_FACTOR_GCO2E_KWH: Decimal = Decimal::from_parts(400, 0, 0, false, 0);

/// Auxiliary-engine MGO burn avoided per kWh drawn (t/kWh).
pub const MGO_TONNES_PER_KWH: Decimal = Decimal::from_parts(2, 0, 0, false, 4);

/// CO2e per tonne of MGO avoided.
pub const MGO_CO2E_PER_TONNE: Decimal = Decimal::from_parts(3200, 0, 0, false, 0);

/// Sums installed technology gains and caps the total.
///
/// # Errors
///
/// Returns `CalculationError::Overflow` if the nominal total is not
/// representable.
pub fn efficiency_gains(
    tech: &EfficiencyTechnologies,
) -> Result<EfficiencyGains, CalculationError> {
    let mewis_duct_pct = installed_gain(
        tech.mewis_duct_installed,
        tech.mewis_duct_efficiency_gain_pct,
    );
    let wind_turbines_pct = installed_gain(
        tech.wind_turbines_installed,
        tech.wind_turbines_efficiency_gain_pct,
    );
    let shore_power_pct = if is_connected(tech) {
        SHORE_POWER_AUXILIARY_CREDIT_PCT
    } else {
        Decimal::ZERO
    };
    let other_technologies_pct = tech.other_efficiency_gain_pct.unwrap_or_default();

    let nominal_total_pct = [wind_turbines_pct, shore_power_pct, other_technologies_pct]
        .into_iter()
        .try_fold(mewis_duct_pct, |total, gain| add(total, gain, "efficiency gain"))?;

    Ok(EfficiencyGains {
        mewis_duct_pct,
        wind_turbines_pct,
        shore_power_pct,
        other_technologies_pct,
        nominal_total_pct,
        applied_total_pct: nominal_total_pct.min(MAX_EFFICIENCY_GAIN_PCT),
    })
}

/// Scales a quantity by `(1 - gain_pct / 100)`.
///
/// # Errors
///
/// Returns `CalculationError::Overflow` if the scaled value is not
/// representable.
pub fn apply_gain(value: Decimal, gain_pct: Decimal) -> Result<Decimal, CalculationError> {
    let remaining = sub(
        Decimal::ONE,
        div(gain_pct, Decimal::ONE_HUNDRED, "efficiency gain")?,
        "efficiency gain",
    )?;
    mul(value, remaining, "efficiency adjustment")
}

/// Grid emissions and fuel savings of the shore power connection, if any.
///
/// # Errors
///
/// Returns `CalculationError::Overflow` for connection figures whose
/// products are not representable.
pub fn shore_power_impact(
    tech: &EfficiencyTechnologies,
) -> Result<ShorePowerImpact, CalculationError> {
    let Some(connection) = tech.shore_power.as_ref().filter(|_| is_connected(tech)) else {
        return Ok(ShorePowerImpact::default());
    };

    let power_kw = connection
        .power_consumption_kw
        .filter(|kw| !kw.is_zero())
        .unwrap_or(DEFAULT_SHORE_POWER_KW);
    let grid_factor = connection
        .grid_emissions_factor_gco2e_kwh
        .filter(|f| !f.is_zero())
        .unwrap_or(DEFAULT_GRID_FACTOR_GCO2E_KWH);

    let energy_kwh = mul(connection.connection_hours, power_kw, "shore power energy")?;
    let fuel_savings_tonnes = mul(energy_kwh, MGO_TONNES_PER_KWH, "shore power fuel savings")?;

    Ok(ShorePowerImpact {
        grid_emissions_gco2e: mul(energy_kwh, grid_factor, "shore power grid emissions")?,
        fuel_savings_tonnes,
        co2_savings_gco2e: mul(
            fuel_savings_tonnes,
            MGO_CO2E_PER_TONNE,
            "shore power CO2 savings",
        )?,
    })
}

fn installed_gain(installed: bool, gain_pct: Option<Decimal>) -> Decimal {
    if installed {
        gain_pct.unwrap_or_default()
    } else {
        Decimal::ZERO
    }
}

fn is_connected(tech: &EfficiencyTechnologies) -> bool {
    tech.shore_power
        .as_ref()
        .is_some_and(|c| c.connection_hours > Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ShorePowerConnection;
    use rust_decimal_macros::dec;

    fn connected(hours: Decimal) -> Option<ShorePowerConnection> {
        Some(ShorePowerConnection {
            connection_hours: hours,
            power_consumption_kw: None,
            grid_emissions_factor_gco2e_kwh: None,
        })
    }

    #[test]
    fn test_no_technologies_no_gain() {
        let gains = efficiency_gains(&EfficiencyTechnologies::default()).unwrap();
        assert_eq!(gains, EfficiencyGains::default());
    }

    #[test]
    fn test_uninstalled_technology_is_ignored() {
        let tech = EfficiencyTechnologies {
            mewis_duct_installed: false,
            mewis_duct_efficiency_gain_pct: Some(dec!(8)),
            wind_turbines_installed: true,
            wind_turbines_efficiency_gain_pct: Some(dec!(5)),
            ..EfficiencyTechnologies::default()
        };
        let gains = efficiency_gains(&tech).unwrap();
        assert_eq!(gains.mewis_duct_pct, Decimal::ZERO);
        assert_eq!(gains.applied_total_pct, dec!(5));
    }

    #[test]
    fn test_gains_capped_at_one_hundred() {
        let tech = EfficiencyTechnologies {
            mewis_duct_installed: true,
            mewis_duct_efficiency_gain_pct: Some(dec!(40)),
            wind_turbines_installed: true,
            wind_turbines_efficiency_gain_pct: Some(dec!(40)),
            other_efficiency_gain_pct: Some(dec!(30)),
            shore_power: connected(dec!(6)),
        };
        let gains = efficiency_gains(&tech).unwrap();
        assert_eq!(gains.shore_power_pct, dec!(30));
        assert_eq!(gains.nominal_total_pct, dec!(140));
        assert_eq!(gains.applied_total_pct, dec!(100));
    }

    #[test]
    fn test_zero_hour_connection_earns_no_credit() {
        let tech = EfficiencyTechnologies {
            shore_power: connected(Decimal::ZERO),
            ..EfficiencyTechnologies::default()
        };
        assert_eq!(efficiency_gains(&tech).unwrap().shore_power_pct, Decimal::ZERO);
        assert_eq!(shore_power_impact(&tech), Ok(ShorePowerImpact::default()));
    }

    #[test]
    fn test_apply_gain() {
        assert_eq!(apply_gain(dec!(200), dec!(25)), Ok(dec!(150)));
        assert_eq!(apply_gain(dec!(200), dec!(100)), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_extreme_inputs_report_overflow() {
        assert_eq!(
            apply_gain(Decimal::MAX, dec!(-100)),
            Err(CalculationError::Overflow("efficiency adjustment"))
        );

        let tech = EfficiencyTechnologies {
            mewis_duct_installed: true,
            mewis_duct_efficiency_gain_pct: Some(Decimal::MAX),
            other_efficiency_gain_pct: Some(Decimal::MAX),
            ..EfficiencyTechnologies::default()
        };
        assert_eq!(
            efficiency_gains(&tech),
            Err(CalculationError::Overflow("efficiency gain"))
        );

        let tech = EfficiencyTechnologies {
            shore_power: Some(ShorePowerConnection {
                connection_hours: Decimal::MAX,
                power_consumption_kw: Some(dec!(500)),
                grid_emissions_factor_gco2e_kwh: None,
            }),
            ..EfficiencyTechnologies::default()
        };
        assert!(matches!(
            shore_power_impact(&tech),
            Err(CalculationError::Overflow(_))
        ));
    }

    #[test]
    fn test_shore_power_defaults() {
        let tech = EfficiencyTechnologies {
            shore_power: connected(dec!(10)),
            ..EfficiencyTechnologies::default()
        };
        let impact = shore_power_impact(&tech).unwrap();
        // 10 h x 1000 kW x 400 g/kWh
        assert_eq!(impact.grid_emissions_gco2e, dec!(4000000));
        assert_eq!(impact.fuel_savings_tonnes, dec!(2));
        assert_eq!(impact.co2_savings_gco2e, dec!(6400));
    }

    #[test]
    fn test_shore_power_measured_values() {
        let tech = EfficiencyTechnologies {
            shore_power: Some(ShorePowerConnection {
                connection_hours: dec!(4),
                power_consumption_kw: Some(dec!(500)),
                grid_emissions_factor_gco2e_kwh: Some(dec!(50)),
            }),
            ..EfficiencyTechnologies::default()
        };
        let impact = shore_power_impact(&tech).unwrap();
        assert_eq!(impact.grid_emissions_gco2e, dec!(100000));
        assert_eq!(impact.fuel_savings_tonnes, dec!(0.4));
    }
}
