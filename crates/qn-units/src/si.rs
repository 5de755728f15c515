// qn-units/src/si.rs

//! Interop with `uom`'s statically typed SI quantities.
//!
//! `uom` stores every quantity in its SI base unit, so a typed value maps to
//! a [`Quantity`] in the base unit of the matching [`Dimension`] and back.

use crate::dimension::Dimension;
use crate::error::UnitResult;
use crate::quantity::Quantity;
use crate::unit::Unit;
use qn_core::{Real, Settings};
use uom::si::f64::{
    Acceleration, AmountOfSubstance, Area, ElectricCurrent, Energy, Force, Length,
    LuminousIntensity, Mass, MassDensity, MassRate, Power, Pressure, Ratio as UomRatio,
    ThermodynamicTemperature, Time, Velocity, Volume,
};

/// A typed quantity with a fixed dimension and an SI base-unit value.
pub trait SiQuantity: Sized {
    const DIMENSION: Dimension;

    /// Value in the SI base unit.
    fn si_value(&self) -> Real;

    fn from_si_value(value: Real) -> Self;
}

macro_rules! si_quantity {
    ($($ty:ty => $unit:ty, $dim:expr;)*) => {
        $(
            impl SiQuantity for $ty {
                const DIMENSION: Dimension = $dim;

                #[inline]
                fn si_value(&self) -> Real {
                    self.value
                }

                #[inline]
                fn from_si_value(value: Real) -> Self {
                    <$ty>::new::<$unit>(value)
                }
            }
        )*
    };
}

si_quantity! {
    Length => uom::si::length::meter, Dimension::LENGTH;
    Mass => uom::si::mass::kilogram, Dimension::MASS;
    Time => uom::si::time::second, Dimension::TIME;
    ElectricCurrent => uom::si::electric_current::ampere, Dimension::CURRENT;
    ThermodynamicTemperature => uom::si::thermodynamic_temperature::kelvin, Dimension::TEMPERATURE;
    AmountOfSubstance => uom::si::amount_of_substance::mole, Dimension::AMOUNT;
    LuminousIntensity => uom::si::luminous_intensity::candela, Dimension::LUMINOUS_INTENSITY;
    Area => uom::si::area::square_meter, Dimension::AREA;
    Volume => uom::si::volume::cubic_meter, Dimension::VOLUME;
    Velocity => uom::si::velocity::meter_per_second, Dimension::VELOCITY;
    Acceleration => uom::si::acceleration::meter_per_second_squared, Dimension::ACCELERATION;
    Force => uom::si::force::newton, Dimension::FORCE;
    Energy => uom::si::energy::joule, Dimension::ENERGY;
    Power => uom::si::power::watt, Dimension::POWER;
    Pressure => uom::si::pressure::pascal, Dimension::PRESSURE;
    MassDensity => uom::si::mass_density::kilogram_per_cubic_meter, Dimension::DENSITY;
    MassRate => uom::si::mass_rate::kilogram_per_second, Dimension::MASS_RATE;
    UomRatio => uom::si::ratio::ratio, Dimension::DIMENSIONLESS;
}

impl Quantity {
    /// Base-unit quantity from a typed `uom` value.
    pub fn from_si<Q: SiQuantity>(q: &Q, settings: Settings) -> Quantity {
        Quantity::with_settings(q.si_value(), Unit::base(Q::DIMENSION), settings)
    }

    /// Typed `uom` value; fails if the dimension does not match `Q`.
    pub fn to_si<Q: SiQuantity>(&self) -> UnitResult<Q> {
        self.dimension().ensure_same(&Q::DIMENSION)?;
        Ok(Q::from_si_value(self.base_value()))
    }
}
