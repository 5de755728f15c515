//! Predefined units.
//!
//! A deliberately small table: SI base units, every SI prefix of the joule
//! and a handful of common length, mass, time, temperature, energy, pressure
//! and power units. Each entry is derived through the same combinators any
//! caller would use, so the table doubles as a check of the algebra.

use crate::dimension::Dimension;
use crate::error::UnitResult;
use crate::origin::Origin;
use crate::quantity::Quantity;
use crate::ratio::{Ratio, prefix};
use crate::unit::Unit;
use qn_core::{Real, Settings};
use tracing::debug;

/// A catalogue entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedUnit {
    pub symbol: &'static str,
    pub name: &'static str,
    pub unit: Unit,
}

/// Units addressable by exact symbol.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<NamedUnit>,
}

impl Catalog {
    /// Build the standard table under `settings`.
    pub fn standard(settings: &Settings) -> UnitResult<Self> {
        let mut b = Builder {
            settings,
            entries: Vec::new(),
        };

        let metre = Unit::base(Dimension::LENGTH);
        let kilogram = Unit::base(Dimension::MASS);
        let second = Unit::base(Dimension::TIME);
        let kelvin = Unit::base(Dimension::TEMPERATURE);

        // SI base
        b.add("m", "metre", metre);
        b.add("kg", "kilogram", kilogram);
        b.add("s", "second", second);
        b.add("A", "ampere", Unit::base(Dimension::CURRENT));
        b.add("K", "kelvin", kelvin);
        b.add("mol", "mole", Unit::base(Dimension::AMOUNT));
        b.add("cd", "candela", Unit::base(Dimension::LUMINOUS_INTENSITY));
        b.add("1", "unit", Unit::DIMENSIONLESS);

        // Length
        b.add("km", "kilometre", metre.prefixed(prefix::KILO, settings)?);
        b.add("cm", "centimetre", metre.prefixed(prefix::CENTI, settings)?);
        b.add("mm", "millimetre", metre.prefixed(prefix::MILLI, settings)?);
        b.add("um", "micrometre", metre.prefixed(prefix::MICRO, settings)?);
        b.add("in", "inch", b.ratio_of(metre, 254.0, 10_000.0)?);
        b.add("ft", "foot", b.ratio_of(metre, 3048.0, 10_000.0)?);
        b.add("mi", "mile", b.ratio_of(metre, 1_609_344.0, 1000.0)?);

        // Mass
        let gram = kilogram.prefixed(prefix::MILLI, settings)?;
        b.add("g", "gram", gram);
        b.add("mg", "milligram", gram.prefixed(prefix::MILLI, settings)?);
        b.add("t", "tonne", kilogram.prefixed(prefix::KILO, settings)?);
        b.add("lb", "pound", b.ratio_of(kilogram, 45_359_237.0, 1e8)?);

        // Time
        let minute = second.scaled_up(60.0, settings)?;
        let hour = minute.scaled_up(60.0, settings)?;
        b.add(
            "ms",
            "millisecond",
            second.prefixed(prefix::MILLI, settings)?,
        );
        b.add("min", "minute", minute);
        b.add("h", "hour", hour);
        b.add("d", "day", hour.scaled_up(24.0, settings)?);

        // Temperature
        let five_ninths = Ratio::new(5.0, 9.0, settings.internal_eps())?;
        let rankine = Unit::new(Dimension::TEMPERATURE, five_ninths, Origin::ZERO)?;
        b.add(
            "degC",
            "degree celsius",
            kelvin.with_origin(Origin(273.15))?,
        );
        b.add("degR", "degree rankine", rankine);
        b.add(
            "degF",
            "degree fahrenheit",
            rankine.with_origin(Origin(459.67 * 5.0 / 9.0))?,
        );

        // Energy
        let joule = Unit::base(Dimension::ENERGY);
        for (symbol, name, p) in JOULE_PREFIXES {
            b.add(symbol, name, joule.prefixed(p, settings)?);
        }
        let watt_hour = joule.scaled_up(3600.0, settings)?;
        b.add("Wh", "watt hour", watt_hour);
        b.add(
            "kWh",
            "kilowatt hour",
            watt_hour.prefixed(prefix::KILO, settings)?,
        );
        b.add("cal", "calorie", b.ratio_of(joule, 4184.0, 1000.0)?);
        b.add("kcal", "kilocalorie", joule.scaled_up(4184.0, settings)?);
        b.add(
            "eV",
            "electronvolt",
            b.ratio_of(joule, 1_602_176_634.0, 1e28)?,
        );
        b.add(
            "BTU",
            "british thermal unit",
            b.ratio_of(joule, 105_505_585_262.0, 1e8)?,
        );

        // Pressure
        let newton = kilogram
            .mul(&metre, settings)?
            .div(&second.pow(2, settings)?, settings)?;
        let pascal = newton.div(&metre.pow(2, settings)?, settings)?;
        b.add("N", "newton", newton);
        b.add("kN", "kilonewton", newton.prefixed(prefix::KILO, settings)?);
        b.add("Pa", "pascal", pascal);
        b.add(
            "hPa",
            "hectopascal",
            pascal.prefixed(prefix::HECTO, settings)?,
        );
        b.add(
            "kPa",
            "kilopascal",
            pascal.prefixed(prefix::KILO, settings)?,
        );
        b.add(
            "MPa",
            "megapascal",
            pascal.prefixed(prefix::MEGA, settings)?,
        );
        let bar = pascal.scaled_up(100_000.0, settings)?;
        b.add("bar", "bar", bar);
        b.add("mbar", "millibar", bar.prefixed(prefix::MILLI, settings)?);
        let atm = pascal.scaled_up(101_325.0, settings)?;
        b.add("atm", "standard atmosphere", atm);
        b.add("torr", "torr", atm.scaled_down(760.0, settings)?);
        b.add(
            "mmHg",
            "millimetre of mercury",
            b.ratio_of(pascal, 133_322_387_415.0, 1e9)?,
        );
        // lbf / in^2 = 0.45359237 kg * 9.80665 m/s^2 / 0.00064516 m^2
        b.add(
            "psi",
            "pound per square inch",
            b.ratio_of(pascal, 44_482_216_152_605.0, 6_451_600_000.0)?,
        );

        // Power, velocity, frequency, volume
        let watt = joule.div(&second, settings)?;
        b.add("W", "watt", watt);
        b.add("kW", "kilowatt", watt.prefixed(prefix::KILO, settings)?);
        b.add("MW", "megawatt", watt.prefixed(prefix::MEGA, settings)?);
        b.add("m/s", "metre per second", metre.div(&second, settings)?);
        b.add(
            "km/h",
            "kilometre per hour",
            metre.prefixed(prefix::KILO, settings)?.div(&hour, settings)?,
        );
        let hertz = second.pow(-1, settings)?;
        b.add("Hz", "hertz", hertz);
        b.add("kHz", "kilohertz", hertz.prefixed(prefix::KILO, settings)?);
        let litre = metre.prefixed(prefix::DECI, settings)?.pow(3, settings)?;
        b.add("L", "litre", litre);
        b.add("mL", "millilitre", litre.prefixed(prefix::MILLI, settings)?);

        debug!(count = b.entries.len(), "built unit catalogue");
        Ok(Self { entries: b.entries })
    }

    pub fn get(&self, symbol: &str) -> Option<&Unit> {
        self.find(symbol).map(|e| &e.unit)
    }

    pub fn find(&self, symbol: &str) -> Option<&NamedUnit> {
        self.entries.iter().find(|e| e.symbol == symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedUnit> + '_ {
        self.entries.iter()
    }

    /// Entries sharing `dimension`.
    pub fn of_dimension(&self, dimension: Dimension) -> impl Iterator<Item = &NamedUnit> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.unit.dimension() == dimension)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

const JOULE_PREFIXES: [(&str, &str, Ratio); 21] = [
    ("yJ", "yoctojoule", prefix::YOCTO),
    ("zJ", "zeptojoule", prefix::ZEPTO),
    ("aJ", "attojoule", prefix::ATTO),
    ("fJ", "femtojoule", prefix::FEMTO),
    ("pJ", "picojoule", prefix::PICO),
    ("nJ", "nanojoule", prefix::NANO),
    ("uJ", "microjoule", prefix::MICRO),
    ("mJ", "millijoule", prefix::MILLI),
    ("cJ", "centijoule", prefix::CENTI),
    ("dJ", "decijoule", prefix::DECI),
    ("J", "joule", prefix::BASE),
    ("daJ", "decajoule", prefix::DECA),
    ("hJ", "hectojoule", prefix::HECTO),
    ("kJ", "kilojoule", prefix::KILO),
    ("MJ", "megajoule", prefix::MEGA),
    ("GJ", "gigajoule", prefix::GIGA),
    ("TJ", "terajoule", prefix::TERA),
    ("PJ", "petajoule", prefix::PETA),
    ("EJ", "exajoule", prefix::EXA),
    ("ZJ", "zettajoule", prefix::ZETTA),
    ("YJ", "yottajoule", prefix::YOTTA),
];

struct Builder<'a> {
    settings: &'a Settings,
    entries: Vec<NamedUnit>,
}

impl Builder<'_> {
    fn add(&mut self, symbol: &'static str, name: &'static str, unit: Unit) {
        self.entries.push(NamedUnit { symbol, name, unit });
    }

    /// `base` scaled by `num / den`.
    fn ratio_of(&self, base: Unit, num: Real, den: Real) -> UnitResult<Unit> {
        let eps = self.settings.internal_eps();
        Unit::new(
            base.dimension(),
            base.scale().mul(&Ratio::new(num, den, eps)?, eps)?,
            base.origin(),
        )
    }
}

// Base-unit constructors with default settings.

#[inline]
pub fn meters(v: Real) -> Quantity {
    Quantity::new(v, Unit::base(Dimension::LENGTH))
}

#[inline]
pub fn kilograms(v: Real) -> Quantity {
    Quantity::new(v, Unit::base(Dimension::MASS))
}

#[inline]
pub fn seconds(v: Real) -> Quantity {
    Quantity::new(v, Unit::base(Dimension::TIME))
}

#[inline]
pub fn kelvins(v: Real) -> Quantity {
    Quantity::new(v, Unit::base(Dimension::TEMPERATURE))
}

#[inline]
pub fn joules(v: Real) -> Quantity {
    Quantity::new(v, Unit::base(Dimension::ENERGY))
}

#[inline]
pub fn pascals(v: Real) -> Quantity {
    Quantity::new(v, Unit::base(Dimension::PRESSURE))
}

#[inline]
pub fn unitless(v: Real) -> Quantity {
    Quantity::new(v, Unit::DIMENSIONLESS)
}
