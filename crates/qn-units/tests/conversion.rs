//! Integration tests for qn-units: conversions through the catalogue.

use proptest::prelude::*;
use qn_core::{Epsilon, Settings, TolerancePolicy};
use qn_units::{Catalog, Dimension, Quantity, Unit, UnitError, prefix};

fn loose() -> Settings {
    Settings::default().with_tolerance(TolerancePolicy {
        internal: Epsilon::Machine,
        comparison: Epsilon::Explicit(1e-9),
    })
}

fn catalog() -> Catalog {
    Catalog::standard(&loose()).unwrap()
}

fn unit(c: &Catalog, symbol: &str) -> Unit {
    *c.get(symbol).unwrap_or_else(|| panic!("missing unit {symbol}"))
}

#[test]
fn boiling_point_in_three_scales() {
    let c = catalog();
    let boiling = Quantity::with_settings(100.0, unit(&c, "degC"), loose());

    let f = boiling.convert_to(&unit(&c, "degF")).unwrap();
    assert!((f.value() - 212.0).abs() < 1e-9);

    let k = boiling.convert_to(&unit(&c, "K")).unwrap();
    assert!((k.value() - 373.15).abs() < 1e-9);

    let r = boiling.convert_to(&unit(&c, "degR")).unwrap();
    assert!((r.value() - 671.67).abs() < 1e-9);

    assert!(boiling.try_eq(&f).unwrap());
    assert!(k.try_eq(&r).unwrap());
}

#[test]
fn energy_across_prefixes() {
    let c = catalog();
    let e = Quantity::with_settings(100.0, unit(&c, "mJ"), loose());
    let j = e.convert_to(&unit(&c, "J")).unwrap();
    assert!((j.value() - 0.1).abs() < 1e-12);

    let kwh = Quantity::with_settings(1.0, unit(&c, "kWh"), loose());
    let mj = kwh.convert_to(&unit(&c, "MJ")).unwrap();
    assert!((mj.value() - 3.6).abs() < 1e-12);

    let kcal = Quantity::with_settings(1.0, unit(&c, "kcal"), loose());
    let kj = kcal.convert_to(&unit(&c, "kJ")).unwrap();
    assert!((kj.value() - 4.184).abs() < 1e-12);
}

#[test]
fn pressure_units_agree() {
    let c = catalog();
    let atm = Quantity::with_settings(1.0, unit(&c, "atm"), loose());

    let kpa = atm.convert_to(&unit(&c, "kPa")).unwrap();
    assert!((kpa.value() - 101.325).abs() < 1e-12);

    let torr = atm.convert_to(&unit(&c, "torr")).unwrap();
    assert!((torr.value() - 760.0).abs() < 1e-9);

    let psi = atm.convert_to(&unit(&c, "psi")).unwrap();
    assert!((psi.value() - 14.695_948_775_5).abs() < 1e-6);
}

#[test]
fn speed_from_distance_over_time() {
    let c = catalog();
    let s = loose();
    let d = Quantity::with_settings(90.0, unit(&c, "km"), s);
    let t = Quantity::with_settings(2.0, unit(&c, "h"), s);

    let v = d.try_div(&t).unwrap();
    assert_eq!(v.dimension(), Dimension::VELOCITY);
    assert_eq!(v.unit(), &unit(&c, "km/h"));
    assert!((v.value() - 45.0).abs() < 1e-12);

    let ms = v.convert_to(&unit(&c, "m/s")).unwrap();
    assert!((ms.value() - 12.5).abs() < 1e-12);
}

#[test]
fn adding_length_to_mass_fails() {
    let c = catalog();
    let l = Quantity::with_settings(1.0, unit(&c, "m"), loose());
    let m = Quantity::with_settings(1.0, unit(&c, "kg"), loose());
    let err = l.try_add(&m).unwrap_err();
    assert!(matches!(err, UnitError::DimensionMismatch { .. }));
    assert_eq!(err.to_string(), "Dimension mismatch: [L1] vs [M1]");
}

#[test]
fn catalogue_units_round_trip_exactly_where_whole() {
    let c = catalog();
    let joule = Unit::base(Dimension::ENERGY);
    for (symbol, p) in prefix::ALL {
        let u = joule.prefixed(p, &loose()).unwrap();
        let from_catalog = unit(&c, &format!("{symbol}J"));
        assert_eq!(u, from_catalog, "prefix {symbol}");
    }
}

fn linear_symbols() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![
        Just(("m", "ft")),
        Just(("mi", "km")),
        Just(("lb", "g")),
        Just(("h", "ms")),
        Just(("kPa", "psi")),
        Just(("bar", "mmHg")),
        Just(("kWh", "BTU")),
        Just(("L", "mL")),
        Just(("degC", "degF")),
        Just(("K", "degC")),
    ]
}

proptest! {
    #[test]
    fn conversion_round_trip((from, to) in linear_symbols(), v in -1e6f64..1e6) {
        let c = catalog();
        let q = Quantity::with_settings(v, unit(&c, from), loose());
        let back = q
            .convert_to(&unit(&c, to))
            .unwrap()
            .convert_to(&unit(&c, from))
            .unwrap();
        prop_assert!(q.try_eq(&back).unwrap() || (q.value() - back.value()).abs() < 1e-6);
    }

    #[test]
    fn ordering_survives_conversion(a in -1e3f64..1e3, b in -1e3f64..1e3) {
        let c = catalog();
        let qa = Quantity::with_settings(a, unit(&c, "degC"), loose());
        let qb = Quantity::with_settings(b, unit(&c, "degC"), loose())
            .convert_to(&unit(&c, "degF"))
            .unwrap();
        if (a - b).abs() > 1e-3 {
            prop_assert_eq!(qa.try_lt(&qb).unwrap(), a < b);
        }
    }
}
