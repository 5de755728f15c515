//! Integration tests for qn-uncertainty.

use proptest::prelude::*;
use qn_core::Settings;
use qn_uncertainty::{Coverage, Law, UncertaintyEngine, combine};
use qn_units::{Dimension, Quantity, Unit};

#[test]
fn estimate_flows_into_quantity_arithmetic() {
    let settings = Settings::default().with_uncertainty(true);
    let metre = Unit::base(Dimension::LENGTH);

    let a = combine(&[2.0, 2.2, 1.8], &[], Law::Normal)
        .unwrap()
        .into_quantity(metre, settings);
    let b = combine(&[3.0, 3.3, 2.7], &[], Law::Normal)
        .unwrap()
        .into_quantity(metre, settings);

    let area = a.try_mul(&b).unwrap();
    assert_eq!(area.dimension(), Dimension::AREA);
    assert!((area.value() - 6.0).abs() < 1e-12);

    // Relative uncertainties add in quadrature for a product.
    let ra = a.relative_uncertainty().unwrap();
    let rb = b.relative_uncertainty().unwrap();
    let expected = 6.0 * ra.hypot(rb);
    assert!((area.uncertainty().unwrap() - expected).abs() < 1e-12);
}

#[test]
fn engine_reads_threshold_from_settings() {
    let samples = [0.0, 0.0, 0.0];
    let errors = [3.0, 4.0];

    let linear = UncertaintyEngine::new(&Settings::default())
        .combine(&samples, &errors, Law::None)
        .unwrap();
    assert!((linear.value - 7.0).abs() < 1e-12);

    let quad = UncertaintyEngine::new(&Settings::default().with_systematic_quad_threshold(1))
        .combine(&samples, &errors, Law::None)
        .unwrap();
    assert!((quad.value - 5.0).abs() < 1e-12);
}

proptest! {
    #[test]
    fn deviation_is_non_negative(
        samples in prop::collection::vec(-1e3f64..1e3, 2..40),
        errors in prop::collection::vec(-10f64..10.0, 0..8),
    ) {
        for law in Law::ALL {
            let e = combine(&samples, &errors, law).unwrap();
            prop_assert!(e.deviation >= 0.0);
            prop_assert!(e.value >= 0.0);
        }
    }

    #[test]
    fn shifting_samples_keeps_deviation(
        samples in prop::collection::vec(-1e2f64..1e2, 2..20),
        shift in -1e2f64..1e2,
    ) {
        let shifted: Vec<f64> = samples.iter().map(|s| s + shift).collect();
        let a = combine(&samples, &[], Law::Normal).unwrap();
        let b = combine(&shifted, &[], Law::Normal).unwrap();
        prop_assert!((a.deviation - b.deviation).abs() <= 1e-9 * (1.0 + a.deviation));
    }

    #[test]
    fn wider_coverage_never_narrows(samples in prop::collection::vec(-1e2f64..1e2, 2..20)) {
        let narrow = UncertaintyEngine::default().combine(&samples, &[], Law::Normal).unwrap();
        let wide = UncertaintyEngine::default()
            .with_coverage(Coverage::ThreeSigma)
            .combine(&samples, &[], Law::Normal)
            .unwrap();
        prop_assert!(wide.deviation >= narrow.deviation);
    }
}
