//! Error surface of the public API.

use ndarray::{Array2, Array3, array};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tsvar_var::{
    CausalityKind, Criterion, KnownProcess, TimeSeries, VarError, VarModel, VarProcess,
};

fn small_series() -> TimeSeries {
    let proc = KnownProcess::new(array![[[0.3, 0.1], [0.0, 0.4]]], array![0.0, 0.0], Array2::eye(2))
        .unwrap();
    let mut rng = StdRng::seed_from_u64(17);
    TimeSeries::new(proc.simulate(30, &mut rng).unwrap()).unwrap()
}

#[test]
fn empty_and_non_finite_data() {
    assert_eq!(
        TimeSeries::new(Array2::zeros((0, 2))).unwrap_err(),
        VarError::EmptyData
    );
    assert_eq!(
        TimeSeries::new(array![[1.0, f64::INFINITY]]).unwrap_err(),
        VarError::NonFiniteData
    );
}

#[test]
fn lag_order_bounds() {
    let model = VarModel::new(small_series());
    assert!(matches!(model.fit(30), Err(VarError::InvalidLagOrder { p: 30, nobs: 30 })));
    assert!(matches!(
        model.fit(12),
        Err(VarError::InsufficientDegreesOfFreedom { .. })
    ));
}

#[test]
fn unknown_names_and_parse_errors() {
    let fit = VarModel::new(small_series()).fit(1).unwrap();
    let err = fit
        .test_causality(&"gdp".into(), &["y2".into()], CausalityKind::Wald, 0.05)
        .unwrap_err();
    assert_eq!(err, VarError::UnknownVariable("gdp".into()));

    assert!(matches!("xyz".parse::<Criterion>(), Err(VarError::UnknownCriterion(_))));
    assert!(matches!(
        "lr".parse::<CausalityKind>(),
        Err(VarError::UnknownTestKind(_))
    ));
}

#[test]
fn significance_must_be_a_probability() {
    let fit = VarModel::new(small_series()).fit(1).unwrap();
    for bad in [0.0, 1.0, -0.1, f64::NAN] {
        assert!(matches!(
            fit.test_causality(&0usize.into(), &[1usize.into()], CausalityKind::F, bad),
            Err(VarError::InvalidSignificance(_))
        ));
        assert!(matches!(
            fit.forecast_interval_from_sample(3, bad),
            Err(VarError::InvalidSignificance(_))
        ));
    }
}

#[test]
fn forecast_history_too_short() {
    let proc = KnownProcess::new(
        Array3::zeros((3, 2, 2)),
        array![0.0, 0.0],
        Array2::eye(2),
    )
    .unwrap();
    let history = Array2::zeros((2, 2));
    assert_eq!(
        proc.forecast(history.view(), 4).unwrap_err(),
        VarError::InsufficientHistory { needed: 3, got: 2 }
    );
}

#[test]
fn unit_root_quantities_are_singular() {
    let rw = KnownProcess::new(array![[[1.0]]], array![0.0], array![[1.0]]).unwrap();
    assert!(rw.is_stable());
    assert!(matches!(rw.mean(), Err(VarError::SingularSystem { .. })));
    assert!(matches!(rw.acf(None), Err(VarError::SingularSystem { .. })));
}

#[test]
fn shape_mismatch_on_construction() {
    let err = KnownProcess::new(
        Array3::zeros((1, 2, 2)),
        array![0.0, 0.0, 0.0],
        Array2::eye(2),
    )
    .unwrap_err();
    assert!(matches!(err, VarError::ShapeMismatch { .. }));
}
