use assert_matches::assert_matches;
use gazeseg::{
    classify_recording, AngularSignal, ClassificationConfig, Classifier, CoverageFault, Event,
    ExternalClassifier, ExternalOutput, GazeError, TemporalGrid,
};
use gazeseg::utils::init_logging;

use gazeseg::Label::{Fixation as F, Saccade as S, Undefined as U};

#[test]
fn velocity_scenario_produces_expected_events() {
    init_logging();
    let result = classify_recording(
        vec![0.0, 0.01, 0.02, 0.03, 0.04],
        vec![0.0, 0.0, 0.0, 5.0, 5.0],
        vec![0.0; 5],
        &Classifier::Velocity,
        &ClassificationConfig::velocity(100.0),
    )
    .unwrap();

    assert_eq!(result.continuous.labels(), &[U, F, F, S, F]);
    assert_eq!(
        result.events.events(),
        &[
            Event::new(0, 0, U),
            Event::new(1, 2, F),
            Event::new(3, 3, S),
            Event::new(4, 4, F)
        ]
    );
}

#[test]
fn velocity_at_threshold_is_fixation() {
    let result = classify_recording(
        vec![0.0, 0.25],
        vec![0.0, 25.0],
        vec![0.0, 0.0],
        &Classifier::Velocity,
        &ClassificationConfig::velocity(100.0),
    )
    .unwrap();
    assert_eq!(result.continuous.labels(), &[U, F]);
}

#[test]
fn classifier_without_threshold_fails() {
    let err = classify_recording(
        vec![0.0, 0.01],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
        &Classifier::Velocity,
        &ClassificationConfig::default(),
    )
    .unwrap_err();
    assert_matches!(err, GazeError::MissingParameter("velocity_threshold"));
}

#[test]
fn malformed_input_fails() {
    assert_matches!(
        classify_recording(
            vec![0.0, 0.01, 0.005],
            vec![0.0; 3],
            vec![0.0; 3],
            &Classifier::Velocity,
            &ClassificationConfig::velocity(100.0),
        ),
        Err(GazeError::InvalidInput(_))
    );
    assert_matches!(
        classify_recording(
            vec![0.0, 0.01],
            vec![0.0; 3],
            vec![0.0; 2],
            &Classifier::Velocity,
            &ClassificationConfig::velocity(100.0),
        ),
        Err(GazeError::InvalidInput(_))
    );
}

#[test]
fn dispersion_window_too_short_before_gap_is_discarded() {
    // three steady samples, a pause, then five steady samples at 100 Hz
    let times = vec![0.0, 0.01, 0.02, 2.0, 2.01, 2.02, 2.03, 2.04];
    let result = classify_recording(
        times,
        vec![1.0; 8],
        vec![1.0; 8],
        &Classifier::Dispersion,
        &ClassificationConfig::dispersion(1.0, 0.04),
    )
    .unwrap();

    assert_eq!(result.continuous.labels(), &[U, U, U, F, F, F, F, F]);
    assert_eq!(
        result.events.events(),
        &[Event::new(0, 2, U), Event::new(3, 7, F)]
    );
}

#[test]
fn gap_splits_events_for_every_classifier() {
    let times = vec![0.0, 0.01, 0.02, 0.03, 0.04, 1.0, 1.01, 1.02, 1.03, 1.04];
    let result = classify_recording(
        times,
        vec![0.0; 10],
        vec![0.0; 10],
        &Classifier::Dispersion,
        &ClassificationConfig::dispersion(0.5, 0.02),
    )
    .unwrap();

    assert_eq!(result.continuous.labels(), &[F; 10]);
    assert_eq!(
        result.events.events(),
        &[Event::new(0, 4, F), Event::new(5, 9, F)]
    );
}

#[test]
fn external_classifier_is_normalised_like_builtin() {
    let clf = ExternalClassifier::new("nslr-hmm", |signal: &AngularSignal| {
        let codes: Vec<u8> = signal
            .x()
            .iter()
            .map(|&x| if x > 2.0 { 2 } else { 1 })
            .collect();
        Ok(ExternalOutput::from_nslr_codes(&codes)?)
    });

    let result = classify_recording(
        vec![0.0, 0.01, 0.02, 0.03, 0.04],
        vec![0.0, 0.0, 5.0, 5.0, 0.0],
        vec![0.0; 5],
        &Classifier::External(clf),
        &ClassificationConfig::default(),
    )
    .unwrap();

    assert_eq!(
        result.events.events(),
        &[Event::new(0, 1, F), Event::new(2, 3, S), Event::new(4, 4, F)]
    );
}

#[test]
fn external_partial_events_are_rejected() {
    let clf = ExternalClassifier::new("remodnav", |_| {
        Ok(ExternalOutput::Events(vec![
            Event::new(0, 1, F),
            Event::new(3, 4, S),
        ]))
    });

    let err = classify_recording(
        vec![0.0, 0.01, 0.02, 0.03, 0.04],
        vec![0.0; 5],
        vec![0.0; 5],
        &Classifier::External(clf),
        &ClassificationConfig::default(),
    )
    .unwrap_err();
    assert_matches!(
        err,
        GazeError::Coverage {
            fault: CoverageFault::Missing(2),
            ..
        }
    );
}

#[test]
fn classifiers_share_signal_across_threads() {
    let grid = TemporalGrid::from_sampling_rate(200, 100.0, 0.0).unwrap();
    let x: Vec<f64> = (0..200).map(|i| if i < 100 { 0.0 } else { 10.0 }).collect();
    let signal = AngularSignal::new(grid, x, vec![0.0; 200]).unwrap();
    let config = ClassificationConfig {
        velocity_threshold: Some(100.0),
        dispersion_threshold: Some(1.0),
        min_duration: Some(0.1),
        ..ClassificationConfig::default()
    };

    std::thread::scope(|scope| {
        let handles: Vec<_> = [Classifier::Velocity, Classifier::Dispersion]
            .into_iter()
            .map(|classifier| {
                let signal = &signal;
                let config = &config;
                scope.spawn(move || gazeseg::classify_signal(signal, &classifier, config))
            })
            .collect();

        for handle in handles {
            let result = handle.join().unwrap().unwrap();
            assert_eq!(result.continuous.len(), 200);
            assert_eq!(result.continuous.get(50), Some(F));
        }
    });
}
