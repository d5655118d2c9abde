//! Integration tests for the calibration workflow
//!
//! These tests drive ConsoleContext through the public API only:
//! - Full runs across several sensors
//! - Live reading buffering and confirmation
//! - Abort and reset semantics
//! - Event feed contents

use wave_acquisition::calibration::CalibrationStatus;
use wave_acquisition::error::{CalibrationError, ErrorCode};
use wave_acquisition::{ConfirmOutcome, ConsoleContext, ConsoleEvent};

/// Drain every event currently queued on a receiver
fn drain(rx: &mut tokio::sync::broadcast::Receiver<ConsoleEvent>) -> Vec<ConsoleEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

#[test]
fn test_full_calibration_workflow() {
    let mut context = ConsoleContext::default();

    context
        .start_calibration_with("WG-01", &[0.0, 10.0, 20.0])
        .unwrap();

    // Double start is rejected and leaves the run intact
    let double_start = context.start_calibration_with("WG-01", &[0.0, 10.0]);
    match double_start {
        Err(CalibrationError::AlreadyInProgress { sensor }) => assert_eq!(sensor, "WG-01"),
        other => panic!("Expected AlreadyInProgress error, got {:?}", other),
    }

    assert_eq!(
        context.confirm_calibration_point("WG-01", 1.0).unwrap(),
        ConfirmOutcome::Advanced {
            next_index: 1,
            next_target: 10.0
        }
    );
    context.confirm_calibration_point("WG-01", 21.0).unwrap();
    let outcome = context.confirm_calibration_point("WG-01", 41.0).unwrap();

    let fit = match outcome {
        ConfirmOutcome::Completed { fit: Some(fit) } => fit,
        other => panic!("Expected completed run with a fit, got {:?}", other),
    };
    assert!((fit.slope - 2.0).abs() < 1e-12);
    assert!((fit.offset - 1.0).abs() < 1e-12);
    assert!((fit.r_squared - 1.0).abs() < 1e-12);
    assert!(fit.rmse < 1e-9);

    let calibration = context.sensor_calibration("WG-01").unwrap();
    assert_eq!(calibration.status, CalibrationStatus::Completed);
    assert_eq!(calibration.points.len(), 3);
    assert!(calibration.points.iter().all(|p| p.confirmed));

    // Confirming after completion is rejected
    assert!(matches!(
        context.confirm_calibration_point("WG-01", 1.0),
        Err(CalibrationError::NotInProgress {
            status: CalibrationStatus::Completed,
            ..
        })
    ));
}

#[test]
fn test_sensors_calibrate_independently() {
    let mut context = ConsoleContext::default();
    context.start_calibration_with("WG-01", &[0.0, 10.0]).unwrap();
    context.start_calibration_with("WG-02", &[0.0, 10.0]).unwrap();

    context.confirm_calibration_point("WG-01", 0.0).unwrap();
    context.confirm_calibration_point("WG-02", 5.0).unwrap();
    context.confirm_calibration_point("WG-01", 10.0).unwrap();

    assert_eq!(
        context.sensor_calibration("WG-01").unwrap().status,
        CalibrationStatus::Completed
    );
    assert_eq!(
        context.sensor_calibration("WG-02").unwrap().status,
        CalibrationStatus::InProgress
    );

    let ids: Vec<String> = context
        .sensor_calibrations()
        .into_iter()
        .map(|c| c.sensor_id)
        .collect();
    assert_eq!(ids, vec!["WG-01".to_string(), "WG-02".to_string()]);
}

#[test]
fn test_live_reading_workflow() {
    let mut context = ConsoleContext::default();
    context.start_calibration_with("WG-03", &[-5.0, 5.0]).unwrap();

    // Nothing buffered yet
    let err = context.confirm_calibration_reading("WG-03").unwrap_err();
    assert_eq!(err.code(), 2007);

    context.update_calibration_reading("WG-03", -9.0).unwrap();
    context.update_calibration_reading("WG-03", -9.5).unwrap();
    assert_eq!(
        context.calibration_progress("WG-03").unwrap().live_reading,
        Some(-9.5)
    );
    context.confirm_calibration_reading("WG-03").unwrap();

    // The buffered reading is consumed by the confirmation
    assert_eq!(
        context.calibration_progress("WG-03").unwrap().live_reading,
        None
    );

    context.update_calibration_reading("WG-03", 10.5).unwrap();
    let outcome = context.confirm_calibration_reading("WG-03").unwrap();
    let fit = match outcome {
        ConfirmOutcome::Completed { fit: Some(fit) } => fit,
        other => panic!("Expected completed run with a fit, got {:?}", other),
    };
    assert!((fit.slope - 2.0).abs() < 1e-12);
    assert!((fit.offset - 0.5).abs() < 1e-12);
}

#[test]
fn test_abort_keeps_previous_fit_and_reset_clears_it() {
    let mut context = ConsoleContext::default();
    context.start_calibration_with("WG-01", &[0.0, 10.0]).unwrap();
    context.confirm_calibration_point("WG-01", 0.0).unwrap();
    context.confirm_calibration_point("WG-01", 10.0).unwrap();
    let original = context.calibration_fit("WG-01");
    assert!(original.is_some());

    context.start_calibration_with("WG-01", &[0.0, 10.0]).unwrap();
    context.confirm_calibration_point("WG-01", 50.0).unwrap();
    context.abort_calibration("WG-01").unwrap();

    let calibration = context.sensor_calibration("WG-01").unwrap();
    assert_eq!(calibration.status, CalibrationStatus::Idle);
    assert_eq!(calibration.fit, original);
    assert_eq!(calibration.points.len(), 2);

    context.reset_sensor("WG-01").unwrap();
    assert!(context.sensor_calibration("WG-01").is_none());
    assert!(context.calibration_fit("WG-01").is_none());
}

#[test]
fn test_invalid_inputs_rejected() {
    let mut context = ConsoleContext::default();

    assert_eq!(
        context.start_calibration_with("WG-01", &[]),
        Err(CalibrationError::EmptyTargets)
    );
    assert!(matches!(
        context.start_calibration_with("WG-01", &[0.0, f64::NAN]),
        Err(CalibrationError::InvalidTarget { index: 1, .. })
    ));

    context.start_calibration_with("WG-01", &[0.0, 10.0]).unwrap();
    assert!(matches!(
        context.confirm_calibration_point("WG-01", f64::INFINITY),
        Err(CalibrationError::InvalidMeasurement { .. })
    ));
    assert_eq!(
        context.calibration_progress("WG-01").unwrap().current_index,
        0
    );
}

#[test]
fn test_degenerate_targets_complete_without_fit() {
    let mut context = ConsoleContext::default();
    context.start_calibration_with("WG-01", &[5.0, 5.0]).unwrap();
    context.confirm_calibration_point("WG-01", 4.0).unwrap();
    let outcome = context.confirm_calibration_point("WG-01", 6.0).unwrap();

    assert_eq!(outcome, ConfirmOutcome::Completed { fit: None });
    let calibration = context.sensor_calibration("WG-01").unwrap();
    assert_eq!(calibration.status, CalibrationStatus::Completed);
    assert!(!calibration.is_calibrated());
}

#[test]
fn test_event_feed_reports_progress_and_errors() {
    let mut context = ConsoleContext::default();
    let mut rx = context.subscribe();

    context.start_calibration_with("WG-01", &[0.0, 10.0]).unwrap();
    context.confirm_calibration_point("WG-01", 0.0).unwrap();
    context.confirm_calibration_point("WG-01", 20.0).unwrap();
    let _ = context.confirm_calibration_point("WG-01", 1.0);

    let events = drain(&mut rx);
    assert_eq!(events.len(), 5);
    assert!(matches!(events[0], ConsoleEvent::CalibrationProgress(_)));
    assert!(matches!(events[1], ConsoleEvent::CalibrationProgress(_)));
    assert!(matches!(events[2], ConsoleEvent::CalibrationProgress(_)));
    assert!(matches!(
        &events[3],
        ConsoleEvent::CalibrationCompleted { sensor_id, fit: Some(_) } if sensor_id == "WG-01"
    ));
    assert!(matches!(events[4], ConsoleEvent::Error { code: 2005, .. }));
}
