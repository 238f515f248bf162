// This is free and unencumbered software released into the public domain.

mod support;

use ndcam::shared::{
    CameraError, CameraEvent, CameraGroup, CameraStatus, DeviceInfo, GroupConfig, LensFacing,
    MAX_CAMERA_COUNT, RequestMode, RequestTemplate,
};
use support::{Call, FakeService, FakeWindow, Op, calls_since};

fn call(f: fn(String) -> Call, id: &str) -> Call {
    f(id.to_string())
}

#[test]
fn init_caches_metadata_for_every_camera() {
    let (service, journal) = FakeService::phone();
    let group = CameraGroup::init(service, GroupConfig::default()).unwrap();

    assert_eq!(group.device_count(), 2);
    assert_eq!(
        *journal.borrow(),
        vec![
            Call::ListIds,
            call(Call::Characteristics, "0"),
            call(Call::Characteristics, "1"),
        ]
    );
    assert_eq!(
        group.devices(),
        vec![
            DeviceInfo {
                index: 0,
                id: "0".into(),
                facing: Some(LensFacing::Back)
            },
            DeviceInfo {
                index: 1,
                id: "1".into(),
                facing: Some(LensFacing::Front)
            },
        ]
    );
}

#[test]
fn table_is_bounded() {
    let ids = ["0", "1", "2", "3", "4", "5"];
    let cameras: Vec<_> = ids.iter().map(|id| (*id, Some(LensFacing::External))).collect();
    let (service, _journal) = FakeService::new(&cameras);
    let group = CameraGroup::init(service, GroupConfig::default()).unwrap();

    assert_eq!(group.device_count(), MAX_CAMERA_COUNT);
    assert_eq!(group.camera_id(3), Some("3"));
    assert_eq!(group.camera_id(4), None);
}

#[test]
fn init_failure_releases_what_was_acquired() {
    let (service, journal) = FakeService::phone();
    service.fail_next(Op::Characteristics, CameraStatus::CameraService);
    let err = CameraGroup::init(service, GroupConfig::default()).unwrap_err();

    assert_eq!(err.camera_status(), Some(CameraStatus::CameraService));
    assert_eq!(*journal.borrow(), vec![Call::ListIds, Call::DeleteManager]);
}

#[test]
fn init_reports_id_list_failure() {
    let (service, journal) = FakeService::phone();
    service.fail_next(Op::ListIds, CameraStatus::PermissionDenied);
    let err = CameraGroup::init(service, GroupConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        CameraError::Status {
            context: "ACameraManager_getCameraIdList",
            status: CameraStatus::PermissionDenied
        }
    ));
    assert_eq!(*journal.borrow(), vec![Call::DeleteManager]);
}

#[test]
fn missing_facing_is_reported_not_guessed() {
    let (service, _journal) = FakeService::new(&[("9", None)]);
    let group = CameraGroup::init(service, GroupConfig::default()).unwrap();

    assert_eq!(group.devices()[0].facing, None);
    let err = group.facing(0).unwrap_err();
    assert_eq!(err.camera_status(), Some(CameraStatus::MetadataNotFound));
}

#[test]
fn out_of_range_index_is_rejected() {
    let (service, journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    let before = journal.borrow().len();

    assert!(matches!(group.open_device(2), Err(CameraError::InvalidDevice(2))));
    assert!(matches!(group.close_device(7), Err(CameraError::InvalidDevice(7))));
    assert!(matches!(group.stop_repeat(4), Err(CameraError::InvalidDevice(4))));
    assert!(matches!(group.facing(2), Err(CameraError::InvalidDevice(2))));
    assert!(!group.is_open(9));
    assert_eq!(group.sequence_id(9), None);
    assert!(calls_since(&journal, before).is_empty());
}

#[test]
fn reopening_closes_the_previous_device_first() {
    let (service, journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    let before = journal.borrow().len();

    group.open_device(0).unwrap();
    group.start_repeat(0, &FakeWindow).unwrap();
    group.open_device(0).unwrap();

    assert_eq!(
        calls_since(&journal, before),
        vec![
            call(Call::OpenDevice, "0"),
            call(Call::CreateSession, "0"),
            Call::Submit("0".into(), RequestMode::Repeat, RequestTemplate::Preview, 1),
            call(Call::CloseSession, "0"),
            call(Call::CloseDevice, "0"),
            call(Call::OpenDevice, "0"),
        ]
    );
    assert!(group.is_open(0));
    assert!(!group.has_session(0));
}

#[test]
fn session_requires_an_open_device() {
    let (service, _journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();

    assert!(matches!(
        group.start_capture(1, &FakeWindow),
        Err(CameraError::DeviceNotOpen(1))
    ));
}

#[test]
fn repeat_lifecycle_stops_before_closing() {
    let (service, journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    group.open_device(1).unwrap();
    let before = journal.borrow().len();

    group.start_repeat(1, &FakeWindow).unwrap();
    assert!(group.has_session(1));
    assert_eq!(group.sequence_id(1), Some(1));

    group.stop_repeat(1).unwrap();
    assert!(!group.has_session(1));
    assert!(group.is_open(1));

    assert_eq!(
        calls_since(&journal, before),
        vec![
            call(Call::CreateSession, "1"),
            Call::Submit("1".into(), RequestMode::Repeat, RequestTemplate::Preview, 1),
            call(Call::StopRepeating, "1"),
            call(Call::CloseSession, "1"),
        ]
    );
}

#[test]
fn capture_uses_the_configured_template_and_aborts_on_stop() {
    let (service, journal) = FakeService::phone();
    let config = GroupConfig::new().with_capture_template(RequestTemplate::ZeroShutterLag);
    let mut group = CameraGroup::init(service, config).unwrap();
    group.open_device(0).unwrap();
    let before = journal.borrow().len();

    group.start_capture(0, &FakeWindow).unwrap();
    group.stop_capture(0).unwrap();

    assert_eq!(
        calls_since(&journal, before),
        vec![
            call(Call::CreateSession, "0"),
            Call::Submit("0".into(), RequestMode::Capture, RequestTemplate::ZeroShutterLag, 1),
            call(Call::AbortCaptures, "0"),
            call(Call::CloseSession, "0"),
        ]
    );
}

#[test]
fn starting_again_replaces_the_session() {
    let (service, journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    group.open_device(0).unwrap();
    group.start_repeat(0, &FakeWindow).unwrap();
    let before = journal.borrow().len();

    group.start_capture(0, &FakeWindow).unwrap();

    assert_eq!(
        calls_since(&journal, before),
        vec![
            call(Call::CloseSession, "0"),
            call(Call::CreateSession, "0"),
            Call::Submit("0".into(), RequestMode::Capture, RequestTemplate::StillCapture, 2),
        ]
    );
    assert_eq!(group.sequence_id(0), Some(2));
}

#[test]
fn failed_submit_drops_the_new_session() {
    let (service, journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    group.open_device(0).unwrap();
    group.service().fail_next(Op::Submit, CameraStatus::StreamConfigureFail);
    let before = journal.borrow().len();

    let err = group.start_repeat(0, &FakeWindow).unwrap_err();

    assert!(matches!(
        err,
        CameraError::Status {
            context: "ACameraCaptureSession_setRepeatingRequest",
            status: CameraStatus::StreamConfigureFail
        }
    ));
    assert_eq!(
        calls_since(&journal, before),
        vec![call(Call::CreateSession, "0"), call(Call::CloseSession, "0")]
    );
    assert!(!group.has_session(0));
    assert!(group.is_open(0));
}

#[test]
fn stop_errors_still_release_the_session() {
    let (service, journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    group.open_device(0).unwrap();
    group.start_repeat(0, &FakeWindow).unwrap();
    group.service().fail_next(Op::StopRepeating, CameraStatus::SessionClosed);
    let before = journal.borrow().len();

    group.stop_repeat(0).unwrap();

    assert_eq!(calls_since(&journal, before), vec![call(Call::CloseSession, "0")]);
    assert!(!group.has_session(0));
}

#[test]
fn stopping_without_a_session_is_a_no_op() {
    let (service, journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    let before = journal.borrow().len();

    group.stop_repeat(0).unwrap();
    group.stop_capture(1).unwrap();
    group.close_device(0).unwrap();

    assert!(calls_since(&journal, before).is_empty());
}

#[test]
fn device_failures_close_the_slot() {
    let (service, journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    group.open_device(0).unwrap();
    group.open_device(1).unwrap();
    group.start_repeat(1, &FakeWindow).unwrap();
    let listener = group.service().device_listener("1").unwrap();

    group.handle_event(&CameraEvent::DeviceError {
        slot: 1,
        generation: listener.generation(),
        code: 4,
    });

    assert!(group.is_open(0));
    assert!(!group.is_open(1));
    assert!(!group.has_session(1));
    let tail = calls_since(&journal, journal.borrow().len() - 2);
    assert_eq!(tail, vec![call(Call::CloseSession, "1"), call(Call::CloseDevice, "1")]);
}

#[test]
fn device_error_callback_closes_the_slot_on_pump() {
    let (service, journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    group.open_device(0).unwrap();
    group.open_device(1).unwrap();
    group.start_repeat(1, &FakeWindow).unwrap();
    let listener = group.service().device_listener("1").unwrap();
    group.pump_events();
    let before = journal.borrow().len();

    listener.on_device_error("1", 4);
    let events = group.pump_events();

    assert!(events.contains(&CameraEvent::DeviceError {
        slot: 1,
        generation: listener.generation(),
        code: 4,
    }));
    assert!(group.is_open(0));
    assert!(!group.is_open(1));
    assert_eq!(
        calls_since(&journal, before),
        vec![call(Call::CloseSession, "1"), call(Call::CloseDevice, "1")]
    );
}

#[test]
fn failure_of_a_replaced_device_leaves_the_new_one_open() {
    let (service, _journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    group.open_device(0).unwrap();
    let first = group.service().device_listener("0").unwrap();

    first.on_device_disconnected("0");
    group.open_device(0).unwrap();
    let second = group.service().device_listener("0").unwrap();
    let events = group.pump_events();

    assert_ne!(first.generation(), second.generation());
    assert_eq!(
        events,
        vec![CameraEvent::DeviceDisconnected {
            slot: 0,
            generation: first.generation(),
        }]
    );
    assert!(group.is_open(0));

    second.on_device_disconnected("0");
    group.pump_events();
    assert!(!group.is_open(0));
}

#[test]
fn disconnect_is_not_lost_behind_a_full_event_queue() {
    let (service, journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::new().with_event_capacity(8)).unwrap();
    group.open_device(0).unwrap();
    group.start_repeat(0, &FakeWindow).unwrap();
    let listener = group.service().device_listener("0").unwrap();

    for frame in 0..64 {
        listener.on_capture_completed(frame);
    }
    listener.on_device_disconnected("0");
    let before = journal.borrow().len();
    let events = group.pump_events();

    assert_eq!(events.len(), 8);
    assert!(!events.iter().any(CameraEvent::invalidates_device));
    assert!(!group.is_open(0));
    assert!(!group.has_session(0));
    assert_eq!(
        calls_since(&journal, before),
        vec![call(Call::CloseSession, "0"), call(Call::CloseDevice, "0")]
    );
}

#[test]
fn sequence_id_is_unset_until_a_request_is_submitted() {
    let (service, _journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    group.open_device(0).unwrap();
    assert_eq!(group.sequence_id(0), None);

    group.start_capture(0, &FakeWindow).unwrap();
    group.stop_capture(0).unwrap();
    assert_eq!(group.sequence_id(0), Some(1));

    group.release();
    assert_eq!(group.sequence_id(0), None);
}

#[test]
fn pump_events_returns_callbacks_in_order() {
    let (service, _journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    group.open_device(0).unwrap();
    group.start_repeat(0, &FakeWindow).unwrap();
    group.stop_repeat(0).unwrap();

    assert_eq!(
        group.pump_events(),
        vec![
            CameraEvent::SessionReady { slot: 0 },
            CameraEvent::SessionActive { slot: 0 },
            CameraEvent::SessionClosed { slot: 0 },
        ]
    );
    assert!(group.pump_events().is_empty());
    assert!(group.is_open(0));
}

#[test]
fn drop_tears_down_sessions_devices_metadata_then_manager() {
    let (service, journal) = FakeService::phone();
    {
        let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
        group.open_device(0).unwrap();
        group.open_device(1).unwrap();
        group.start_repeat(0, &FakeWindow).unwrap();
        group.start_capture(1, &FakeWindow).unwrap();
        journal.borrow_mut().clear();
    }

    assert_eq!(
        *journal.borrow(),
        vec![
            call(Call::CloseSession, "0"),
            call(Call::CloseSession, "1"),
            call(Call::CloseDevice, "0"),
            call(Call::CloseDevice, "1"),
            call(Call::FreeMetadata, "0"),
            call(Call::FreeMetadata, "1"),
            Call::DeleteManager,
        ]
    );
}

#[test]
fn release_is_idempotent() {
    let (service, journal) = FakeService::phone();
    let mut group = CameraGroup::init(service, GroupConfig::default()).unwrap();
    group.open_device(0).unwrap();

    group.release();
    let after_first = journal.borrow().len();
    group.release();

    assert_eq!(journal.borrow().len(), after_first);
    assert_eq!(group.device_count(), 0);
    assert!(matches!(group.open_device(0), Err(CameraError::InvalidDevice(0))));
}
