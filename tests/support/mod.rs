// This is free and unencumbered software released into the public domain.

//! In-memory camera service that journals every native call and release.

#![allow(dead_code)]

use ndcam::shared::{
    CameraListener, CameraResult, CameraService, CameraStatus, LensFacing, RequestMode,
    RequestTemplate,
};
use std::{
    borrow::Cow,
    cell::{Cell, RefCell},
    rc::Rc,
    sync::Arc,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    ListIds,
    Characteristics(String),
    FreeMetadata(String),
    OpenDevice(String),
    CloseDevice(String),
    CreateSession(String),
    CloseSession(String),
    Submit(String, RequestMode, RequestTemplate, i32),
    StopRepeating(String),
    AbortCaptures(String),
    DeleteManager,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    ListIds,
    Characteristics,
    OpenDevice,
    CreateSession,
    Submit,
    StopRepeating,
    AbortCaptures,
}

pub type Journal = Rc<RefCell<Vec<Call>>>;

pub struct FakeMetadata {
    id: String,
    facing: Option<LensFacing>,
    journal: Journal,
}

impl Drop for FakeMetadata {
    fn drop(&mut self) {
        self.journal.borrow_mut().push(Call::FreeMetadata(self.id.clone()));
    }
}

pub struct FakeDevice {
    pub id: String,
    pub listener: Arc<CameraListener>,
    journal: Journal,
}

impl Drop for FakeDevice {
    fn drop(&mut self) {
        self.journal.borrow_mut().push(Call::CloseDevice(self.id.clone()));
    }
}

pub struct FakeSession {
    id: String,
    listener: Arc<CameraListener>,
    journal: Journal,
}

impl Drop for FakeSession {
    fn drop(&mut self) {
        self.journal.borrow_mut().push(Call::CloseSession(self.id.clone()));
        self.listener.on_session_closed();
    }
}

pub struct FakeWindow;

pub struct FakeService {
    cameras: Vec<(String, Option<LensFacing>)>,
    journal: Journal,
    failure: Cell<Option<(Op, CameraStatus)>>,
    next_sequence: Cell<i32>,
    device_listeners: RefCell<Vec<(String, Arc<CameraListener>)>>,
}

impl FakeService {
    pub fn new(cameras: &[(&str, Option<LensFacing>)]) -> (Self, Journal) {
        let journal = Journal::default();
        let service = Self {
            cameras: cameras
                .iter()
                .map(|(id, facing)| (id.to_string(), *facing))
                .collect(),
            journal: Rc::clone(&journal),
            failure: Cell::new(None),
            next_sequence: Cell::new(1),
            device_listeners: RefCell::default(),
        };
        (service, journal)
    }

    /// Two built-in cameras: "0" faces back, "1" faces front.
    pub fn phone() -> (Self, Journal) {
        Self::new(&[("0", Some(LensFacing::Back)), ("1", Some(LensFacing::Front))])
    }

    /// Makes the next call of `op` fail with `status`.
    pub fn fail_next(&self, op: Op, status: CameraStatus) {
        self.failure.set(Some((op, status)));
    }

    fn check(&self, op: Op) -> CameraResult {
        match self.failure.get() {
            Some((failing, status)) if failing == op => {
                self.failure.set(None);
                Err(status)
            },
            _ => Ok(()),
        }
    }

    /// Callback context of the most recent `open_device` for `camera_id`.
    /// It stays reachable after the device closes, like a late platform callback.
    pub fn device_listener(&self, camera_id: &str) -> Option<Arc<CameraListener>> {
        self.device_listeners
            .borrow()
            .iter()
            .rev()
            .find(|(id, _)| id == camera_id)
            .map(|(_, listener)| Arc::clone(listener))
    }

    fn record(&self, call: Call) {
        self.journal.borrow_mut().push(call);
    }
}

impl Drop for FakeService {
    fn drop(&mut self) {
        self.record(Call::DeleteManager);
    }
}

impl dogma::Named for FakeService {
    fn name(&self) -> Cow<'_, str> {
        "fake".into()
    }
}

impl CameraService for FakeService {
    type Metadata = FakeMetadata;
    type Device = FakeDevice;
    type Session = FakeSession;
    type Window = FakeWindow;

    fn camera_ids(&self) -> CameraResult<Vec<String>> {
        self.check(Op::ListIds)?;
        self.record(Call::ListIds);
        Ok(self.cameras.iter().map(|(id, _)| id.clone()).collect())
    }

    fn characteristics(&self, camera_id: &str) -> CameraResult<FakeMetadata> {
        self.check(Op::Characteristics)?;
        self.record(Call::Characteristics(camera_id.into()));
        let facing = self
            .cameras
            .iter()
            .find(|(id, _)| id == camera_id)
            .and_then(|(_, facing)| *facing);
        Ok(FakeMetadata {
            id: camera_id.into(),
            facing,
            journal: Rc::clone(&self.journal),
        })
    }

    fn lens_facing(&self, metadata: &FakeMetadata) -> CameraResult<LensFacing> {
        metadata.facing.ok_or(CameraStatus::MetadataNotFound)
    }

    fn open_device(
        &self,
        camera_id: &str,
        listener: Arc<CameraListener>,
    ) -> CameraResult<FakeDevice> {
        self.check(Op::OpenDevice)?;
        self.record(Call::OpenDevice(camera_id.into()));
        self.device_listeners
            .borrow_mut()
            .push((camera_id.into(), Arc::clone(&listener)));
        Ok(FakeDevice {
            id: camera_id.into(),
            listener,
            journal: Rc::clone(&self.journal),
        })
    }

    fn create_session(
        &self,
        device: &mut FakeDevice,
        _window: &FakeWindow,
        listener: Arc<CameraListener>,
    ) -> CameraResult<FakeSession> {
        self.check(Op::CreateSession)?;
        self.record(Call::CreateSession(device.id.clone()));
        listener.on_session_ready();
        Ok(FakeSession {
            id: device.id.clone(),
            listener,
            journal: Rc::clone(&self.journal),
        })
    }

    fn submit(
        &self,
        device: &FakeDevice,
        session: &mut FakeSession,
        mode: RequestMode,
        template: RequestTemplate,
    ) -> CameraResult<i32> {
        self.check(Op::Submit)?;
        let sequence_id = self.next_sequence.get();
        self.next_sequence.set(sequence_id + 1);
        self.record(Call::Submit(device.id.clone(), mode, template, sequence_id));
        session.listener.on_session_active();
        Ok(sequence_id)
    }

    fn stop_repeating(&self, session: &mut FakeSession) -> CameraResult {
        self.check(Op::StopRepeating)?;
        self.record(Call::StopRepeating(session.id.clone()));
        Ok(())
    }

    fn abort_captures(&self, session: &mut FakeSession) -> CameraResult {
        self.check(Op::AbortCaptures)?;
        self.record(Call::AbortCaptures(session.id.clone()));
        Ok(())
    }
}

/// Journal entries after the first `skip`, for checking one step at a time.
pub fn calls_since(journal: &Journal, skip: usize) -> Vec<Call> {
    journal.borrow()[skip..].to_vec()
}
