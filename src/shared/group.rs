// This is free and unencumbered software released into the public domain.

use super::{
    CameraError, CameraEvent, CameraListener, CameraService, GroupConfig, LensFacing, RequestMode,
};
use alloc::sync::Arc;
use std::sync::mpsc::{Receiver, SyncSender, sync_channel};
use tracing::{debug, error, info, warn};

/// Size of the device table. Two covers back + front; the rest is room for
/// external cameras.
pub const MAX_CAMERA_COUNT: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceInfo {
    pub index: u16,
    pub id: String,
    pub facing: Option<LensFacing>,
}

/// Fixed-size table of camera slots and the native handles they own.
///
/// Per slot the group tracks cached characteristics, the open device, the
/// active capture session and the last capture sequence id. Teardown always
/// runs sessions, then devices, then metadata; the manager (`S`) goes last.
///
/// Every `open_device` bumps the slot's generation. Device failures are only
/// applied when they come from the current generation.
pub struct CameraGroup<S: CameraService> {
    sessions: [Option<S::Session>; MAX_CAMERA_COUNT],
    devices: [Option<S::Device>; MAX_CAMERA_COUNT],
    listeners: [Option<Arc<CameraListener>>; MAX_CAMERA_COUNT],
    generations: [u32; MAX_CAMERA_COUNT],
    metadata: [Option<S::Metadata>; MAX_CAMERA_COUNT],
    sequence_ids: [Option<i32>; MAX_CAMERA_COUNT],
    ids: Vec<String>,
    events_tx: SyncSender<CameraEvent>,
    events_rx: Receiver<CameraEvent>,
    config: GroupConfig,
    service: S,
}

impl<S: CameraService> CameraGroup<S> {
    /// Enumerates cameras and caches their characteristics.
    pub fn init(service: S, config: GroupConfig) -> Result<Self, CameraError> {
        let mut ids = service
            .camera_ids()
            .map_err(|status| CameraError::status("ACameraManager_getCameraIdList", status))?;

        if ids.len() > MAX_CAMERA_COUNT {
            warn!(
                target: "ndcam",
                found = ids.len(),
                kept = MAX_CAMERA_COUNT,
                "more cameras than table slots, ignoring the rest"
            );
            ids.truncate(MAX_CAMERA_COUNT);
        }

        let (events_tx, events_rx) = sync_channel(config.event_capacity.max(1));
        let mut group = Self {
            sessions: core::array::from_fn(|_| None),
            devices: core::array::from_fn(|_| None),
            listeners: core::array::from_fn(|_| None),
            generations: [0; MAX_CAMERA_COUNT],
            metadata: core::array::from_fn(|_| None),
            sequence_ids: [None; MAX_CAMERA_COUNT],
            ids,
            events_tx,
            events_rx,
            config,
            service,
        };

        for (slot, id) in group.ids.iter().enumerate() {
            match group.service.characteristics(id) {
                Ok(metadata) => group.metadata[slot] = Some(metadata),
                Err(status) => {
                    error!(target: "ndcam", camera_id = %id, %status, "ACameraManager_getCameraCharacteristics");
                    return Err(CameraError::status(
                        "ACameraManager_getCameraCharacteristics",
                        status,
                    ));
                },
            }
        }

        info!(
            target: "ndcam",
            backend = %group.service.name(),
            count = group.ids.len(),
            "camera group initialized"
        );
        Ok(group)
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn config(&self) -> &GroupConfig {
        &self.config
    }

    pub fn device_count(&self) -> usize {
        self.ids.len()
    }

    pub fn camera_id(&self, index: u16) -> Option<&str> {
        self.ids.get(index as usize).map(String::as_str)
    }

    pub fn devices(&self) -> Vec<DeviceInfo> {
        self.ids
            .iter()
            .enumerate()
            .map(|(slot, id)| DeviceInfo {
                index: slot as u16,
                id: id.clone(),
                facing: self.facing(slot as u16).ok(),
            })
            .collect()
    }

    pub fn facing(&self, index: u16) -> Result<LensFacing, CameraError> {
        let slot = self.slot(index)?;
        let metadata = self.metadata[slot]
            .as_ref()
            .ok_or(CameraError::InvalidDevice(index))?;
        self.service
            .lens_facing(metadata)
            .map_err(|status| CameraError::status("ACameraMetadata_getConstEntry", status))
    }

    /// Opens the camera in `index`, closing whatever the slot held before.
    pub fn open_device(&mut self, index: u16) -> Result<(), CameraError> {
        let slot = self.slot(index)?;
        self.close_slot(slot);

        let generation = self.generations[slot].wrapping_add(1);
        self.generations[slot] = generation;
        let listener = Arc::new(CameraListener::new(index, generation, self.events_tx.clone()));
        let device = self
            .service
            .open_device(&self.ids[slot], Arc::clone(&listener))
            .map_err(|status| CameraError::status("ACameraManager_openCamera", status))?;
        self.devices[slot] = Some(device);
        self.listeners[slot] = Some(listener);

        info!(target: "ndcam", index, generation, camera_id = %self.ids[slot], "device opened");
        Ok(())
    }

    /// Closes the session and then the device. Cached metadata is kept.
    pub fn close_device(&mut self, index: u16) -> Result<(), CameraError> {
        let slot = self.slot(index)?;
        self.close_slot(slot);
        Ok(())
    }

    pub fn start_repeat(&mut self, index: u16, window: &S::Window) -> Result<(), CameraError> {
        self.start(index, window, RequestMode::Repeat)
    }

    pub fn stop_repeat(&mut self, index: u16) -> Result<(), CameraError> {
        let slot = self.slot(index)?;
        let Some(session) = self.sessions[slot].as_mut() else {
            debug!(target: "ndcam", index, "stop_repeat without a session");
            return Ok(());
        };
        if let Err(status) = self.service.stop_repeating(session) {
            warn!(target: "ndcam", index, %status, "ACameraCaptureSession_stopRepeating");
        }
        self.close_session(slot);
        Ok(())
    }

    pub fn start_capture(&mut self, index: u16, window: &S::Window) -> Result<(), CameraError> {
        self.start(index, window, RequestMode::Capture)
    }

    pub fn stop_capture(&mut self, index: u16) -> Result<(), CameraError> {
        let slot = self.slot(index)?;
        let Some(session) = self.sessions[slot].as_mut() else {
            debug!(target: "ndcam", index, "stop_capture without a session");
            return Ok(());
        };
        if let Err(status) = self.service.abort_captures(session) {
            warn!(target: "ndcam", index, %status, "ACameraCaptureSession_abortCaptures");
        }
        self.close_session(slot);
        Ok(())
    }

    pub fn is_open(&self, index: u16) -> bool {
        self.slot(index)
            .map(|slot| self.devices[slot].is_some())
            .unwrap_or(false)
    }

    pub fn has_session(&self, index: u16) -> bool {
        self.slot(index)
            .map(|slot| self.sessions[slot].is_some())
            .unwrap_or(false)
    }

    /// Sequence id returned by the last submitted request on this slot.
    /// `None` until a request has been submitted.
    pub fn sequence_id(&self, index: u16) -> Option<i32> {
        self.slot(index).ok().and_then(|slot| self.sequence_ids[slot])
    }

    pub fn events(&self) -> &Receiver<CameraEvent> {
        &self.events_rx
    }

    /// Applies the table-side effect of a callback event.
    ///
    /// Failures raised by an earlier opening of the slot are ignored.
    pub fn handle_event(&mut self, event: &CameraEvent) {
        let Some(generation) = event.generation() else {
            return;
        };
        let index = event.slot();
        let Ok(slot) = self.slot(index) else {
            return;
        };
        if self.devices[slot].is_none() {
            return;
        }
        if generation != self.generations[slot] {
            debug!(
                target: "ndcam",
                index,
                generation,
                current = self.generations[slot],
                "ignoring failure of a closed device"
            );
            return;
        }
        warn!(target: "ndcam", index, ?event, "closing failed device");
        self.close_slot(slot);
    }

    /// Drains pending callback events, applies them, and hands them back.
    ///
    /// Also closes any slot whose device listener latched a failure, even if
    /// the matching event was dropped on a full queue.
    pub fn pump_events(&mut self) -> Vec<CameraEvent> {
        let events: Vec<CameraEvent> = self.events_rx.try_iter().collect();
        for event in &events {
            self.handle_event(event);
        }
        for slot in 0..self.ids.len() {
            let failed = self.listeners[slot]
                .as_ref()
                .is_some_and(|listener| listener.device_failed());
            if failed {
                warn!(target: "ndcam", index = slot, "closing failed device");
                self.close_slot(slot);
            }
        }
        events
    }

    /// Releases every session, device and metadata handle, in that order.
    pub fn release(&mut self) {
        for session in self.sessions.iter_mut() {
            drop(session.take());
        }
        for device in self.devices.iter_mut() {
            drop(device.take());
        }
        self.listeners = core::array::from_fn(|_| None);
        for metadata in self.metadata.iter_mut() {
            drop(metadata.take());
        }
        self.ids.clear();
        self.sequence_ids = [None; MAX_CAMERA_COUNT];
        debug!(target: "ndcam", "camera group released");
    }

    fn start(
        &mut self,
        index: u16,
        window: &S::Window,
        mode: RequestMode,
    ) -> Result<(), CameraError> {
        let slot = self.slot(index)?;
        self.close_session(slot);

        let (template, context) = match mode {
            RequestMode::Repeat => (
                self.config.repeat_template,
                "ACameraCaptureSession_setRepeatingRequest",
            ),
            RequestMode::Capture => (self.config.capture_template, "ACameraCaptureSession_capture"),
        };

        let device = self.devices[slot]
            .as_mut()
            .ok_or(CameraError::DeviceNotOpen(index))?;
        let listener = Arc::new(CameraListener::new(
            index,
            self.generations[slot],
            self.events_tx.clone(),
        ));
        let mut session = self
            .service
            .create_session(device, window, listener)
            .map_err(|status| CameraError::status("ACameraDevice_createCaptureSession", status))?;

        let sequence_id = match self
            .service
            .submit(device, &mut session, mode, template)
        {
            Ok(sequence_id) => sequence_id,
            Err(status) => {
                drop(session);
                return Err(CameraError::status(context, status));
            },
        };

        self.sessions[slot] = Some(session);
        self.sequence_ids[slot] = Some(sequence_id);
        info!(target: "ndcam", index, ?mode, sequence_id, "capture session started");
        Ok(())
    }

    fn close_session(&mut self, slot: usize) {
        if let Some(session) = self.sessions[slot].take() {
            drop(session);
            debug!(target: "ndcam", index = slot, "session closed");
        }
    }

    fn close_slot(&mut self, slot: usize) {
        self.close_session(slot);
        if let Some(device) = self.devices[slot].take() {
            drop(device);
            info!(target: "ndcam", index = slot, "device closed");
        }
        self.listeners[slot] = None;
    }

    fn slot(&self, index: u16) -> Result<usize, CameraError> {
        let slot = index as usize;
        if slot < self.ids.len() {
            Ok(slot)
        } else {
            Err(CameraError::InvalidDevice(index))
        }
    }
}

impl<S: CameraService> Drop for CameraGroup<S> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<S: CameraService> core::fmt::Debug for CameraGroup<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CameraGroup")
            .field("backend", &self.service.name())
            .field("ids", &self.ids)
            .field("open", &self.devices.iter().map(Option::is_some).collect::<Vec<_>>())
            .field("sessions", &self.sessions.iter().map(Option::is_some).collect::<Vec<_>>())
            .field("sequence_ids", &self.sequence_ids)
            .finish()
    }
}
