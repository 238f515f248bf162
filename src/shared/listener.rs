// This is free and unencumbered software released into the public domain.

use super::CameraEvent;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{SyncSender, TrySendError},
};
use tracing::{debug, error, info, warn};

/// Callback context handed to the camera service for one table slot.
///
/// Every `on_*` method logs the callback and forwards it as a [`CameraEvent`].
/// Forwarding never blocks: the platform invokes these from its own threads.
/// Device failures are also latched in a flag, which survives a full queue.
#[derive(Debug)]
pub struct CameraListener {
    slot: u16,
    generation: u32,
    events: SyncSender<CameraEvent>,
    device_failed: AtomicBool,
}

impl CameraListener {
    pub fn new(slot: u16, generation: u32, events: SyncSender<CameraEvent>) -> Self {
        Self {
            slot,
            generation,
            events,
            device_failed: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn slot(&self) -> u16 {
        self.slot
    }

    /// Which opening of the slot's device this listener belongs to.
    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether the device reported a disconnect or a fatal error.
    pub fn device_failed(&self) -> bool {
        self.device_failed.load(Ordering::Acquire)
    }

    fn forward(&self, event: CameraEvent) {
        match self.events.try_send(event) {
            Ok(()) => {},
            Err(TrySendError::Full(event)) => {
                debug!(target: "ndcam", slot = self.slot, ?event, "event queue full, dropping");
            },
            Err(TrySendError::Disconnected(_)) => {},
        }
    }

    pub fn on_device_disconnected(&self, camera_id: &str) {
        error!(target: "ndcam", slot = self.slot, camera_id, "on_device_disconnect");
        self.device_failed.store(true, Ordering::Release);
        self.forward(CameraEvent::DeviceDisconnected {
            slot: self.slot,
            generation: self.generation,
        });
    }

    pub fn on_device_error(&self, camera_id: &str, code: i32) {
        error!(target: "ndcam", slot = self.slot, camera_id, code, "on_device_error");
        self.device_failed.store(true, Ordering::Release);
        self.forward(CameraEvent::DeviceError {
            slot: self.slot,
            generation: self.generation,
            code,
        });
    }

    pub fn on_session_active(&self) {
        info!(target: "ndcam", slot = self.slot, "on_session_active");
        self.forward(CameraEvent::SessionActive { slot: self.slot });
    }

    pub fn on_session_ready(&self) {
        info!(target: "ndcam", slot = self.slot, "on_session_ready");
        self.forward(CameraEvent::SessionReady { slot: self.slot });
    }

    pub fn on_session_closed(&self) {
        warn!(target: "ndcam", slot = self.slot, "on_session_closed");
        self.forward(CameraEvent::SessionClosed { slot: self.slot });
    }

    pub fn on_capture_started(&self, timestamp: i64) {
        debug!(target: "ndcam", slot = self.slot, timestamp, "on_capture_started");
        self.forward(CameraEvent::CaptureStarted {
            slot: self.slot,
            timestamp,
        });
    }

    /// `timestamp` is `ACAMERA_SENSOR_TIMESTAMP` of the partial result, 0 if absent.
    pub fn on_capture_progressed(&self, timestamp: i64) {
        debug!(target: "ndcam", slot = self.slot, timestamp, "on_capture_progressed");
        self.forward(CameraEvent::CaptureProgressed {
            slot: self.slot,
            timestamp,
        });
    }

    pub fn on_capture_completed(&self, timestamp: i64) {
        debug!(target: "ndcam", slot = self.slot, timestamp, "on_capture_completed");
        self.forward(CameraEvent::CaptureCompleted {
            slot: self.slot,
            timestamp,
        });
    }

    pub fn on_capture_failed(
        &self,
        frame_number: i64,
        reason: i32,
        sequence_id: i32,
        image_captured: bool,
    ) {
        error!(
            target: "ndcam",
            slot = self.slot,
            frame_number,
            reason,
            sequence_id,
            image_captured,
            "on_capture_failed"
        );
        self.forward(CameraEvent::CaptureFailed {
            slot: self.slot,
            frame_number,
            reason,
            sequence_id,
            image_captured,
        });
    }

    pub fn on_capture_buffer_lost(&self, frame_number: i64) {
        error!(target: "ndcam", slot = self.slot, frame_number, "on_capture_buffer_lost");
        self.forward(CameraEvent::CaptureBufferLost {
            slot: self.slot,
            frame_number,
        });
    }

    pub fn on_capture_sequence_abort(&self, sequence_id: i32) {
        error!(target: "ndcam", slot = self.slot, sequence_id, "on_capture_sequence_abort");
        self.forward(CameraEvent::SequenceAborted {
            slot: self.slot,
            sequence_id,
        });
    }

    pub fn on_capture_sequence_complete(&self, sequence_id: i32, frame_number: i64) {
        debug!(
            target: "ndcam",
            slot = self.slot,
            sequence_id,
            frame_number,
            "on_capture_sequence_complete"
        );
        self.forward(CameraEvent::SequenceCompleted {
            slot: self.slot,
            sequence_id,
            frame_number,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::sync_channel;

    #[test]
    fn callbacks_are_tagged_with_the_slot() {
        let (tx, rx) = sync_channel(8);
        let listener = CameraListener::new(2, 5, tx);

        listener.on_device_error("0", 4);
        listener.on_capture_sequence_complete(11, 300);

        assert_eq!(
            rx.try_recv(),
            Ok(CameraEvent::DeviceError {
                slot: 2,
                generation: 5,
                code: 4
            })
        );
        assert_eq!(
            rx.try_recv(),
            Ok(CameraEvent::SequenceCompleted {
                slot: 2,
                sequence_id: 11,
                frame_number: 300
            })
        );
    }

    #[test]
    fn full_queue_drops_instead_of_blocking() {
        let (tx, rx) = sync_channel(1);
        let listener = CameraListener::new(0, 1, tx);

        listener.on_session_active();
        listener.on_session_ready();
        listener.on_session_closed();

        assert_eq!(rx.try_recv(), Ok(CameraEvent::SessionActive { slot: 0 }));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closed_receiver_is_ignored() {
        let (tx, rx) = sync_channel(1);
        drop(rx);
        let listener = CameraListener::new(1, 1, tx);
        listener.on_capture_failed(5, 0, 3, false);
        listener.on_capture_buffer_lost(6);
        assert!(!listener.device_failed());
    }

    #[test]
    fn device_failure_is_latched_when_the_queue_is_full() {
        let (tx, rx) = sync_channel(1);
        let listener = CameraListener::new(0, 1, tx);

        listener.on_capture_completed(10);
        assert!(!listener.device_failed());
        listener.on_device_disconnected("0");

        assert!(listener.device_failed());
        assert_eq!(
            rx.try_recv(),
            Ok(CameraEvent::CaptureCompleted {
                slot: 0,
                timestamp: 10
            })
        );
        assert!(rx.try_recv().is_err());
    }
}
