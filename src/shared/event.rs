// This is free and unencumbered software released into the public domain.

/// Which kind of request a session was started with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestMode {
    Repeat,
    Capture,
}

/// A platform callback, tagged with the table slot it belongs to.
///
/// Device events also carry the generation of the device that raised them,
/// so a failure reported by a device that was since re-opened can be told
/// apart from one of the current device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CameraEvent {
    DeviceDisconnected {
        slot: u16,
        generation: u32,
    },
    DeviceError {
        slot: u16,
        generation: u32,
        code: i32,
    },
    SessionActive {
        slot: u16,
    },
    SessionReady {
        slot: u16,
    },
    SessionClosed {
        slot: u16,
    },
    CaptureStarted {
        slot: u16,
        timestamp: i64,
    },
    CaptureProgressed {
        slot: u16,
        timestamp: i64,
    },
    CaptureCompleted {
        slot: u16,
        timestamp: i64,
    },
    CaptureFailed {
        slot: u16,
        frame_number: i64,
        reason: i32,
        sequence_id: i32,
        image_captured: bool,
    },
    CaptureBufferLost {
        slot: u16,
        frame_number: i64,
    },
    SequenceAborted {
        slot: u16,
        sequence_id: i32,
    },
    SequenceCompleted {
        slot: u16,
        sequence_id: i32,
        frame_number: i64,
    },
}

impl CameraEvent {
    pub fn slot(&self) -> u16 {
        use CameraEvent::*;
        match *self {
            DeviceDisconnected { slot, .. }
            | DeviceError { slot, .. }
            | SessionActive { slot }
            | SessionReady { slot }
            | SessionClosed { slot }
            | CaptureStarted { slot, .. }
            | CaptureProgressed { slot, .. }
            | CaptureCompleted { slot, .. }
            | CaptureFailed { slot, .. }
            | CaptureBufferLost { slot, .. }
            | SequenceAborted { slot, .. }
            | SequenceCompleted { slot, .. } => slot,
        }
    }

    /// Open generation of the device behind a device-level event.
    pub fn generation(&self) -> Option<u32> {
        match *self {
            CameraEvent::DeviceDisconnected { generation, .. }
            | CameraEvent::DeviceError { generation, .. } => Some(generation),
            _ => None,
        }
    }

    /// Device-level failures after which the platform requires a re-open.
    pub fn invalidates_device(&self) -> bool {
        matches!(
            self,
            CameraEvent::DeviceDisconnected { .. } | CameraEvent::DeviceError { .. }
        )
    }
}
