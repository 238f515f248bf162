// This is free and unencumbered software released into the public domain.

use super::CameraStatus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CameraError {
    #[error("no suitable camera backend available")]
    NoDriver,

    #[error("no camera device available")]
    NoCamera,

    #[error("camera index {0} is out of range")]
    InvalidDevice(u16),

    #[error("camera {0} is not open")]
    DeviceNotOpen(u16),

    #[error("camera {0} has no capture session")]
    NoSession(u16),

    #[error("{context} failed")]
    Status {
        context: &'static str,
        #[source]
        status: CameraStatus,
    },

    #[error("{0}")]
    Other(String),
}

impl CameraError {
    #[inline]
    pub fn status(context: &'static str, status: CameraStatus) -> Self {
        Self::Status { context, status }
    }

    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// The native status behind this error, if it came from the camera service.
    pub fn camera_status(&self) -> Option<CameraStatus> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
