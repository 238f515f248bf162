// This is free and unencumbered software released into the public domain.

use derive_more::Display;

pub type CameraResult<T = ()> = core::result::Result<T, CameraStatus>;

/// Status codes reported by the NDK camera service (`camera_status_t`).
#[derive(Clone, Copy, Debug, Default, Display, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum CameraStatus {
    #[default]
    #[display("camera operation succeeded")]
    Ok = 0,

    #[display("camera operation failed due to an unspecified cause")]
    Unknown = -10000,

    #[display("an invalid parameter was passed to the camera service")]
    InvalidParameter = -10001,

    #[display("camera device was disconnected or taken over by a higher-priority client")]
    CameraDisconnected = -10002,

    #[display("camera operation ran out of memory")]
    NotEnoughMemory = -10003,

    #[display("requested metadata tag was not found")]
    MetadataNotFound = -10004,

    #[display("camera device hit a fatal error and must be re-opened")]
    CameraDevice = -10005,

    #[display("camera service hit a fatal error")]
    CameraService = -10006,

    #[display("capture session has been closed")]
    SessionClosed = -10007,

    #[display("invalid internal camera operation")]
    InvalidOperation = -10008,

    #[display("stream configuration is not supported by the device")]
    StreamConfigureFail = -10009,

    #[display("camera device is in use by a higher-priority client")]
    CameraInUse = -10010,

    #[display("system-wide limit of open cameras reached")]
    MaxCameraInUse = -10011,

    #[display("camera is disabled by device policy")]
    CameraDisabled = -10012,

    #[display("permission to open the camera was denied")]
    PermissionDenied = -10013,

    #[display("operation is not supported by the camera device")]
    UnsupportedOperation = -10014,
}

impl core::error::Error for CameraStatus {}

impl CameraStatus {
    pub fn from_code(code: i32) -> Self {
        use CameraStatus::*;
        match code {
            0 => Ok,
            -10001 => InvalidParameter,
            -10002 => CameraDisconnected,
            -10003 => NotEnoughMemory,
            -10004 => MetadataNotFound,
            -10005 => CameraDevice,
            -10006 => CameraService,
            -10007 => SessionClosed,
            -10008 => InvalidOperation,
            -10009 => StreamConfigureFail,
            -10010 => CameraInUse,
            -10011 => MaxCameraInUse,
            -10012 => CameraDisabled,
            -10013 => PermissionDenied,
            -10014 => UnsupportedOperation,
            _ => Unknown,
        }
    }

    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    #[inline]
    pub fn is_ok(self) -> bool {
        self == CameraStatus::Ok
    }

    /// Turns a raw status into a result, mapping `Ok` to `Ok(())`.
    pub fn check(code: i32) -> CameraResult {
        match Self::from_code(code) {
            CameraStatus::Ok => Ok(()),
            status => Err(status),
        }
    }
}
