// This is free and unencumbered software released into the public domain.

use crate::shared::{CameraResult, CameraStatus};
use ndk_sys::camera_status_t;

impl From<camera_status_t> for CameraStatus {
    fn from(input: camera_status_t) -> Self {
        CameraStatus::from_code(input.0)
    }
}

/// Maps an NDK status to a result, `ACAMERA_OK` being success.
#[inline]
pub(crate) fn check(status: camera_status_t) -> CameraResult {
    if status == camera_status_t::ACAMERA_OK {
        Ok(())
    } else {
        Err(status.into())
    }
}
