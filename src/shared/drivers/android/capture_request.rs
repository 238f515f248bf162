// This is free and unencumbered software released into the public domain.

use super::{CameraOutputTarget, check};
use crate::shared::CameraResult;
use core::ptr::null_mut;
use ndk_sys::{ACaptureRequest, ACaptureRequest_addTarget, ACaptureRequest_free};

#[derive(Debug)]
pub struct CaptureRequest {
    pub(crate) handle: *mut ACaptureRequest,
}

impl Default for CaptureRequest {
    fn default() -> Self {
        Self {
            handle: null_mut(),
        }
    }
}

impl Drop for CaptureRequest {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { ACaptureRequest_free(self.handle) };
            self.handle = null_mut();
        }
    }
}

impl CaptureRequest {
    pub fn add_target(&mut self, target: &CameraOutputTarget) -> CameraResult {
        check(unsafe { ACaptureRequest_addTarget(self.handle, target.handle) })
    }
}
