// This is free and unencumbered software released into the public domain.

use super::{CameraOutputTarget, CaptureRequest, check};
use crate::shared::{CameraListener, CameraResult, RequestTemplate};
use alloc::sync::Arc;
use core::ptr::null_mut;
use ndk_sys::{
    ACameraDevice, ACameraDevice_close, ACameraDevice_createCaptureRequest,
    ACameraDevice_request_template,
};
use tracing::warn;

/// An open camera device. Closing happens on drop.
#[derive(Debug)]
pub struct CameraDevice {
    pub(crate) handle: *mut ACameraDevice,
    // Target of the device callbacks' context pointer.
    pub(crate) listener: Arc<CameraListener>,
}

impl Drop for CameraDevice {
    fn drop(&mut self) {
        if self.handle.is_null() {
            return;
        }
        // See: https://developer.android.com/ndk/reference/group/camera#acameradevice_close
        if let Err(status) = check(unsafe { ACameraDevice_close(self.handle) }) {
            warn!(target: "ndcam", slot = self.listener.slot(), %status, "ACameraDevice_close");
        }
        self.handle = null_mut();
    }
}

impl CameraDevice {
    /// Builds a request from `template` that renders into `target`.
    pub fn create_request(
        &self,
        template: RequestTemplate,
        target: &CameraOutputTarget,
    ) -> CameraResult<CaptureRequest> {
        let mut request = CaptureRequest::default();
        check(unsafe {
            ACameraDevice_createCaptureRequest(
                self.handle,
                ACameraDevice_request_template(template.as_raw()),
                &mut request.handle,
            )
        })?;
        request.add_target(target)?;
        Ok(request)
    }
}
