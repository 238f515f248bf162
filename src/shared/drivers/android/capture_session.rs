// This is free and unencumbered software released into the public domain.

use super::{
    CameraDevice, CameraOutputTarget, CaptureRequest, CaptureSessionOutput,
    CaptureSessionOutputContainer, NativeWindow,
    callbacks::{capture_callbacks, release_session_context, session_callbacks},
    check,
};
use crate::shared::{CameraListener, CameraResult, RequestMode, RequestTemplate};
use alloc::sync::Arc;
use core::{
    ffi::{c_int, c_void},
    ptr::null_mut,
};
use ndk_sys::{
    ACameraCaptureSession, ACameraCaptureSession_abortCaptures, ACameraCaptureSession_capture,
    ACameraCaptureSession_close, ACameraCaptureSession_setRepeatingRequest,
    ACameraCaptureSession_stopRepeating, ACameraDevice_createCaptureSession,
};

/// A single-output capture session bound to one window.
///
/// Closing the session happens first on drop; the last request, its target,
/// the output container, the output, and the window reference follow.
#[derive(Debug)]
pub struct CameraCaptureSession {
    handle: *mut ACameraCaptureSession,
    context: *mut c_void,
    request: Option<CaptureRequest>,
    target: Option<CameraOutputTarget>,
    container: CaptureSessionOutputContainer,
    output: CaptureSessionOutput,
    window: NativeWindow,
}

impl Drop for CameraCaptureSession {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            // The context is released by the `onClosed` callback this triggers.
            unsafe { ACameraCaptureSession_close(self.handle) };
            self.handle = null_mut();
        }
    }
}

impl CameraCaptureSession {
    pub fn open(
        device: &CameraDevice,
        window: &NativeWindow,
        listener: Arc<CameraListener>,
    ) -> CameraResult<Self> {
        let window = window.clone();
        let output = CaptureSessionOutput::new(&window)?;
        let mut container = CaptureSessionOutputContainer::new()?;
        container.add(&output)?;

        let callbacks = session_callbacks(listener);
        let context = callbacks.context;
        let mut handle = null_mut();
        let status = unsafe {
            ACameraDevice_createCaptureSession(device.handle, container.handle, &callbacks, &mut handle)
        };
        if let Err(status) = check(status) {
            unsafe { release_session_context(context) };
            return Err(status);
        }

        Ok(Self {
            handle,
            context,
            request: None,
            target: None,
            container,
            output,
            window,
        })
    }

    /// Submits a request for this session's window and returns its sequence id.
    pub fn submit(
        &mut self,
        device: &CameraDevice,
        mode: RequestMode,
        template: RequestTemplate,
    ) -> CameraResult<i32> {
        let target = CameraOutputTarget::new(&self.window)?;
        let request = device.create_request(template, &target)?;

        let mut callbacks = capture_callbacks(self.context);
        let mut requests = [request.handle];
        let mut sequence_id: c_int = 0;
        let status = unsafe {
            match mode {
                // See: https://developer.android.com/ndk/reference/group/camera#acameracapturesession_setrepeatingrequest
                RequestMode::Repeat => ACameraCaptureSession_setRepeatingRequest(
                    self.handle,
                    &mut callbacks,
                    1,
                    requests.as_mut_ptr(),
                    &mut sequence_id,
                ),
                RequestMode::Capture => ACameraCaptureSession_capture(
                    self.handle,
                    &mut callbacks,
                    1,
                    requests.as_mut_ptr(),
                    &mut sequence_id,
                ),
            }
        };
        check(status)?;

        self.request = Some(request);
        self.target = Some(target);
        Ok(sequence_id)
    }

    /// See: https://developer.android.com/ndk/reference/group/camera#acameracapturesession_stoprepeating
    pub fn stop_repeating(&mut self) -> CameraResult {
        check(unsafe { ACameraCaptureSession_stopRepeating(self.handle) })
    }

    /// See: https://developer.android.com/ndk/reference/group/camera#acameracapturesession_abortcaptures
    pub fn abort_captures(&mut self) -> CameraResult {
        check(unsafe { ACameraCaptureSession_abortCaptures(self.handle) })
    }
}
