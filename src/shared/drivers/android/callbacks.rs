// This is free and unencumbered software released into the public domain.

//! `extern "C"` trampolines from NDK callbacks to [`CameraListener`].
//!
//! Every `context` pointer handed to the NDK is an `Arc<CameraListener>`
//! turned into a raw pointer. Device contexts are kept alive by the device
//! wrapper; session contexts carry their own reference, released in `onClosed`,
//! which is the last callback a session ever delivers.

use super::camera_metadata::sensor_timestamp;
use crate::shared::CameraListener;
use alloc::sync::Arc;
use core::ffi::{CStr, c_int, c_void};
use ndk_sys::{
    ACameraCaptureFailure, ACameraCaptureSession, ACameraCaptureSession_captureCallbacks,
    ACameraCaptureSession_stateCallbacks, ACameraDevice, ACameraDevice_StateCallbacks,
    ACameraDevice_getId, ACameraMetadata, ACaptureRequest, ANativeWindow,
};

unsafe fn listener_of<'a>(context: *mut c_void) -> Option<&'a CameraListener> {
    unsafe { (context as *const CameraListener).as_ref() }
}

unsafe fn device_id(device: *mut ACameraDevice) -> String {
    if device.is_null() {
        return String::new();
    }
    let id = unsafe { ACameraDevice_getId(device) };
    if id.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(id) }.to_string_lossy().into_owned()
}

pub(crate) fn device_callbacks(listener: &Arc<CameraListener>) -> ACameraDevice_StateCallbacks {
    unsafe extern "C" fn on_disconnected(context: *mut c_void, device: *mut ACameraDevice) {
        if let Some(listener) = unsafe { listener_of(context) } {
            listener.on_device_disconnected(&unsafe { device_id(device) });
        }
    }

    unsafe extern "C" fn on_error(context: *mut c_void, device: *mut ACameraDevice, error: c_int) {
        if let Some(listener) = unsafe { listener_of(context) } {
            listener.on_device_error(&unsafe { device_id(device) }, error);
        }
    }

    ACameraDevice_StateCallbacks {
        context: Arc::as_ptr(listener) as *mut c_void,
        onDisconnected: Some(on_disconnected),
        onError: Some(on_error),
    }
}

/// Builds session state callbacks whose context owns one listener reference.
///
/// If the session is never created, hand the context to [`release_session_context`].
pub(crate) fn session_callbacks(
    listener: Arc<CameraListener>,
) -> ACameraCaptureSession_stateCallbacks {
    unsafe extern "C" fn on_closed(context: *mut c_void, _session: *mut ACameraCaptureSession) {
        if let Some(listener) = unsafe { listener_of(context) } {
            listener.on_session_closed();
        }
        unsafe { release_session_context(context) };
    }

    unsafe extern "C" fn on_ready(context: *mut c_void, _session: *mut ACameraCaptureSession) {
        if let Some(listener) = unsafe { listener_of(context) } {
            listener.on_session_ready();
        }
    }

    unsafe extern "C" fn on_active(context: *mut c_void, _session: *mut ACameraCaptureSession) {
        if let Some(listener) = unsafe { listener_of(context) } {
            listener.on_session_active();
        }
    }

    ACameraCaptureSession_stateCallbacks {
        context: Arc::into_raw(listener) as *mut c_void,
        onClosed: Some(on_closed),
        onReady: Some(on_ready),
        onActive: Some(on_active),
    }
}

/// # Safety
/// `context` must come from [`session_callbacks`] and be released only once.
pub(crate) unsafe fn release_session_context(context: *mut c_void) {
    if !context.is_null() {
        drop(unsafe { Arc::from_raw(context as *const CameraListener) });
    }
}

/// Capture callbacks sharing the session's context pointer.
pub(crate) fn capture_callbacks(context: *mut c_void) -> ACameraCaptureSession_captureCallbacks {
    unsafe extern "C" fn on_started(
        context: *mut c_void,
        _session: *mut ACameraCaptureSession,
        _request: *const ACaptureRequest,
        timestamp: i64,
    ) {
        if let Some(listener) = unsafe { listener_of(context) } {
            listener.on_capture_started(timestamp);
        }
    }

    unsafe extern "C" fn on_progressed(
        context: *mut c_void,
        _session: *mut ACameraCaptureSession,
        _request: *mut ACaptureRequest,
        result: *const ACameraMetadata,
    ) {
        if let Some(listener) = unsafe { listener_of(context) } {
            listener.on_capture_progressed(unsafe { sensor_timestamp(result) });
        }
    }

    unsafe extern "C" fn on_completed(
        context: *mut c_void,
        _session: *mut ACameraCaptureSession,
        _request: *mut ACaptureRequest,
        result: *const ACameraMetadata,
    ) {
        if let Some(listener) = unsafe { listener_of(context) } {
            listener.on_capture_completed(unsafe { sensor_timestamp(result) });
        }
    }

    unsafe extern "C" fn on_failed(
        context: *mut c_void,
        _session: *mut ACameraCaptureSession,
        _request: *mut ACaptureRequest,
        failure: *mut ACameraCaptureFailure,
    ) {
        let (Some(listener), Some(failure)) = (unsafe { listener_of(context) }, unsafe {
            failure.as_ref()
        }) else {
            return;
        };
        listener.on_capture_failed(
            failure.frameNumber,
            failure.reason,
            failure.sequenceId,
            failure.wasImageCaptured,
        );
    }

    unsafe extern "C" fn on_sequence_completed(
        context: *mut c_void,
        _session: *mut ACameraCaptureSession,
        sequence_id: c_int,
        frame_number: i64,
    ) {
        if let Some(listener) = unsafe { listener_of(context) } {
            listener.on_capture_sequence_complete(sequence_id, frame_number);
        }
    }

    unsafe extern "C" fn on_sequence_aborted(
        context: *mut c_void,
        _session: *mut ACameraCaptureSession,
        sequence_id: c_int,
    ) {
        if let Some(listener) = unsafe { listener_of(context) } {
            listener.on_capture_sequence_abort(sequence_id);
        }
    }

    unsafe extern "C" fn on_buffer_lost(
        context: *mut c_void,
        _session: *mut ACameraCaptureSession,
        _request: *mut ACaptureRequest,
        _window: *mut ANativeWindow,
        frame_number: i64,
    ) {
        if let Some(listener) = unsafe { listener_of(context) } {
            listener.on_capture_buffer_lost(frame_number);
        }
    }

    ACameraCaptureSession_captureCallbacks {
        context,
        onCaptureStarted: Some(on_started),
        onCaptureProgressed: Some(on_progressed),
        onCaptureCompleted: Some(on_completed),
        onCaptureFailed: Some(on_failed),
        onCaptureSequenceCompleted: Some(on_sequence_completed),
        onCaptureSequenceAborted: Some(on_sequence_aborted),
        onCaptureBufferLost: Some(on_buffer_lost),
    }
}
