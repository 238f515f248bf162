// This is free and unencumbered software released into the public domain.

use super::{CameraCaptureSession, CameraDevice, CameraMetadata, NativeWindow, callbacks, check};
use crate::shared::{
    CameraError, CameraListener, CameraResult, CameraService, CameraStatus, LensFacing,
    RequestMode, RequestTemplate,
};
use alloc::{borrow::Cow, ffi::CString, sync::Arc};
use core::{ffi::CStr, ptr::null_mut};
use ndk_sys::{
    ACameraManager, ACameraManager_create, ACameraManager_delete,
    ACameraManager_deleteCameraIdList, ACameraManager_getCameraCharacteristics,
    ACameraManager_getCameraIdList, ACameraManager_openCamera, android_get_device_api_level,
};
use scopeguard::defer;
use tracing::debug;

/// The NDK camera manager; the root of every other camera handle.
#[derive(Debug)]
pub struct CameraManager {
    pub(crate) handle: *mut ACameraManager,
    pub api_level: u32,
}

impl Drop for CameraManager {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { ACameraManager_delete(self.handle) };
            self.handle = null_mut();
        }
    }
}

impl CameraManager {
    pub fn new() -> Result<Self, CameraError> {
        let api_level = unsafe { android_get_device_api_level() }.max(0) as u32;
        let handle = unsafe { ACameraManager_create() };
        if handle.is_null() {
            return Err(CameraError::NoDriver);
        }
        debug!(target: "ndcam", api_level, "ACameraManager_create");
        Ok(Self { handle, api_level })
    }
}

impl dogma::Named for CameraManager {
    fn name(&self) -> Cow<'_, str> {
        "camera2ndk".into()
    }
}

fn c_id(camera_id: &str) -> CameraResult<CString> {
    CString::new(camera_id).map_err(|_| CameraStatus::InvalidParameter)
}

impl CameraService for CameraManager {
    type Metadata = CameraMetadata;
    type Device = CameraDevice;
    type Session = CameraCaptureSession;
    type Window = NativeWindow;

    fn camera_ids(&self) -> CameraResult<Vec<String>> {
        let mut list_ptr = null_mut();
        check(unsafe { ACameraManager_getCameraIdList(self.handle, &mut list_ptr) })?;

        defer! {
            unsafe { ACameraManager_deleteCameraIdList(list_ptr); }
        }

        let list = unsafe { &*list_ptr };
        if list.numCameras < 1 {
            return Ok(Vec::new()); // no devices
        }

        let ids = unsafe { core::slice::from_raw_parts(list.cameraIds, list.numCameras as usize) };
        Ok(ids
            .iter()
            .map(|p| unsafe { CStr::from_ptr(*p) }.to_string_lossy().into_owned())
            .collect())
    }

    fn characteristics(&self, camera_id: &str) -> CameraResult<CameraMetadata> {
        let id = c_id(camera_id)?;
        let mut metadata = CameraMetadata {
            handle: null_mut(),
        };
        check(unsafe {
            ACameraManager_getCameraCharacteristics(self.handle, id.as_ptr(), &mut metadata.handle)
        })?;
        Ok(metadata)
    }

    fn lens_facing(&self, metadata: &CameraMetadata) -> CameraResult<LensFacing> {
        metadata.lens_facing()
    }

    fn open_device(
        &self,
        camera_id: &str,
        listener: Arc<CameraListener>,
    ) -> CameraResult<CameraDevice> {
        let id = c_id(camera_id)?;
        let mut state_callbacks = callbacks::device_callbacks(&listener);
        let mut device = CameraDevice {
            handle: null_mut(),
            listener,
        };
        check(unsafe {
            ACameraManager_openCamera(self.handle, id.as_ptr(), &mut state_callbacks, &mut device.handle)
        })?;
        Ok(device)
    }

    fn create_session(
        &self,
        device: &mut CameraDevice,
        window: &NativeWindow,
        listener: Arc<CameraListener>,
    ) -> CameraResult<CameraCaptureSession> {
        CameraCaptureSession::open(device, window, listener)
    }

    fn submit(
        &self,
        device: &CameraDevice,
        session: &mut CameraCaptureSession,
        mode: RequestMode,
        template: RequestTemplate,
    ) -> CameraResult<i32> {
        session.submit(device, mode, template)
    }

    fn stop_repeating(&self, session: &mut CameraCaptureSession) -> CameraResult {
        session.stop_repeating()
    }

    fn abort_captures(&self, session: &mut CameraCaptureSession) -> CameraResult {
        session.abort_captures()
    }
}
