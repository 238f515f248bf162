// This is free and unencumbered software released into the public domain.

use super::{NativeWindow, check};
use crate::shared::CameraResult;
use core::ptr::null_mut;
use ndk_sys::{ACameraOutputTarget, ACameraOutputTarget_create, ACameraOutputTarget_free};

#[derive(Debug)]
pub struct CameraOutputTarget {
    pub(crate) handle: *mut ACameraOutputTarget,
}

impl Drop for CameraOutputTarget {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { ACameraOutputTarget_free(self.handle) };
            self.handle = null_mut();
        }
    }
}

impl CameraOutputTarget {
    pub fn new(window: &NativeWindow) -> CameraResult<Self> {
        // See: https://developer.android.com/ndk/reference/group/camera#acameraoutputtarget_create
        let mut result = Self {
            handle: null_mut(),
        };
        check(unsafe { ACameraOutputTarget_create(window.handle, &mut result.handle) })?;
        Ok(result)
    }
}
