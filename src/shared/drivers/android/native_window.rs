// This is free and unencumbered software released into the public domain.

use core::ptr::{NonNull, null_mut};
use ndk_sys::{ANativeWindow, ANativeWindow_acquire, ANativeWindow_release};

/// Counted reference to an `ANativeWindow`, the output surface of a session.
#[derive(Debug)]
pub struct NativeWindow {
    pub(crate) handle: *mut ANativeWindow,
}

impl Drop for NativeWindow {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { ANativeWindow_release(self.handle) };
            self.handle = null_mut();
        }
    }
}

impl Clone for NativeWindow {
    fn clone(&self) -> Self {
        unsafe { ANativeWindow_acquire(self.handle) };
        Self {
            handle: self.handle,
        }
    }
}

impl NativeWindow {
    /// Takes an additional reference on `window`.
    ///
    /// # Safety
    /// `window` must point to a live `ANativeWindow`, for instance one
    /// obtained from `ANativeWindow_fromSurface` or `AImageReader_getWindow`.
    pub unsafe fn from_raw(window: NonNull<ANativeWindow>) -> Self {
        let handle = window.as_ptr();
        unsafe { ANativeWindow_acquire(handle) };
        Self { handle }
    }

    pub fn as_ptr(&self) -> *mut ANativeWindow {
        self.handle
    }
}
