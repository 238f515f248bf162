// This is free and unencumbered software released into the public domain.

use super::{Image, MediaResult, NativeWindow, check_media};
use core::ptr::{NonNull, null_mut};
use ndk_sys::{
    AImageReader, AImageReader_acquireNextImage, AImageReader_delete, AImageReader_getWindow,
    AImageReader_new, media_status_t,
};

/// Output surface backed by an `AImageReader`; the capture sink of the CLI.
#[derive(Debug)]
pub struct ImageReader {
    pub(crate) handle: *mut AImageReader,
}

impl Drop for ImageReader {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { AImageReader_delete(self.handle) };
            self.handle = null_mut();
        }
    }
}

impl ImageReader {
    pub fn new(dimensions: (u32, u32), format: i32, max_images: i32) -> MediaResult<Self> {
        let (width, height) = dimensions;
        let mut result = Self {
            handle: null_mut(),
        };
        check_media(unsafe {
            AImageReader_new(width as _, height as _, format, max_images, &mut result.handle)
        })?;
        Ok(result)
    }

    /// A counted reference to the reader's window, suitable as a session output.
    pub fn window(&self) -> MediaResult<NativeWindow> {
        let mut window = null_mut();
        check_media(unsafe { AImageReader_getWindow(self.handle, &mut window) })?;
        let window = NonNull::new(window).ok_or(media_status_t::AMEDIA_ERROR_UNKNOWN)?;
        // The reader keeps ownership of its window; take our own reference.
        Ok(unsafe { NativeWindow::from_raw(window) })
    }

    /// `Ok(None)` when no image is queued yet.
    pub fn acquire_next_image(&self) -> MediaResult<Option<Image>> {
        let mut image = Image {
            handle: null_mut(),
        };
        let status = unsafe { AImageReader_acquireNextImage(self.handle, &mut image.handle) };
        if status == media_status_t::AMEDIA_IMGREADER_NO_BUFFER_AVAILABLE {
            return Ok(None);
        }
        check_media(status)?;
        Ok(Some(image))
    }
}
