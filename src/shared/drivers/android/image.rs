// This is free and unencumbered software released into the public domain.

use super::{MediaResult, check_media};
use core::ptr::null_mut;
use ndk_sys::{AImage, AImage_delete, AImage_getFormat, AImage_getHeight, AImage_getTimestamp, AImage_getWidth};

/// An image held from an [`super::ImageReader`]; returned to the reader on drop.
#[derive(Debug)]
pub struct Image {
    pub(crate) handle: *mut AImage,
}

impl Drop for Image {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { AImage_delete(self.handle) };
            self.handle = null_mut();
        }
    }
}

impl Image {
    pub fn timestamp(&self) -> MediaResult<i64> {
        let mut result = 0;
        check_media(unsafe { AImage_getTimestamp(self.handle, &mut result) })?;
        Ok(result)
    }

    pub fn format(&self) -> MediaResult<i32> {
        let mut result = 0;
        check_media(unsafe { AImage_getFormat(self.handle, &mut result) })?;
        Ok(result)
    }

    pub fn dimensions(&self) -> MediaResult<(i32, i32)> {
        let (mut width, mut height) = (0, 0);
        check_media(unsafe { AImage_getWidth(self.handle, &mut width) })?;
        check_media(unsafe { AImage_getHeight(self.handle, &mut height) })?;
        Ok((width, height))
    }
}
