// This is free and unencumbered software released into the public domain.

use super::check;
use crate::shared::{CameraResult, CameraStatus, LensFacing};
use core::{mem::zeroed, ptr::null_mut};
use ndk_sys::{
    ACameraMetadata, ACameraMetadata_const_entry, ACameraMetadata_free,
    ACameraMetadata_getConstEntry, acamera_metadata_tag,
};

/// Characteristics of one camera, cached for the lifetime of its table slot.
#[derive(Debug)]
pub struct CameraMetadata {
    pub(crate) handle: *mut ACameraMetadata,
}

impl Drop for CameraMetadata {
    fn drop(&mut self) {
        if !self.handle.is_null() {
            unsafe { ACameraMetadata_free(self.handle) };
            self.handle = null_mut();
        }
    }
}

impl CameraMetadata {
    pub fn lens_facing(&self) -> CameraResult<LensFacing> {
        let entry = unsafe { const_entry(self.handle, acamera_metadata_tag::ACAMERA_LENS_FACING)? };
        if entry.count < 1 {
            return Err(CameraStatus::MetadataNotFound);
        }
        let raw = unsafe { *entry.data.u8_ };
        LensFacing::from_raw(raw).ok_or(CameraStatus::Unknown)
    }
}

/// Reads `ACAMERA_SENSOR_TIMESTAMP` from a capture result, 0 when absent.
///
/// # Safety
/// `result` must be null or a live metadata pointer handed out by a capture callback.
pub(crate) unsafe fn sensor_timestamp(result: *const ACameraMetadata) -> i64 {
    if result.is_null() {
        return 0;
    }
    match unsafe { const_entry(result, acamera_metadata_tag::ACAMERA_SENSOR_TIMESTAMP) } {
        Ok(entry) if entry.count > 0 => unsafe { *entry.data.i64_ },
        _ => 0,
    }
}

unsafe fn const_entry(
    metadata: *const ACameraMetadata,
    tag: acamera_metadata_tag,
) -> CameraResult<ACameraMetadata_const_entry> {
    let mut entry: ACameraMetadata_const_entry = unsafe { zeroed() };
    check(unsafe { ACameraMetadata_getConstEntry(metadata, tag.0, &mut entry) })?;
    Ok(entry)
}
