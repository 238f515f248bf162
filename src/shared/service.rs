// This is free and unencumbered software released into the public domain.

use super::{CameraListener, CameraResult, LensFacing, RequestMode, RequestTemplate};
use alloc::sync::Arc;

/// The platform camera manager.
///
/// Handles returned by the service own their native objects and release
/// them on drop. The service itself stands for the manager handle and must
/// outlive every handle it produced; [`super::CameraGroup`] guarantees that.
pub trait CameraService: dogma::Named {
    type Metadata;
    type Device;
    type Session;
    type Window;

    fn camera_ids(&self) -> CameraResult<Vec<String>>;

    fn characteristics(&self, camera_id: &str) -> CameraResult<Self::Metadata>;

    fn lens_facing(&self, metadata: &Self::Metadata) -> CameraResult<LensFacing>;

    fn open_device(
        &self,
        camera_id: &str,
        listener: Arc<CameraListener>,
    ) -> CameraResult<Self::Device>;

    /// Creates a single-output capture session that targets `window`.
    fn create_session(
        &self,
        device: &mut Self::Device,
        window: &Self::Window,
        listener: Arc<CameraListener>,
    ) -> CameraResult<Self::Session>;

    /// Submits one request targeting the session's output and returns its
    /// capture sequence id.
    fn submit(
        &self,
        device: &Self::Device,
        session: &mut Self::Session,
        mode: RequestMode,
        template: RequestTemplate,
    ) -> CameraResult<i32>;

    fn stop_repeating(&self, session: &mut Self::Session) -> CameraResult;

    fn abort_captures(&self, session: &mut Self::Session) -> CameraResult;
}
