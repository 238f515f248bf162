// This is free and unencumbered software released into the public domain.

cfg_if::cfg_if! {
    if #[cfg(all(feature = "android", target_os = "android"))] {
        use super::{CameraError, CameraGroup, GroupConfig, drivers::android::CameraManager};

        pub const HAS_PLATFORM_DRIVER: bool = true;

        pub type PlatformCameraGroup = CameraGroup<CameraManager>;

        /// Creates the platform camera manager and initializes a group over it.
        pub fn open(config: GroupConfig) -> Result<PlatformCameraGroup, CameraError> {
            crate::logging::init_android_logger();
            let manager = CameraManager::new()?;
            let group = CameraGroup::init(manager, config)?;
            if group.device_count() == 0 {
                return Err(CameraError::NoCamera);
            }
            Ok(group)
        }
    } else {
        pub const HAS_PLATFORM_DRIVER: bool = false;
    }
}
