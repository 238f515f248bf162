// This is free and unencumbered software released into the public domain.

//! Camera2 NDK backend.

#[link(name = "camera2ndk")]
unsafe extern "C" {}

mod callbacks;

mod camera_device;
pub use camera_device::*;

mod camera_manager;
pub use camera_manager::*;

mod camera_metadata;
pub use camera_metadata::*;

mod camera_output_target;
pub use camera_output_target::*;

mod camera_status;
pub use camera_status::*;

mod capture_request;
pub use capture_request::*;

mod capture_session;
pub use capture_session::*;

mod capture_session_output;
pub use capture_session_output::*;

mod capture_session_output_container;
pub use capture_session_output_container::*;

mod image;
pub use image::*;

mod image_reader;
pub use image_reader::*;

mod media_status;
pub use media_status::*;

mod native_window;
pub use native_window::*;
