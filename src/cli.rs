// This is free and unencumbered software released into the public domain.

//! CLI helpers (error reporting, verbosity handling, device listing).
//!
//! This module must compile even when the crate feature `cli` is disabled,
//! because the library is built in non-CLI configurations.

#[cfg(feature = "cli")]
use crate::shared::{CameraError, DeviceInfo};

#[cfg(feature = "cli")]
use asimov_module::SysexitsError::{self, *};

#[cfg(feature = "cli")]
use clientele::StandardOptions;

#[cfg(feature = "cli")]
pub fn handle_error(err: &CameraError, flags: &StandardOptions) -> SysexitsError {
    #[cfg(feature = "tracing")]
    {
        use asimov_module::tracing::{debug, error};

        error!(target: "ndcam", %err, "camera command failed");

        if flags.debug || flags.verbose >= 2 {
            debug!(target: "ndcam", ?err, "detailed error");
        }
    }

    report_error(err, flags);
    map_error_to_sysexit(err)
}

#[cfg(feature = "cli")]
pub fn info_user(flags: &StandardOptions, msg: &str) {
    if flags.debug || flags.verbose >= 1 {
        eprintln!("INFO: {msg}");
    }

    #[cfg(feature = "tracing")]
    asimov_module::tracing::info!(target: "ndcam", "{msg}");
}

#[cfg(feature = "cli")]
pub fn warn_user(flags: &StandardOptions, msg: &str) {
    if flags.debug || flags.verbose >= 1 {
        eprintln!("WARN: {msg}");
    }

    #[cfg(feature = "tracing")]
    asimov_module::tracing::warn!(target: "ndcam", "{msg}");
}

/// Enumerates the cameras the platform exposes, in table order.
#[cfg(feature = "cli")]
pub fn list_devices(flags: &StandardOptions) -> Result<Vec<DeviceInfo>, CameraError> {
    info_user(flags, "enumerating camera devices");

    #[cfg(all(feature = "android", target_os = "android"))]
    {
        match crate::shared::open(crate::shared::GroupConfig::default()) {
            Ok(group) => Ok(group.devices()),
            Err(CameraError::NoCamera) => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    #[cfg(not(all(feature = "android", target_os = "android")))]
    Err(CameraError::NoDriver)
}

#[cfg(feature = "cli")]
fn report_error(err: &CameraError, flags: &StandardOptions) {
    use std::error::Error as _;
    use std::io::Write;

    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "ERROR: {err}");

    if flags.debug || flags.verbose >= 2 {
        let mut source = err.source();
        while let Some(cause) = source {
            let _ = writeln!(stderr, "  Caused by: {}", cause);
            source = cause.source();
        }
    }
}

#[cfg(feature = "cli")]
pub fn map_error_to_sysexit(err: &CameraError) -> SysexitsError {
    use crate::shared::CameraStatus;

    match err {
        CameraError::NoDriver => EX_UNAVAILABLE,
        CameraError::NoCamera => EX_UNAVAILABLE,
        CameraError::InvalidDevice(_) => EX_USAGE,
        CameraError::DeviceNotOpen(_) | CameraError::NoSession(_) => EX_SOFTWARE,
        CameraError::Status {
            status: CameraStatus::PermissionDenied | CameraStatus::CameraDisabled,
            ..
        } => EX_NOPERM,
        CameraError::Status {
            status: CameraStatus::CameraInUse | CameraStatus::MaxCameraInUse,
            ..
        } => EX_TEMPFAIL,
        CameraError::Status { .. } => EX_IOERR,
        CameraError::Other(_) => EX_SOFTWARE,
    }
}

/// Parses `WxH` (e.g. `1920x1080`) into a width/height pair.
pub fn parse_dimensions(s: &str) -> Result<(u32, u32), String> {
    let s = s.trim().replace('×', "x");
    let parts: Vec<&str> = s.split('x').map(|t| t.trim()).collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(format!("Invalid format '{s}'. Use WxH (e.g., 1920x1080)"));
    }

    let width: u32 = parts[0].parse().map_err(|_| format!("Invalid width: {}", parts[0]))?;
    let height: u32 = parts[1].parse().map_err(|_| format!("Invalid height: {}", parts[1]))?;

    if !(160..=7680).contains(&width) {
        return Err(format!("Width {width} is out of reasonable range (160-7680)"));
    }
    if !(120..=4320).contains(&height) {
        return Err(format!("Height {height} is out of reasonable range (120-4320)"));
    }

    Ok((width, height))
}

// When `cli` is disabled, keep the module linkable without exposing CLI-only types.
#[cfg(not(feature = "cli"))]
#[inline]
pub fn info_user(_msg: &str) {}

#[cfg(not(feature = "cli"))]
#[inline]
pub fn warn_user(_msg: &str) {}
