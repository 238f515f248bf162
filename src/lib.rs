// This is free and unencumbered software released into the public domain.

//! Android NDK Camera2 bridge.
//!
//! The heart of the crate is [`shared::CameraGroup`], a fixed-size table of
//! camera slots that owns manager, metadata, device, and session handles and
//! tears them down in dependency order. Platform access goes through the
//! [`shared::CameraService`] trait; the NDK implementation lives in
//! `shared::drivers::android`.

#![deny(unsafe_op_in_unsafe_fn)]

extern crate alloc;

pub mod cli;
pub mod logging;
pub mod shared;
