// This is free and unencumbered software released into the public domain.

mod config;
pub use config::*;

mod error;
pub use error::*;

mod event;
pub use event::*;

mod facing;
pub use facing::*;

mod group;
pub use group::*;

mod listener;
pub use listener::*;

mod service;
pub use service::*;

mod status;
pub use status::*;

pub mod drivers {
    #[cfg(all(feature = "android", target_os = "android"))]
    pub mod android;
}

mod open;
pub use open::*;
