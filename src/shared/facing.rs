// This is free and unencumbered software released into the public domain.

use derive_more::Display;

/// Direction a camera faces relative to the device screen (`ACAMERA_LENS_FACING`).
#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LensFacing {
    #[display("front")]
    Front = 0,
    #[display("back")]
    Back = 1,
    #[display("external")]
    External = 2,
}

impl LensFacing {
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(Self::Front),
            1 => Some(Self::Back),
            2 => Some(Self::External),
            _ => None,
        }
    }

    #[inline]
    pub fn as_raw(self) -> u8 {
        self as u8
    }
}

impl core::str::FromStr for LensFacing {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_ascii_lowercase().as_str() {
            "front" => Ok(Self::Front),
            "back" | "rear" => Ok(Self::Back),
            "external" => Ok(Self::External),
            other => Err(format!("unknown lens facing: {other}")),
        }
    }
}
