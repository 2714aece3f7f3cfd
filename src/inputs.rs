//! # External Input Seams
//!
//! Traits for the collaborators the surrounding firmware supplies: switch
//! state evaluation and per-channel trim offsets. Frame building only ever
//! queries these; it never owns or mutates them.

use serde::Deserialize;

use crate::crsf::protocol::CRSF_NUM_CHANNELS;

/// Identifier of a physical switch on the handset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct SwitchSource(pub u8);

/// Switch state evaluation, supplied by the host firmware
#[cfg_attr(test, mockall::automock)]
pub trait SwitchReader {
    /// Whether the given switch is currently in its active position
    fn is_active(&self, switch: SwitchSource) -> bool;
}

/// Switch reader for hosts without switches; every switch reads inactive.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSwitches;

impl SwitchReader for NoSwitches {
    fn is_active(&self, _switch: SwitchSource) -> bool {
        false
    }
}

/// Per-channel center trim offset, supplied by the host firmware.
///
/// The offset feeds the channel scaling formula before packing. Its
/// derivation depends on the hardware configuration (adjustable PPM center),
/// so it is injected rather than computed here.
pub trait TrimSource {
    /// Trim offset for `channel`, in the same units as channel pulses
    fn center_offset(&self, channel: usize) -> i32;
}

/// Trim source for builds without adjustable centers; always zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrim;

impl TrimSource for NoTrim {
    fn center_offset(&self, _channel: usize) -> i32 {
        0
    }
}

/// Fixed per-channel trim offsets
#[derive(Debug, Clone, Copy)]
pub struct FixedTrim(pub [i32; CRSF_NUM_CHANNELS]);

impl TrimSource for FixedTrim {
    fn center_offset(&self, channel: usize) -> i32 {
        self.0[channel]
    }
}
