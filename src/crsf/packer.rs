//! # Channel Bit-Packer
//!
//! Serializes 16 RC channels into the 22-byte channels-frame payload.
//!
//! Each channel pulse is mapped from [-1024, +1024] onto an 11-bit unsigned
//! field centered on 992, then the fields are packed LSB-first as one
//! contiguous bitstream with no padding between channels:
//!
//! ```text
//! Byte 0: Ch1[0:7]
//! Byte 1: Ch1[8:10] | Ch2[0:4]
//! Byte 2: Ch2[5:10] | Ch3[0:1]
//! ...
//! ```
//!
//! This layout is the wire contract; any deviation desyncs every channel on
//! the receiving side.

use super::frames::Frame;
use super::protocol::{CRSF_CHANNEL_CENTER, CRSF_CH_BITS, RcPulses};
use crate::inputs::TrimSource;

/// Map one channel pulse onto its 11-bit field.
///
/// `clamp(0, 992 + trim*4/5 + pulse*4/5, 1984)` with truncating integer
/// division. Out-of-range pulses are truncated to the boundary, not
/// rejected.
fn scale_channel(pulse: i16, trim_offset: i32) -> u32 {
    let centered = CRSF_CHANNEL_CENTER + (trim_offset * 4) / 5 + (pulse as i32 * 4) / 5;
    centered.clamp(0, 2 * CRSF_CHANNEL_CENTER) as u32
}

/// Pack all channel fields into `frame`, appending at its write cursor.
///
/// Whole bytes are emitted as soon as eight bits accumulate; bits left over
/// after the last channel belong to no channel and are never written. With
/// 16 channels of 11 bits the payload is exactly 22 bytes.
pub fn pack_channels(frame: &mut Frame, pulses: &RcPulses, trim: &dyn TrimSource) {
    let mut bits: u32 = 0;
    let mut bits_available: u32 = 0;

    for (channel, &pulse) in pulses.iter().enumerate() {
        let value = scale_channel(pulse, trim.center_offset(channel));

        bits |= value << bits_available;
        bits_available += CRSF_CH_BITS;
        while bits_available >= 8 {
            frame.push(bits as u8);
            bits >>= 8;
            bits_available -= 8;
        }
    }
}
