//! # CRSF Protocol Constants and Types
//!
//! Core wire-format definitions for outbound CRSF (Crossfire) frames.
//!
//! A frame is `{address, length, payload.., checksum(s)}` where the length
//! byte counts everything after itself, checksum(s) included.

/// Device address used as the leading byte of command frames (always 0xC8)
pub const CRSF_UART_SYNC: u8 = 0xC8;

/// External RF module address
pub const CRSF_MODULE_ADDRESS: u8 = 0xEE;

/// Radio handset address (frame origin)
pub const CRSF_RADIO_ADDRESS: u8 = 0xEA;

/// Receiver address (bind frame destination while telemetry is streaming)
pub const CRSF_RECEIVER_ADDRESS: u8 = 0xEC;

/// Broadcast address (ping destination)
pub const CRSF_BROADCAST_ADDRESS: u8 = 0x00;

/// RC channels frame type
pub const CRSF_FRAMETYPE_RC_CHANNELS_PACKED: u8 = 0x16;

/// Device discovery ping frame type
pub const CRSF_FRAMETYPE_PING_DEVICES: u8 = 0x28;

/// Command frame type (bind, model select)
pub const CRSF_FRAMETYPE_COMMAND: u8 = 0x32;

/// CRSF command sub-command byte
pub const CRSF_SUBCOMMAND_CRSF: u8 = 0x10;

/// "Initiate bind" sub-command
pub const CRSF_SUBCOMMAND_CRSF_BIND: u8 = 0x01;

/// "Set model/receiver id" command
pub const CRSF_COMMAND_MODEL_SELECT_ID: u8 = 0x05;

/// Number of RC channels carried per channels frame
pub const CRSF_NUM_CHANNELS: usize = 16;

/// Bits per packed channel field
pub const CRSF_CH_BITS: u32 = 11;

/// Packed-field value for a centered channel (0x3E0)
///
/// The valid packed range is `[0, 2 * CRSF_CHANNEL_CENTER]`.
pub const CRSF_CHANNEL_CENTER: i32 = 0x3E0;

/// RC channels payload size (16 channels × 11 bits = 22 bytes)
pub const CRSF_CHANNELS_PAYLOAD_SIZE: usize = 22;

/// Maximum CRSF frame size in bytes
pub const CRSF_FRAME_MAXLEN: usize = 64;

/// Upstream pulse domain limits for one channel
pub const CRSF_PULSE_MIN: i16 = -1024;
pub const CRSF_PULSE_MAX: i16 = 1024;

/// Calibrated channel pulses as produced by the mixer, [-1024, +1024] each
pub type RcPulses = [i16; CRSF_NUM_CHANNELS];
