//! # CRSF Frame Builders
//!
//! Builders for the four outbound frame kinds: bind, device ping, model
//! select and RC channels. Each builder writes one self-contained frame
//! `{address, length, payload.., checksum(s)}` into a fixed-capacity
//! [`Frame`] and never keeps state between calls.
//!
//! Command frames (bind, model select) are double-checksummed: a BA-profile
//! checksum over the payload, then a standard checksum that also covers the
//! BA byte. Ping and channels frames carry a single standard checksum.

use super::crc::ChecksumEngine;
use super::packer::pack_channels;
use super::protocol::*;
use crate::config::{ArmingMode, ModuleConfig};
use crate::inputs::{SwitchReader, TrimSource};

/// One outbound frame: a fixed-capacity buffer plus a write cursor.
///
/// The buffer is sized to the protocol maximum, so a correctly built frame
/// never reaches capacity. [`Frame::push`] asserts on overflow instead of
/// truncating; a partially written control frame must not leave this crate.
#[derive(Clone)]
pub struct Frame {
    buf: [u8; CRSF_FRAME_MAXLEN],
    len: usize,
}

impl Frame {
    /// Create an empty frame
    pub const fn new() -> Self {
        Self {
            buf: [0; CRSF_FRAME_MAXLEN],
            len: 0,
        }
    }

    /// Create a frame holding `bytes` verbatim (telemetry pass-through)
    ///
    /// # Panics
    ///
    /// Panics if `bytes` exceeds the protocol frame maximum.
    pub fn from_slice(bytes: &[u8]) -> Self {
        let mut frame = Self::new();
        frame.extend_from_slice(bytes);
        frame
    }

    /// Append one byte at the write cursor
    pub(crate) fn push(&mut self, byte: u8) {
        assert!(self.len < CRSF_FRAME_MAXLEN, "CRSF frame buffer overflow");
        self.buf[self.len] = byte;
        self.len += 1;
    }

    /// Append a byte slice at the write cursor
    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) {
        assert!(
            self.len + bytes.len() <= CRSF_FRAME_MAXLEN,
            "CRSF frame buffer overflow"
        );
        self.buf[self.len..self.len + bytes.len()].copy_from_slice(bytes);
        self.len += bytes.len();
    }

    /// The bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Number of bytes written
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Frame({:02X?})", self.as_bytes())
    }
}

/// Build a bind command frame.
///
/// While telemetry is streaming the destination is the receiver (an unbind
/// from the module's point of view); otherwise the module itself.
pub fn build_bind_frame(crc: &ChecksumEngine, telemetry_streaming: bool) -> Frame {
    let mut frame = Frame::new();
    frame.push(CRSF_UART_SYNC);
    frame.push(7); // frame length
    frame.push(CRSF_FRAMETYPE_COMMAND);
    if telemetry_streaming {
        frame.push(CRSF_RECEIVER_ADDRESS);
    } else {
        frame.push(CRSF_MODULE_ADDRESS);
    }
    frame.push(CRSF_RADIO_ADDRESS);
    frame.push(CRSF_SUBCOMMAND_CRSF);
    frame.push(CRSF_SUBCOMMAND_CRSF_BIND);

    let ba = crc.ba(&frame.as_bytes()[2..7]);
    frame.push(ba);
    let standard = crc.standard(&frame.as_bytes()[2..8]);
    frame.push(standard);

    frame
}

/// Build a broadcast device-discovery ping frame
pub fn build_ping_frame(crc: &ChecksumEngine) -> Frame {
    let mut frame = Frame::new();
    frame.push(CRSF_UART_SYNC);
    frame.push(4); // frame length
    frame.push(CRSF_FRAMETYPE_PING_DEVICES);
    frame.push(CRSF_BROADCAST_ADDRESS);
    frame.push(CRSF_RADIO_ADDRESS);

    let standard = crc.standard(&frame.as_bytes()[2..5]);
    frame.push(standard);

    frame
}

/// Build a model-select command frame carrying `model_id`
pub fn build_model_select_frame(crc: &ChecksumEngine, model_id: u8) -> Frame {
    let mut frame = Frame::new();
    frame.push(CRSF_UART_SYNC);
    frame.push(8); // frame length
    frame.push(CRSF_FRAMETYPE_COMMAND);
    frame.push(CRSF_MODULE_ADDRESS);
    frame.push(CRSF_RADIO_ADDRESS);
    frame.push(CRSF_SUBCOMMAND_CRSF);
    frame.push(CRSF_COMMAND_MODEL_SELECT_ID);
    frame.push(model_id);

    let ba = crc.ba(&frame.as_bytes()[2..8]);
    frame.push(ba);
    let standard = crc.standard(&frame.as_bytes()[2..9]);
    frame.push(standard);

    frame
}

/// Build an RC channels frame.
///
/// Frame length 24 in Channel arming mode. In Switch arming mode the frame
/// is one byte longer: the commanded-armed status travels in an extra byte
/// after the channel data, read from the configured arming trigger (an
/// unconfigured trigger reads as disarmed).
pub fn build_channels_frame(
    crc: &ChecksumEngine,
    config: &ModuleConfig,
    pulses: &RcPulses,
    switches: &dyn SwitchReader,
    trim: &dyn TrimSource,
) -> Frame {
    let len_adjust = match config.arming_mode {
        ArmingMode::Switch => 1,
        ArmingMode::Channel => 0,
    };

    let mut frame = Frame::new();
    frame.push(CRSF_MODULE_ADDRESS);
    // 1 (type) + 22 (channel data) + extra armed byte in Switch mode + 1 (CRC)
    frame.push((1 + CRSF_CHANNELS_PAYLOAD_SIZE + len_adjust + 1) as u8);
    frame.push(CRSF_FRAMETYPE_RC_CHANNELS_PACKED);

    pack_channels(&mut frame, pulses, trim);

    if config.arming_mode == ArmingMode::Switch {
        let armed = config
            .arming_trigger
            .map(|switch| switches.is_active(switch))
            .unwrap_or(false);
        frame.push(armed as u8);
    }

    let standard = crc.standard(&frame.as_bytes()[2..]);
    frame.push(standard);

    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModuleConfig;
    use crate::crsf::crc::{crc8, crc8_ba};
    use crate::inputs::{MockSwitchReader, NoSwitches, NoTrim, SwitchSource};

    fn channel_config() -> ModuleConfig {
        ModuleConfig {
            model_id: 0,
            arming_mode: ArmingMode::Channel,
            arming_trigger: None,
        }
    }

    fn switch_config(trigger: Option<SwitchSource>) -> ModuleConfig {
        ModuleConfig {
            model_id: 0,
            arming_mode: ArmingMode::Switch,
            arming_trigger: trigger,
        }
    }

    /// Declared length must count every byte after the length field
    fn assert_declared_length(frame: &Frame) {
        let bytes = frame.as_bytes();
        assert_eq!(bytes[1] as usize, bytes.len() - 2);
    }

    #[test]
    fn test_frame_push_and_cursor() {
        let mut frame = Frame::new();
        assert!(frame.is_empty());

        frame.push(0xC8);
        frame.extend_from_slice(&[0x04, 0x28]);
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.as_bytes(), &[0xC8, 0x04, 0x28]);
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn test_frame_overflow_asserts() {
        let mut frame = Frame::new();
        for _ in 0..=CRSF_FRAME_MAXLEN {
            frame.push(0);
        }
    }

    #[test]
    fn test_bind_frame_layout() {
        let crc = ChecksumEngine::software();
        let frame = build_bind_frame(&crc, false);
        let bytes = frame.as_bytes();

        assert_eq!(bytes.len(), 9);
        assert_eq!(
            &bytes[..7],
            &[
                CRSF_UART_SYNC,
                7,
                CRSF_FRAMETYPE_COMMAND,
                CRSF_MODULE_ADDRESS,
                CRSF_RADIO_ADDRESS,
                CRSF_SUBCOMMAND_CRSF,
                CRSF_SUBCOMMAND_CRSF_BIND,
            ]
        );
        // BA checksum over the command payload, standard checksum over
        // payload + BA byte
        assert_eq!(bytes[7], crc8_ba(&bytes[2..7]));
        assert_eq!(bytes[8], crc8(&bytes[2..8]));
        assert_declared_length(&frame);
    }

    #[test]
    fn test_bind_frame_destination_follows_telemetry_state() {
        let crc = ChecksumEngine::software();

        let idle = build_bind_frame(&crc, false);
        assert_eq!(idle.as_bytes()[3], CRSF_MODULE_ADDRESS);

        let streaming = build_bind_frame(&crc, true);
        assert_eq!(streaming.as_bytes()[3], CRSF_RECEIVER_ADDRESS);

        // Destination is checksummed
        assert_ne!(idle.as_bytes()[7], streaming.as_bytes()[7]);
    }

    #[test]
    fn test_ping_frame_layout() {
        let crc = ChecksumEngine::software();
        let frame = build_ping_frame(&crc);
        let bytes = frame.as_bytes();

        assert_eq!(bytes.len(), 6);
        assert_eq!(
            &bytes[..5],
            &[
                CRSF_UART_SYNC,
                4,
                CRSF_FRAMETYPE_PING_DEVICES,
                CRSF_BROADCAST_ADDRESS,
                CRSF_RADIO_ADDRESS,
            ]
        );
        assert_eq!(bytes[5], crc8(&bytes[2..5]));
        assert_declared_length(&frame);
    }

    #[test]
    fn test_model_select_frame_layout() {
        let crc = ChecksumEngine::software();
        let frame = build_model_select_frame(&crc, 0x2A);
        let bytes = frame.as_bytes();

        assert_eq!(bytes.len(), 10);
        assert_eq!(
            &bytes[..8],
            &[
                CRSF_UART_SYNC,
                8,
                CRSF_FRAMETYPE_COMMAND,
                CRSF_MODULE_ADDRESS,
                CRSF_RADIO_ADDRESS,
                CRSF_SUBCOMMAND_CRSF,
                CRSF_COMMAND_MODEL_SELECT_ID,
                0x2A,
            ]
        );
        assert_eq!(bytes[8], crc8_ba(&bytes[2..8]));
        assert_eq!(bytes[9], crc8(&bytes[2..9]));
        assert_declared_length(&frame);
    }

    #[test]
    fn test_model_select_frame_carries_model_id() {
        let crc = ChecksumEngine::software();
        for model_id in [0u8, 1, 63, 255] {
            let frame = build_model_select_frame(&crc, model_id);
            assert_eq!(frame.as_bytes()[7], model_id);
            assert_declared_length(&frame);
        }
    }

    #[test]
    fn test_channels_frame_channel_mode_layout() {
        let crc = ChecksumEngine::software();
        let pulses = [0i16; CRSF_NUM_CHANNELS];
        let frame = build_channels_frame(&crc, &channel_config(), &pulses, &NoSwitches, &NoTrim);
        let bytes = frame.as_bytes();

        assert_eq!(bytes.len(), 26);
        assert_eq!(bytes[0], CRSF_MODULE_ADDRESS);
        assert_eq!(bytes[1], 24);
        assert_eq!(bytes[2], CRSF_FRAMETYPE_RC_CHANNELS_PACKED);
        assert_eq!(bytes[25], crc8(&bytes[2..25]));
        assert_declared_length(&frame);
    }

    #[test]
    fn test_channels_frame_switch_mode_is_one_byte_longer() {
        let crc = ChecksumEngine::software();
        let pulses = [0i16; CRSF_NUM_CHANNELS];

        let mut switches = MockSwitchReader::new();
        switches.expect_is_active().returning(|_| true);

        let frame = build_channels_frame(
            &crc,
            &switch_config(Some(SwitchSource(5))),
            &pulses,
            &switches,
            &NoTrim,
        );
        let bytes = frame.as_bytes();

        assert_eq!(bytes.len(), 27);
        assert_eq!(bytes[1], 25);
        assert_eq!(bytes[25], 1, "commanded-armed byte after channel data");
        assert_eq!(bytes[26], crc8(&bytes[2..26]));
        assert_declared_length(&frame);
    }

    #[test]
    fn test_channels_frame_switch_mode_disarmed() {
        let crc = ChecksumEngine::software();
        let pulses = [0i16; CRSF_NUM_CHANNELS];

        let mut switches = MockSwitchReader::new();
        switches.expect_is_active().returning(|_| false);

        let frame = build_channels_frame(
            &crc,
            &switch_config(Some(SwitchSource(5))),
            &pulses,
            &switches,
            &NoTrim,
        );
        assert_eq!(frame.as_bytes()[25], 0);
    }

    #[test]
    fn test_channels_frame_no_trigger_reads_disarmed() {
        let crc = ChecksumEngine::software();
        let pulses = [0i16; CRSF_NUM_CHANNELS];

        // An armed switch somewhere must not matter without a trigger
        let mut switches = MockSwitchReader::new();
        switches.expect_is_active().never();

        let frame =
            build_channels_frame(&crc, &switch_config(None), &pulses, &switches, &NoTrim);
        let bytes = frame.as_bytes();

        assert_eq!(bytes.len(), 27);
        assert_eq!(bytes[25], 0);
    }

    #[test]
    fn test_channels_frame_reference_payload() {
        // All-zero pulses map every field to the center value 992, whose
        // 11-bit LSB-first packing repeats every 11 bytes.
        let crc = ChecksumEngine::software();
        let pulses = [0i16; CRSF_NUM_CHANNELS];
        let frame = build_channels_frame(&crc, &channel_config(), &pulses, &NoSwitches, &NoTrim);

        let reference: [u8; 11] = [
            0xE0, 0x03, 0x1F, 0xF8, 0xC0, 0x07, 0x3E, 0xF0, 0x81, 0x0F, 0x7C,
        ];
        assert_eq!(&frame.as_bytes()[3..14], &reference);
        assert_eq!(&frame.as_bytes()[14..25], &reference);
    }

    #[test]
    fn test_channels_frame_checksum_tracks_data() {
        let crc = ChecksumEngine::software();
        let centered = [0i16; CRSF_NUM_CHANNELS];
        let mut deflected = [0i16; CRSF_NUM_CHANNELS];
        deflected[0] = 512;

        let a = build_channels_frame(&crc, &channel_config(), &centered, &NoSwitches, &NoTrim);
        let b = build_channels_frame(&crc, &channel_config(), &deflected, &NoSwitches, &NoTrim);
        assert_ne!(a.as_bytes()[25], b.as_bytes()[25]);
    }
}
