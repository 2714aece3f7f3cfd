//! # Telemetry Pass-through Module
//!
//! Queue for telemetry bytes the receiver side wants retransmitted out of
//! the module port. The surrounding firmware fills the buffer; the frame
//! scheduler drains it, forwarding the bytes verbatim ahead of any protocol
//! frame. Consumption happens at most once per tick and clears both the
//! bytes and the trigger flag.

use bytes::{Bytes, BytesMut};

use crate::crsf::protocol::CRSF_FRAME_MAXLEN;
use crate::error::{CrsfTxError, Result};

/// Externally filled pass-through buffer with a one-shot trigger flag
#[derive(Debug)]
pub struct TelemetryBuffer {
    data: BytesMut,
    trigger: bool,
}

impl TelemetryBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            data: BytesMut::with_capacity(CRSF_FRAME_MAXLEN),
            trigger: false,
        }
    }

    /// Queue bytes for retransmission and arm the trigger.
    ///
    /// # Errors
    ///
    /// Returns [`CrsfTxError::PassthroughTooLarge`] if the queued total
    /// would exceed the protocol frame maximum; the buffer is left
    /// unchanged.
    pub fn queue(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }

        let total = self.data.len() + bytes.len();
        if total > CRSF_FRAME_MAXLEN {
            return Err(CrsfTxError::PassthroughTooLarge(total));
        }

        self.data.extend_from_slice(bytes);
        self.trigger = true;
        Ok(())
    }

    /// Whether queued bytes are waiting for the next tick
    pub fn is_pending(&self) -> bool {
        self.trigger
    }

    /// Number of queued bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the queued bytes, clearing the buffer and the trigger.
    ///
    /// Returns `None` when nothing is queued.
    pub(crate) fn take(&mut self) -> Option<Bytes> {
        if self.data.is_empty() {
            return None;
        }

        self.trigger = false;
        Some(self.data.split().freeze())
    }
}

impl Default for TelemetryBuffer {
    fn default() -> Self {
        Self::new()
    }
}
