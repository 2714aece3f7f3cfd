//! # Transport Handoff
//!
//! The seam between frame generation and the external serial transport.
//! This crate never opens or drives a port; the surrounding firmware
//! implements [`FrameSink`] over whatever transport it owns and receives
//! each tick's bytes through it.

use std::io;
use tracing::debug;

use crate::crsf::frames::Frame;
use crate::error::Result;

/// Byte-level output owned by the surrounding firmware
pub trait FrameSink {
    /// Write one complete frame for transmission
    fn send_frame(&mut self, frame: &[u8]) -> io::Result<()>;
}

/// Hand a built frame to the transport
pub fn transmit(sink: &mut dyn FrameSink, frame: &Frame) -> Result<()> {
    sink.send_frame(frame.as_bytes())?;
    debug!("Sent CRSF frame ({} bytes)", frame.len());
    Ok(())
}
