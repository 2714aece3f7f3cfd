//! # CRSF TX Library
//!
//! Outbound CRSF (Crossfire) frame generation for external RF modules.
//!
//! This library builds the link-layer frames a radio handset sends to an
//! external Crossfire/ExpressLRS module over half-duplex serial, and decides
//! tick by tick which frame to emit next: telemetry pass-through, the
//! one-shot model-select command, device-discovery pings, or the steady
//! stream of packed RC channel data. The surrounding firmware owns the
//! serial transport and the tick timer; this crate only produces bytes.

pub mod config;
pub mod error;
pub mod crsf;
pub mod inputs;
pub mod telemetry;
pub mod transport;
