//! # Frame Scheduler
//!
//! Per-tick arbitration between telemetry pass-through, one-shot
//! configuration frames, device discovery and steady-state channel
//! streaming. The external driver calls [`FrameScheduler::next_frame`] once
//! per protocol frame period; exactly one frame comes out per call.
//!
//! Priority order per tick:
//! 1. queued telemetry pass-through bytes, forwarded verbatim and consumed
//! 2. the model-select one-shot, so the module knows its model before
//!    anything else
//! 3. device-discovery pings, repeated until the external query completes
//! 4. RC channel data
//!
//! Bind frames are not part of this cycle; they are built on an explicit
//! external request via [`FrameScheduler::bind_frame`].

use tracing::{debug, trace};

use super::crc::ChecksumEngine;
use super::frames::{
    build_bind_frame, build_channels_frame, build_model_select_frame, build_ping_frame, Frame,
};
use super::protocol::RcPulses;
use crate::config::ModuleConfig;
use crate::inputs::{SwitchReader, TrimSource};
use crate::telemetry::TelemetryBuffer;

/// One-shot sequencing state for an external module.
///
/// Advances `Init → ModelIdSent → Streaming` and only ever moves backward
/// through [`FrameScheduler::reset`] (module rebind or power-cycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// Model-select not sent yet
    Init,
    /// Model-select sent, device discovery may still be running
    ModelIdSent,
    /// Steady-state channel streaming
    Streaming,
}

/// Everything one tick reads from the outside world.
///
/// The scheduler owns nothing in here except the right to consume the
/// telemetry buffer; channel pulses, query status and the switch/trim
/// collaborators stay externally owned.
pub struct TickInputs<'a> {
    /// Calibrated channel pulses, [-1024, +1024] each
    pub pulses: &'a RcPulses,
    /// Whether device discovery has completed (externally owned)
    pub query_completed: bool,
    /// Telemetry pass-through queue, consumed at most once per tick
    pub telemetry: &'a mut TelemetryBuffer,
    /// Switch state evaluation for the commanded-armed byte
    pub switches: &'a dyn SwitchReader,
    /// Per-channel center trim offsets
    pub trim: &'a dyn TrimSource,
}

/// Per-module frame scheduler.
///
/// Holds the module configuration, the checksum strategy resolved at
/// initialization, and the one-shot sequencing state. Single-owner: one
/// scheduler per external module, driven from one periodic task.
#[derive(Debug)]
pub struct FrameScheduler {
    config: ModuleConfig,
    crc: ChecksumEngine,
    state: ModuleState,
}

impl FrameScheduler {
    /// Create a scheduler in the `Init` state
    pub fn new(config: ModuleConfig, crc: ChecksumEngine) -> Self {
        Self {
            config,
            crc,
            state: ModuleState::Init,
        }
    }

    /// Current sequencing state
    pub fn state(&self) -> ModuleState {
        self.state
    }

    /// Return to `Init`, re-running the model-select/discovery sequence.
    ///
    /// Called externally on module rebind or power-cycle.
    pub fn reset(&mut self) {
        debug!("module sequencing state reset");
        self.state = ModuleState::Init;
    }

    /// Produce the single frame for this tick.
    ///
    /// Queued telemetry bytes preempt every protocol frame and leave the
    /// sequencing state untouched; they are cleared as they are consumed.
    pub fn next_frame(&mut self, inputs: TickInputs<'_>) -> Frame {
        if let Some(bytes) = inputs.telemetry.take() {
            trace!(len = bytes.len(), "forwarding telemetry pass-through");
            return Frame::from_slice(&bytes);
        }

        match self.state {
            ModuleState::Init => {
                debug!(model_id = self.config.model_id, "sending model select");
                self.state = ModuleState::ModelIdSent;
                build_model_select_frame(&self.crc, self.config.model_id)
            }
            ModuleState::ModelIdSent if !inputs.query_completed => {
                trace!("device discovery incomplete, pinging");
                build_ping_frame(&self.crc)
            }
            _ => {
                if self.state != ModuleState::Streaming {
                    debug!("entering channel streaming");
                    self.state = ModuleState::Streaming;
                }
                build_channels_frame(
                    &self.crc,
                    &self.config,
                    inputs.pulses,
                    inputs.switches,
                    inputs.trim,
                )
            }
        }
    }

    /// Build a bind frame on an explicit "start bind" request.
    ///
    /// Outside the per-tick cycle; the sequencing state is not consulted or
    /// changed.
    pub fn bind_frame(&self, telemetry_streaming: bool) -> Frame {
        debug!(telemetry_streaming, "building bind frame on request");
        build_bind_frame(&self.crc, telemetry_streaming)
    }
}
