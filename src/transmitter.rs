//! Transmit-side bit timing.
//!
//! The [`Transmitter`] serializes bytes onto its line: start bit, eight data
//! bits least-significant first, optional stop bit, each held for exactly
//! one bit period.  Every hold is a pure duration wait; transmission never
//! reacts to the line, so frames cannot be disturbed by inbound traffic.
//!
//! The transmitter is the sole writer of its line.  It cannot fail once the
//! configuration has been validated.

use std::time::Duration;

use tokio::time::sleep;

use crate::config::UartConfig;
use crate::frame::{data_bits, START_LEVEL, STOP_LEVEL};
use crate::line::Line;

/// Serializes bytes onto a digital line.
#[derive(Debug, Clone)]
pub struct Transmitter {
    line: Line,
    config: UartConfig,
}

impl Transmitter {
    /// Build a transmitter that exclusively drives `line`.
    pub fn new(line: Line, config: UartConfig) -> Self {
        Self { line, config }
    }

    /// Park the line at idle (logic high).
    pub fn idle(&self) {
        self.line.drive(STOP_LEVEL);
    }

    /// Transmit one frame carrying `byte`.
    ///
    /// Holds the start level for one bit period, then each data bit in wire
    /// order, then — if configured — the stop level for one final period,
    /// leaving the line at idle.
    pub async fn send(&self, byte: u8) {
        let period = self.config.bit_period();

        self.line.drive(START_LEVEL);
        sleep(period).await;

        for bit in data_bits(byte) {
            self.line.drive(bit);
            sleep(period).await;
        }

        if self.config.stop_bit {
            self.line.drive(STOP_LEVEL);
            sleep(period).await;
        }
    }

    /// Transmit `text` one character at a time.
    ///
    /// Each character's code point is masked to eight bits and sent as its
    /// own frame, followed by `inter_char_delay` of idle time.  Strictly
    /// sequential; the call returns only after the last delay.
    pub async fn send_command(&self, text: &str, inter_char_delay: Duration) {
        for ch in text.chars() {
            log::debug!("[tx] sending {ch:?}");
            self.send((ch as u32 & 0xff) as u8).await;
            sleep(inter_char_delay).await;
        }
    }
}
