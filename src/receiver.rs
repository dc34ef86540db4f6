//! Receive-side bit-timing state machine.
//!
//! The decode loop runs as a background task for the life of a transceiver
//! and never drives a line.  Per frame:
//!
//! ```text
//!  IDLE ──falling edge──▶ START ──tick──▶ SAMPLE×8 ──tick──▶ STOP ──▶ emit
//!   ▲                                                                  │
//!   └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each `tick` is [`Line::tick`]: one bit period plus [`SLOT_GUARD`] raced
//! against both edge directions.  An edge from a jitter-free transmitter
//! lands at the bit boundary, inside the window, and resynchronizes the
//! loop; on a quiet stretch the timeout advances it instead, drifting
//! [`SLOT_GUARD`] deeper into the cell per edge-free slot.  The start level
//! is never re-validated and the stop level is never sampled, so a glitched
//! frame decodes to whatever was sampled rather than being rejected.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::buffer::RxBuffer;
use crate::config::UartConfig;
use crate::frame::{BitAssembler, DATA_BITS};
use crate::line::{Line, LineEvent};

/// Margin added to every bit window so the transmitter's next edge lands
/// inside the current race rather than after it.
///
/// The guard accumulates on edge-free slots, so the bit period must exceed
/// roughly eight times this value for samples to stay inside their cells.
pub const SLOT_GUARD: Duration = Duration::from_nanos(300);

/// Decode frames from `line` into `buffer` until `shutdown` closes.
///
/// Usually spawned by [`Uart::start`](crate::Uart::start); exposed so a
/// standalone receiver can be wired up directly.  Shutdown is honoured only
/// between frames, so a frame already in flight always decodes fully.
pub async fn decode_loop(
    line: Line,
    buffer: RxBuffer,
    config: UartConfig,
    mut shutdown: mpsc::Receiver<()>,
) {
    let window = config.bit_period() + SLOT_GUARD;
    log::debug!(
        "[rx] decode loop watching {} at {} baud",
        line.name(),
        config.baud_rate
    );

    'idle: loop {
        // IDLE: the next falling edge is a candidate start bit.
        tokio::select! {
            _ = line.falling_edge() => {}
            _ = shutdown.recv() => break,
        }

        loop {
            // Start-bit slot.  Which condition fired is deliberately
            // ignored here and for the data slots: the race is purely a
            // clocking tick.
            line.tick(window).await;

            let mut assembler = BitAssembler::new();
            for _ in 0..DATA_BITS {
                assembler.push(line.level());
                line.tick(window).await;
            }

            // Stop-bit slot.  The stop level is not sampled, but a falling
            // edge in this window is the start bit of a back-to-back frame
            // and must not be swallowed by the race.
            let stop = line.tick(window).await;

            let byte = assembler.value();
            buffer.push(byte);
            if byte == 0x0D {
                log::info!("[rx] read char \\r (value 0x0D)");
            } else {
                log::info!("[rx] read char {} (value {:02X})", byte as char, byte);
            }

            if stop != LineEvent::Fell {
                continue 'idle;
            }
        }
    }

    log::debug!("[rx] decode loop stopped");
}
