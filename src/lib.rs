//! `uart-bitbang` — a software UART transceiver for simulated serial lines.
//!
//! Bytes are driven onto a digital line bit by bit at a configured rate, and
//! an independent decode task watches a second line for incoming frames,
//! samples it at bit-period boundaries, and reassembles the bytes.
//!
//! # Architecture
//!
//! ```text
//!  Application
//!      │ send(byte) / send_command(text)
//!      ▼
//!  ┌────────────────────────────────────┐
//!  │               Uart                 │
//!  │  ├── Transmitter ──drives──▶ tx ───┼──▶ (wire)
//!  │  ├── RxBuffer ◀── decode task      │
//!  │  └── JoinHandle + shutdown channel │
//!  └────────────────────▲───────────────┘
//!            (wire) ──▶ rx  observed only
//! ```
//!
//! Each module has a single responsibility:
//! - [`config`]      — line parameters and construction-time validation
//! - [`line`]        — digital-signal handles: drive/read level, await edges,
//!   race a bit window against both edge directions
//! - [`frame`]       — pure frame layout (LSB-first bit order, reassembly)
//! - [`transmitter`] — serialize bytes onto the tx line with per-bit timing
//! - [`receiver`]    — background decode loop for the rx line
//! - [`buffer`]      — append-only store of decoded bytes + text-line view
//! - [`transceiver`] — the owning [`Uart`]: construction, startup, teardown
//!
//! # Timing model
//!
//! All waits are tokio suspension points: `sleep` for "one bit period
//! elapses" and watch-channel notifications for "the line transitioned".
//! Under a normal runtime these run against real time; under tokio's paused
//! clock (`start_paused` in tests) the same code runs in virtual time with
//! instant, deterministic auto-advance — which is what makes the transceiver
//! usable as a simulation component.
//!
//! # Example
//!
//! ```ignore
//! let clock = Line::new("clk", false);
//! let wire = Line::new("wire", true);
//! spawn_clock(clock.clone(), Duration::from_micros(100));
//!
//! // Loopback: the transmitter's line is also the one the decoder watches.
//! let mut uart = Uart::new(UartConfig::default(), clock, wire.clone(), wire)?;
//! uart.start().await;
//! uart.send_command("HELLO\r", Duration::from_micros(50)).await;
//! assert_eq!(uart.received_text()[0], "HELLO");
//! uart.stop().await;
//! ```

pub mod buffer;
pub mod config;
pub mod frame;
pub mod line;
pub mod receiver;
pub mod transceiver;
pub mod transmitter;

pub use buffer::RxBuffer;
pub use config::{ConfigError, UartConfig};
pub use line::{spawn_clock, Line, LineEvent};
pub use transceiver::Uart;
pub use transmitter::Transmitter;
