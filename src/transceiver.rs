//! The owning transceiver.
//!
//! [`Uart`] ties the pieces together: it validates the configuration, owns
//! the transmit line for write purposes, owns the received-byte buffer, and
//! manages the lifetime of the background decode task.
//!
//! Shared-resource policy: the tx line is mutated only by the transmitter;
//! the rx line is only observed; the buffer is appended to only by the
//! decode task.  At most one decode task is ever active per instance.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::buffer::RxBuffer;
use crate::config::{ConfigError, UartConfig};
use crate::line::Line;
use crate::receiver::decode_loop;
use crate::transmitter::Transmitter;

/// A software UART bound to one tx line and one rx line.
#[derive(Debug)]
pub struct Uart {
    config: UartConfig,
    tx: Transmitter,
    rx_line: Line,
    clock: Line,
    buffer: RxBuffer,
    shutdown: Option<mpsc::Sender<()>>,
    decoder: Option<JoinHandle<()>>,
}

impl Uart {
    /// Validate `config` and build an idle transceiver.
    ///
    /// `tx_line` becomes exclusively owned for writes; `rx_line` is only
    /// ever observed.  Fails before anything is spawned, so an `Err` leaves
    /// no partial state behind.
    pub fn new(
        config: UartConfig,
        clock: Line,
        tx_line: Line,
        rx_line: Line,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            tx: Transmitter::new(tx_line, config),
            rx_line,
            clock,
            buffer: RxBuffer::new(),
            shutdown: None,
            decoder: None,
        })
    }

    /// Drive the tx line to idle and launch the background decode task.
    ///
    /// Returns after the next rising clock edge, which guarantees the decode
    /// task is already observing the rx line before the caller transmits
    /// anything.  Edges that occurred before `start` are not seen.  A second
    /// call is a no-op: at most one decode task runs per instance.
    pub async fn start(&mut self) {
        if self.decoder.is_some() {
            return;
        }

        log::debug!("[uart] starting at {} baud", self.config.baud_rate);
        self.tx.idle();

        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        self.decoder = Some(tokio::spawn(decode_loop(
            self.rx_line.clone(),
            self.buffer.clone(),
            self.config,
            shutdown_rx,
        )));
        self.shutdown = Some(shutdown_tx);

        // Hand control to the decode task before the caller continues.
        self.clock.rising_edge().await;
    }

    /// Ask the decode task to exit and wait for it.
    ///
    /// Takes effect between frames; a frame mid-decode finishes first.  Safe
    /// to call if the task was never started.  Dropping the `Uart` without
    /// calling `stop` also ends the task at its next idle point.
    pub async fn stop(&mut self) {
        // Closing the shutdown channel signals the loop.
        self.shutdown.take();
        if let Some(handle) = self.decoder.take() {
            let _ = handle.await;
        }
    }

    /// Transmit one byte.  See [`Transmitter::send`].
    pub async fn send(&self, byte: u8) {
        self.tx.send(byte).await
    }

    /// Transmit a string character by character.  See
    /// [`Transmitter::send_command`].
    pub async fn send_command(&self, text: &str, inter_char_delay: Duration) {
        self.tx.send_command(text, inter_char_delay).await
    }

    /// Every byte decoded so far, in arrival order.
    pub fn received(&self) -> Vec<u8> {
        self.buffer.bytes()
    }

    /// The received bytes as text, split on carriage returns.
    pub fn received_text(&self) -> Vec<String> {
        self.buffer.text_lines()
    }

    /// Shared handle to the underlying byte store.
    pub fn rx_buffer(&self) -> RxBuffer {
        self.buffer.clone()
    }

    pub fn config(&self) -> &UartConfig {
        &self.config
    }
}
