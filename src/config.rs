//! Line parameters and construction-time validation.
//!
//! A [`UartConfig`] is immutable once a transceiver is built from it.  The
//! only invalid combinations are the ones the frame format cannot express:
//! parity (no parity slot is ever emitted) and data widths other than eight
//! bits.  Both are rejected before any task is spawned, so a failed
//! construction leaves nothing behind.

use std::time::Duration;

use thiserror::Error;

use crate::frame::DATA_BITS;

/// Option combinations rejected at construction.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A parity bit was requested; frames never carry one.
    #[error("parity is not supported")]
    ParityUnsupported,
    /// A data width other than eight bits was requested.
    #[error("only 8 data bits are supported, got {0}")]
    UnsupportedDataBits(u8),
}

/// Serial-line parameters, fixed for the lifetime of a transceiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    /// Line rate in bits per second.
    ///
    /// Not validated; zero is undefined.
    pub baud_rate: u32,

    /// Parity generation/checking.  Must be `false`.
    pub parity: bool,

    /// Data bits per frame.  Must be [`DATA_BITS`].
    pub data_bits: u8,

    /// Whether a stop-bit period is emitted after the data bits.
    pub stop_bit: bool,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 57_600,
            parity: false,
            data_bits: DATA_BITS as u8,
            stop_bit: true,
        }
    }
}

impl UartConfig {
    /// Default options at the given line rate.
    pub fn with_baud(baud_rate: u32) -> Self {
        Self {
            baud_rate,
            ..Self::default()
        }
    }

    /// Duration of one bit on the wire.
    ///
    /// Always derived from [`baud_rate`](Self::baud_rate) so the two can
    /// never disagree.
    pub fn bit_period(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(self.baud_rate))
    }

    /// Check the option combination.
    ///
    /// Called once when a transceiver is constructed; see [`ConfigError`]
    /// for the rejected cases.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parity {
            return Err(ConfigError::ParityUnsupported);
        }
        if usize::from(self.data_bits) != DATA_BITS {
            return Err(ConfigError::UnsupportedDataBits(self.data_bits));
        }
        Ok(())
    }
}
