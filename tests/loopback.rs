//! Loopback integration tests: the transmitter's line wired straight into
//! the decoder.
//!
//! Every async test runs under tokio's paused clock, so bit-level timing is
//! exact virtual time and the suite is fully deterministic — a bit period is
//! ten microseconds of virtual time, not wall time.

use std::time::Duration;

use uart_bitbang::{spawn_clock, ConfigError, Line, Uart, UartConfig};

/// 10 µs bit period — comfortably above the decoder's slot guard.
const BAUD: u32 = 100_000;

/// Build a started loopback transceiver: tx wired straight to rx.
async fn loopback(config: UartConfig) -> Uart {
    let clock = Line::new("clk", false);
    let wire = Line::new("wire", true);
    spawn_clock(clock.clone(), Duration::from_micros(50));

    let mut uart = Uart::new(config, clock, wire.clone(), wire).expect("valid config");
    uart.start().await;
    uart
}

/// Wait long enough for the decoder to finish the frame in flight.
async fn settle(uart: &Uart) {
    tokio::time::sleep(uart.config().bit_period() * 4).await;
}

// ---------------------------------------------------------------------------
// Round-trip law
// ---------------------------------------------------------------------------

/// Every byte value survives encode → decode unchanged, even when all 256
/// frames are sent back to back with zero inter-frame gap.
#[tokio::test(start_paused = true)]
async fn roundtrip_all_byte_values() {
    let uart = loopback(UartConfig::with_baud(BAUD)).await;

    for byte in 0..=u8::MAX {
        uart.send(byte).await;
    }
    settle(&uart).await;

    let expected: Vec<u8> = (0..=u8::MAX).collect();
    assert_eq!(uart.received(), expected);
}

/// 0xB2 exercises an asymmetric bit pattern: LSB-first transmission must be
/// matched by LSB-first reconstruction or the value comes back mirrored.
#[tokio::test(start_paused = true)]
async fn bit_order_is_preserved() {
    let uart = loopback(UartConfig::with_baud(BAUD)).await;

    uart.send(0xB2).await;
    settle(&uart).await;

    assert_eq!(uart.received(), [0xB2]);
}

/// Two immediate sends produce two clean frames; the second start bit falls
/// inside the decoder's stop-bit slot and must not be lost there.
#[tokio::test(start_paused = true)]
async fn back_to_back_sends_do_not_bleed() {
    let uart = loopback(UartConfig::with_baud(BAUD)).await;

    uart.send(0x55).await;
    uart.send(0xA3).await;
    settle(&uart).await;

    assert_eq!(uart.received(), [0x55, 0xA3]);
}

/// A frame without a stop bit still decodes; the line simply rests at the
/// last data bit's level afterwards.
#[tokio::test(start_paused = true)]
async fn stop_bit_disabled_round_trips() {
    let config = UartConfig {
        stop_bit: false,
        ..UartConfig::with_baud(BAUD)
    };
    let uart = loopback(config).await;

    uart.send(0x9A).await;
    settle(&uart).await;

    assert_eq!(uart.received(), [0x9A]);
}

// ---------------------------------------------------------------------------
// Command streaming and the text view
// ---------------------------------------------------------------------------

/// "A\r" arrives as exactly two bytes, in send order.
#[tokio::test(start_paused = true)]
async fn send_command_buffers_bytes_in_order() {
    let uart = loopback(UartConfig::with_baud(BAUD)).await;

    uart.send_command("A\r", Duration::from_micros(20)).await;
    settle(&uart).await;

    assert_eq!(uart.received(), [0x41, 0x0D]);
    assert_eq!(uart.received_text(), ["A", ""]);
}

/// The text view splits on carriage returns and drops the delimiters.
#[tokio::test(start_paused = true)]
async fn received_text_splits_on_carriage_return() {
    let uart = loopback(UartConfig::with_baud(BAUD)).await;

    uart.send_command("AB\rC", Duration::from_micros(20)).await;
    settle(&uart).await;

    assert_eq!(uart.received(), [0x41, 0x42, 0x0D, 0x43]);
    assert_eq!(uart.received_text(), ["AB", "C"]);
}

/// Characters above 0xFF are masked to eight bits before transmission.
#[tokio::test(start_paused = true)]
async fn wide_characters_are_masked_to_a_byte() {
    let uart = loopback(UartConfig::with_baud(BAUD)).await;

    // U+0141 masks to 0x41.
    uart.send_command("Ł", Duration::from_micros(20)).await;
    settle(&uart).await;

    assert_eq!(uart.received(), [0x41]);
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// `stop` joins the decode task; frames sent afterwards are never decoded.
#[tokio::test(start_paused = true)]
async fn stop_tears_down_the_decoder() {
    let mut uart = loopback(UartConfig::with_baud(BAUD)).await;

    uart.send(0x41).await;
    settle(&uart).await;
    uart.stop().await;

    uart.send(0x42).await;
    settle(&uart).await;

    assert_eq!(uart.received(), [0x41]);
}

/// A second `start` must not spawn a second decode task; one frame decodes
/// to one byte, not two.
#[tokio::test(start_paused = true)]
async fn start_is_idempotent() {
    let mut uart = loopback(UartConfig::with_baud(BAUD)).await;
    uart.start().await;

    uart.send(0x7E).await;
    settle(&uart).await;

    assert_eq!(uart.received(), [0x7E]);
    uart.stop().await;
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

fn lines() -> (Line, Line, Line) {
    (
        Line::new("clk", false),
        Line::new("tx", true),
        Line::new("rx", true),
    )
}

/// Parity is rejected at construction for any combination of other options.
#[test]
fn construction_rejects_parity() {
    for stop_bit in [false, true] {
        let (clk, tx, rx) = lines();
        let config = UartConfig {
            parity: true,
            stop_bit,
            ..UartConfig::default()
        };
        let err = Uart::new(config, clk, tx, rx).err();
        assert_eq!(err, Some(ConfigError::ParityUnsupported));
    }
}

/// Data widths other than eight bits are rejected at construction.
#[test]
fn construction_rejects_other_data_widths() {
    for data_bits in [5, 7, 9] {
        let (clk, tx, rx) = lines();
        let config = UartConfig {
            data_bits,
            ..UartConfig::default()
        };
        let err = Uart::new(config, clk, tx, rx).err();
        assert_eq!(err, Some(ConfigError::UnsupportedDataBits(data_bits)));
    }
}

/// A valid configuration constructs for any stop-bit/baud combination.
#[test]
fn construction_accepts_valid_configs() {
    for stop_bit in [false, true] {
        for baud_rate in [9_600, 57_600, 115_200] {
            let (clk, tx, rx) = lines();
            let config = UartConfig {
                baud_rate,
                stop_bit,
                ..UartConfig::default()
            };
            assert!(Uart::new(config, clk, tx, rx).is_ok());
        }
    }
}
