//! Loopback demo for `uart-bitbang`.
//!
//! Wires the transmitter's line straight back into the decoder, sends a text
//! command, and prints what arrived.  Set `RUST_LOG=debug` to watch each
//! character go out and come back.

use std::time::Duration;

use anyhow::Result;
use clap::Parser;

use uart_bitbang::{spawn_clock, Line, Uart, UartConfig};

/// Send a string through a software UART wired back to itself.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Line rate in bits per second.
    #[arg(short, long, default_value_t = 57_600)]
    baud: u32,

    /// Text to transmit; a carriage return ends a line.
    #[arg(short, long, default_value = "HELLO WORLD\r")]
    text: String,

    /// Idle gap between characters, in microseconds.
    #[arg(short, long, default_value_t = 100)]
    gap_us: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let clock = Line::new("clk", false);
    let wire = Line::new("wire", true);
    spawn_clock(clock.clone(), Duration::from_micros(100));

    // Loopback: the same line serves as tx output and rx input.
    let mut uart = Uart::new(
        UartConfig::with_baud(cli.baud),
        clock,
        wire.clone(),
        wire,
    )?;
    uart.start().await;

    log::info!("sending {:?} at {} baud", cli.text, cli.baud);
    uart.send_command(&cli.text, Duration::from_micros(cli.gap_us))
        .await;

    // Let the decoder drain the final stop-bit slot before reading.
    tokio::time::sleep(uart.config().bit_period() * 4).await;

    println!("received bytes: {:02X?}", uart.received());
    println!("received text:  {:?}", uart.received_text());

    uart.stop().await;
    Ok(())
}
