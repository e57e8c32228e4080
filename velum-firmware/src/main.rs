//! Velum - Somfy RTS Covering Controller Firmware
//!
//! Main firmware binary for RP2040 boards wired to a Somfy Telis 1 RTS
//! remote. Presses the remote's buttons to move the covering and estimates
//! its position from elapsed time, since the motor reports nothing back.
//!
//! Named after the Latin "velum", the awning drawn over a Roman theatre.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use velum_core::config::ButtonsConfig;
use velum_drivers::remote::build_lines;
use velum_hal_rp2040::{PinBank, RpOutputPin};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Velum firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    let (mut bank, link) = PinBank::split(p);

    let lines = take_button_lines(&config.buttons, &mut bank);

    // Setup UART for the host link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.link.baud;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(link.uart, link.tx, link.rx, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config.link.baud);

    let motion = config.motion();

    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner.spawn(tasks::cover_task(motion, lines)).unwrap();

    info!(
        "Initialized {} - current position {}%",
        config.name.as_str(),
        motion.initial_position.value()
    );

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Claim the remote's button pins
///
/// A pin that cannot be taken leaves its line detached; presses on it are
/// then logged but have no physical effect.
fn take_button_lines(buttons: &ButtonsConfig, bank: &mut PinBank) -> tasks::CoverLines {
    if !buttons.enabled {
        warn!("Buttons disabled, running without hardware");
    }

    build_lines(buttons, |channel, pin| {
        match bank.take(pin.pin) {
            Ok(p) => {
                info!(
                    "Button {} on gpio{}{}",
                    channel.label(),
                    pin.pin,
                    if pin.inverted { " (active-low)" } else { "" }
                );
                // Active-low lines idle high
                Ok(RpOutputPin::new(p, pin.pin, pin.inverted))
            }
            Err(e) => {
                warn!("Cannot use gpio{} for {}: {:?}", pin.pin, channel.label(), e);
                Err(e)
            }
        }
    })
}
