//! # at86rf212
//!
//! A portable, no_std Rust driver for the Microchip (Atmel) AT86RF212 sub-GHz
//! IEEE 802.15.4 transceiver.
//!
//! The driver takes the chip through reset, identification and configuration and
//! then drives its TRX state machine for transmission and reception:
//! - every bus access goes through a small [`Transport`] trait, with
//!   [`HalTransport`] provided for `embedded-hal` 1.0 SPI devices and GPIO lines
//! - all waits are bounded poll loops, with budgets and spacing taken from [`Timing`]
//! - completion checks are non-blocking and return [`nb::Result`]
//! - an interrupt-safe shared handle is available through `critical-section`
//!
//! ## Crate features
//! | Feature            | Description |
//! |--------------------|-------------|
//! | `std`              | Disables `#![no_std]` |
//! | `shared` (default) | [`shared`] module for using the device from interrupt handlers |
//! | `defmt-0-3`        | Uses `defmt` logging and derives `defmt::Format` |
//! | `log`              | Uses `log` logging |
//!
//! ## Usage
//!
//! ```rust,no_run
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! # use embedded_hal_mock::eh1::digital::Mock as Pin;
//! # use embedded_hal_mock::eh1::spi::Mock as Spi;
//! # fn main() -> Result<(), at86rf212::Error<at86rf212::transport::HalError>> {
//! # let (spi, rst, slp, irq) = (Spi::new(&[]), Pin::new(&[]), Pin::new(&[]), Pin::new(&[]));
//! # let delay = NoopDelay::new();
//! use at86rf212::frame::RxFrame;
//! use at86rf212::{Config, Device, HalTransport};
//!
//! let transport = HalTransport::new(spi, rst, slp, irq);
//! let mut radio = Device::open(transport, delay, Config::default())?;
//!
//! radio.set_pan_id(0xCAFE)?;
//! radio.set_short_address(0x0001)?;
//! radio.transmit(&[0x41, 0x88, 0x00, 0xFE, 0xCA, 0xFF, 0xFF, 0x01, 0x00, b'h', b'i'])?;
//!
//! let mut buf = [0u8; 130];
//! let len = radio.receive(&mut buf)?;
//! if let Some(frame) = RxFrame::parse(&buf[..len]) {
//!     let _ = (frame.payload(), frame.lqi(), frame.crc_valid());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`check_tx`](Device::check_tx) and [`check_rx`](Device::check_rx) can be polled
//! instead of using the blocking [`transmit`](Device::transmit) and
//! [`receive`](Device::receive) helpers.
//!
//! ## Integration Notes
//!
//! - The handle is not internally synchronized; serialize access or use [`shared`]
//! - Raising the IRQ line only reflects IRQ_MASK; the driver itself polls IRQ_STATUS
//! - Reading IRQ_STATUS clears it, and `check_tx`, `check_rx` and the PLL lock wait
//!   all read it
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
mod fmt;

#[cfg(feature = "shared")]
pub use critical_section;

pub mod config;
pub mod consts;
pub(crate) mod crc;
pub mod error;
pub mod frame;
pub mod registers;
#[cfg(feature = "shared")]
pub mod shared;
pub mod transport;

mod bus;
mod device;
mod mac;
mod phy;
mod rx;
mod tx;

#[cfg(test)]
mod testing;

pub use config::{Config, ShutdownPolicy, Timing};
pub use device::Device;
pub use error::Error;
pub use frame::RxFrame;
pub use registers::{CcaMode, IrqStatus, Register, TracStatus, TrxCmd, TrxStatus};
pub use transport::{Capabilities, HalTransport, Transport};
