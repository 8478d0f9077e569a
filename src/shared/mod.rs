//! Sharing a [`Device`] with interrupt handlers.
//!
//! The handle lives in a `static` guarded by a [`critical_section::Mutex`]. The main
//! loop opens the device and [`install`]s it; afterwards every access, from the main
//! loop or from the IRQ handler, goes through [`with_device`] and therefore runs
//! inside a critical section.
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::delay::NoopDelay;
//! # use embedded_hal_mock::eh1::digital::Mock as PinMock;
//! # use embedded_hal_mock::eh1::spi::Mock as SpiMock;
//! use at86rf212::shared::with_device;
//! use at86rf212::{HalTransport, shared_device};
//!
//! shared_device!(static RADIO: Device<HalTransport<SpiMock<u8>, PinMock, PinMock, PinMock>, NoopDelay>);
//!
//! // main loop: load the frame and start sending, without waiting
//! let started = with_device(&RADIO, |radio| radio.start_tx(&[0x01, 0x02]));
//! assert!(started.is_none());
//!
//! // IRQ handler: a single non-blocking completion check
//! let done = with_device(&RADIO, |radio| radio.check_tx().is_ok());
//! assert_eq!(done, None);
//! ```
//!
//! The blocking helpers ([`transmit`](Device::transmit), [`receive`](Device::receive))
//! busy wait and must not be called through [`with_device`].

use core::cell::RefCell;

use critical_section::Mutex;

use crate::device::Device;

mod macros;

/// A [`Device`] slot that can be placed in a `static`.
pub type SharedDevice<T, D> = Mutex<RefCell<Option<Device<T, D>>>>;

/// An empty slot, usable in `static` initializers.
pub const fn shared_device<T, D>() -> SharedDevice<T, D> {
    Mutex::new(RefCell::new(None))
}

/// Stores `device` in `slot`, returning the device it replaces.
pub fn install<T, D>(slot: &SharedDevice<T, D>, device: Device<T, D>) -> Option<Device<T, D>> {
    critical_section::with(|cs| slot.borrow(cs).replace(Some(device)))
}

/// Removes the device from `slot`, e.g. to [`close`](Device::close) it.
pub fn take<T, D>(slot: &SharedDevice<T, D>) -> Option<Device<T, D>> {
    critical_section::with(|cs| slot.borrow(cs).take())
}

/// Runs `f` on the installed device inside a critical section.
///
/// # Returns
/// `None` if no device is installed, otherwise what `f` returned.
///
/// # Notes
/// `f` runs with interrupts masked. Calling [`transmit`](Device::transmit) or
/// [`receive`](Device::receive) from it spins on IRQ_STATUS for the whole frame with
/// interrupts off; use [`start_tx`](Device::start_tx) / [`check_tx`](Device::check_tx)
/// and [`start_rx`](Device::start_rx) / [`check_rx`](Device::check_rx) instead.
pub fn with_device<T, D, R>(
    slot: &SharedDevice<T, D>,
    f: impl FnOnce(&mut Device<T, D>) -> R,
) -> Option<R> {
    critical_section::with(|cs| slot.borrow(cs).borrow_mut().as_mut().map(f))
}
