/// Declares a `static` [`SharedDevice`](crate::shared::SharedDevice) slot.
///
/// The transport and delay types must be spelled out, since a `static` cannot be
/// generic.
///
/// # Example
/// ```rust
/// # use embedded_hal_mock::eh1::delay::NoopDelay;
/// # use embedded_hal_mock::eh1::digital::Mock as Pin;
/// # use embedded_hal_mock::eh1::spi::Mock as Spi;
/// use at86rf212::HalTransport;
///
/// at86rf212::shared_device!(pub static RADIO: Device<HalTransport<Spi<u8>, Pin, Pin, Pin>, NoopDelay>);
/// ```
#[macro_export]
macro_rules! shared_device {
    ( $vis:vis static $name:ident : Device<$transport:ty, $delay:ty> ) => {
        $vis static $name: $crate::shared::SharedDevice<$transport, $delay> =
            $crate::shared::shared_device();
    };
}
