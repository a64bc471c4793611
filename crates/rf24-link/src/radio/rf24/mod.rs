use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
pub(crate) mod bit_fields;
use bit_fields::Config;
mod codec;
pub use codec::{Frame, RegisterError};
pub(crate) mod constants;
pub use constants::{commands, mnemonics, registers, timing};
mod details;
pub use details::{RegisterInfo, REGISTER_CATALOG};
mod fifo;
mod init;
mod mode;
mod packet;
mod status;
use crate::{BusError, BusLink, Mode, StatusFlags};

/// An collection of error types to describe hardware malfunctions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI, DO> {
    /// The shared SPI bus stayed locked by another user for too long.
    BusTimeout,
    /// Represents a SPI transaction error.
    Transport(SPI),
    /// A length or value passed to the driver was out of range.
    InvalidArgument,
    /// Switching to the given mode failed; the previous mode is still in effect.
    ModeTransition(Mode),
    /// Represents a DigitalOutput error.
    Gpo(DO),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO)
    BinaryCorruption,
}

impl<SPI, DO> From<RegisterError<SPI>> for Nrf24Error<SPI, DO> {
    fn from(value: RegisterError<SPI>) -> Self {
        match value {
            RegisterError::BusFailure(BusError::Busy) => Nrf24Error::BusTimeout,
            RegisterError::BusFailure(BusError::TransportFailure(e)) => Nrf24Error::Transport(e),
            RegisterError::BusFailure(BusError::InvalidArgument) | RegisterError::InvalidArgument => {
                Nrf24Error::InvalidArgument
            }
        }
    }
}

/// This struct implements the [traits in the prelude](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// The SPI bus is only borrowed (see [`BusLink`]), so several radios (or other
/// devices) may share it. The CE pin and the delay provider are owned.
pub struct Nrf24<'a, SPI, DO, DELAY> {
    link: &'a BusLink<SPI>,
    ce_pin: DO,
    _delay_impl: DELAY,
    _status: StatusFlags,
    _config_reg: Config,
    _mode: Mode,
    _payload_length: u8,
}

impl<'a, SPI, DO, DELAY> Nrf24<'a, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate an [`Nrf24`] object for use on the shared `link`
    /// with the given `ce_pin`.
    ///
    /// The radio's CSN pin (aka Chip Select pin) shall be defined
    /// when instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
    /// object wrapped by the [`BusLink`].
    ///
    /// No bus traffic happens here. The driver assumes RX mode with
    /// CRC disabled until [`init()`](fn@crate::radio::prelude::RadioInit::init) is called.
    pub fn new(ce_pin: DO, link: &'a BusLink<SPI>, delay_impl: DELAY) -> Nrf24<'a, SPI, DO, DELAY> {
        Nrf24 {
            link,
            ce_pin,
            _delay_impl: delay_impl,
            _status: StatusFlags::from_bits(0),
            // power up as RX, CRC disabled, all IRQ events enabled
            _config_reg: Config::default(),
            _mode: Mode::Receive,
            _payload_length: constants::PAYLOAD_WIDTH as u8,
        }
    }

    /// The fixed payload width (in bytes) used for every transmission and reception.
    pub fn payload_length(&self) -> u8 {
        self._payload_length
    }

    /// Give back the CE pin and the delay provider.
    pub fn release(self) -> (DO, DELAY) {
        (self.ce_pin, self._delay_impl)
    }

    fn ce_high(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_high().map_err(Nrf24Error::Gpo)
    }

    fn ce_low(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_pin.set_low().map_err(Nrf24Error::Gpo)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{Nrf24Error, RegisterError};
    use crate::{test::mk_radio, BusError, Mode};
    use embedded_hal::spi::ErrorKind;

    type Error = Nrf24Error<ErrorKind, ()>;

    #[test]
    fn register_error_translation() {
        assert_eq!(
            Error::from(RegisterError::BusFailure(BusError::Busy)),
            Nrf24Error::BusTimeout
        );
        assert_eq!(
            Error::from(RegisterError::BusFailure(BusError::TransportFailure(
                ErrorKind::Other
            ))),
            Nrf24Error::Transport(ErrorKind::Other)
        );
        assert_eq!(
            Error::from(RegisterError::BusFailure(BusError::InvalidArgument)),
            Nrf24Error::InvalidArgument
        );
        assert_eq!(
            Error::from(RegisterError::InvalidArgument),
            Nrf24Error::InvalidArgument
        );
    }

    #[test]
    fn new_is_quiet() {
        let mocks = mk_radio(&[], &[]);
        let (radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio._mode, Mode::Receive);
        assert_eq!(radio._config_reg.into_bits(), 0x03);
        assert_eq!(radio.payload_length(), 32);
        spi.done();
        ce_pin.done();
    }
}
