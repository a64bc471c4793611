use super::{mnemonics, registers, timing, Nrf24, Nrf24Error};
use crate::{
    radio::{
        prelude::{FifoControl, RadioInit, RegisterCodec, StatusControl},
        RadioConfig,
    },
    BusLink, Mode, StatusFlags,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

impl<'a, SPI, DO, DELAY> Nrf24<'a, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Construct a radio on the shared `link` and run the full startup sequence
    /// (see [`RadioInit::init()`]) with the given `config`.
    ///
    /// ```ignore
    /// let link = BusLink::new(spi);
    /// let mut radio = Nrf24::initialize(ce_pin, &link, delay, &RadioConfig::default())?;
    /// ```
    pub fn initialize(
        ce_pin: DO,
        link: &'a BusLink<SPI>,
        delay_impl: DELAY,
        config: &RadioConfig,
    ) -> Result<Self, Nrf24Error<SPI::Error, DO::Error>> {
        let mut radio = Self::new(ce_pin, link, delay_impl);
        radio.init(config)?;
        Ok(radio)
    }
}

impl<SPI, DO, DELAY> RadioInit for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type InitErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn init(&mut self, config: &RadioConfig) -> Result<(), Self::InitErrorType> {
        self.ce_low()?;

        let config_reg = config.config_reg.with_power(true).as_rx();
        self.write_byte(registers::CONFIG, config_reg.into_bits())?;
        self._config_reg = config_reg;
        self._delay_impl.delay_ms(timing::POWER_UP_SETTLE_MS);

        // read back CONFIG to verify the SPI lines are working
        let readback = self.read_byte(registers::CONFIG)?;
        if readback != config_reg.into_bits() {
            error!(
                "CONFIG readback 0x{=u8:02X} != 0x{=u8:02X}",
                readback,
                config_reg.into_bits()
            );
            return Err(Nrf24Error::BinaryCorruption);
        }

        self.write_byte(registers::SETUP_AW, config.address_width_code())?;
        self.write_byte(registers::SETUP_RETR, config.auto_retries.into_bits())?;
        self.write_register(registers::RX_ADDR_P0, config.rx_address())?;
        self.write_register(registers::TX_ADDR, config.tx_address())?;
        self.write_byte(registers::RF_SETUP, config.setup_rf.into_bits())?;
        self.write_byte(registers::RF_CH, config.channel())?;

        // fixed width payloads without auto-ACK
        self.write_byte(registers::FEATURE, 0)?;
        self.write_byte(registers::DYNPD, 0)?;
        self.write_byte(registers::RX_PW_P0, config.payload_length())?;
        self._payload_length = config.payload_length();
        self.write_byte(registers::EN_RXADDR, mnemonics::EN_RXADDR_P0_P1)?;
        self.write_byte(registers::EN_AA, 0)?;

        self.clear_status_flags(StatusFlags::new())?;
        self.flush_rx()?;

        self._mode = Mode::Receive;
        self.ce_high()?;
        self._delay_impl.delay_ms(timing::STARTUP_SETTLE_MS);
        debug!("Radio listening on channel {=u8}", config.channel());
        Ok(())
    }
}
