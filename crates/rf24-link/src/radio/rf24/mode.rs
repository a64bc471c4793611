use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{registers, Config, Nrf24, Nrf24Error};
use crate::{radio::prelude::ModeControl, Mode};

impl<SPI, DO, DELAY> Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Write CONFIG for the `target` mode, committing nothing unless the write succeeds.
    fn switch_config(
        &mut self,
        target: Mode,
        config: Config,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if self.write_byte(registers::CONFIG, config.into_bits()).is_err() {
            warn!("Failed to enter {} mode", target);
            return Err(Nrf24Error::ModeTransition(target));
        }
        self._config_reg = config;
        self._mode = target;
        debug!("Entered {} mode", target);
        Ok(())
    }
}

impl<SPI, DO, DELAY> ModeControl for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ModeErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn mode(&self) -> Mode {
        self._mode
    }

    fn set_mode(&mut self, target: Mode) -> Result<(), Self::ModeErrorType> {
        match (self._mode, target) {
            (Mode::Receive, Mode::Receive) => self.ce_high(),
            (Mode::Transmit, Mode::Transmit) => self.ce_low(),
            (Mode::Receive, Mode::Transmit) => {
                self.ce_low()?;
                self.switch_config(target, self._config_reg.as_tx())?;
                // standby-II until a payload is pulsed out
                self.ce_low()
            }
            (Mode::Transmit, Mode::Receive) => {
                self.ce_low()?;
                self.switch_config(target, self._config_reg.as_rx())?;
                self.ce_high()
            }
        }
    }
}
