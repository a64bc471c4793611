use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::{
    radio::{
        prelude::{RegisterCodec, StatusControl},
        Nrf24, Nrf24Error,
    },
    types::StatusFlags,
};

use super::{commands, registers};

impl<SPI, DO, DELAY> StatusControl for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type StatusErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn status(&mut self) -> Result<StatusFlags, Self::StatusErrorType> {
        Ok(self.command(commands::NOP, &[])?.status())
    }

    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType> {
        self.write_byte(registers::STATUS, flags.into_bits() & StatusFlags::IRQ_MASK)?;
        Ok(())
    }

    fn get_status_flags(&self) -> StatusFlags {
        self._status
    }
}
