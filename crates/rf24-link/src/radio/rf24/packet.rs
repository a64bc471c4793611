use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{mnemonics, timing, Nrf24, Nrf24Error};
use crate::{
    radio::prelude::{FifoControl, ModeControl, PacketRadio, StatusControl},
    Mode, Payload, StatusFlags, TxOutcome,
};

impl<SPI, DO, DELAY> Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Load `buf`, pulse it out and classify the resulting STATUS flags.
    fn fire(&mut self, buf: &[u8]) -> Result<TxOutcome, Nrf24Error<SPI::Error, DO::Error>> {
        self.ce_low()?;
        self.write_payload(buf)?;
        if self._mode != Mode::Transmit {
            self.set_mode(Mode::Transmit)?;
        }
        self.ce_high()?;
        self._delay_impl.delay_us(timing::CE_PULSE_US);
        self.ce_low()?;

        self._delay_impl.delay_us(timing::TX_SETTLE_US);
        let status = self.status()?;
        if status.tx_ds() {
            self.clear_status_flags(StatusFlags::from_bits(mnemonics::MASK_TX_DS))?;
            Ok(TxOutcome::Sent)
        } else if status.max_rt() {
            self.clear_status_flags(StatusFlags::from_bits(mnemonics::MASK_MAX_RT))?;
            self.flush_tx()?;
            Ok(TxOutcome::MaxRetransmitsExceeded)
        } else {
            Ok(TxOutcome::Pending)
        }
    }

    /// Flush the RX FIFO and clear all IRQ flags.
    fn rx_cleanup(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.flush_rx()?;
        self.clear_status_flags(StatusFlags::new())
    }
}

impl<SPI, DO, DELAY> PacketRadio for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PacketErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn transmit(&mut self, buf: &[u8]) -> Result<TxOutcome, Self::PacketErrorType> {
        if buf.is_empty() || buf.len() > self._payload_length as usize {
            return Err(Nrf24Error::InvalidArgument);
        }
        let outcome = self.fire(buf);
        let restored = self.set_mode(Mode::Receive);
        match (outcome, restored) {
            (Ok(outcome), Ok(())) => {
                debug!("Transmission result: {}", outcome);
                Ok(outcome)
            }
            (Err(e), _) | (Ok(_), Err(e)) => {
                error!("Transmission failed");
                Err(e)
            }
        }
    }

    fn receive(&mut self) -> Result<Option<Payload>, Self::PacketErrorType> {
        self.clear_status_flags(StatusFlags::new())?;
        self.set_mode(Mode::Receive)?;
        if !self.rx_has_data() {
            self.rx_cleanup()?;
            return Ok(None);
        }
        match self.read_payload() {
            Ok(payload) => {
                self.ce_low()?;
                if self.rx_cleanup().is_err() {
                    warn!("RX FIFO cleanup failed after a successful read");
                }
                self.ce_high()?;
                trace!("Received {=[u8]:02X}", payload.as_bytes());
                Ok(Some(payload))
            }
            Err(e) => {
                if self.rx_cleanup().is_err() {
                    warn!("RX FIFO cleanup failed after a failed read");
                }
                Err(e)
            }
        }
    }
}
