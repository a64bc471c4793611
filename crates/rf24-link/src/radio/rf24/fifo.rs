use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, constants::PAYLOAD_WIDTH, mnemonics, registers, Nrf24, Nrf24Error};
use crate::{
    radio::prelude::{FifoControl, RegisterCodec},
    Payload,
};

impl<SPI, DO, DELAY> FifoControl for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(commands::FLUSH_TX, &[])?;
        Ok(())
    }

    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(commands::FLUSH_RX, &[])?;
        Ok(())
    }

    fn rx_has_data(&mut self) -> bool {
        match self.read_byte(registers::FIFO_STATUS) {
            Ok(fifo) => fifo & mnemonics::RX_EMPTY == 0,
            Err(_) => {
                warn!("Failed to read FIFO_STATUS; assuming RX FIFO is empty");
                false
            }
        }
    }

    fn read_payload(&mut self) -> Result<Payload, Self::FifoErrorType> {
        let width = self._payload_length as usize;
        self.ce_low()?;
        let frame = self.command(commands::R_RX_PAYLOAD, &[0u8; PAYLOAD_WIDTH][..width]);
        // resume listening whether or not the read went through
        self.ce_high()?;
        Ok(Payload::new(frame?.data()))
    }

    fn write_payload(&mut self, buf: &[u8]) -> Result<(), Self::FifoErrorType> {
        let width = self._payload_length as usize;
        let len = buf.len().min(width);
        let mut padded = [0u8; PAYLOAD_WIDTH];
        padded[..len].copy_from_slice(&buf[..len]);
        self.command(commands::W_TX_PAYLOAD, &padded[..width])?;
        Ok(())
    }

    fn clear_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.ce_low()?;
        self.flush_rx()?;
        self.write_byte(registers::STATUS, mnemonics::MASK_RX_DR)?;
        self.ce_high()
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers, FifoControl};
    use crate::radio::rf24::mnemonics;
    use crate::{
        spi_test_expects,
        test::{mk_radio, mk_scripted_radio},
    };
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::vec;

    #[test]
    pub fn rx_has_data() {
        let spi_expectations = spi_test_expects![
            // read FIFO register value with empty RX FIFO
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 0x11u8]),
            // do it again, but with an occupied RX FIFO
            (vec![registers::FIFO_STATUS, 0u8], vec![0xEu8, 0x10u8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert!(!radio.rx_has_data());
        assert!(radio.rx_has_data());
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn rx_has_data_on_bus_failure() {
        let mocks = mk_scripted_radio(&[None]);
        let mut radio = mocks.0;
        assert!(!radio.rx_has_data());
    }

    #[test]
    pub fn flush_fifos() {
        let spi_expectations = spi_test_expects![
            (vec![commands::FLUSH_RX], vec![0xEu8]),
            (vec![commands::FLUSH_TX], vec![0xEu8]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.flush_rx().unwrap();
        radio.flush_tx().unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn write_payload_pads() {
        let mut expected = vec![0u8; 33];
        expected[0] = commands::W_TX_PAYLOAD;
        expected[1..4].copy_from_slice(&[1, 2, 3]);
        let spi_expectations = spi_test_expects![(expected, vec![0xEu8; 33]),];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.write_payload(&[1, 2, 3]).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn write_payload_truncates() {
        let mut expected = vec![0x55u8; 5];
        expected[0] = commands::W_TX_PAYLOAD;
        let spi_expectations = spi_test_expects![(expected, vec![0xEu8; 5]),];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio._payload_length = 4;
        radio.write_payload(&[0x55; 10]).unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn read_payload() {
        let ce_expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut expected = vec![0u8; 33];
        expected[0] = commands::R_RX_PAYLOAD;
        let mut response = (0..=32u8).collect::<std::vec::Vec<u8>>();
        response[0] = 0x40;
        let spi_expectations = spi_test_expects![(expected, response),];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let payload = radio.read_payload().unwrap();
        assert_eq!(payload.len(), 32);
        assert_eq!(payload[0], 1);
        assert_eq!(payload[31], 32);
        spi.done();
        ce_pin.done();
    }

    #[test]
    pub fn read_payload_failure_restores_ce() {
        let mocks = mk_scripted_radio(&[None]);
        let (mut radio, ce_pin) = (mocks.0, mocks.2);
        assert!(radio.read_payload().is_err());
        assert_eq!(ce_pin.levels(), vec![false, true]);
    }

    #[test]
    pub fn clear_rx() {
        let ce_expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let spi_expectations = spi_test_expects![
            (vec![commands::FLUSH_RX], vec![0xEu8]),
            (
                vec![
                    registers::STATUS | commands::W_REGISTER,
                    mnemonics::MASK_RX_DR
                ],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.clear_rx().unwrap();
        spi.done();
        ce_pin.done();
    }
}
