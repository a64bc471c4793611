use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{
    commands,
    constants::{MAX_FRAME_LEN, PAYLOAD_WIDTH},
    registers, Nrf24,
};
use crate::{radio::prelude::RegisterCodec, BusError, StatusFlags};

/// Errors reported by the [`RegisterCodec`] layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RegisterError<E> {
    /// The [`BusLink`](crate::BusLink) failed to exchange the frame.
    BusFailure(BusError<E>),
    /// A requested length was outside the range `1..=32` (or `0..=32` for commands).
    InvalidArgument,
}

/// A command byte followed by up to 32 data bytes.
///
/// After a transaction, the same buffer holds the response: the STATUS
/// byte first, then whatever the radio clocked out for the data bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    buf: [u8; MAX_FRAME_LEN],
    len: u8,
}

impl Frame {
    fn new(command: u8, data: &[u8]) -> Self {
        let mut buf = [0u8; MAX_FRAME_LEN];
        buf[0] = command;
        buf[1..=data.len()].copy_from_slice(data);
        Self {
            buf,
            len: data.len() as u8 + 1,
        }
    }

    fn with_dummy_bytes(command: u8, len: usize) -> Self {
        let mut buf = [0u8; MAX_FRAME_LEN];
        buf[0] = command;
        Self {
            buf,
            len: len as u8 + 1,
        }
    }

    /// The STATUS byte clocked in with the command byte.
    pub fn status(&self) -> StatusFlags {
        StatusFlags::from_bits(self.buf[0])
    }

    /// The bytes following the STATUS byte.
    pub fn data(&self) -> &[u8] {
        &self.buf[1..self.len as usize]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len as usize]
    }

    fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.buf[..self.len as usize]
    }
}

impl<SPI, DO, DELAY> Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    fn transfer(&mut self, frame: &mut Frame) -> Result<(), RegisterError<SPI::Error>> {
        self.link
            .transact(&mut self._delay_impl, frame.as_mut_bytes())
            .map_err(|e| {
                debug!("SPI frame 0x{=u8:02X} failed", frame.buf[0]);
                RegisterError::BusFailure(e)
            })?;
        self._status = frame.status();
        Ok(())
    }

    /// Read a single byte register.
    pub(super) fn read_byte(&mut self, address: u8) -> Result<u8, RegisterError<SPI::Error>> {
        Ok(self.read_register(address, 1)?.data()[0])
    }

    /// Write a single byte register.
    pub(super) fn write_byte(
        &mut self,
        address: u8,
        value: u8,
    ) -> Result<StatusFlags, RegisterError<SPI::Error>> {
        self.write_register(address, &[value])
    }
}

impl<SPI, DO, DELAY> RegisterCodec for Nrf24<'_, SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type CodecErrorType = RegisterError<SPI::Error>;

    fn read_register(&mut self, address: u8, len: usize) -> Result<Frame, Self::CodecErrorType> {
        if !(1..=PAYLOAD_WIDTH).contains(&len) {
            return Err(RegisterError::InvalidArgument);
        }
        let mut frame =
            Frame::with_dummy_bytes(commands::R_REGISTER | (address & registers::MASK), len);
        self.transfer(&mut frame)?;
        Ok(frame)
    }

    fn write_register(
        &mut self,
        address: u8,
        data: &[u8],
    ) -> Result<StatusFlags, Self::CodecErrorType> {
        if !(1..=PAYLOAD_WIDTH).contains(&data.len()) {
            return Err(RegisterError::InvalidArgument);
        }
        let mut frame = Frame::new(commands::W_REGISTER | (address & registers::MASK), data);
        self.transfer(&mut frame)?;
        Ok(frame.status())
    }

    fn command(&mut self, opcode: u8, payload: &[u8]) -> Result<Frame, Self::CodecErrorType> {
        if payload.len() > PAYLOAD_WIDTH {
            return Err(RegisterError::InvalidArgument);
        }
        let mut frame = Frame::new(opcode, payload);
        self.transfer(&mut frame)?;
        Ok(frame)
    }
}
