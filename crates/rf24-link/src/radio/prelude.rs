//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use rf24link::radio::prelude::*;
//! ```

use crate::types::{Mode, Payload, StatusFlags, TxOutcome};

use super::{Frame, RadioConfig, RegisterInfo};

/// A trait to represent raw register access over the SPI bus.
///
/// Every transaction refreshes the cached STATUS byte
/// (see [`StatusControl::get_status_flags()`]).
pub trait RegisterCodec {
    type CodecErrorType;

    /// Read `len` bytes (in range [1, 32]) from the register at `address`.
    ///
    /// The register's content is available from [`Frame::data()`].
    fn read_register(&mut self, address: u8, len: usize) -> Result<Frame, Self::CodecErrorType>;

    /// Write `data` (1 to 32 bytes) to the register at `address`.
    ///
    /// Returns the STATUS byte clocked in with the command byte.
    fn write_register(&mut self, address: u8, data: &[u8])
        -> Result<StatusFlags, Self::CodecErrorType>;

    /// Send a raw command `opcode` followed by up to 32 bytes of `payload`.
    fn command(&mut self, opcode: u8, payload: &[u8]) -> Result<Frame, Self::CodecErrorType>;
}

/// A trait to represent switching between RX and TX mode.
pub trait ModeControl {
    type ModeErrorType;

    /// The mode the radio was last (successfully) put in.
    fn mode(&self) -> Mode;

    /// Move the radio into the `target` mode.
    ///
    /// Requesting the current mode does not touch the CONFIG register; it only
    /// drives the CE pin to the level that mode requires.
    /// If the CONFIG register can't be written, then the current mode is left unchanged.
    fn set_mode(&mut self, target: Mode) -> Result<(), Self::ModeErrorType>;
}

/// A trait to represent manipulation of RX and TX FIFOs.
pub trait FifoControl {
    type FifoErrorType;

    /// Use this to discard all 3 layers in the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Is there a payload waiting in the RX FIFO?
    ///
    /// A failed read of the FIFO_STATUS register is reported as `false`.
    fn rx_has_data(&mut self) -> bool;

    /// Fetch the next payload (of the configured width) from the RX FIFO.
    fn read_payload(&mut self) -> Result<Payload, Self::FifoErrorType>;

    /// Load a payload into the TX FIFO.
    ///
    /// The `buf` is zero-padded (or truncated) to the configured payload width.
    /// This does not fire the transmission.
    fn write_payload(&mut self, buf: &[u8]) -> Result<(), Self::FifoErrorType>;

    /// Discard everything in the RX FIFO and clear the "RX Data Ready" flag.
    fn clear_rx(&mut self) -> Result<(), Self::FifoErrorType>;
}

/// A trait to represent manipulation of the STATUS register's flags.
pub trait StatusControl {
    type StatusErrorType;

    /// Fetch a fresh STATUS byte from the radio (with a NOP command).
    fn status(&mut self) -> Result<StatusFlags, Self::StatusErrorType>;

    /// Clear the flags asserted in `flags`.
    ///
    /// Use [`StatusFlags::new()`] to clear all of them.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// The STATUS byte received with the last SPI transaction.
    fn get_status_flags(&self) -> StatusFlags;
}

/// A trait to represent sending and receiving single fixed-width packets.
pub trait PacketRadio {
    type PacketErrorType;

    /// Transmit a single payload (1 to 32 bytes, no longer than the configured width).
    ///
    /// The radio is always put back into RX mode before this returns, even on failure.
    fn transmit(&mut self, buf: &[u8]) -> Result<TxOutcome, Self::PacketErrorType>;

    /// Fetch a received payload, if any.
    ///
    /// The RX FIFO is flushed afterward; only one payload is consumed per call.
    fn receive(&mut self) -> Result<Option<Payload>, Self::PacketErrorType>;
}

/// A trait to represent debug output of the radio's registers.
pub trait RegisterDump {
    /// Read every register in [`REGISTER_CATALOG`](crate::radio::REGISTER_CATALOG)
    /// and hand each reading to `visit`.
    ///
    /// A register that could not be read is passed as `None`; the dump carries on regardless.
    fn dump_registers<F>(&mut self, visit: F)
    where
        F: FnMut(&RegisterInfo, Option<&[u8]>);

    /// Print the register dump.
    ///
    /// This uses `std::println!` (with the `std` feature) or `defmt::println!`
    /// (with the `defmt` feature). It does nothing otherwise.
    fn print_details(&mut self);
}

/// A trait to represent the radio's startup sequence.
pub trait RadioInit {
    type InitErrorType;

    /// Configure the radio with the given `config` and start listening.
    ///
    /// The radio is left powered up in RX mode with the CE pin high.
    fn init(&mut self, config: &RadioConfig) -> Result<(), Self::InitErrorType>;
}
