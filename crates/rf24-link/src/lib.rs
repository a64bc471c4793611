#![doc = include_str!("../README.md")]
//!
//! ## Packet API
//!
//! - [`Nrf24::initialize()`](fn@crate::radio::Nrf24::initialize)
//! - [`Nrf24::transmit()`](radio/struct.Nrf24.html#method.transmit)
//! - [`Nrf24::receive()`](radio/struct.Nrf24.html#method.receive)
//! - [`Nrf24::status()`](radio/struct.Nrf24.html#method.status)
//! - [`Nrf24::dump_registers()`](radio/struct.Nrf24.html#method.dump_registers)
//! - [`Nrf24::print_details()`](radio/struct.Nrf24.html#method.print_details)
//!
//! ## Low level API
//!
//! - [`BusLink::transact()`](fn@crate::BusLink::transact)
//! - [`Nrf24::read_register()`](radio/struct.Nrf24.html#method.read_register)
//! - [`Nrf24::write_register()`](radio/struct.Nrf24.html#method.write_register)
//! - [`Nrf24::command()`](radio/struct.Nrf24.html#method.command)
//! - [`Nrf24::set_mode()`](radio/struct.Nrf24.html#method.set_mode)
//! - [`Nrf24::flush_rx()`](radio/struct.Nrf24.html#method.flush_rx)
//! - [`Nrf24::flush_tx()`](radio/struct.Nrf24.html#method.flush_tx)
//! - [`Nrf24::rx_has_data()`](radio/struct.Nrf24.html#method.rx_has_data)
//! - [`Nrf24::read_payload()`](radio/struct.Nrf24.html#method.read_payload)
//! - [`Nrf24::write_payload()`](radio/struct.Nrf24.html#method.write_payload)
//! - [`Nrf24::clear_rx()`](radio/struct.Nrf24.html#method.clear_rx)
//! - [`Nrf24::clear_status_flags()`](radio/struct.Nrf24.html#method.clear_status_flags)
//!
#![no_std]

// must stay first so the logging macros are visible to every module below
#[macro_use]
mod fmt;

mod bus;
pub use bus::{BusError, BusLink, BUS_LOCK_POLL_US, BUS_LOCK_TIMEOUT_US};
mod types;
pub use types::{CrcLength, DataRate, FifoStatus, Mode, PaLevel, Payload, StatusFlags, TxOutcome};
pub mod radio;

#[cfg(test)]
mod test {
    extern crate std;
    use crate::{radio::Nrf24, BusLink};
    use embedded_hal::{
        digital::{ErrorType as PinErrorType, OutputPin},
        spi::{ErrorKind, ErrorType as SpiErrorType, Operation, SpiDevice},
    };
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        digital::{Mock as PinMock, Transaction as PinTransaction},
        spi::{Mock as SpiMock, Transaction as SpiTransaction},
    };
    use std::{
        boxed::Box,
        collections::VecDeque,
        convert::Infallible,
        sync::{Arc, Mutex},
        vec::Vec,
    };

    /// Takes an indefinite repetition of a tuple of 2 vectors: `(expected_data, response_data)`
    /// and generates an array of `SpiTransaction`s.
    ///
    /// NOTE: This macro is only used to generate code in unit tests (for this crate only).
    #[macro_export]
    macro_rules! spi_test_expects {
        ($( ($expected:expr , $response:expr $(,)? ) , ) + ) => {
            [
                $(
                    SpiTransaction::transaction_start(),
                    SpiTransaction::transfer_in_place($expected, $response),
                    SpiTransaction::transaction_end(),
                )*
            ]
        }
    }

    /// A tuple struct to encapsulate objects used to mock [`Nrf24`],
    pub struct MockRadio(
        pub Nrf24<'static, SpiMock<u8>, PinMock, NoopDelay>,
        pub SpiMock<u8>,
        pub PinMock,
    );

    /// Leak a [`BusLink`] so a mocked radio can borrow it for the rest of the test.
    pub fn leak_link<SPI>(spi: SPI) -> &'static BusLink<SPI> {
        Box::leak(Box::new(BusLink::new(spi)))
    }

    /// Create a mock objects using the given expectations.
    ///
    /// The radio starts in RX mode with the default (power up, CRC disabled) CONFIG value.
    pub fn mk_radio(
        ce_expectations: &[PinTransaction],
        spi_expectations: &[SpiTransaction<u8>],
    ) -> MockRadio {
        let spi = SpiMock::new(spi_expectations);
        let ce_pin = PinMock::new(ce_expectations);
        let link = leak_link(spi.clone());
        let radio = Nrf24::new(ce_pin.clone(), link, NoopDelay);
        MockRadio(radio, spi, ce_pin)
    }

    #[derive(Default)]
    struct Script {
        replies: VecDeque<Option<Vec<u8>>>,
        sent: Vec<Vec<u8>>,
    }

    /// A SPI device replaying canned responses, where `None` injects a transport failure.
    ///
    /// Once the script runs out, every transaction answers with a STATUS of `0x0E`
    /// followed by zeros.
    #[derive(Clone, Default)]
    pub struct ScriptedSpi(Arc<Mutex<Script>>);

    impl ScriptedSpi {
        pub fn new(replies: &[Option<&[u8]>]) -> Self {
            let script = Script {
                replies: replies.iter().map(|r| r.map(|r| r.to_vec())).collect(),
                sent: Vec::new(),
            };
            Self(Arc::new(Mutex::new(script)))
        }

        /// Every frame written to the bus so far (including failed ones).
        pub fn sent(&self) -> Vec<Vec<u8>> {
            self.0.lock().unwrap().sent.clone()
        }
    }

    impl SpiErrorType for ScriptedSpi {
        type Error = ErrorKind;
    }

    impl SpiDevice for ScriptedSpi {
        fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
            let mut script = self.0.lock().unwrap();
            for op in operations.iter_mut() {
                if let Operation::TransferInPlace(buf) = op {
                    script.sent.push(buf.to_vec());
                    match script.replies.pop_front() {
                        Some(None) => return Err(ErrorKind::Other),
                        Some(Some(reply)) => {
                            let len = reply.len().min(buf.len());
                            buf[..len].copy_from_slice(&reply[..len]);
                        }
                        None => {
                            buf.fill(0);
                            buf[0] = 0xE;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    /// An infallible output pin recording every level it was driven to (`true` = high).
    #[derive(Clone, Default)]
    pub struct LoggedPin(Arc<Mutex<Vec<bool>>>);

    impl LoggedPin {
        pub fn levels(&self) -> Vec<bool> {
            self.0.lock().unwrap().clone()
        }
    }

    impl PinErrorType for LoggedPin {
        type Error = Infallible;
    }

    impl OutputPin for LoggedPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.lock().unwrap().push(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.lock().unwrap().push(true);
            Ok(())
        }
    }

    /// A tuple struct to encapsulate a radio driven by scripted fakes.
    pub struct ScriptedRadio(
        pub Nrf24<'static, ScriptedSpi, LoggedPin, NoopDelay>,
        pub ScriptedSpi,
        pub LoggedPin,
    );

    /// Create a radio whose bus answers with the given `replies` (see [`ScriptedSpi`]).
    pub fn mk_scripted_radio(replies: &[Option<&[u8]>]) -> ScriptedRadio {
        let spi = ScriptedSpi::new(replies);
        let ce_pin = LoggedPin::default();
        let link = leak_link(spi.clone());
        let radio = Nrf24::new(ce_pin.clone(), link, NoopDelay);
        ScriptedRadio(radio, spi, ce_pin)
    }
}
