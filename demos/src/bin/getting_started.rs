//! The simplest demo of sending and receiving with the nRF24L01 transceiver.
//!
//! This demo is meant to be run on 2 separate nRF24L01 transceivers.
use anyhow::Result;

#[cfg(target_os = "linux")]
mod app {
    use anyhow::Result;
    use embedded_hal::delay::DelayNs;
    use rf24_link_demos::{
        debug_err,
        linux::{BoardHardware, CdevPin, Delay, SpidevDevice},
    };
    use rf24link::{
        radio::{prelude::*, Nrf24, RadioConfig},
        BusLink, PaLevel, TxOutcome,
    };
    use std::{
        io::{stdin, stdout, Write},
        time::{Duration, Instant},
    };

    /// A struct to drive our demo app
    pub struct App {
        /// Our instantiated radio; the bus link is leaked so the radio can borrow it for good.
        radio: Nrf24<'static, SpidevDevice, CdevPin, Delay>,
        /// We will be using a 32-bit float value (little-endian) as our payload.
        payload: f32,
    }

    impl App {
        /// Open the board's hardware and initialize the radio.
        pub fn new(radio_number: u8) -> Result<Self> {
            let mut board = BoardHardware::default()?;
            println!("Using {}", board.pins());
            let link: &'static BusLink<SpidevDevice> =
                Box::leak(Box::new(BusLink::new(board.spi_device()?)));

            let address = [b"1Node", b"2Node"];
            let config = RadioConfig::default()
                // use PaLevel::Low for PA/LNA testing
                .with_pa_level(PaLevel::Low)
                // we'll be using a 32-bit float, so set the payload length to 4 bytes
                .with_payload_length(4)
                .with_tx_address(address[radio_number as usize])
                .with_rx_address(address[1 - radio_number as usize]);
            let radio =
                Nrf24::initialize(board.ce_pin()?, link, Delay, &config).map_err(debug_err)?;
            Ok(Self {
                radio,
                payload: 0.0,
            })
        }

        /// The TX role.
        pub fn tx(&mut self, count: u8) -> Result<()> {
            for _ in 0..count {
                let buf = self.payload.to_le_bytes();
                let start = Instant::now();
                let result = self.radio.transmit(&buf).map_err(debug_err)?;
                let elapsed = start.elapsed().as_micros();
                match result {
                    TxOutcome::Sent => {
                        println!(
                            "Transmission successful! Time to Transmit: {elapsed} us. Sent: {}",
                            self.payload
                        );
                        self.payload += 0.01;
                    }
                    outcome => println!("Transmission not confirmed: {outcome}"),
                }
                Delay.delay_ms(1000);
            }
            Ok(())
        }

        /// The RX role.
        pub fn rx(&mut self, timeout: u8) -> Result<()> {
            let mut end_time = Instant::now() + Duration::from_secs(timeout as u64);
            while Instant::now() < end_time {
                if let Some(payload) = self.radio.receive().map_err(debug_err)? {
                    let mut buf = [0u8; 4];
                    buf.copy_from_slice(&payload[..4]);
                    self.payload = f32::from_le_bytes(buf);
                    println!("Received {} bytes: {}", payload.len(), self.payload);
                    // reset timeout
                    end_time = Instant::now() + Duration::from_secs(timeout as u64);
                }
            }
            Ok(())
        }

        pub fn set_role(&mut self) -> Result<bool> {
            let prompt = "*** Enter 'R' for receiver role.\n\
            *** Enter 'T' for transmitter role.\n\
            *** Enter 'D' to dump the radio's registers.\n\
            *** Enter 'Q' to quit.";
            println!("{prompt}");
            let mut input = String::new();
            stdin().read_line(&mut input)?;
            let mut inputs = input.trim().split(' ');
            let role = inputs
                .next()
                .map(|v| v.to_uppercase())
                .unwrap_or("?".to_string());
            if role.starts_with('T') {
                let count = inputs
                    .next()
                    .and_then(|v| v.parse::<u8>().ok())
                    .unwrap_or(5);
                self.tx(count)?;
                return Ok(true);
            } else if role.starts_with('R') {
                let timeout = inputs
                    .next()
                    .and_then(|v| v.parse::<u8>().ok())
                    .unwrap_or(6);
                self.rx(timeout)?;
                return Ok(true);
            } else if role.starts_with('D') {
                self.radio.print_details();
                return Ok(true);
            } else if role.starts_with('Q') {
                return Ok(false);
            }
            println!("{role} is an unrecognized input. Please try again.");
            Ok(true)
        }
    }

    pub fn run() -> Result<()> {
        let mut input = String::new();
        print!("Which radio is this? Enter '0' or '1'. Defaults to '0' ");
        stdout().flush()?;
        stdin().read_line(&mut input)?;
        let radio_number = input
            .trim()
            .chars()
            .next()
            .map(|c| if c == '1' { 1 } else { 0 })
            .unwrap_or_default();
        let mut app = App::new(radio_number)?;
        while app.set_role()? {}
        Ok(())
    }
}

#[cfg(target_os = "linux")]
fn main() -> Result<()> {
    app::run()
}

#[cfg(not(target_os = "linux"))]
fn main() -> Result<()> {
    Err(anyhow::anyhow!("this demo only runs on Linux"))
}
