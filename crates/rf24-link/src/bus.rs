//! A shared, lock-protected handle to the SPI bus.
//!
//! Every frame exchanged with a radio goes through [`BusLink::transact()`],
//! which holds the bus lock for the whole full-duplex transfer of that frame.

use embedded_hal::{delay::DelayNs, spi::SpiDevice};
use spin::{Mutex, MutexGuard};

/// How long [`BusLink::transact()`] waits for the bus lock by default (in microseconds).
pub const BUS_LOCK_TIMEOUT_US: u32 = 1_000_000;

/// How long to wait between attempts at taking the bus lock (in microseconds).
pub const BUS_LOCK_POLL_US: u32 = 10;

/// Errors reported by the [`BusLink`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BusError<E> {
    /// The bus lock could not be taken before the timeout expired.
    ///
    /// This is not fatal; the transaction may be retried.
    Busy,
    /// The frame was empty.
    InvalidArgument,
    /// The underlying SPI device failed. Nothing received is valid.
    TransportFailure(E),
}

fn never_in_interrupt() -> bool {
    false
}

/// A SPI bus shared by reference between any number of users.
///
/// ```ignore
/// static LINK: BusLink<MySpi> = BusLink::new(MySpi::new());
///
/// let mut frame = [0xFF];
/// LINK.transact(&mut delay, &mut frame)?;
/// ```
pub struct BusLink<SPI> {
    bus: Mutex<SPI>,
    lock_timeout_us: u32,
    in_interrupt: fn() -> bool,
}

impl<SPI> BusLink<SPI> {
    /// Wrap a SPI device.
    ///
    /// The lock timeout defaults to [`BUS_LOCK_TIMEOUT_US`] and every caller is
    /// assumed to run in thread context (see [`BusLink::with_context_probe()`]).
    pub const fn new(spi: SPI) -> Self {
        Self {
            bus: Mutex::new(spi),
            lock_timeout_us: BUS_LOCK_TIMEOUT_US,
            in_interrupt: never_in_interrupt,
        }
    }

    /// Change how long [`BusLink::transact()`] waits for the bus (in microseconds).
    pub fn with_lock_timeout(self, timeout_us: u32) -> Self {
        Self {
            lock_timeout_us: timeout_us,
            ..self
        }
    }

    /// Install a function that returns `true` when called from an interrupt handler.
    ///
    /// Bus transactions are refused (with a panic) whenever this probe returns `true`.
    pub fn with_context_probe(self, in_interrupt: fn() -> bool) -> Self {
        Self {
            in_interrupt,
            ..self
        }
    }

    /// The configured lock timeout (in microseconds).
    pub const fn lock_timeout(&self) -> u32 {
        self.lock_timeout_us
    }

    /// Give back the underlying SPI device.
    pub fn release(self) -> SPI {
        self.bus.into_inner()
    }

    fn acquire<D: DelayNs>(&self, delay: &mut D) -> Option<MutexGuard<'_, SPI>> {
        let mut waited = 0u32;
        loop {
            if let Some(guard) = self.bus.try_lock() {
                return Some(guard);
            }
            if waited >= self.lock_timeout_us {
                return None;
            }
            delay.delay_us(BUS_LOCK_POLL_US);
            waited = waited.saturating_add(BUS_LOCK_POLL_US);
        }
    }
}

impl<SPI> BusLink<SPI>
where
    SPI: SpiDevice,
{
    /// Exchange one frame on the bus.
    ///
    /// The bytes in `frame` are clocked out and replaced in place with the bytes
    /// clocked in, so the response is always as long as the request.
    ///
    /// # Panics
    /// When the context probe reports an interrupt context.
    pub fn transact<D: DelayNs>(
        &self,
        delay: &mut D,
        frame: &mut [u8],
    ) -> Result<(), BusError<SPI::Error>> {
        assert!(
            !(self.in_interrupt)(),
            "SPI bus access from interrupt context"
        );
        if frame.is_empty() {
            return Err(BusError::InvalidArgument);
        }
        let Some(mut spi) = self.acquire(delay) else {
            warn!("SPI bus lock timed out after {=u32} us", self.lock_timeout_us);
            return Err(BusError::Busy);
        };
        spi.transfer_in_place(frame)
            .map_err(BusError::TransportFailure)
    }
}
