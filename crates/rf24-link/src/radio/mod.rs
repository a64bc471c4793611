//! A module to encapsulate all things related to radio operation.
pub mod prelude;

pub(crate) mod rf24;
pub use rf24::{
    commands, registers, Frame, Nrf24, Nrf24Error, RegisterError, RegisterInfo, REGISTER_CATALOG,
};

mod config;
pub use config::RadioConfig;
