#![no_std]

mod error;

pub mod config;
pub mod device;
pub mod interface;
pub mod load_cell;
mod log;
pub mod params;
pub mod protocol;

pub use crate::device::Hx711;
pub use crate::error::{Error, Result};
pub use crate::load_cell::LoadCell;
pub use crate::params::{Channel, Gain};
