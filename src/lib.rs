#![cfg_attr(not(test), no_std)]
#![doc = "Host-side controller for the ESP32 ULP coprocessor."]
#![doc = ""]
#![doc = "Provides program loading, run control (pause/resume), wake timer"]
#![doc = "configuration, bounds-checked access to the shared RTC slow memory"]
#![doc = "window, and RTC GPIO / ADC reservation for coprocessor use."]
#![doc = ""]
#![doc = "Hardware register access lives behind the [`driver::Driver`] seam;"]
#![doc = "the controller itself is target-independent and host-testable."]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod driver;
pub mod mem;
pub mod rtc_io;
pub mod ulp;

pub use driver::{Driver, DriverError};
pub use mem::{AddressWindow, SharedMem};
pub use ulp::{RunState, Ulp, UlpError, RESERVE_MEM};
