//! ULP coprocessor controller.
//!
//! Owns the coprocessor run state and provides the full command surface:
//! program load/run, pause/resume, wake timer configuration, bounds-checked
//! shared memory access, and RTC pin / ADC reservation.
//!
//! The coprocessor is a second, independently clocked execution unit: once
//! running it accesses the shared window concurrently with the host. Word
//! transfers are bus-atomic but carry no ordering guarantees.

pub mod image;
pub mod memory_map;

use core::fmt;

use crate::driver::{Driver, DriverError};
use crate::mem::{self, AddressWindow, SharedMem};
use crate::rtc_io::{self, AdcConfig};

pub use memory_map::{RESERVE_MEM, WAKEUP_PERIOD_SLOTS};

//=============================================================================
// Error types
//=============================================================================

/// ULP controller error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum UlpError {
    /// Program image rejected before loading.
    Load(image::Error),

    /// Coprocessor failed to enter the running state.
    Start(DriverError),

    /// Wake timer subsystem rejected the period.
    Timer(DriverError),

    /// Wake timer slot index out of range.
    InvalidSlot { slot: u8 },

    /// Shared memory access error.
    Mem(mem::Error),

    /// Pin or ADC reservation rejected.
    RtcIo(rtc_io::Error),

    /// Pin-mux or ADC routing failure in the native driver.
    Driver(DriverError),
}

impl From<image::Error> for UlpError {
    fn from(err: image::Error) -> Self {
        Self::Load(err)
    }
}

impl From<mem::Error> for UlpError {
    fn from(err: mem::Error) -> Self {
        Self::Mem(err)
    }
}

impl From<rtc_io::Error> for UlpError {
    fn from(err: rtc_io::Error) -> Self {
        Self::RtcIo(err)
    }
}

//=============================================================================
// Run state
//=============================================================================

/// Coprocessor run state as tracked by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RunState {
    /// No program has been loaded since reset.
    Idle,
    /// A program is installed but the coprocessor is not executing.
    /// Entered between install and start; a failed start lands here.
    Loaded,
    /// The coprocessor executes on wake timer ticks.
    Running,
    /// Execution halted and wake timer stopped; resumable without a reload.
    Paused,
}

//=============================================================================
// Controller
//=============================================================================

/// ULP coprocessor controller.
///
/// Sole mutator of the coprocessor lifecycle, the shared window and the
/// RTC peripheral reservations. Create one per device at boot; tests create
/// independent instances over a simulated driver and a host-backed window.
pub struct Ulp<D: Driver> {
    driver: D,
    shared: SharedMem,
    state: RunState,
    adc: Option<AdcConfig>,
}

impl<D: Driver> fmt::Debug for Ulp<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ulp")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<D: Driver> Ulp<D> {
    /// Create a controller over the device's reserved RTC slow memory window.
    pub fn new(driver: D) -> Self {
        Self::with_window(
            driver,
            AddressWindow::new(memory_map::rtc_slow::BASE, RESERVE_MEM),
        )
    }

    /// Create a controller over an explicit window.
    pub fn with_window(driver: D, window: AddressWindow) -> Self {
        Self {
            driver,
            shared: SharedMem::new(window),
            state: RunState::Idle,
            adc: None,
        }
    }

    /// Current run state.
    #[inline]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// The shared memory window.
    #[inline]
    pub fn window(&self) -> AddressWindow {
        self.shared.window()
    }

    //-------------------------------------------------------------------------
    // Lifecycle
    //-------------------------------------------------------------------------

    /// Program the wake timer period for one of the period slots.
    ///
    /// Valid in any run state; takes effect immediately and overwrites any
    /// previous period in that slot.
    pub fn set_wakeup_period(&mut self, slot: u8, period_us: u32) -> Result<(), UlpError> {
        if slot >= WAKEUP_PERIOD_SLOTS {
            return Err(UlpError::InvalidSlot { slot });
        }
        self.driver
            .timer_set_period(slot, period_us)
            .map_err(UlpError::Timer)?;
        debug!("ULP wake period slot {} set to {} us", slot, period_us);
        Ok(())
    }

    /// Install a program image into the shared window and start execution.
    ///
    /// The image buffer has no lifetime beyond this call; the bytes live on
    /// in the coprocessor's instruction memory. On a start failure the image
    /// stays installed and the controller remains in [`RunState::Loaded`].
    pub fn load_and_run(&mut self, program: &[u8]) -> Result<(), UlpError> {
        let entry = image::install(&self.shared, program)?;
        self.state = RunState::Loaded;

        self.driver.start(entry).map_err(UlpError::Start)?;
        self.state = RunState::Running;
        info!("ULP coprocessor running, entry word {}", entry);
        Ok(())
    }

    /// Stop the wake timer and halt the coprocessor.
    ///
    /// Synchronous: execution has stopped when this returns. Calling from a
    /// non-running state is a tolerated no-op that touches no hardware.
    pub fn pause(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        self.driver.timer_stop();
        self.driver.halt();
        self.state = RunState::Paused;
        info!("ULP coprocessor paused");
    }

    /// Restart the wake timer; execution resumes on its next tick.
    ///
    /// The program picks up from its entry point as on any timer wake, no
    /// reload needed. Calling from a non-paused state is a tolerated no-op.
    pub fn resume(&mut self) {
        if self.state != RunState::Paused {
            return;
        }
        self.driver.timer_start();
        self.state = RunState::Running;
        info!("ULP coprocessor resumed");
    }

    //-------------------------------------------------------------------------
    // Shared memory
    //-------------------------------------------------------------------------

    /// Read the word at `addr` (absolute, or relative to the window start).
    pub fn read(&self, addr: usize) -> Result<u32, UlpError> {
        Ok(self.shared.read(addr)?)
    }

    /// Store a word at `addr` (absolute, or relative to the window start).
    pub fn write(&mut self, addr: usize, value: u32) -> Result<(), UlpError> {
        Ok(self.shared.write(addr, value)?)
    }

    //-------------------------------------------------------------------------
    // Peripheral reservation
    //-------------------------------------------------------------------------

    /// Route a pin into the RTC domain for coprocessor use.
    ///
    /// Idempotent: re-initializing an already-routed pin succeeds.
    pub fn rtc_init(&mut self, pin: u8) -> Result<(), UlpError> {
        if !rtc_io::is_rtc_gpio(pin) {
            return Err(rtc_io::Error::InvalidPin { pin }.into());
        }
        self.driver.rtc_pin_init(pin).map_err(UlpError::Driver)?;
        debug!("GPIO{} routed to RTC domain", pin);
        Ok(())
    }

    /// Return a pin to the digital I/O domain.
    ///
    /// Succeeds even if the pin was never initialized.
    pub fn rtc_deinit(&mut self, pin: u8) -> Result<(), UlpError> {
        if !rtc_io::is_rtc_gpio(pin) {
            return Err(rtc_io::Error::InvalidPin { pin }.into());
        }
        self.driver.rtc_pin_deinit(pin).map_err(UlpError::Driver)?;
        debug!("GPIO{} returned to digital domain", pin);
        Ok(())
    }

    /// Bind an ADC1 channel to coprocessor sampling.
    ///
    /// One reservation at a time; it persists until device reset (there is
    /// no release operation).
    pub fn adc_init(&mut self, channel: u8) -> Result<(), UlpError> {
        if self.adc.is_some() {
            return Err(rtc_io::Error::AdcInUse.into());
        }
        let config = AdcConfig::coprocessor(channel)?;
        self.driver.adc_connect(&config).map_err(UlpError::Driver)?;
        self.adc = Some(config);
        info!("ADC1 channel {} bound to ULP", channel);
        Ok(())
    }

    /// The active ADC reservation, if any.
    #[inline]
    pub fn adc_reservation(&self) -> Option<AdcConfig> {
        self.adc
    }
}
