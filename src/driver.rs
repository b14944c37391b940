//! Native driver seam.
//!
//! The controller never touches timer, pin-mux or ADC registers itself; it
//! calls through [`Driver`], implemented per target on top of the PAC.
//! Failures carry the native status code verbatim — the controller performs
//! no retry and no interpretation.

use crate::rtc_io::AdcConfig;

/// Status code reported by the native driver layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverError {
    /// Native status code, passed through untranslated.
    pub code: i32,
}

impl DriverError {
    /// Wrap a native status code.
    #[inline]
    pub const fn new(code: i32) -> Self {
        Self { code }
    }
}

/// Hardware operations the controller depends on.
///
/// One implementor exists per target chip; tests use a simulated recorder.
/// All operations are synchronous: they complete before returning, and a
/// non-responsive device is not modeled as a recoverable condition.
pub trait Driver {
    /// Program the wake timer period register for the given slot.
    fn timer_set_period(&mut self, slot: u8, period_us: u32) -> Result<(), DriverError>;

    /// Enable the wake timer, letting the coprocessor run on its next tick.
    fn timer_start(&mut self);

    /// Disable the wake timer.
    fn timer_stop(&mut self);

    /// Start coprocessor execution at the given word-index entry point.
    fn start(&mut self, entry: u32) -> Result<(), DriverError>;

    /// Halt coprocessor execution immediately.
    fn halt(&mut self);

    /// Route a pin into the RTC (low-power) domain.
    fn rtc_pin_init(&mut self, pin: u8) -> Result<(), DriverError>;

    /// Return a pin to the digital I/O domain.
    fn rtc_pin_deinit(&mut self, pin: u8) -> Result<(), DriverError>;

    /// Bind the ADC unit to coprocessor sampling with the given configuration.
    fn adc_connect(&mut self, config: &AdcConfig) -> Result<(), DriverError>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Everything a [`SimDriver`] was asked to do, in order.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) enum Call {
        TimerSetPeriod { slot: u8, period_us: u32 },
        TimerStart,
        TimerStop,
        Start { entry: u32 },
        Halt,
        RtcPinInit { pin: u8 },
        RtcPinDeinit { pin: u8 },
        AdcConnect { channel: u8 },
    }

    /// Recording driver with injectable failures.
    #[derive(Debug, Default)]
    pub(crate) struct SimDriver {
        pub calls: Vec<Call>,
        pub fail_timer: Option<DriverError>,
        pub fail_start: Option<DriverError>,
        pub fail_pin: Option<DriverError>,
        pub fail_adc: Option<DriverError>,
    }

    impl SimDriver {
        fn checked(&mut self, call: Call, failure: Option<DriverError>) -> Result<(), DriverError> {
            if let Some(err) = failure {
                return Err(err);
            }
            self.calls.push(call);
            Ok(())
        }
    }

    impl Driver for SimDriver {
        fn timer_set_period(&mut self, slot: u8, period_us: u32) -> Result<(), DriverError> {
            let failure = self.fail_timer;
            self.checked(Call::TimerSetPeriod { slot, period_us }, failure)
        }

        fn timer_start(&mut self) {
            self.calls.push(Call::TimerStart);
        }

        fn timer_stop(&mut self) {
            self.calls.push(Call::TimerStop);
        }

        fn start(&mut self, entry: u32) -> Result<(), DriverError> {
            let failure = self.fail_start;
            self.checked(Call::Start { entry }, failure)
        }

        fn halt(&mut self) {
            self.calls.push(Call::Halt);
        }

        fn rtc_pin_init(&mut self, pin: u8) -> Result<(), DriverError> {
            let failure = self.fail_pin;
            self.checked(Call::RtcPinInit { pin }, failure)
        }

        fn rtc_pin_deinit(&mut self, pin: u8) -> Result<(), DriverError> {
            let failure = self.fail_pin;
            self.checked(Call::RtcPinDeinit { pin }, failure)
        }

        fn adc_connect(&mut self, config: &AdcConfig) -> Result<(), DriverError> {
            let failure = self.fail_adc;
            self.checked(
                Call::AdcConnect {
                    channel: config.channel,
                },
                failure,
            )
        }
    }
}
