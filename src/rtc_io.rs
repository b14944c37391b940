//! RTC-domain peripheral reservation: GPIO pin validation and ADC routing.
//!
//! Pins handed to the coprocessor must live in the RTC power domain so the
//! program can drive them while the host core sleeps. The tables below are the
//! ESP32 RTC IO and ADC1 channel maps.

/// Peripheral reservation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// GPIO is not RTC-capable on this chip.
    InvalidPin { pin: u8 },

    /// ADC channel index out of range.
    InvalidChannel { channel: u8 },

    /// The ADC unit is already bound to the coprocessor.
    AdcInUse,
}

/// GPIO number → RTC IO channel, for the pins that have one.
pub const fn rtc_io_channel(pin: u8) -> Option<u8> {
    Some(match pin {
        36 => 0,
        37 => 1,
        38 => 2,
        39 => 3,
        34 => 4,
        35 => 5,
        25 => 6,
        26 => 7,
        33 => 8,
        32 => 9,
        4 => 10,
        0 => 11,
        2 => 12,
        15 => 13,
        13 => 14,
        12 => 15,
        14 => 16,
        27 => 17,
        _ => return None,
    })
}

/// Whether a GPIO can be routed into the RTC domain.
#[inline]
pub const fn is_rtc_gpio(pin: u8) -> bool {
    rtc_io_channel(pin).is_some()
}

/// Number of ADC1 channels.
pub const ADC1_CHANNEL_COUNT: u8 = 8;

/// ADC1 channel → GPIO number.
pub const fn adc1_channel_gpio(channel: u8) -> Option<u8> {
    Some(match channel {
        0 => 36,
        1 => 37,
        2 => 38,
        3 => 39,
        4 => 32,
        5 => 33,
        6 => 34,
        7 => 35,
        _ => return None,
    })
}

/// ADC unit selector. The coprocessor can only sample ADC1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcUnit {
    Adc1,
}

/// Capture resolution in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resolution {
    Bits9,
    Bits10,
    Bits11,
    Bits12,
}

/// Input attenuation ahead of the ADC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Attenuation {
    Db0,
    Db2_5,
    Db6,
    Db11,
}

/// Which execution unit owns the ADC while the reservation is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcOwner {
    /// The ULP FSM samples the channel on its own schedule.
    CoprocessorFsm,
}

/// ADC routing configuration handed to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AdcConfig {
    pub unit: AdcUnit,
    pub channel: u8,
    pub resolution: Resolution,
    pub attenuation: Attenuation,
    pub owner: AdcOwner,
}

impl AdcConfig {
    /// Fixed-shape configuration for coprocessor sampling: ADC1, 12-bit,
    /// 11 dB attenuation (full input range), FSM-owned.
    pub const fn coprocessor(channel: u8) -> Result<Self, Error> {
        if channel >= ADC1_CHANNEL_COUNT {
            return Err(Error::InvalidChannel { channel });
        }
        Ok(Self {
            unit: AdcUnit::Adc1,
            channel,
            resolution: Resolution::Bits12,
            attenuation: Attenuation::Db11,
            owner: AdcOwner::CoprocessorFsm,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rtc_pin_table_matches_chip() {
        // The 18 RTC-capable GPIOs.
        for pin in [0, 2, 4, 12, 13, 14, 15, 25, 26, 27, 32, 33, 34, 35, 36, 37, 38, 39] {
            assert!(is_rtc_gpio(pin), "GPIO{} should be RTC-capable", pin);
        }
        // Digital-only pins are rejected.
        for pin in [1, 3, 5, 16, 17, 18, 19, 21, 22, 23, 40, 255] {
            assert!(!is_rtc_gpio(pin), "GPIO{} should not be RTC-capable", pin);
        }
    }

    #[test]
    fn rtc_io_channels_are_distinct() {
        let mut seen = [false; 18];
        for pin in 0..=39u8 {
            if let Some(ch) = rtc_io_channel(pin) {
                assert!(!seen[ch as usize], "duplicate RTC channel {}", ch);
                seen[ch as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn adc1_channels_map_to_rtc_pins() {
        for channel in 0..ADC1_CHANNEL_COUNT {
            let gpio = adc1_channel_gpio(channel).unwrap();
            assert!(is_rtc_gpio(gpio));
        }
        assert_eq!(adc1_channel_gpio(ADC1_CHANNEL_COUNT), None);
    }

    #[test]
    fn coprocessor_config_has_fixed_shape() {
        let config = AdcConfig::coprocessor(3).unwrap();
        assert_eq!(config.unit, AdcUnit::Adc1);
        assert_eq!(config.channel, 3);
        assert_eq!(config.resolution, Resolution::Bits12);
        assert_eq!(config.attenuation, Attenuation::Db11);
        assert_eq!(config.owner, AdcOwner::CoprocessorFsm);
    }

    #[test]
    fn coprocessor_config_rejects_bad_channel() {
        assert_eq!(
            AdcConfig::coprocessor(8),
            Err(Error::InvalidChannel { channel: 8 })
        );
    }
}
