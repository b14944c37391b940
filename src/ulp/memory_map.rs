//! ULP subsystem memory map constants (single source of truth).

/// RTC slow memory, HP core view. The coprocessor sees the same bytes at
/// offset zero of its own address space.
pub mod rtc_slow {
    /// RTC slow memory base address.
    pub const BASE: usize = 0x5000_0000;

    /// Full RTC slow memory size (8 KB).
    pub const SIZE: usize = 0x2000;
}

/// Bytes of RTC slow memory reserved for the coprocessor program and its data.
///
/// Matches the build-time reservation of the original firmware
/// (`CONFIG_ULP_COPROC_RESERVE_MEM`).
pub const RESERVE_MEM: usize = 2040;

/// Number of wake timer period slots.
pub const WAKEUP_PERIOD_SLOTS: u8 = 5;
