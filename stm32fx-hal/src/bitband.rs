//! Atomic single-bit access through the Cortex-M3/M4 bit-band alias regions.
//!
//! Every bit of the first megabyte of the SRAM and the peripheral region has its own 32-bit
//! alias word. Writing 0 or 1 to the alias word clears or sets the bit in a single bus
//! transaction, so unrelated bits of the same register can never be lost, even if an interrupt
//! modifies them in between.
//!
//! The alias is only used when running on a bare-metal ARM target. On all other targets, for
//! example for host side tests, [AtomicBit] falls back to a read-modify-write inside a critical
//! section, which keeps the same guarantee with respect to interrupts.

pub const SRAM_BASE: usize = 0x2000_0000;
pub const SRAM_ALIAS_BASE: usize = 0x2200_0000;
pub const PERIPHERAL_BASE: usize = 0x4000_0000;
pub const PERIPHERAL_ALIAS_BASE: usize = 0x4200_0000;
/// Size of the bit addressable part of both regions.
pub const REGION_SIZE: usize = 0x10_0000;

const fn alias(region_base: usize, alias_base: usize, addr: usize, bit: u8) -> Option<usize> {
    if bit >= 32 || addr < region_base || addr >= region_base + REGION_SIZE {
        return None;
    }
    // Only word aligned registers.
    if addr % 4 != 0 {
        return None;
    }
    Some(alias_base + (addr - region_base) * 32 + bit as usize * 4)
}

/// Alias word address of `bit` of the peripheral register at `addr`.
///
/// Returns [None] if the address is outside of the bit-band peripheral region or if the bit
/// index is larger than 31.
pub const fn peripheral_alias(addr: usize, bit: u8) -> Option<usize> {
    alias(PERIPHERAL_BASE, PERIPHERAL_ALIAS_BASE, addr, bit)
}

/// Alias word address of `bit` of the SRAM word at `addr`.
pub const fn sram_alias(addr: usize, bit: u8) -> Option<usize> {
    alias(SRAM_BASE, SRAM_ALIAS_BASE, addr, bit)
}

/// A single bit of a 32-bit register which can be set and cleared atomically.
#[derive(Debug)]
pub struct AtomicBit {
    reg: *mut u32,
    mask: u32,
    alias: Option<*mut u32>,
}

impl AtomicBit {
    /// Create a new atomic bit handle for `bit` of the register at `reg`.
    ///
    /// The alias region is used if the register lies inside one of the bit-band regions and the
    /// code runs on a bare-metal ARM target.
    ///
    /// # Safety
    ///
    /// `reg` must be a valid, word aligned register address which stays valid for the lifetime
    /// of the returned handle. Bit 0 to 31 are allowed, larger values are masked.
    pub unsafe fn new(reg: *mut u32, bit: u8) -> Self {
        let bit = bit & 0x1F;
        Self {
            reg,
            mask: 1 << bit,
            alias: Self::alias_for(reg as usize, bit),
        }
    }

    #[cfg(all(target_arch = "arm", target_os = "none"))]
    fn alias_for(addr: usize, bit: u8) -> Option<*mut u32> {
        peripheral_alias(addr, bit)
            .or_else(|| sram_alias(addr, bit))
            .map(|alias| alias as *mut u32)
    }

    #[cfg(not(all(target_arch = "arm", target_os = "none")))]
    fn alias_for(_addr: usize, _bit: u8) -> Option<*mut u32> {
        None
    }

    /// Whether the bit is accessed through its bit-band alias word.
    #[inline]
    pub fn uses_bit_band(&self) -> bool {
        self.alias.is_some()
    }

    #[inline]
    pub fn set(&self) {
        self.write(true);
    }

    #[inline]
    pub fn clear(&self) {
        self.write(false);
    }

    pub fn write(&self, value: bool) {
        if let Some(alias) = self.alias {
            // Safety: The alias address was derived from a valid register address.
            unsafe { core::ptr::write_volatile(alias, value as u32) };
            return;
        }
        critical_section::with(|_| {
            // Safety: Validity of the register address is guaranteed by the constructor.
            unsafe {
                let current = core::ptr::read_volatile(self.reg);
                let new = if value {
                    current | self.mask
                } else {
                    current & !self.mask
                };
                core::ptr::write_volatile(self.reg, new);
            }
        });
    }

    pub fn read(&self) -> bool {
        if let Some(alias) = self.alias {
            // Safety: The alias address was derived from a valid register address.
            return unsafe { core::ptr::read_volatile(alias) } & 1 == 1;
        }
        // Safety: Validity of the register address is guaranteed by the constructor.
        unsafe { core::ptr::read_volatile(self.reg) & self.mask != 0 }
    }
}
