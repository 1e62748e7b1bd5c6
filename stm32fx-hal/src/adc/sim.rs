//! Register block in host memory for tests.
//!
//! Plain memory does not model the hardware side effects. Written values are stored as they are,
//! so a flag cleared by writing 0 reads back as 0 and every other written bit reads back as
//! written.
use std::boxed::Box;

use stm32fx::adc::{Adc as AdcBlock, MmioAdc, REGISTER_COUNT};

use super::{Adc, AdcId, Series};

pub(crate) struct SimulatedBlock {
    base: *mut u32,
}

impl SimulatedBlock {
    /// Allocate a zeroed register block. The memory is leaked so the MMIO handles stay valid
    /// for the rest of the test run.
    pub fn new() -> Self {
        let words: &'static mut [u32; REGISTER_COUNT] = Box::leak(Box::new([0; REGISTER_COUNT]));
        Self {
            base: words.as_mut_ptr(),
        }
    }

    pub fn mmio(&self) -> MmioAdc<'static> {
        unsafe { AdcBlock::new_mmio_at(self.base as usize) }
    }

    pub fn adc<S: Series>(&self, id: AdcId) -> Adc<S> {
        Adc::new_with_id(self.mmio(), id)
    }

    pub fn read(&self, offset: usize) -> u32 {
        unsafe { core::ptr::read_volatile(self.base.add(offset / 4)) }
    }

    pub fn write(&self, offset: usize, value: u32) {
        unsafe { core::ptr::write_volatile(self.base.add(offset / 4), value) }
    }
}
