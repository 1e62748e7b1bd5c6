//! STM32F1 specific parts of the ADC register block.
//!
//! Based on RM0008 p.236.
use arbitrary_int::u3;

use super::{Adc, Alignment, MmioAdc};

pub const ADC_1_BASE_ADDR: usize = 0x4001_2400;
pub const ADC_2_BASE_ADDR: usize = 0x4001_2800;
/// Only available on high-density and XL-density devices.
pub const ADC_3_BASE_ADDR: usize = 0x4001_3C00;

/// Highest channel number. Channel 16 is the temperature sensor, channel 17 is VREFINT.
pub const MAX_CHANNEL: u8 = 17;

/// Raw bit constants of the F1 specific fields.
pub mod bits {
    pub const CR1_DUALMOD_SHIFT: u32 = 16;
    pub const CR1_DUALMOD: u32 = 0xF << CR1_DUALMOD_SHIFT;

    pub const CR2_CAL_BIT: u32 = 2;
    pub const CR2_RSTCAL_BIT: u32 = 3;
    pub const CR2_JEXTSEL_SHIFT: u32 = 12;
    pub const CR2_JEXTTRIG_BIT: u32 = 15;
    pub const CR2_EXTSEL_SHIFT: u32 = 17;
    pub const CR2_EXTTRIG_BIT: u32 = 20;
    pub const CR2_JSWSTART_BIT: u32 = 21;
    pub const CR2_SWSTART_BIT: u32 = 22;
    pub const CR2_TSVREFE_BIT: u32 = 23;

    pub const CR2_CAL: u32 = 1 << CR2_CAL_BIT;
    pub const CR2_RSTCAL: u32 = 1 << CR2_RSTCAL_BIT;
    pub const CR2_JEXTSEL: u32 = 0x7 << CR2_JEXTSEL_SHIFT;
    pub const CR2_JEXTTRIG: u32 = 1 << CR2_JEXTTRIG_BIT;
    pub const CR2_EXTSEL: u32 = 0x7 << CR2_EXTSEL_SHIFT;
    pub const CR2_EXTTRIG: u32 = 1 << CR2_EXTTRIG_BIT;
    pub const CR2_JSWSTART: u32 = 1 << CR2_JSWSTART_BIT;
    pub const CR2_SWSTART: u32 = 1 << CR2_SWSTART_BIT;
    pub const CR2_TSVREFE: u32 = 1 << CR2_TSVREFE_BIT;

    /// EXTSEL value which selects the SWSTART bit as the regular trigger, on all F1 ADCs.
    pub const EXTSEL_SWSTART: u32 = 0x7;

    use crate::adc::bits::{CR2_ADON, CR2_ALIGN, CR2_CONT, CR2_DMA, masks_disjoint};

    static_assertions::const_assert!(masks_disjoint(&[
        CR2_ADON,
        CR2_CONT,
        CR2_CAL,
        CR2_RSTCAL,
        CR2_DMA,
        CR2_ALIGN,
        CR2_JEXTSEL,
        CR2_JEXTTRIG,
        CR2_EXTSEL,
        CR2_EXTTRIG,
        CR2_JSWSTART,
        CR2_SWSTART,
        CR2_TSVREFE,
    ]));
}

/// Sample time, in ADC clock cycles.
#[bitbybit::bitenum(u3, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum SampleTime {
    Cycles1_5 = 0b000,
    Cycles7_5 = 0b001,
    Cycles13_5 = 0b010,
    Cycles28_5 = 0b011,
    Cycles41_5 = 0b100,
    Cycles55_5 = 0b101,
    Cycles71_5 = 0b110,
    Cycles239_5 = 0b111,
}

impl SampleTime {
    /// Sample time in half ADC clock cycles.
    pub const fn half_cycles(&self) -> u32 {
        match self {
            SampleTime::Cycles1_5 => 3,
            SampleTime::Cycles7_5 => 15,
            SampleTime::Cycles13_5 => 27,
            SampleTime::Cycles28_5 => 57,
            SampleTime::Cycles41_5 => 83,
            SampleTime::Cycles55_5 => 111,
            SampleTime::Cycles71_5 => 143,
            SampleTime::Cycles239_5 => 479,
        }
    }
}

/// External trigger for regular conversions of ADC1 and ADC2.
#[bitbybit::bitenum(u3, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum ExtSelAdc12 {
    Tim1Cc1 = 0b000,
    Tim1Cc2 = 0b001,
    Tim1Cc3 = 0b010,
    Tim2Cc2 = 0b011,
    Tim3Trgo = 0b100,
    Tim4Cc4 = 0b101,
    /// EXTI line 11, or TIM8 TRGO on high-density devices if remapped in AFIO.
    Exti11Tim8Trgo = 0b110,
    Swstart = 0b111,
}

/// External trigger for regular conversions of ADC3.
#[bitbybit::bitenum(u3, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum ExtSelAdc3 {
    Tim3Cc1 = 0b000,
    Tim2Cc3 = 0b001,
    Tim1Cc3 = 0b010,
    Tim8Cc1 = 0b011,
    Tim8Trgo = 0b100,
    Tim5Cc1 = 0b101,
    Tim5Cc3 = 0b110,
    Swstart = 0b111,
}

/// Full F1 view of control register 2.
#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct Control2 {
    /// Temperature sensor and VREFINT enable. Only on ADC1.
    #[bit(23, rw)]
    tsvrefe: bool,
    #[bit(22, rw)]
    swstart: bool,
    #[bit(21, rw)]
    jswstart: bool,
    /// External trigger conversion mode for regular channels.
    #[bit(20, rw)]
    exttrig: bool,
    /// Raw trigger selection, see [ExtSelAdc12] and [ExtSelAdc3].
    #[bits(17..=19, rw)]
    extsel: u3,
    #[bit(15, rw)]
    jexttrig: bool,
    #[bits(12..=14, rw)]
    jextsel: u3,
    #[bit(11, rw)]
    align: Alignment,
    #[bit(8, rw)]
    dma: bool,
    #[bit(3, rw)]
    rstcal: bool,
    #[bit(2, rw)]
    cal: bool,
    #[bit(1, rw)]
    cont: bool,
    #[bit(0, rw)]
    adon: bool,
}

impl From<super::Control2> for Control2 {
    #[inline]
    fn from(value: super::Control2) -> Self {
        Self::new_with_raw_value(value.raw_value())
    }
}

impl From<Control2> for super::Control2 {
    #[inline]
    fn from(value: Control2) -> Self {
        Self::new_with_raw_value(value.raw_value())
    }
}

/// Create a new MMIO instance for ADC1 at address [ADC_1_BASE_ADDR].
///
/// # Safety
///
/// This API can be used to potentially create a driver to the same peripheral structure
/// from multiple threads. The user must ensure that concurrent accesses are safe and do not
/// interfere with each other.
pub const unsafe fn new_mmio_fixed_1() -> MmioAdc<'static> {
    unsafe { Adc::new_mmio_at(ADC_1_BASE_ADDR) }
}

/// Create a new MMIO instance for ADC2 at address [ADC_2_BASE_ADDR].
///
/// # Safety
///
/// See [new_mmio_fixed_1].
pub const unsafe fn new_mmio_fixed_2() -> MmioAdc<'static> {
    unsafe { Adc::new_mmio_at(ADC_2_BASE_ADDR) }
}

/// Create a new MMIO instance for ADC3 at address [ADC_3_BASE_ADDR].
///
/// # Safety
///
/// See [new_mmio_fixed_1].
pub const unsafe fn new_mmio_fixed_3() -> MmioAdc<'static> {
    unsafe { Adc::new_mmio_at(ADC_3_BASE_ADDR) }
}
