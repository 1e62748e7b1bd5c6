//! STM32F2 and STM32F4 specific parts of the ADC register block.
//!
//! Both series use the same ADC. Based on RM0090 p.416.
use arbitrary_int::{u2, u4, u5};

use super::{Adc, Alignment, MmioAdc, Prescaler};

pub const ADC_1_BASE_ADDR: usize = 0x4001_2000;
pub const ADC_2_BASE_ADDR: usize = 0x4001_2100;
pub const ADC_3_BASE_ADDR: usize = 0x4001_2200;
pub const ADC_COMMON_BASE_ADDR: usize = 0x4001_2300;

/// Highest channel number. Channel 18 is VBAT.
pub const MAX_CHANNEL: u8 = 18;

/// Raw bit constants of the F2/F4 specific fields.
pub mod bits {
    pub const SR_OVR_BIT: u32 = 5;
    pub const SR_OVR: u32 = 1 << SR_OVR_BIT;

    pub const CR1_RES_SHIFT: u32 = 24;
    pub const CR1_OVRIE_BIT: u32 = 26;
    pub const CR1_RES: u32 = 0x3 << CR1_RES_SHIFT;
    pub const CR1_OVRIE: u32 = 1 << CR1_OVRIE_BIT;

    pub const CR2_DDS_BIT: u32 = 9;
    pub const CR2_EOCS_BIT: u32 = 10;
    pub const CR2_JEXTSEL_SHIFT: u32 = 16;
    pub const CR2_JEXTEN_SHIFT: u32 = 20;
    pub const CR2_JSWSTART_BIT: u32 = 22;
    pub const CR2_EXTSEL_SHIFT: u32 = 24;
    pub const CR2_EXTEN_SHIFT: u32 = 28;
    pub const CR2_SWSTART_BIT: u32 = 30;

    pub const CR2_DDS: u32 = 1 << CR2_DDS_BIT;
    pub const CR2_EOCS: u32 = 1 << CR2_EOCS_BIT;
    pub const CR2_JEXTSEL: u32 = 0xF << CR2_JEXTSEL_SHIFT;
    pub const CR2_JEXTEN: u32 = 0x3 << CR2_JEXTEN_SHIFT;
    pub const CR2_JSWSTART: u32 = 1 << CR2_JSWSTART_BIT;
    pub const CR2_EXTSEL: u32 = 0xF << CR2_EXTSEL_SHIFT;
    pub const CR2_EXTEN: u32 = 0x3 << CR2_EXTEN_SHIFT;
    pub const CR2_SWSTART: u32 = 1 << CR2_SWSTART_BIT;

    pub const SMPR1_SMP18: u32 = 0x7 << 24;

    pub const CCR_MULTI: u32 = 0x1F;
    pub const CCR_DELAY: u32 = 0xF << 8;
    pub const CCR_DDS: u32 = 1 << 13;
    pub const CCR_DMA: u32 = 0x3 << 14;
    pub const CCR_ADCPRE_SHIFT: u32 = 16;
    pub const CCR_ADCPRE: u32 = 0x3 << CCR_ADCPRE_SHIFT;
    pub const CCR_VBATE: u32 = 1 << 22;
    pub const CCR_TSVREFE: u32 = 1 << 23;

    use crate::adc::bits::*;

    static_assertions::const_assert!(masks_disjoint(&[
        SR_AWD, SR_EOC, SR_JEOC, SR_JSTRT, SR_STRT, SR_OVR
    ]));
    static_assertions::const_assert!(masks_disjoint(&[
        CR1_AWDCH,
        CR1_EOCIE,
        CR1_AWDIE,
        CR1_JEOCIE,
        CR1_SCAN,
        CR1_AWDSGL,
        CR1_JAUTO,
        CR1_DISCEN,
        CR1_JDISCEN,
        CR1_DISCNUM,
        CR1_JAWDEN,
        CR1_AWDEN,
        CR1_RES,
        CR1_OVRIE,
    ]));
    static_assertions::const_assert!(masks_disjoint(&[
        CR2_ADON,
        CR2_CONT,
        CR2_DMA,
        CR2_DDS,
        CR2_EOCS,
        CR2_ALIGN,
        CR2_JEXTSEL,
        CR2_JEXTEN,
        CR2_JSWSTART,
        CR2_EXTSEL,
        CR2_EXTEN,
        CR2_SWSTART,
    ]));
    static_assertions::const_assert!(masks_disjoint(&[
        SMPR1_SMP18,
        SMPR1_SMP17,
        SMPR1_SMP16,
        SMPR1_SMP15,
        SMPR1_SMP14,
        SMPR1_SMP13,
        SMPR1_SMP12,
        SMPR1_SMP11,
        SMPR1_SMP10,
    ]));
    static_assertions::const_assert!(masks_disjoint(&[
        CCR_MULTI,
        CCR_DELAY,
        CCR_DDS,
        CCR_DMA,
        CCR_ADCPRE,
        CCR_VBATE,
        CCR_TSVREFE,
    ]));
}

/// Sample time, in ADC clock cycles.
#[bitbybit::bitenum(u3, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum SampleTime {
    Cycles3 = 0b000,
    Cycles15 = 0b001,
    Cycles28 = 0b010,
    Cycles56 = 0b011,
    Cycles84 = 0b100,
    Cycles112 = 0b101,
    Cycles144 = 0b110,
    Cycles480 = 0b111,
}

impl SampleTime {
    /// Sample time in half ADC clock cycles.
    pub const fn half_cycles(&self) -> u32 {
        let cycles = match self {
            SampleTime::Cycles3 => 3,
            SampleTime::Cycles15 => 15,
            SampleTime::Cycles28 => 28,
            SampleTime::Cycles56 => 56,
            SampleTime::Cycles84 => 84,
            SampleTime::Cycles112 => 112,
            SampleTime::Cycles144 => 144,
            SampleTime::Cycles480 => 480,
        };
        cycles * 2
    }
}

#[bitbybit::bitenum(u2, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum Resolution {
    Bits12 = 0b00,
    Bits10 = 0b01,
    Bits8 = 0b10,
    Bits6 = 0b11,
}

impl Resolution {
    /// Conversion time in ADC clock cycles, excluding the sample time.
    pub const fn conversion_cycles(&self) -> u32 {
        match self {
            Resolution::Bits12 => 12,
            Resolution::Bits10 => 10,
            Resolution::Bits8 => 8,
            Resolution::Bits6 => 6,
        }
    }
}

/// External trigger for regular conversions. Shared by all ADCs.
#[bitbybit::bitenum(u4, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum ExtSel {
    Tim1Cc1 = 0b0000,
    Tim1Cc2 = 0b0001,
    Tim1Cc3 = 0b0010,
    Tim2Cc2 = 0b0011,
    Tim2Cc3 = 0b0100,
    Tim2Cc4 = 0b0101,
    Tim2Trgo = 0b0110,
    Tim3Cc1 = 0b0111,
    Tim3Trgo = 0b1000,
    Tim4Cc4 = 0b1001,
    Tim5Cc1 = 0b1010,
    Tim5Cc2 = 0b1011,
    Tim5Cc3 = 0b1100,
    Tim8Cc1 = 0b1101,
    Tim8Trgo = 0b1110,
    Exti11 = 0b1111,
}

/// External trigger enable and polarity.
#[bitbybit::bitenum(u2, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum TriggerEdge {
    /// Trigger detection disabled, conversions are started by software only.
    Disabled = 0b00,
    Rising = 0b01,
    Falling = 0b10,
    Both = 0b11,
}

/// Full F2/F4 view of control register 2.
#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct Control2 {
    #[bit(30, rw)]
    swstart: bool,
    #[bits(28..=29, rw)]
    exten: TriggerEdge,
    #[bits(24..=27, rw)]
    extsel: ExtSel,
    #[bit(22, rw)]
    jswstart: bool,
    #[bits(20..=21, rw)]
    jexten: TriggerEdge,
    #[bits(16..=19, rw)]
    jextsel: u4,
    #[bit(11, rw)]
    align: Alignment,
    /// End of conversion selection. 0: EOC is set at the end of each sequence. 1: EOC is set at
    /// the end of each regular conversion.
    #[bit(10, rw)]
    eocs: bool,
    /// DMA disable selection.
    #[bit(9, rw)]
    dds: bool,
    #[bit(8, rw)]
    dma: bool,
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

/// Common status register. Mirrors the status flags of all three ADCs.
#[bitbybit::bitfield(u32)]
#[derive(Debug)]
pub struct CommonStatus {
    #[bit(21, r)]
    ovr3: bool,
    #[bit(17, r)]
    eoc3: bool,
    #[bit(13, r)]
    ovr2: bool,
    #[bit(9, r)]
    eoc2: bool,
    #[bit(5, r)]
    ovr1: bool,
    #[bit(1, r)]
    eoc1: bool,
}

#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct CommonControl {
    /// Temperature sensor and VREFINT enable.
    #[bit(23, rw)]
    tsvrefe: bool,
    #[bit(22, rw)]
    vbate: bool,
    #[bits(16..=17, rw)]
    adcpre: Prescaler,
    /// Direct memory access mode for multi ADC mode.
    #[bits(14..=15, rw)]
    dma: u2,
    #[bit(13, rw)]
    dds: bool,
    /// Delay between two sampling phases, minus 5 cycles.
    #[bits(8..=11, rw)]
    delay: u4,
    /// Multi ADC mode selection.
    #[bits(0..=4, rw)]
    multi: u5,
}

#[bitbybit::bitfield(u32)]
#[derive(Debug)]
pub struct CommonData {
    #[bits(16..=31, r)]
    data2: u16,
    #[bits(0..=15, r)]
    data1: u16,
}

/// Registers shared by all ADCs.
#[derive(derive_mmio::Mmio)]
#[repr(C)]
pub struct Common {
    #[mmio(PureRead)]
    csr: CommonStatus,
    ccr: CommonControl,
    #[mmio(PureRead)]
    cdr: CommonData,
}

static_assertions::const_assert_eq!(core::mem::size_of::<Common>(), 0x0C);

impl Common {
    /// Create a new MMIO instance for the common ADC registers at address
    /// [ADC_COMMON_BASE_ADDR].
    ///
    /// # Safety
    ///
    /// This API can be used to potentially create a driver to the same peripheral structure
    /// from multiple threads. The user must ensure that concurrent accesses are safe and do not
    /// interfere with each other.
    pub const unsafe fn new_mmio_fixed() -> MmioCommon<'static> {
        unsafe { Self::new_mmio_at(ADC_COMMON_BASE_ADDR) }
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
