//! ADC register module.
//!
//! Based on RM0008 (STM32F1) p.236 and RM0090 (STM32F4) p.416. The STM32F2 uses the same
//! ADC as the STM32F4.
use arbitrary_int::{u2, u3, u4, u5, u12};

pub mod bits;
pub mod f1;
pub mod f2;

/// Number of 32-bit registers inside the ADC register block.
pub const REGISTER_COUNT: usize = 20;

#[bitbybit::bitenum(u1, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum Alignment {
    Right = 0b0,
    Left = 0b1,
}

/// ADC clock prescaler, dividing PCLK2.
///
/// The F1 keeps this field in the RCC clock configuration register (ADCPRE, bits 14 and 15),
/// the F2/F4 in the common control register, see [f2::CommonControl]. The encoding is the
/// same.
#[bitbybit::bitenum(u2, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum Prescaler {
    Div2 = 0b00,
    Div4 = 0b01,
    Div6 = 0b10,
    Div8 = 0b11,
}

impl Prescaler {
    pub const fn divisor(&self) -> u32 {
        match self {
            Prescaler::Div2 => 2,
            Prescaler::Div4 => 4,
            Prescaler::Div6 => 6,
            Prescaler::Div8 => 8,
        }
    }
}

#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct Status {
    /// Overrun. Set when regular conversion data was lost. Only available on the F2/F4.
    #[bit(5, rw)]
    ovr: bool,
    /// Regular channel start flag.
    #[bit(4, rw)]
    strt: bool,
    /// Injected channel start flag.
    #[bit(3, rw)]
    jstrt: bool,
    /// Injected channel end of conversion.
    #[bit(2, rw)]
    jeoc: bool,
    /// Regular channel end of conversion. Cleared by reading the data register.
    #[bit(1, rw)]
    eoc: bool,
    /// Analog watchdog flag.
    #[bit(0, rw)]
    awd: bool,
}

#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct Control1 {
    /// Overrun interrupt enable. Only available on the F2/F4.
    #[bit(26, rw)]
    ovrie: bool,
    /// Resolution. Only available on the F2/F4, reserved on the F1.
    #[bits(24..=25, rw)]
    res: u2,
    /// Analog watchdog enable on regular channels.
    #[bit(23, rw)]
    awden: bool,
    /// Analog watchdog enable on injected channels.
    #[bit(22, rw)]
    jawden: bool,
    /// Dual mode selection. Only available on ADC1 of the F1, reserved otherwise.
    #[bits(16..=19, rw)]
    dualmod: u4,
    /// Discontinuous mode channel count, minus one.
    #[bits(13..=15, rw)]
    discnum: u3,
    #[bit(12, rw)]
    jdiscen: bool,
    #[bit(11, rw)]
    discen: bool,
    /// Automatic injected group conversion.
    #[bit(10, rw)]
    jauto: bool,
    /// Enable the watchdog on the single channel selected by `awdch`.
    #[bit(9, rw)]
    awdsgl: bool,
    #[bit(8, rw)]
    scan: bool,
    #[bit(7, rw)]
    jeocie: bool,
    #[bit(6, rw)]
    awdie: bool,
    #[bit(5, rw)]
    eocie: bool,
    /// Analog watchdog channel select bits.
    #[bits(0..=4, rw)]
    awdch: u5,
}

/// Series-independent view of control register 2.
///
/// The trigger selection and the software start bits moved between the F1 and the F2/F4.
/// Use [f1::Control2] or [f2::Control2] for the full layout.
#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct Control2 {
    #[bit(11, rw)]
    align: Alignment,
    #[bit(8, rw)]
    dma: bool,
    /// Continuous conversion.
    #[bit(1, rw)]
    cont: bool,
    /// A/D converter on.
    #[bit(0, rw)]
    adon: bool,
}

/// Sample time register 1, channels 10 to 18. Channel 18 only exists on the F2/F4.
///
/// The 3-bit codes are series specific, see [f1::SampleTime] and [f2::SampleTime].
#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct SampleTime1 {
    #[bits(24..=26, rw)]
    smp18: u3,
    #[bits(21..=23, rw)]
    smp17: u3,
    #[bits(18..=20, rw)]
    smp16: u3,
    #[bits(15..=17, rw)]
    smp15: u3,
    #[bits(12..=14, rw)]
    smp14: u3,
    #[bits(9..=11, rw)]
    smp13: u3,
    #[bits(6..=8, rw)]
    smp12: u3,
    #[bits(3..=5, rw)]
    smp11: u3,
    #[bits(0..=2, rw)]
    smp10: u3,
}

/// Sample time register 2, channels 0 to 9.
#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct SampleTime2 {
    #[bits(27..=29, rw)]
    smp9: u3,
    #[bits(24..=26, rw)]
    smp8: u3,
    #[bits(21..=23, rw)]
    smp7: u3,
    #[bits(18..=20, rw)]
    smp6: u3,
    #[bits(15..=17, rw)]
    smp5: u3,
    #[bits(12..=14, rw)]
    smp4: u3,
    #[bits(9..=11, rw)]
    smp3: u3,
    #[bits(6..=8, rw)]
    smp2: u3,
    #[bits(3..=5, rw)]
    smp1: u3,
    #[bits(0..=2, rw)]
    smp0: u3,
}

/// Injected channel data offset. Subtracted from the raw injected conversion result.
#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct InjectedOffset {
    #[bits(0..=11, rw)]
    joffset: u12,
}

/// Analog watchdog high or low threshold.
#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct WatchdogThreshold {
    #[bits(0..=11, rw)]
    threshold: u12,
}

#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct RegularSequence1 {
    /// Regular channel sequence length, minus one.
    #[bits(20..=23, rw)]
    l: u4,
    #[bits(15..=19, rw)]
    sq16: u5,
    #[bits(10..=14, rw)]
    sq15: u5,
    #[bits(5..=9, rw)]
    sq14: u5,
    #[bits(0..=4, rw)]
    sq13: u5,
}

#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct RegularSequence2 {
    #[bits(25..=29, rw)]
    sq12: u5,
    #[bits(20..=24, rw)]
    sq11: u5,
    #[bits(15..=19, rw)]
    sq10: u5,
    #[bits(10..=14, rw)]
    sq9: u5,
    #[bits(5..=9, rw)]
    sq8: u5,
    #[bits(0..=4, rw)]
    sq7: u5,
}

#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct RegularSequence3 {
    #[bits(25..=29, rw)]
    sq6: u5,
    #[bits(20..=24, rw)]
    sq5: u5,
    #[bits(15..=19, rw)]
    sq4: u5,
    #[bits(10..=14, rw)]
    sq3: u5,
    #[bits(5..=9, rw)]
    sq2: u5,
    #[bits(0..=4, rw)]
    sq1: u5,
}

#[bitbybit::bitenum(u2, exhaustive = true)]
#[derive(Debug, PartialEq, Eq)]
pub enum InjectedLength {
    One = 0b00,
    Two = 0b01,
    Three = 0b10,
    Four = 0b11,
}

/// Injected sequence register.
///
/// If the injected sequence is shorter than four conversions, the hardware converts the
/// channels starting from `jsq(4 - length)`.
#[bitbybit::bitfield(u32, default = 0x0)]
#[derive(Debug)]
pub struct InjectedSequence {
    #[bits(20..=21, rw)]
    jl: InjectedLength,
    #[bits(15..=19, rw)]
    jsq4: u5,
    #[bits(10..=14, rw)]
    jsq3: u5,
    #[bits(5..=9, rw)]
    jsq2: u5,
    #[bits(0..=4, rw)]
    jsq1: u5,
}

#[bitbybit::bitfield(u32)]
#[derive(Debug)]
pub struct InjectedData {
    #[bits(0..=15, r)]
    jdata: u16,
}

#[bitbybit::bitfield(u32)]
#[derive(Debug)]
pub struct RegularData {
    /// ADC2 data in dual mode. Only used on ADC1 of the F1.
    #[bits(16..=31, r)]
    adc2_data: u16,
    #[bits(0..=15, r)]
    data: u16,
}

/// ADC register block.
#[derive(derive_mmio::Mmio)]
#[repr(C)]
pub struct Adc {
    /// Status register. Flags are cleared by writing 0, writing 1 has no effect.
    #[mmio(PureRead, Write)]
    sr: Status,
    /// Control register 1.
    cr1: Control1,
    /// Control register 2.
    cr2: Control2,
    /// Sample time register 1.
    smpr1: SampleTime1,
    /// Sample time register 2.
    smpr2: SampleTime2,
    /// Injected channel data offset register 1.
    jofr1: InjectedOffset,
    /// Injected channel data offset register 2.
    jofr2: InjectedOffset,
    /// Injected channel data offset register 3.
    jofr3: InjectedOffset,
    /// Injected channel data offset register 4.
    jofr4: InjectedOffset,
    /// Watchdog high threshold register.
    htr: WatchdogThreshold,
    /// Watchdog low threshold register.
    ltr: WatchdogThreshold,
    /// Regular sequence register 1.
    sqr1: RegularSequence1,
    /// Regular sequence register 2.
    sqr2: RegularSequence2,
    /// Regular sequence register 3.
    sqr3: RegularSequence3,
    /// Injected sequence register.
    jsqr: InjectedSequence,
    /// Injected data register 1.
    #[mmio(PureRead)]
    jdr1: InjectedData,
    /// Injected data register 2.
    #[mmio(PureRead)]
    jdr2: InjectedData,
    /// Injected data register 3.
    #[mmio(PureRead)]
    jdr3: InjectedData,
    /// Injected data register 4.
    #[mmio(PureRead)]
    jdr4: InjectedData,
    /// Regular data register. Reading it clears the EOC flag.
    #[mmio(Read)]
    dr: RegularData,
}

static_assertions::const_assert_eq!(core::mem::size_of::<Adc>(), 0x50);
static_assertions::const_assert_eq!(core::mem::size_of::<Adc>(), REGISTER_COUNT * 4);

/// Register offsets relative to the block base address.
pub mod offsets {
    pub const SR: usize = 0x00;
    pub const CR1: usize = 0x04;
    pub const CR2: usize = 0x08;
    pub const SMPR1: usize = 0x0C;
    pub const SMPR2: usize = 0x10;
    pub const JOFR1: usize = 0x14;
    pub const JOFR2: usize = 0x18;
    pub const JOFR3: usize = 0x1C;
    pub const JOFR4: usize = 0x20;
    pub const HTR: usize = 0x24;
    pub const LTR: usize = 0x28;
    pub const SQR1: usize = 0x2C;
    pub const SQR2: usize = 0x30;
    pub const SQR3: usize = 0x34;
    pub const JSQR: usize = 0x38;
    pub const JDR1: usize = 0x3C;
    pub const JDR2: usize = 0x40;
    pub const JDR3: usize = 0x44;
    pub const JDR4: usize = 0x48;
    pub const DR: usize = 0x4C;
}
