//! Series descriptors.
//!
//! The ADC of the F1 and the ADC of the F2/F4 share the register block layout but differ in
//! the trigger selection, the software start bit, the sample time encoding and the available
//! interrupts. Each series is described by a marker type implementing [Series].
use arbitrary_int::u3;
use stm32fx::adc::{Control2, f1, f2};

use super::{AdcId, InterruptFlags};
use crate::time::Hertz;

/// Static properties of an ADC series.
#[derive(Debug)]
pub struct Capabilities {
    pub name: &'static str,
    /// Interrupts which can be enabled on this series. Other flags are ignored.
    pub interrupts: InterruptFlags,
    /// Highest valid channel number.
    pub max_channel: u8,
    /// Maximum ADC clock according to the datasheet.
    pub max_adc_clock: Hertz,
    /// Conversion time on top of the sample time, in half ADC clock cycles. For the F2/F4, this
    /// is the value for 12-bit resolution.
    pub conversion_half_cycles: u32,
    /// Base addresses of ADC1, ADC2 and ADC3.
    pub base_addrs: [usize; 3],
}

/// External trigger selection for the F1.
///
/// ADC3 has its own trigger table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExtTrigger {
    Adc12(f1::ExtSelAdc12),
    Adc3(f1::ExtSelAdc3),
}

impl ExtTrigger {
    pub fn raw_value(&self) -> u3 {
        match self {
            ExtTrigger::Adc12(sel) => sel.raw_value(),
            ExtTrigger::Adc3(sel) => sel.raw_value(),
        }
    }
}

impl From<f1::ExtSelAdc12> for ExtTrigger {
    fn from(value: f1::ExtSelAdc12) -> Self {
        ExtTrigger::Adc12(value)
    }
}

impl From<f1::ExtSelAdc3> for ExtTrigger {
    fn from(value: f1::ExtSelAdc3) -> Self {
        ExtTrigger::Adc3(value)
    }
}

pub trait Series: crate::sealed::Sealed + core::fmt::Debug + 'static {
    const CAPS: Capabilities;

    type SampleRate: Copy + core::fmt::Debug + PartialEq;
    type ExtSel: Copy + core::fmt::Debug;

    /// Sample rate applied by [super::Config::default].
    const DEFAULT_SAMPLE_RATE: Self::SampleRate;

    fn sample_rate_code(rate: Self::SampleRate) -> u3;

    /// Sample time of the given rate in half ADC clock cycles.
    fn sample_half_cycles(rate: Self::SampleRate) -> u32;

    /// Total time of one conversion with the given sample rate, in half ADC clock cycles.
    #[inline]
    fn conversion_half_cycles(rate: Self::SampleRate) -> u32 {
        Self::sample_half_cycles(rate) + Self::CAPS.conversion_half_cycles
    }

    fn with_extsel(cr2: Control2, event: Self::ExtSel) -> Control2;

    /// Sets the software start bit of the regular group.
    fn with_swstart(cr2: Control2) -> Control2;

    /// Configures the regular group to be started by [Self::with_swstart].
    fn with_software_trigger(cr2: Control2) -> Control2;

    /// Selects `event` as the trigger of the regular group and enables external triggering.
    fn with_external_trigger(cr2: Control2, event: Self::ExtSel) -> Control2;

    /// Determine the ADC from the base address of its register block.
    fn id_from_addr(addr: usize) -> Option<AdcId> {
        match Self::CAPS.base_addrs.iter().position(|base| *base == addr) {
            Some(0) => Some(AdcId::Adc1),
            Some(1) => Some(AdcId::Adc2),
            Some(2) => Some(AdcId::Adc3),
            _ => None,
        }
    }
}

/// STM32F1 series.
#[derive(Debug, Clone, Copy)]
pub enum F1 {}

/// STM32F2 series.
#[derive(Debug, Clone, Copy)]
pub enum F2 {}

/// STM32F4 series.
#[derive(Debug, Clone, Copy)]
pub enum F4 {}

impl crate::sealed::Sealed for F1 {}
impl crate::sealed::Sealed for F2 {}
impl crate::sealed::Sealed for F4 {}

impl Series for F1 {
    const CAPS: Capabilities = Capabilities {
        name: "STM32F1",
        interrupts: InterruptFlags::CONVERSION
            .union(InterruptFlags::INJECTED_CONVERSION)
            .union(InterruptFlags::WATCHDOG),
        max_channel: f1::MAX_CHANNEL,
        max_adc_clock: Hertz::from_raw(14_000_000),
        // 12.5 cycles
        conversion_half_cycles: 25,
        base_addrs: [f1::ADC_1_BASE_ADDR, f1::ADC_2_BASE_ADDR, f1::ADC_3_BASE_ADDR],
    };

    type SampleRate = f1::SampleTime;
    type ExtSel = ExtTrigger;

    const DEFAULT_SAMPLE_RATE: f1::SampleTime = f1::SampleTime::Cycles55_5;

    #[inline]
    fn sample_rate_code(rate: f1::SampleTime) -> u3 {
        rate.raw_value()
    }

    #[inline]
    fn sample_half_cycles(rate: f1::SampleTime) -> u32 {
        rate.half_cycles()
    }

    #[inline]
    fn with_extsel(cr2: Control2, event: ExtTrigger) -> Control2 {
        f1::Control2::from(cr2).with_extsel(event.raw_value()).into()
    }

    #[inline]
    fn with_swstart(cr2: Control2) -> Control2 {
        f1::Control2::from(cr2).with_swstart(true).into()
    }

    #[inline]
    fn with_software_trigger(cr2: Control2) -> Control2 {
        f1::Control2::from(cr2)
            .with_extsel(u3::new(f1::bits::EXTSEL_SWSTART as u8))
            .with_exttrig(true)
            .into()
    }

    #[inline]
    fn with_external_trigger(cr2: Control2, event: ExtTrigger) -> Control2 {
        f1::Control2::from(Self::with_extsel(cr2, event))
            .with_exttrig(true)
            .into()
    }
}

/// Series sharing the F2/F4 ADC.
pub trait F2Family: Series<SampleRate = f2::SampleTime, ExtSel = f2::ExtSel> {}

macro_rules! f2_family_series {
    ($series:ident, $name:literal, $max_clock:literal) => {
        impl Series for $series {
            const CAPS: Capabilities = Capabilities {
                name: $name,
                interrupts: InterruptFlags::all(),
                max_channel: f2::MAX_CHANNEL,
                max_adc_clock: Hertz::from_raw($max_clock),
                conversion_half_cycles: f2::Resolution::Bits12.conversion_cycles() * 2,
                base_addrs: [f2::ADC_1_BASE_ADDR, f2::ADC_2_BASE_ADDR, f2::ADC_3_BASE_ADDR],
            };

            type SampleRate = f2::SampleTime;
            type ExtSel = f2::ExtSel;

            const DEFAULT_SAMPLE_RATE: f2::SampleTime = f2::SampleTime::Cycles56;

            #[inline]
            fn sample_rate_code(rate: f2::SampleTime) -> u3 {
                rate.raw_value()
            }

            #[inline]
            fn sample_half_cycles(rate: f2::SampleTime) -> u32 {
                rate.half_cycles()
            }

            #[inline]
            fn with_extsel(cr2: Control2, event: f2::ExtSel) -> Control2 {
                f2::Control2::from(cr2).with_extsel(event).into()
            }

            #[inline]
            fn with_swstart(cr2: Control2) -> Control2 {
                f2::Control2::from(cr2).with_swstart(true).into()
            }

            #[inline]
            fn with_software_trigger(cr2: Control2) -> Control2 {
                f2::Control2::from(cr2)
                    .with_exten(f2::TriggerEdge::Disabled)
                    .into()
            }

            /// Keeps a configured trigger edge and selects the rising edge otherwise.
            #[inline]
            fn with_external_trigger(cr2: Control2, event: f2::ExtSel) -> Control2 {
                let cr2 = f2::Control2::from(Self::with_extsel(cr2, event));
                match cr2.exten() {
                    f2::TriggerEdge::Disabled => cr2.with_exten(f2::TriggerEdge::Rising).into(),
                    _ => cr2.into(),
                }
            }
        }

        impl F2Family for $series {}
    };
}

f2_family_series!(F2, "STM32F2", 30_000_000);
f2_family_series!(F4, "STM32F4", 36_000_000);

#[cfg(test)]
mod tests {
    use super::*;
    use stm32fx::adc::bits::CR2_ADON;

    #[test]
    fn f1_software_trigger() {
        let cr2 = F1::with_software_trigger(Control2::new_with_raw_value(CR2_ADON));
        assert_eq!(
            cr2.raw_value(),
            CR2_ADON | f1::bits::CR2_EXTSEL | f1::bits::CR2_EXTTRIG
        );
        let cr2 = F1::with_swstart(cr2);
        assert_eq!(cr2.raw_value() & f1::bits::CR2_SWSTART, f1::bits::CR2_SWSTART);
    }

    #[test]
    fn f2_software_trigger_clears_edge() {
        let cr2 = Control2::new_with_raw_value(f2::bits::CR2_EXTEN | CR2_ADON);
        let cr2 = F4::with_software_trigger(cr2);
        assert_eq!(cr2.raw_value(), CR2_ADON);
        assert_eq!(F2::with_swstart(cr2).raw_value(), CR2_ADON | f2::bits::CR2_SWSTART);
    }

    #[test]
    fn extsel_fields() {
        let cr2 = F1::with_extsel(
            Control2::new_with_raw_value(0),
            f1::ExtSelAdc3::Tim8Trgo.into(),
        );
        assert_eq!(cr2.raw_value(), 0b100 << f1::bits::CR2_EXTSEL_SHIFT);
        let cr2 = F4::with_extsel(Control2::new_with_raw_value(0), f2::ExtSel::Exti11);
        assert_eq!(cr2.raw_value(), f2::bits::CR2_EXTSEL);
    }

    #[test]
    fn external_trigger_enables_triggering() {
        let cr2 = F1::with_external_trigger(
            Control2::new_with_raw_value(0),
            f1::ExtSelAdc12::Tim2Cc2.into(),
        );
        assert_eq!(
            cr2.raw_value(),
            (0b011 << f1::bits::CR2_EXTSEL_SHIFT) | f1::bits::CR2_EXTTRIG
        );
        let cr2 = F4::with_external_trigger(Control2::new_with_raw_value(0), f2::ExtSel::Tim1Cc1);
        assert_eq!(cr2.raw_value(), 0b01 << f2::bits::CR2_EXTEN_SHIFT);
        let cr2 = Control2::new_with_raw_value(f2::bits::CR2_EXTEN);
        let cr2 = F2::with_external_trigger(cr2, f2::ExtSel::Tim2Trgo);
        assert_eq!(
            cr2.raw_value(),
            f2::bits::CR2_EXTEN | (0b0110 << f2::bits::CR2_EXTSEL_SHIFT)
        );
    }

    #[test]
    fn id_from_base_address() {
        assert_eq!(F1::id_from_addr(f1::ADC_3_BASE_ADDR), Some(AdcId::Adc3));
        assert_eq!(F4::id_from_addr(f2::ADC_2_BASE_ADDR), Some(AdcId::Adc2));
        assert_eq!(F4::id_from_addr(f2::ADC_COMMON_BASE_ADDR), None);
        assert_eq!(F1::id_from_addr(f2::ADC_1_BASE_ADDR), None);
    }

    #[test]
    fn conversion_time() {
        // 1.5 + 12.5 cycles
        assert_eq!(F1::conversion_half_cycles(f1::SampleTime::Cycles1_5), 28);
        // 3 + 12 cycles
        assert_eq!(F2::conversion_half_cycles(f2::SampleTime::Cycles3), 30);
    }

    #[test]
    fn overrun_only_on_f2_family() {
        assert!(!F1::CAPS.interrupts.contains(InterruptFlags::OVERRUN));
        assert!(F2::CAPS.interrupts.contains(InterruptFlags::OVERRUN));
        assert!(F4::CAPS.interrupts.contains(InterruptFlags::OVERRUN));
    }
}
