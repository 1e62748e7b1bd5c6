//! Clock related collaborator interfaces and ADC clock helpers.
//!
//! The clock gate of each ADC and, on the F1, its prescaler live in the RCC block, which is
//! owned by the clock driver of the application.
use stm32fx::adc::{Prescaler, f2::MmioCommon};

use crate::time::Hertz;

/// Clock gate identifier of an ADC.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClockId {
    Adc1 = 0,
    Adc2 = 1,
    Adc3 = 2,
}

/// Enables and resets peripheral clocks.
pub trait ClockGate {
    fn enable_clock(&mut self, id: ClockId);
    /// Pulse the reset line of the peripheral.
    fn reset(&mut self, id: ClockId);
}

/// Configures the ADC clock prescaler.
///
/// Implemented for the F2/F4 common register block. On the F1, the prescaler is part of the
/// RCC and the clock driver provides the implementation. Any closure taking a [Prescaler] can be
/// used as well.
pub trait PrescalerControl {
    fn set_adc_prescaler(&mut self, prescaler: Prescaler);
}

impl PrescalerControl for MmioCommon<'static> {
    #[inline]
    fn set_adc_prescaler(&mut self, prescaler: Prescaler) {
        self.modify_ccr(|val| val.with_adcpre(prescaler));
    }
}

impl<F: FnMut(Prescaler)> PrescalerControl for F {
    #[inline]
    fn set_adc_prescaler(&mut self, prescaler: Prescaler) {
        self(prescaler)
    }
}

/// ADC clock resulting from the APB2 clock and the given prescaler.
#[inline]
pub const fn adc_clock(pclk2: Hertz, prescaler: Prescaler) -> Hertz {
    Hertz::from_raw(pclk2.raw() / prescaler.divisor())
}

/// Smallest prescaler which keeps the ADC clock at or below `max_adc_clock`.
///
/// Returns [None] if even the largest divisor yields a clock which is too fast.
pub fn prescaler_for_max_adc_clock(pclk2: Hertz, max_adc_clock: Hertz) -> Option<Prescaler> {
    [
        Prescaler::Div2,
        Prescaler::Div4,
        Prescaler::Div6,
        Prescaler::Div8,
    ]
    .into_iter()
    .find(|prescaler| adc_clock(pclk2, *prescaler) <= max_adc_clock)
}
