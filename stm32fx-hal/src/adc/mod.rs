//! # ADC driver
//!
//! The [Adc] handle wraps the register block of one ADC unit. The series is selected with a
//! type parameter, for example `Adc<F1>` or `Adc<F4>`.
//!
//! The single-register accessors ([Adc::enable], [Adc::disable], [Adc::start_conversion],
//! [Adc::is_conversion_complete], [Adc::get_data] and [Adc::set_regular_sequence_length]) do not
//! validate their arguments. Checked variants return an error instead.
//!
//! ## Example
//!
//! ```ignore
//! let mut adc = Adc::<F4>::new(unsafe { stm32fx::adc::f2::new_mmio_fixed_1() }).unwrap();
//! adc.init(&mut rcc);
//! adc.set_sample_rate(SampleTime::Cycles84);
//! adc.enable_reg_swstart();
//! let value = adc.read(5)?;
//! ```
use core::{convert::Infallible, marker::PhantomData};

use stm32fx::adc::{
    Alignment, MmioAdc, Prescaler, RegularSequence1, RegularSequence2, RegularSequence3,
    SampleTime1, SampleTime2, bits, f2, offsets,
};

use crate::{
    bitband::AtomicBit,
    clocks::{ClockGate, ClockId, PrescalerControl},
    gpio::AnalogPinConfig,
    time::Hertz,
};

pub mod interrupt;
pub mod series;
#[cfg(test)]
pub(crate) mod sim;

pub use interrupt::{CallbackData, Handler, HandlerTable, InterruptFlags, on_interrupt};
pub use series::{Capabilities, ExtTrigger, F1, F2, F2Family, F4, Series};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdcId {
    Adc1 = 0,
    Adc2 = 1,
    Adc3 = 2,
}

impl AdcId {
    pub const fn clock_id(&self) -> ClockId {
        match self {
            AdcId::Adc1 => ClockId::Adc1,
            AdcId::Adc2 => ClockId::Adc2,
            AdcId::Adc3 => ClockId::Adc3,
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid regular sequence length {0}, must be between 1 and 16")]
pub struct SequenceLengthError(pub usize);

#[derive(Debug, thiserror::Error)]
#[error("invalid channel {channel}, highest channel is {max}")]
pub struct InvalidChannelError {
    pub channel: u8,
    pub max: u8,
}

#[derive(Debug, thiserror::Error)]
#[error("interrupts {0:?} not supported by this series")]
pub struct UnsupportedInterruptError(pub InterruptFlags);

#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    #[error("sequence length error: {0}")]
    Length(#[from] SequenceLengthError),
    #[error("channel error: {0}")]
    Channel(#[from] InvalidChannelError),
}

/// ADC configuration applied by [Adc::configure].
#[derive(Debug, Clone, Copy)]
pub struct Config<S: Series> {
    /// Sample rate of all channels.
    pub sample_rate: S::SampleRate,
    pub alignment: Alignment,
    pub scan: bool,
    pub continuous: bool,
    /// External trigger of the regular group. [None] selects the software start.
    pub trigger: Option<S::ExtSel>,
}

impl<S: Series> Default for Config<S> {
    fn default() -> Self {
        Self {
            sample_rate: S::DEFAULT_SAMPLE_RATE,
            alignment: Alignment::Right,
            scan: false,
            continuous: false,
            trigger: None,
        }
    }
}

/// Driver state which is not part of the register block.
pub(crate) struct DriverState {
    /// ADON bit of control register 2.
    adon: AtomicBit,
}

/// ADC device handle.
pub struct Adc<S: Series> {
    regs: MmioAdc<'static>,
    id: AdcId,
    clk_id: ClockId,
    pub(crate) private: DriverState,
    phantom: PhantomData<S>,
}

// Safety: The raw pointers inside the driver state point to the register block, which is owned
// by the handle.
unsafe impl<S: Series> Send for Adc<S> {}

impl<S: Series> Adc<S> {
    /// Create a new ADC handle. The ADC is determined from the base address of the register
    /// block.
    ///
    /// Returns [None] if the register block is not located at one of the ADC base addresses of
    /// the series.
    pub fn new(regs: MmioAdc<'static>) -> Option<Self> {
        let id = S::id_from_addr(unsafe { regs.ptr() } as usize)?;
        Some(Self::new_with_id(regs, id))
    }

    /// Create a new ADC handle for a register block at an arbitrary address.
    pub fn new_with_id(regs: MmioAdc<'static>, id: AdcId) -> Self {
        let cr2 = (unsafe { regs.ptr() } as usize + offsets::CR2) as *mut u32;
        Self {
            regs,
            id,
            clk_id: id.clock_id(),
            private: DriverState {
                // Safety: The register block address is valid as long as the MMIO handle is.
                adon: unsafe { AtomicBit::new(cr2, bits::CR2_ADON_BIT as u8) },
            },
            phantom: PhantomData,
        }
    }

    /// Create a new handle for the ADC at its fixed base address.
    ///
    /// # Safety
    ///
    /// This API can be used to potentially create a driver to the same peripheral structure
    /// from multiple threads. The user must ensure that concurrent accesses are safe and do not
    /// interfere with each other.
    pub unsafe fn steal(id: AdcId) -> Self {
        let regs = unsafe { stm32fx::adc::Adc::new_mmio_at(S::CAPS.base_addrs[id as usize]) };
        Self::new_with_id(regs, id)
    }

    #[inline]
    pub fn id(&self) -> AdcId {
        self.id
    }

    #[inline]
    pub fn clock_id(&self) -> ClockId {
        self.clk_id
    }

    /// Direct register access.
    #[inline]
    pub fn regs(&mut self) -> &mut MmioAdc<'static> {
        &mut self.regs
    }

    /// Enable the clock gate of the ADC and reset it.
    pub fn init(&mut self, clock_gate: &mut impl ClockGate) {
        log::debug!("{:?}: enabling clock and resetting", self.id);
        clock_gate.enable_clock(self.clk_id);
        clock_gate.reset(self.clk_id);
    }

    /// Set the ADON bit. Atomic with respect to other bits of control register 2.
    #[inline]
    pub fn enable(&mut self) {
        self.private.adon.set();
    }

    /// Clear the ADON bit. Atomic with respect to other bits of control register 2.
    #[inline]
    pub fn disable(&mut self) {
        self.private.adon.clear();
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.regs.read_cr2().adon()
    }

    /// Start a conversion of the regular group by setting the software start bit.
    #[inline]
    pub fn start_conversion(&mut self) {
        self.regs.modify_cr2(S::with_swstart);
    }

    /// Whether the end of conversion flag of the regular group is set.
    #[inline]
    pub fn is_conversion_complete(&self) -> bool {
        self.regs.read_sr().eoc()
    }

    /// Raw value of the regular data register. Reading it clears the end of conversion flag.
    #[inline]
    pub fn get_data(&mut self) -> u32 {
        self.regs.read_dr().raw_value()
    }

    /// Set the length of the regular sequence.
    ///
    /// The length is not checked. Values outside of 1 to 16 overwrite bits next to the length
    /// field. Use [Self::try_set_regular_sequence_length] for a checked version.
    #[inline]
    pub fn set_regular_sequence_length(&mut self, length: u8) {
        self.regs.modify_sqr1(|val| {
            RegularSequence1::new_with_raw_value(
                (val.raw_value() & !bits::SQR1_L)
                    | (u32::from(length).wrapping_sub(1) << bits::SQR1_L_SHIFT),
            )
        });
    }

    pub fn try_set_regular_sequence_length(
        &mut self,
        length: usize,
    ) -> Result<(), SequenceLengthError> {
        if length == 0 || length > bits::MAX_REGULAR_SEQUENCE_LEN {
            return Err(SequenceLengthError(length));
        }
        self.set_regular_sequence_length(length as u8);
        Ok(())
    }

    /// Select the external event which triggers conversions of the regular group.
    pub fn set_extsel(&mut self, event: S::ExtSel) {
        self.regs.modify_cr2(|val| S::with_extsel(val, event));
    }

    /// Make the regular group triggerable by software and enable the ADC.
    pub fn enable_reg_swstart(&mut self) {
        self.regs.modify_cr2(S::with_software_trigger);
        self.enable();
    }

    fn check_channel(channel: u8) -> Result<(), InvalidChannelError> {
        if channel > S::CAPS.max_channel {
            return Err(InvalidChannelError {
                channel,
                max: S::CAPS.max_channel,
            });
        }
        Ok(())
    }

    /// Set the sample rate of all channels.
    pub fn set_sample_rate(&mut self, rate: S::SampleRate) {
        let code = u32::from(S::sample_rate_code(rate).value());
        let fill = |fields: u8| {
            (0..u32::from(fields)).fold(0, |acc, idx| acc | (code << (idx * bits::SMP_FIELD_WIDTH)))
        };
        self.regs
            .write_smpr2(SampleTime2::new_with_raw_value(fill(bits::SMPR2_CHANNELS)));
        self.regs.write_smpr1(SampleTime1::new_with_raw_value(fill(
            S::CAPS.max_channel + 1 - bits::SMPR2_CHANNELS,
        )));
    }

    /// Set the sample rate of a single channel.
    pub fn set_channel_sample_rate(
        &mut self,
        channel: u8,
        rate: S::SampleRate,
    ) -> Result<(), InvalidChannelError> {
        Self::check_channel(channel)?;
        let code = u32::from(S::sample_rate_code(rate).value());
        let replace = |raw: u32, field: u8| {
            let shift = u32::from(field) * bits::SMP_FIELD_WIDTH;
            (raw & !(bits::SMP_FIELD_MASK << shift)) | (code << shift)
        };
        if channel < bits::SMPR2_CHANNELS {
            self.regs.modify_smpr2(|val| {
                SampleTime2::new_with_raw_value(replace(val.raw_value(), channel))
            });
        } else {
            self.regs.modify_smpr1(|val| {
                SampleTime1::new_with_raw_value(replace(
                    val.raw_value(),
                    channel - bits::SMPR2_CHANNELS,
                ))
            });
        }
        Ok(())
    }

    /// Configure the pin of a channel for analog input.
    ///
    /// The pin configuration does not depend on the ADC, the call is forwarded to the GPIO
    /// driver.
    #[inline]
    pub fn config_gpio(&self, gpio: &mut impl AnalogPinConfig, pin: u8) {
        gpio.configure_pin_for_conversion(pin);
    }

    #[inline]
    pub fn enable_scan(&mut self) {
        self.regs.modify_cr1(|val| val.with_scan(true));
    }

    #[inline]
    pub fn disable_scan(&mut self) {
        self.regs.modify_cr1(|val| val.with_scan(false));
    }

    #[inline]
    pub fn enable_continuous(&mut self) {
        self.regs.modify_cr2(|val| val.with_cont(true));
    }

    #[inline]
    pub fn disable_continuous(&mut self) {
        self.regs.modify_cr2(|val| val.with_cont(false));
    }

    #[inline]
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.regs.modify_cr2(|val| val.with_align(alignment));
    }

    /// Set the channels of the regular sequence and the sequence length.
    ///
    /// Sequence slots after the last channel are cleared.
    pub fn set_reg_seq(&mut self, channels: &[u8]) -> Result<(), SequenceError> {
        if channels.is_empty() || channels.len() > bits::MAX_REGULAR_SEQUENCE_LEN {
            return Err(SequenceLengthError(channels.len()).into());
        }
        let mut sqr = [0u32; 3];
        for (slot, &channel) in channels.iter().enumerate() {
            Self::check_channel(channel)?;
            let (reg, field) = match slot {
                0..bits::SQR3_SLOTS => (0, slot),
                _ if slot < bits::SQR3_SLOTS + bits::SQR2_SLOTS => (1, slot - bits::SQR3_SLOTS),
                _ => (2, slot - bits::SQR3_SLOTS - bits::SQR2_SLOTS),
            };
            sqr[reg] |= (u32::from(channel) & bits::SQ_FIELD_MASK)
                << (field as u32 * bits::SQ_FIELD_WIDTH);
        }
        sqr[2] |= (channels.len() as u32 - 1) << bits::SQR1_L_SHIFT;
        self.regs
            .write_sqr3(RegularSequence3::new_with_raw_value(sqr[0]));
        self.regs
            .write_sqr2(RegularSequence2::new_with_raw_value(sqr[1]));
        self.regs
            .write_sqr1(RegularSequence1::new_with_raw_value(sqr[2]));
        Ok(())
    }

    /// Read the result of the last regular conversion if it is complete.
    pub fn read_nb(&mut self) -> nb::Result<u16, Infallible> {
        if !self.is_conversion_complete() {
            return Err(nb::Error::WouldBlock);
        }
        Ok((self.get_data() & bits::DR_DATA) as u16)
    }

    /// Convert a single channel and wait for the result.
    ///
    /// The regular sequence is replaced by the given channel. The ADC must be enabled and
    /// triggerable by software, see [Self::enable_reg_swstart].
    pub fn read(&mut self, channel: u8) -> Result<u16, InvalidChannelError> {
        Self::check_channel(channel)?;
        self.set_regular_sequence_length(1);
        self.regs
            .write_sqr3(RegularSequence3::new_with_raw_value(u32::from(channel)));
        self.start_conversion();
        let Ok(value) = nb::block!(self.read_nb());
        Ok(value)
    }

    /// Apply a complete configuration. The ADC is not enabled.
    pub fn configure(&mut self, config: &Config<S>) {
        log::debug!("{:?}: applying {:?}", self.id, config);
        self.set_sample_rate(config.sample_rate);
        self.set_alignment(config.alignment);
        self.regs.modify_cr1(|val| val.with_scan(config.scan));
        self.regs.modify_cr2(|val| {
            let val = val.with_cont(config.continuous);
            match config.trigger {
                Some(event) => S::with_external_trigger(val, event),
                None => S::with_software_trigger(val),
            }
        });
    }

    /// Regular conversions per second for the given ADC clock and sample rate.
    pub fn conversion_rate(adc_clock: Hertz, rate: S::SampleRate) -> Hertz {
        let half_cycles = u64::from(S::conversion_half_cycles(rate));
        Hertz::from_raw((u64::from(adc_clock.raw()) * 2 / half_cycles) as u32)
    }
}

impl<S: F2Family> Adc<S> {
    /// Set the edge of the external trigger of the regular group.
    pub fn set_trigger_edge(&mut self, edge: f2::TriggerEdge) {
        self.regs
            .modify_cr2(|val| f2::Control2::from(val).with_exten(edge).into());
    }

    pub fn set_resolution(&mut self, resolution: f2::Resolution) {
        self.regs
            .modify_cr1(|val| val.with_res(resolution.raw_value()));
    }

    pub fn resolution(&self) -> f2::Resolution {
        f2::Resolution::new_with_raw_value(self.regs.read_cr1().res())
    }
}

/// Set the ADC clock prescaler.
///
/// On the F2/F4 pass the common register block, on the F1 the RCC driver.
pub fn set_prescaler(control: &mut impl PrescalerControl, prescaler: Prescaler) {
    log::debug!("setting ADC prescaler {:?}", prescaler);
    control.set_adc_prescaler(prescaler);
}

/// Iterates over all ADC devices of the chip.
pub trait AdcRegistry<S: Series> {
    fn for_each(&mut self, f: &mut dyn FnMut(&mut Adc<S>));
}

impl<S: Series> AdcRegistry<S> for [Adc<S>] {
    fn for_each(&mut self, f: &mut dyn FnMut(&mut Adc<S>)) {
        self.iter_mut().for_each(f);
    }
}

impl<S: Series, const N: usize> AdcRegistry<S> for [Adc<S>; N] {
    fn for_each(&mut self, f: &mut dyn FnMut(&mut Adc<S>)) {
        self.iter_mut().for_each(f);
    }
}

impl<S: Series> AdcRegistry<S> for [&mut Adc<S>] {
    fn for_each(&mut self, f: &mut dyn FnMut(&mut Adc<S>)) {
        self.iter_mut().for_each(|adc| f(adc));
    }
}

/// Disable all ADCs of the registry.
pub fn disable_all<S: Series, R: AdcRegistry<S> + ?Sized>(registry: &mut R) {
    registry.for_each(&mut |adc| adc.disable());
}

#[cfg(test)]
mod tests {
    use std::vec::Vec;

    use super::*;
    use sim::SimulatedBlock;
    use stm32fx::adc::f1;

    #[test]
    fn sequence_length_writes_only_length_field() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F1>(AdcId::Adc1);
        let other = bits::SQR1_SQ13 | bits::SQR1_SQ16 | 0xFF00_0000;
        for length in 1..=16u8 {
            sim.write(offsets::SQR1, other);
            adc.set_regular_sequence_length(length);
            let sqr1 = sim.read(offsets::SQR1);
            assert_eq!((sqr1 & bits::SQR1_L) >> bits::SQR1_L_SHIFT, u32::from(length) - 1);
            assert_eq!(sqr1 & !bits::SQR1_L, other);
        }
    }

    #[test]
    fn unchecked_sequence_length_zero_does_not_panic() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F4>(AdcId::Adc1);
        adc.set_regular_sequence_length(0);
        assert_eq!(sim.read(offsets::SQR1) & bits::SQR1_L, bits::SQR1_L);
    }

    #[test]
    fn checked_sequence_length() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F4>(AdcId::Adc1);
        assert_eq!(adc.try_set_regular_sequence_length(0).unwrap_err().0, 0);
        assert_eq!(adc.try_set_regular_sequence_length(17).unwrap_err().0, 17);
        assert_eq!(sim.read(offsets::SQR1), 0);
        adc.try_set_regular_sequence_length(16).unwrap();
        assert_eq!(sim.read(offsets::SQR1), bits::SQR1_L);
    }

    #[test]
    fn enable_disable_keeps_other_bits() {
        let sim = SimulatedBlock::new();
        let cr2 = f1::bits::CR2_EXTSEL | bits::CR2_CONT | bits::CR2_ALIGN;
        sim.write(offsets::CR2, cr2);
        let mut adc = sim.adc::<F1>(AdcId::Adc2);
        assert!(!adc.is_enabled());
        adc.enable();
        assert!(adc.is_enabled());
        assert_eq!(sim.read(offsets::CR2), cr2 | bits::CR2_ADON);
        adc.disable();
        assert!(!adc.is_enabled());
        assert_eq!(sim.read(offsets::CR2), cr2);
    }

    #[test]
    fn start_conversion_sets_only_swstart() {
        let sim = SimulatedBlock::new();
        sim.write(offsets::CR2, bits::CR2_ADON);
        let mut f1_adc = sim.adc::<F1>(AdcId::Adc1);
        f1_adc.start_conversion();
        assert_eq!(
            sim.read(offsets::CR2),
            bits::CR2_ADON | f1::bits::CR2_SWSTART
        );

        let sim = SimulatedBlock::new();
        sim.write(offsets::CR2, bits::CR2_ADON);
        let mut f4_adc = sim.adc::<F4>(AdcId::Adc1);
        f4_adc.start_conversion();
        assert_eq!(
            sim.read(offsets::CR2),
            bits::CR2_ADON | f2::bits::CR2_SWSTART
        );
    }

    #[test]
    fn conversion_complete_follows_eoc() {
        let sim = SimulatedBlock::new();
        let adc = sim.adc::<F4>(AdcId::Adc1);
        sim.write(offsets::SR, bits::SR_STRT | bits::SR_JEOC);
        assert!(!adc.is_conversion_complete());
        sim.write(offsets::SR, bits::SR_STRT | bits::SR_EOC);
        assert!(adc.is_conversion_complete());
    }

    #[test]
    fn get_data_is_unmasked() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F1>(AdcId::Adc1);
        sim.write(offsets::DR, 0x0123_0ABC);
        assert_eq!(adc.get_data(), 0x0123_0ABC);
    }

    #[test]
    fn read_nb_masks_data() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F1>(AdcId::Adc1);
        sim.write(offsets::DR, 0x0123_0ABC);
        assert!(matches!(adc.read_nb(), Err(nb::Error::WouldBlock)));
        sim.write(offsets::SR, bits::SR_EOC);
        assert_eq!(adc.read_nb().unwrap(), 0x0ABC);
    }

    #[test]
    fn blocking_read() {
        let sim = SimulatedBlock::new();
        sim.write(offsets::SQR1, bits::SQR1_L);
        sim.write(offsets::SR, bits::SR_EOC);
        sim.write(offsets::DR, 0x0000_0321);
        let mut adc = sim.adc::<F4>(AdcId::Adc1);
        assert_eq!(adc.read(18).unwrap(), 0x321);
        assert_eq!(sim.read(offsets::SQR3), 18);
        assert_eq!(sim.read(offsets::SQR1), 0);
        assert_eq!(sim.read(offsets::CR2), f2::bits::CR2_SWSTART);

        let err = adc.read(19).unwrap_err();
        assert_eq!(err.channel, 19);
        assert_eq!(err.max, 18);
        let mut f1_adc = sim.adc::<F1>(AdcId::Adc1);
        assert!(f1_adc.read(18).is_err());
    }

    #[test]
    fn regular_sequence_fields() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F4>(AdcId::Adc1);
        let channels: Vec<u8> = (1..=14).collect();
        adc.set_reg_seq(&channels).unwrap();
        let sqr3 = RegularSequence3::new_with_raw_value(sim.read(offsets::SQR3));
        assert_eq!(sqr3.sq1().value(), 1);
        assert_eq!(sqr3.sq4().value(), 4);
        assert_eq!(sqr3.sq6().value(), 6);
        let sqr2 = RegularSequence2::new_with_raw_value(sim.read(offsets::SQR2));
        assert_eq!(sqr2.sq7().value(), 7);
        assert_eq!(sqr2.sq10().value(), 10);
        assert_eq!(sqr2.sq12().value(), 12);
        let sqr1 = RegularSequence1::new_with_raw_value(sim.read(offsets::SQR1));
        assert_eq!(sqr1.sq13().value(), 13);
        assert_eq!(sqr1.sq14().value(), 14);
        assert_eq!(sqr1.sq15().value(), 0);
        assert_eq!(sqr1.l().value(), 13);

        adc.set_reg_seq(&[17, 3]).unwrap();
        assert_eq!(sim.read(offsets::SQR3), 17 | (3 << 5));
        assert_eq!(sim.read(offsets::SQR2), 0);
        assert_eq!(sim.read(offsets::SQR1), 1 << bits::SQR1_L_SHIFT);
    }

    #[test]
    fn invalid_regular_sequences() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F1>(AdcId::Adc1);
        assert!(matches!(
            adc.set_reg_seq(&[]),
            Err(SequenceError::Length(SequenceLengthError(0)))
        ));
        assert!(matches!(
            adc.set_reg_seq(&[0; 17]),
            Err(SequenceError::Length(SequenceLengthError(17)))
        ));
        assert!(matches!(
            adc.set_reg_seq(&[1, 18]),
            Err(SequenceError::Channel(InvalidChannelError { channel: 18, .. }))
        ));
        assert_eq!(sim.read(offsets::SQR1), 0);
        assert_eq!(sim.read(offsets::SQR3), 0);
    }

    #[test]
    fn sample_rate_for_all_channels() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F1>(AdcId::Adc1);
        adc.set_sample_rate(f1::SampleTime::Cycles239_5);
        assert_eq!(sim.read(offsets::SMPR2), 0x3FFF_FFFF);
        // Channels 10 to 17.
        assert_eq!(sim.read(offsets::SMPR1), 0x00FF_FFFF);

        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F4>(AdcId::Adc1);
        adc.set_sample_rate(f2::SampleTime::Cycles15);
        assert_eq!(sim.read(offsets::SMPR2), 0x0924_9249);
        // Channels 10 to 18.
        assert_eq!(sim.read(offsets::SMPR1), 0x0124_9249);
    }

    #[test]
    fn sample_rate_for_one_channel() {
        let sim = SimulatedBlock::new();
        sim.write(offsets::SMPR1, 0x00FF_FFFF);
        let mut adc = sim.adc::<F1>(AdcId::Adc1);
        adc.set_channel_sample_rate(3, f1::SampleTime::Cycles28_5)
            .unwrap();
        assert_eq!(sim.read(offsets::SMPR2), 0b011 << 9);
        adc.set_channel_sample_rate(17, f1::SampleTime::Cycles1_5)
            .unwrap();
        assert_eq!(sim.read(offsets::SMPR1), 0x00FF_FFFF & !bits::SMPR1_SMP17);
        assert!(
            adc.set_channel_sample_rate(18, f1::SampleTime::Cycles1_5)
                .is_err()
        );
    }

    #[test]
    fn scan_continuous_and_alignment() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F4>(AdcId::Adc1);
        adc.enable_scan();
        adc.enable_continuous();
        adc.set_alignment(Alignment::Left);
        assert_eq!(sim.read(offsets::CR1), bits::CR1_SCAN);
        assert_eq!(sim.read(offsets::CR2), bits::CR2_CONT | bits::CR2_ALIGN);
        adc.disable_scan();
        adc.disable_continuous();
        assert_eq!(sim.read(offsets::CR1), 0);
        assert_eq!(sim.read(offsets::CR2), bits::CR2_ALIGN);
    }

    #[test]
    fn enable_reg_swstart_per_series() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F1>(AdcId::Adc3);
        adc.enable_reg_swstart();
        assert_eq!(
            sim.read(offsets::CR2),
            bits::CR2_ADON | f1::bits::CR2_EXTSEL | f1::bits::CR2_EXTTRIG
        );

        let sim = SimulatedBlock::new();
        sim.write(offsets::CR2, f2::bits::CR2_EXTEN);
        let mut adc = sim.adc::<F2>(AdcId::Adc1);
        adc.enable_reg_swstart();
        assert_eq!(sim.read(offsets::CR2), bits::CR2_ADON);
    }

    #[test]
    fn extsel_and_trigger_edge() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F4>(AdcId::Adc1);
        adc.set_extsel(f2::ExtSel::Tim3Trgo);
        adc.set_trigger_edge(f2::TriggerEdge::Falling);
        assert_eq!(
            sim.read(offsets::CR2),
            (0b1000 << f2::bits::CR2_EXTSEL_SHIFT) | (0b10 << f2::bits::CR2_EXTEN_SHIFT)
        );

        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F1>(AdcId::Adc1);
        adc.set_extsel(f1::ExtSelAdc12::Tim3Trgo.into());
        assert_eq!(sim.read(offsets::CR2), 0b100 << f1::bits::CR2_EXTSEL_SHIFT);
    }

    #[test]
    fn resolution() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F4>(AdcId::Adc1);
        adc.set_resolution(f2::Resolution::Bits8);
        assert_eq!(sim.read(offsets::CR1), 0b10 << f2::bits::CR1_RES_SHIFT);
        assert_eq!(adc.resolution(), f2::Resolution::Bits8);
    }

    #[test]
    fn config_debug_output() {
        let config = Config::<F4>::default();
        let text = std::format!("{:?}", config);
        assert!(text.contains("Cycles56"));
        assert!(text.contains("trigger: None"));
    }

    #[test]
    fn configure_applies_all_fields() {
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F1>(AdcId::Adc1);
        let config = Config::<F1> {
            sample_rate: f1::SampleTime::Cycles7_5,
            alignment: Alignment::Left,
            scan: true,
            continuous: true,
            trigger: Some(f1::ExtSelAdc12::Tim1Cc2.into()),
        };
        adc.configure(&config);
        assert_eq!(sim.read(offsets::CR1), bits::CR1_SCAN);
        assert_eq!(
            sim.read(offsets::CR2),
            bits::CR2_CONT
                | bits::CR2_ALIGN
                | (0b001 << f1::bits::CR2_EXTSEL_SHIFT)
                | f1::bits::CR2_EXTTRIG
        );
        assert_eq!(sim.read(offsets::SMPR2), 0x0924_9249);
        assert!(!adc.is_enabled());

        adc.configure(&Config::default());
        assert_eq!(
            sim.read(offsets::CR2),
            f1::bits::CR2_EXTSEL | f1::bits::CR2_EXTTRIG
        );
        assert_eq!(sim.read(offsets::SMPR2) & bits::SMPR2_SMP0, 0b101);
    }

    #[test]
    fn disable_all_disables_every_device() {
        let sims = [
            SimulatedBlock::new(),
            SimulatedBlock::new(),
            SimulatedBlock::new(),
        ];
        for sim in &sims {
            sim.write(offsets::CR2, bits::CR2_ADON | bits::CR2_CONT);
        }
        let mut adcs = [
            sims[0].adc::<F4>(AdcId::Adc1),
            sims[1].adc::<F4>(AdcId::Adc2),
            sims[2].adc::<F4>(AdcId::Adc3),
        ];
        disable_all(&mut adcs);
        for sim in &sims {
            assert_eq!(sim.read(offsets::CR2), bits::CR2_CONT);
        }

        let untouched = SimulatedBlock::new();
        untouched.write(offsets::CR2, bits::CR2_ADON);
        let mut first = sims[0].adc::<F4>(AdcId::Adc1);
        first.enable();
        let mut refs = [&mut first];
        disable_all(&mut refs[..]);
        assert_eq!(sims[0].read(offsets::CR2), bits::CR2_CONT);
        assert_eq!(untouched.read(offsets::CR2), bits::CR2_ADON);
    }

    #[test]
    fn init_uses_clock_gate() {
        struct Recorder(Vec<(ClockId, bool)>);
        impl ClockGate for Recorder {
            fn enable_clock(&mut self, id: ClockId) {
                self.0.push((id, true));
            }
            fn reset(&mut self, id: ClockId) {
                self.0.push((id, false));
            }
        }
        let sim = SimulatedBlock::new();
        let mut adc = sim.adc::<F1>(AdcId::Adc2);
        let mut gate = Recorder(Vec::new());
        adc.init(&mut gate);
        assert_eq!(gate.0, [(ClockId::Adc2, true), (ClockId::Adc2, false)]);
    }

    #[test]
    fn config_gpio_forwards_pin() {
        let sim = SimulatedBlock::new();
        let adc = sim.adc::<F4>(AdcId::Adc1);
        let mut pins = Vec::new();
        adc.config_gpio(&mut |pin: u8| pins.push(pin), 7);
        assert_eq!(pins, [7]);
    }

    #[test]
    fn prescaler_through_control() {
        let mut selected = None;
        set_prescaler(&mut |prescaler: Prescaler| selected = Some(prescaler), Prescaler::Div6);
        assert_eq!(selected, Some(Prescaler::Div6));
    }

    #[test]
    fn conversion_rates() {
        // 14 MHz / (1.5 + 12.5) cycles
        assert_eq!(
            Adc::<F1>::conversion_rate(Hertz::from_raw(14_000_000), f1::SampleTime::Cycles1_5),
            Hertz::from_raw(1_000_000)
        );
        // 36 MHz / (3 + 12) cycles
        assert_eq!(
            Adc::<F4>::conversion_rate(Hertz::from_raw(36_000_000), f2::SampleTime::Cycles3),
            Hertz::from_raw(2_400_000)
        );
    }

    #[test]
    fn handle_from_base_address() {
        let regs = unsafe { f1::new_mmio_fixed_2() };
        let adc = Adc::<F1>::new(regs).unwrap();
        assert_eq!(adc.id(), AdcId::Adc2);
        assert_eq!(adc.clock_id(), ClockId::Adc2);
        let regs = unsafe { f1::new_mmio_fixed_1() };
        assert!(Adc::<F4>::new(regs).is_none());
    }
}
