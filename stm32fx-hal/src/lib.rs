//! # HAL for the ADC of the STM32F1, STM32F2 and STM32F4 series
//!
//! This crate is a thin hardware abstraction on top of the [stm32fx] register description. It
//! provides the ADC device handle with its single-register accessors (enable, disable, start
//! conversion, poll, read data, sequence length), the configuration routines which only touch
//! the ADC block and the interrupt handler registration.
//!
//! Everything which needs other peripherals is expressed as a collaborator trait:
//!
//! - [clocks::ClockGate] for enabling and resetting the peripheral clock,
//! - [clocks::PrescalerControl] for the ADC clock prescaler,
//! - [gpio::AnalogPinConfig] for switching a pin to analog mode,
//! - [adc::AdcRegistry] for iterating over all ADC devices of the chip.
#![no_std]

#[cfg(test)]
extern crate std;

pub mod adc;
pub mod bitband;
pub mod clocks;
pub mod gpio;
pub mod time;

pub use stm32fx as pac;

pub(crate) mod sealed {
    pub trait Sealed {}
}
