//! # Peripheral access for the STM32F1/F2/F4 ADC
//!
//! This crate describes the memory-mapped register block of the analog-to-digital converter
//! found on the STM32F1, STM32F2 and STM32F4 series. The register layout is shared between
//! the series, with the exception of control register 2 and a few status and control bits
//! which only exist on the F2/F4 parts. Those are described in the [adc::f1] and [adc::f2]
//! modules.
//!
//! The register types are generated using [derive_mmio], which guarantees volatile access for
//! every register read and write, and [bitbybit] for the typed bitfield views. The raw bit
//! constants in [adc::bits] can be used to build custom register values.
#![no_std]

pub mod adc;
