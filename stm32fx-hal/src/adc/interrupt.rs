//! ADC interrupt support.
//!
//! A handler can be attached to each ADC with [Adc::attach_interrupt]. The application must call
//! [on_interrupt] from the interrupt handler of the ADC, which then calls the attached handler
//! with the flags which fired and clears them afterwards.
use core::cell::Cell;

use critical_section::Mutex;
use stm32fx::adc::{Control1, Status, bits, f2};

use super::{Adc, AdcId, Series, UnsupportedInterruptError};

bitflags::bitflags! {
    /// ADC interrupt flags.
    ///
    /// The values are the flag positions inside the status register. Not all series support
    /// all interrupts, see [super::Capabilities::interrupts].
    #[derive(Debug, Eq, PartialEq, Clone, Copy)]
    pub struct InterruptFlags: u32 {
        /// End of conversion of a regular channel.
        const CONVERSION = bits::SR_EOC;
        /// End of conversion of the injected group.
        const INJECTED_CONVERSION = bits::SR_JEOC;
        /// Analog watchdog.
        const WATCHDOG = bits::SR_AWD;
        /// Overrun. Only available on the F2/F4.
        const OVERRUN = f2::bits::SR_OVR;
    }
}

impl InterruptFlags {
    /// Interrupt enable bits inside control register 1.
    pub const fn enable_mask(&self) -> u32 {
        let mut mask = 0;
        if self.contains(Self::CONVERSION) {
            mask |= bits::CR1_EOCIE;
        }
        if self.contains(Self::INJECTED_CONVERSION) {
            mask |= bits::CR1_JEOCIE;
        }
        if self.contains(Self::WATCHDOG) {
            mask |= bits::CR1_AWDIE;
        }
        if self.contains(Self::OVERRUN) {
            mask |= f2::bits::CR1_OVRIE;
        }
        mask
    }
}

/// Flags of the status register which are cleared by writing 0. Reserved bits are excluded.
const fn status_flags(caps: &super::Capabilities) -> u32 {
    caps.interrupts.bits() | bits::SR_JSTRT | bits::SR_STRT
}

/// Passed to an attached interrupt handler.
#[derive(Debug, Clone, Copy)]
pub struct CallbackData {
    /// Flags which fired and which the handler was attached for.
    pub flags: InterruptFlags,
    /// User argument passed to [Adc::attach_interrupt].
    pub arg: usize,
}

pub type Handler = fn(&CallbackData);

#[derive(Debug, Clone, Copy)]
struct Registration {
    flags: InterruptFlags,
    handler: Handler,
    arg: usize,
}

/// Interrupt handler registrations, one slot per ADC.
pub struct HandlerTable {
    slots: [Mutex<Cell<Option<Registration>>>; 3],
}

impl HandlerTable {
    pub const fn new() -> Self {
        Self {
            slots: [const { Mutex::new(Cell::new(None)) }; 3],
        }
    }

    /// Register a handler, replacing a previous registration.
    pub fn attach(&self, id: AdcId, flags: InterruptFlags, handler: Handler, arg: usize) {
        critical_section::with(|cs| {
            self.slots[id as usize].borrow(cs).set(Some(Registration {
                flags,
                handler,
                arg,
            }));
        });
    }

    pub fn detach(&self, id: AdcId) {
        critical_section::with(|cs| self.slots[id as usize].borrow(cs).set(None));
    }

    /// Flags the handler of the given ADC was attached for. Empty if no handler is attached.
    pub fn registered_flags(&self, id: AdcId) -> InterruptFlags {
        critical_section::with(|cs| self.slots[id as usize].borrow(cs).get())
            .map(|registration| registration.flags)
            .unwrap_or(InterruptFlags::empty())
    }

    /// Call the attached handler if any of its flags is contained in `status`.
    ///
    /// Returns the flags passed to the handler. The handler is called outside of the critical
    /// section.
    pub fn dispatch(&self, id: AdcId, status: InterruptFlags) -> InterruptFlags {
        let registration =
            match critical_section::with(|cs| self.slots[id as usize].borrow(cs).get()) {
                Some(registration) => registration,
                None => return InterruptFlags::empty(),
            };
        let fired = status & registration.flags;
        if fired.is_empty() {
            return fired;
        }
        (registration.handler)(&CallbackData {
            flags: fired,
            arg: registration.arg,
        });
        fired
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::new()
    }
}

static HANDLERS: HandlerTable = HandlerTable::new();

/// Generic interrupt handler for the given ADC.
///
/// The user has to call this in the interrupt handler of the ADC. On the F1, ADC1 and ADC2 share
/// one interrupt, so this must be called for both. On the F2/F4, all ADCs share one interrupt.
pub fn on_interrupt<S: Series>(id: AdcId) {
    // Safety: Only the status register is accessed, and the flags are cleared with a write
    // which does not affect the other flags.
    let mut adc = unsafe { Adc::<S>::steal(id) };
    adc.handle_interrupt(&HANDLERS);
}

impl<S: Series> Adc<S> {
    /// Attach an interrupt handler and enable the given interrupts.
    ///
    /// `arg` is passed back to the handler inside [CallbackData]. The interrupt itself still
    /// needs to be unmasked in the NVIC by the application.
    pub fn attach_interrupt(&mut self, flags: InterruptFlags, handler: Handler, arg: usize) {
        self.attach_interrupt_to(&HANDLERS, flags, handler, arg);
    }

    /// Disable all interrupts of the ADC and remove the attached handler.
    pub fn detach_interrupt(&mut self) {
        self.detach_interrupt_from(&HANDLERS);
    }

    pub(crate) fn attach_interrupt_to(
        &mut self,
        table: &HandlerTable,
        flags: InterruptFlags,
        handler: Handler,
        arg: usize,
    ) {
        log::debug!("{:?}: attaching interrupt handler for {:?}", self.id, flags);
        table.attach(self.id, flags, handler, arg);
        self.enable_interrupts(flags);
    }

    pub(crate) fn detach_interrupt_from(&mut self, table: &HandlerTable) {
        log::debug!("{:?}: detaching interrupt handler", self.id);
        self.disable_interrupts(InterruptFlags::all());
        table.detach(self.id);
    }

    /// Enable interrupts. Flags which are not supported by the series are ignored.
    pub fn enable_interrupts(&mut self, flags: InterruptFlags) {
        let unsupported = flags.difference(S::CAPS.interrupts);
        if !unsupported.is_empty() {
            log::debug!(
                "{:?}: ignoring interrupts {:?} not supported on {}",
                self.id,
                unsupported,
                S::CAPS.name
            );
        }
        let mask = flags.intersection(S::CAPS.interrupts).enable_mask();
        self.regs
            .modify_cr1(|val| Control1::new_with_raw_value(val.raw_value() | mask));
    }

    /// Enable interrupts, rejecting flags which are not supported by the series.
    ///
    /// No interrupt is enabled if any flag is rejected.
    pub fn try_enable_interrupts(
        &mut self,
        flags: InterruptFlags,
    ) -> Result<(), UnsupportedInterruptError> {
        let unsupported = flags.difference(S::CAPS.interrupts);
        if !unsupported.is_empty() {
            return Err(UnsupportedInterruptError(unsupported));
        }
        self.enable_interrupts(flags);
        Ok(())
    }

    pub fn disable_interrupts(&mut self, flags: InterruptFlags) {
        let mask = flags.intersection(S::CAPS.interrupts).enable_mask();
        self.regs
            .modify_cr1(|val| Control1::new_with_raw_value(val.raw_value() & !mask));
    }

    /// Interrupts which are currently enabled.
    pub fn enabled_interrupts(&self) -> InterruptFlags {
        let cr1 = self.regs.read_cr1();
        let mut flags = InterruptFlags::empty();
        flags.set(InterruptFlags::CONVERSION, cr1.eocie());
        flags.set(InterruptFlags::INJECTED_CONVERSION, cr1.jeocie());
        flags.set(InterruptFlags::WATCHDOG, cr1.awdie());
        flags.set(InterruptFlags::OVERRUN, cr1.ovrie());
        flags.intersection(S::CAPS.interrupts)
    }

    /// Pending interrupt flags of the status register.
    #[inline]
    pub fn interrupt_status(&self) -> InterruptFlags {
        InterruptFlags::from_bits_truncate(self.regs.read_sr().raw_value())
    }

    /// Clear the given status flags. Other flags are not affected.
    #[inline]
    pub fn clear_interrupt_flags(&mut self, flags: InterruptFlags) {
        self.regs
            .write_sr(Status::new_with_raw_value(
                status_flags(&S::CAPS) & !flags.bits(),
            ));
    }

    pub(crate) fn handle_interrupt(&mut self, table: &HandlerTable) -> InterruptFlags {
        let fired = table.dispatch(self.id, self.interrupt_status());
        if !fired.is_empty() {
            self.clear_interrupt_flags(fired);
        }
        fired
    }
}
