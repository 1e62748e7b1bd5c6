//! GPIO collaborator interface.
//!
//! The ADC does not own the GPIO block. Switching a pin to analog input mode is done by the
//! GPIO driver of the application, which is plugged in through [AnalogPinConfig].

/// Configures a GPIO pin for use as an analog conversion input.
pub trait AnalogPinConfig {
    /// Switch the pin with the given index inside the port to analog input mode.
    fn configure_pin_for_conversion(&mut self, pin: u8);
}

impl<F: FnMut(u8)> AnalogPinConfig for F {
    #[inline]
    fn configure_pin_for_conversion(&mut self, pin: u8) {
        self(pin)
    }
}
