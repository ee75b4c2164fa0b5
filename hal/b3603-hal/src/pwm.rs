//! PWM output abstraction
//!
//! The regulator's voltage and current references are RC-filtered PWM
//! outputs. Each one is a single timer channel.

/// Timer counts per PWM period; the PWM calibration pairs scale to this
pub const PWM_PERIOD_COUNTS: u16 = 8192;

/// A single PWM output channel
pub trait PwmChannel {
    /// Set the duty cycle in timer counts (0..=max_duty)
    fn set_duty(&mut self, duty: u16);

    /// Current duty cycle in timer counts
    fn duty(&self) -> u16;

    /// Timer count corresponding to 100% duty
    fn max_duty(&self) -> u16;

    /// Set duty to zero
    fn disable(&mut self) {
        self.set_duty(0);
    }
}
