//! Timer PWM channels
//!
//! The regulator references are filtered PWM outputs. embassy sizes the
//! timer from a frequency, which cannot land on an exact count; the
//! firmware then pins the period with [`set_period`] so that `max_duty`
//! is [`b3603_hal::PWM_PERIOD_COUNTS`].

use b3603_hal::PwmChannel;
use embassy_stm32::pac::timer::TimGp16;
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use embassy_stm32::timer::GeneralInstance4Channel;

/// Fix a timer's period at exactly `counts` ticks
///
/// Call after `SimplePwm::new`: the prescaler it chose is kept and only the
/// auto-reload value is replaced, then an update event loads it.
pub fn set_period(timer: TimGp16, counts: u16) {
    timer.arr().write(|w| w.set_arr((counts - 1).into()));
    timer.egr().write(|w| w.set_ug(true));
}

/// One enabled timer channel
pub struct Stm32Pwm<'d, T: GeneralInstance4Channel> {
    channel: SimplePwmChannel<'d, T>,
}

impl<'d, T: GeneralInstance4Channel> Stm32Pwm<'d, T> {
    /// Wrap and enable a channel at 0% duty
    pub fn new(mut channel: SimplePwmChannel<'d, T>) -> Self {
        channel.set_duty_cycle(0);
        channel.enable();
        Self { channel }
    }
}

impl<T: GeneralInstance4Channel> PwmChannel for Stm32Pwm<'_, T> {
    fn set_duty(&mut self, duty: u16) {
        let duty = duty.min(self.channel.max_duty_cycle());
        self.channel.set_duty_cycle(duty);
    }

    fn duty(&self) -> u16 {
        self.channel.current_duty_cycle()
    }

    fn max_duty(&self) -> u16 {
        self.channel.max_duty_cycle()
    }
}
