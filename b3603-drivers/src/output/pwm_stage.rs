//! PWM output stage
//!
//! The buck regulator takes its voltage and current references from two
//! RC-filtered PWM channels. The stage is switched by an active-low enable
//! line, and a tri-state line drives the CC/CV indicator LEDs:
//!
//! | output | mode | indicator |
//! |--------|------|-----------|
//! | off    | any  | floating  |
//! | on     | CC   | high      |
//! | on     | CV   | low       |

use b3603_core::config::{CalibrationPair, CalibrationSlot, OutputConfig, SystemConfig};
use b3603_core::traits::OutputActuator;
use b3603_hal::{OutputPin, PwmChannel, TriStatePin};

/// Duty for a setpoint, clamped to the channel's range
fn duty_for(pair: &CalibrationPair, setpoint: u16, max_duty: u16) -> u16 {
    pair.apply(setpoint).min(max_duty)
}

/// Regulator driven by two PWM references
pub struct PwmOutputStage<V, I, E, L> {
    voltage: V,
    current: I,
    enable: E,
    indicator: L,
}

impl<V, I, E, L> PwmOutputStage<V, I, E, L>
where
    V: PwmChannel,
    I: PwmChannel,
    E: OutputPin,
    L: TriStatePin,
{
    /// Create the stage with the output disabled
    pub fn new(voltage: V, current: I, enable: E, indicator: L) -> Self {
        let mut stage = Self {
            voltage,
            current,
            enable,
            indicator,
        };
        stage.enable.set_high();
        stage.voltage.disable();
        stage.current.disable();
        stage.indicator.set_floating();
        stage
    }

    /// Whether the regulator is enabled
    pub fn is_enabled(&self) -> bool {
        self.enable.is_set_low()
    }

    /// Voltage reference duty
    pub fn voltage_duty(&self) -> u16 {
        self.voltage.duty()
    }

    /// Current reference duty
    pub fn current_duty(&self) -> u16 {
        self.current.duty()
    }
}

impl<V, I, E, L> OutputActuator for PwmOutputStage<V, I, E, L>
where
    V: PwmChannel,
    I: PwmChannel,
    E: OutputPin,
    L: TriStatePin,
{
    fn commit(&mut self, output: &OutputConfig, system: &SystemConfig, constant_current: bool) {
        let vduty = duty_for(
            system.calibration(CalibrationSlot::VoutPwm),
            output.vset,
            self.voltage.max_duty(),
        );
        let cduty = duty_for(
            system.calibration(CalibrationSlot::CoutPwm),
            output.cset,
            self.current.max_duty(),
        );

        self.voltage.set_duty(vduty);
        self.current.set_duty(cduty);
        self.enable.set_state(!system.output);

        info!(
            "output {}: vduty={} cduty={}",
            if system.output { "on" } else { "off" },
            vduty,
            cduty
        );

        self.check_state(system, constant_current);
    }

    fn check_state(&mut self, system: &SystemConfig, constant_current: bool) {
        if system.output {
            self.indicator.set_state(constant_current);
        } else {
            self.indicator.set_floating();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use b3603_core::config::{fixed_milli, LIMITS};
    use b3603_hal::PWM_PERIOD_COUNTS;

    struct MockPwm {
        duty: u16,
        max: u16,
    }

    impl PwmChannel for MockPwm {
        fn set_duty(&mut self, duty: u16) {
            self.duty = duty;
        }

        fn duty(&self) -> u16 {
            self.duty
        }

        fn max_duty(&self) -> u16 {
            self.max
        }
    }

    struct MockPin {
        high: bool,
        floating: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                floating: false,
            }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
            self.floating = false;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.floating = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    impl TriStatePin for MockPin {
        fn set_floating(&mut self) {
            self.floating = true;
        }

        fn is_floating(&self) -> bool {
            self.floating
        }
    }

    type Stage = PwmOutputStage<MockPwm, MockPwm, MockPin, MockPin>;

    fn stage() -> Stage {
        PwmOutputStage::new(
            MockPwm {
                duty: 77,
                max: PWM_PERIOD_COUNTS,
            },
            MockPwm {
                duty: 77,
                max: PWM_PERIOD_COUNTS,
            },
            MockPin::new(),
            MockPin::new(),
        )
    }

    #[test]
    fn test_starts_disabled() {
        let stage = stage();
        assert!(!stage.is_enabled());
        assert_eq!(stage.voltage_duty(), 0);
        assert_eq!(stage.current_duty(), 0);
        assert!(stage.indicator.is_floating());
    }

    #[test]
    fn test_commit_sets_duties_and_enable() {
        let mut stage = stage();
        let mut system = SystemConfig::factory();
        system.output = true;
        system.calibration_mut(CalibrationSlot::VoutPwm).a = fixed_milli(200);
        system.calibration_mut(CalibrationSlot::CoutPwm).a = fixed_milli(2_000);

        let output = OutputConfig {
            vset: 12_000,
            cset: 1_000,
            ..OutputConfig::factory()
        };
        stage.commit(&output, &system, false);

        assert!(stage.is_enabled());
        assert_eq!(stage.voltage_duty(), 2_400);
        assert_eq!(stage.current_duty(), 2_000);
        assert!(!stage.indicator.is_floating());
        assert!(stage.indicator.is_set_low());
    }

    #[test]
    fn test_duty_clamped_to_max() {
        let mut stage = stage();
        let mut system = SystemConfig::factory();
        system.calibration_mut(CalibrationSlot::VoutPwm).a = fixed_milli(1_000);

        let output = OutputConfig {
            vset: 35_000,
            ..OutputConfig::factory()
        };
        stage.commit(&output, &system, false);
        assert_eq!(stage.voltage_duty(), PWM_PERIOD_COUNTS);
    }

    #[test]
    fn test_factory_calibration_spans_period() {
        let mut stage = stage();
        let system = SystemConfig::factory();

        let full_scale = OutputConfig {
            vset: LIMITS.vmax,
            cset: LIMITS.cmax,
            ..OutputConfig::factory()
        };
        stage.commit(&full_scale, &system, false);

        // Full scale lands near the top of the period without clipping
        assert!(stage.voltage_duty() < PWM_PERIOD_COUNTS);
        assert!(stage.current_duty() < PWM_PERIOD_COUNTS);
        assert!(stage.voltage_duty() > PWM_PERIOD_COUNTS * 3 / 4);
        assert!(stage.current_duty() > PWM_PERIOD_COUNTS * 3 / 4);
    }

    #[test]
    fn test_output_off_floats_indicator() {
        let mut stage = stage();
        let mut system = SystemConfig::factory();
        system.output = true;
        stage.commit(&OutputConfig::factory(), &system, true);
        assert!(stage.indicator.is_set_high());

        system.output = false;
        stage.commit(&OutputConfig::factory(), &system, true);
        assert!(!stage.is_enabled());
        assert!(stage.indicator.is_floating());
    }

    #[test]
    fn test_check_state_follows_mode() {
        let mut stage = stage();
        let mut system = SystemConfig::factory();
        system.output = true;

        stage.check_state(&system, true);
        assert!(stage.indicator.is_set_high());
        stage.check_state(&system, false);
        assert!(stage.indicator.is_set_low());
        assert!(!stage.indicator.is_floating());
    }
}
