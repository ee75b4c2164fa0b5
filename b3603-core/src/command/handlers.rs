//! Command operations

use core::fmt::{self, Write};

use b3603_protocol::{parse_milli, parse_uint, Fixed16, Milli, OnOff, YesNo, EOL};

use super::compat::CompatQuery;
use super::table::{self, Op};
use super::{Outcome, Session};
use crate::config::{CalibrationField, CalibrationSlot, RangeError, LIMITS};
use crate::traits::{ConfigStore, OutputActuator};
use crate::{FW_VERSION, MODEL};

/// Parse a `0`/`1` flag, optionally also `YES`/`NO`
fn parse_flag(arg: &str, yes_no: bool) -> Option<bool> {
    match arg {
        "1" => Some(true),
        "0" => Some(false),
        "YES" if yes_no => Some(true),
        "NO" if yes_no => Some(false),
        _ => None,
    }
}

impl<W, O, C> Session<'_, W, O, C>
where
    W: Write,
    O: OutputActuator,
    C: ConfigStore,
{
    pub(super) fn run(&mut self, op: Op, arg: &str) -> Result<Outcome, fmt::Error> {
        match op {
            Op::Model => self.line(format_args!("MODEL: {}", MODEL))?,
            Op::Version => self.line(format_args!("VERSION: {}", FW_VERSION))?,
            Op::System => self.system()?,
            Op::Calibration => self.calibration(false)?,
            Op::RawCalibration => self.calibration(true)?,
            Op::Limits => self.limits()?,
            Op::Config => self.config()?,
            Op::Status => self.status()?,
            Op::RawStatus => self.raw_status()?,
            Op::Commit => self.commit(),
            Op::Save => self.save()?,
            Op::Load => self.load()?,
            Op::Restore => self.restore()?,
            Op::Help => self.help()?,
            Op::Stuck => {
                warn!("STUCK requested, watchdog feeding stops");
                self.line(format_args!("STUCK"))?;
                return Ok(Outcome::Stall);
            }
            Op::SetName => {
                self.ctx.system.set_name(arg);
                let name = self.ctx.system.name.clone();
                self.line(format_args!("SNAME: {}", name))?;
            }
            Op::SetEcho => {
                if let Some(on) = self.flag("ECHO", arg, false)? {
                    self.ctx.echo = on;
                    self.line(format_args!("ECHO: {}", OnOff(on)))?;
                }
            }
            Op::SetOutput => {
                if let Some(on) = self.flag("OUTPUT", arg, false)? {
                    self.ctx.system.output = on;
                    self.line(format_args!("OUTPUT: {}", OnOff(on)))?;
                    self.autocommit()?;
                }
            }
            Op::SetVoltage => self.set_voltage(arg)?,
            Op::SetCurrent => self.set_current(arg)?,
            Op::SetAutocommit => {
                if let Some(on) = self.flag("AUTOCOMMIT", arg, true)? {
                    self.ctx.system.autocommit = on;
                    self.line(format_args!("AUTOCOMMIT: {}", YesNo(on)))?;
                }
            }
            Op::SetOnStartup => {
                if let Some(on) = self.flag("ONSTARTUP", arg, false)? {
                    self.ctx.system.default_on = on;
                    self.line(format_args!("ONSTARTUP: {}", OnOff(on)))?;
                }
            }
            Op::SetCalibration(slot, field) => self.set_calibration(slot, field, arg)?,
        }

        Ok(Outcome::Done)
    }

    pub(super) fn compat(&mut self, query: CompatQuery) -> fmt::Result {
        let ctx = &*self.ctx;
        match query {
            CompatQuery::Identify => write!(self.out, "{} V{}{}", MODEL, FW_VERSION, EOL),
            CompatQuery::VoltageSetpoint => write!(self.out, "{}{}", Milli(ctx.output.vset), EOL),
            CompatQuery::CurrentSetpoint => write!(self.out, "{}{}", Milli(ctx.output.cset), EOL),
            CompatQuery::VoltageOut => write!(self.out, "{}{}", Milli(ctx.runtime.vout), EOL),
            CompatQuery::CurrentOut => write!(self.out, "{}{}", Milli(ctx.runtime.cout), EOL),
            CompatQuery::Output(on) => {
                self.ctx.system.output = on;
                self.commit();
                Ok(())
            }
        }
    }

    /// Push setpoints if autocommit is on, otherwise say so
    fn autocommit(&mut self) -> fmt::Result {
        if self.ctx.system.autocommit {
            self.commit();
            Ok(())
        } else {
            self.line(format_args!("AUTOCOMMIT is off, change not committed"))
        }
    }

    /// Push setpoints to the regulator unconditionally
    fn commit(&mut self) {
        let ctx = &*self.ctx;
        debug!(
            "commit: output={} vset={} cset={}",
            ctx.system.output, ctx.output.vset, ctx.output.cset
        );
        self.actuator
            .commit(&ctx.output, &ctx.system, ctx.runtime.constant_current);
    }

    fn flag(&mut self, name: &str, arg: &str, yes_no: bool) -> Result<Option<bool>, fmt::Error> {
        let parsed = parse_flag(arg, yes_no);
        if parsed.is_none() {
            let accepted = if yes_no { "0/1 OR YES/NO" } else { "0 OR 1" };
            self.line(format_args!(
                "{} TAKES {}, RECEIVED: \"{}\"",
                name, accepted, arg
            ))?;
        }
        Ok(parsed)
    }

    fn set_voltage(&mut self, arg: &str) -> fmt::Result {
        let mv = match parse_milli(arg) {
            Ok(mv) => mv,
            Err(_) => return self.line(format_args!("FAILED TO PARSE {} FOR VOLTAGE", arg)),
        };
        match LIMITS.check_voltage(mv) {
            Ok(mv) => {
                self.ctx.output.vset = mv;
                self.line(format_args!("VOLTAGE: SET {}", Milli(mv)))?;
                self.autocommit()
            }
            Err(e) => self.range_error("VOLTAGE", e),
        }
    }

    fn set_current(&mut self, arg: &str) -> fmt::Result {
        let ma = match parse_milli(arg) {
            Ok(ma) => ma,
            Err(_) => return self.line(format_args!("FAILED TO PARSE {} FOR CURRENT", arg)),
        };
        match LIMITS.check_current(ma) {
            Ok(ma) => {
                self.ctx.output.cset = ma;
                self.line(format_args!("CURRENT: SET {}", Milli(ma)))?;
                self.autocommit()
            }
            Err(e) => self.range_error("CURRENT", e),
        }
    }

    fn range_error(&mut self, name: &str, err: RangeError) -> fmt::Result {
        self.line(format_args!("{} VALUE {}", name, err.as_str()))
    }

    fn set_calibration(
        &mut self,
        slot: CalibrationSlot,
        field: CalibrationField,
        arg: &str,
    ) -> fmt::Result {
        let name = table::calibration_name(slot, field);
        let value = parse_uint(arg)
            .ok()
            .and_then(|v| i32::try_from(v).ok());

        let Some(value) = value else {
            return self.line(format_args!("FAILED TO PARSE {} FOR {}", arg, name));
        };

        let pair = self.ctx.system.calibration_mut(slot);
        match field {
            CalibrationField::A => pair.a = value,
            CalibrationField::B => pair.b = value,
        }
        self.line(format_args!("CALIBRATION SET {}", name))
    }

    fn system(&mut self) -> fmt::Result {
        let name = self.ctx.system.name.clone();
        self.line(format_args!("MODEL: {}", MODEL))?;
        self.line(format_args!("VERSION: {}", FW_VERSION))?;
        self.line(format_args!("NAME: {}", name))?;
        self.line(format_args!("ONSTARTUP: {}", OnOff(self.ctx.system.default_on)))?;
        self.line(format_args!("AUTOCOMMIT: {}", YesNo(self.ctx.system.autocommit)))
    }

    fn calibration(&mut self, raw: bool) -> fmt::Result {
        for slot in CalibrationSlot::ALL {
            let pair = *self.ctx.system.calibration(slot);
            if raw {
                self.line(format_args!("CALIBRATE {}: {}/{}", slot.label(), pair.a, pair.b))?;
            } else {
                self.line(format_args!(
                    "CALIBRATE {}: {}/{}",
                    slot.label(),
                    Fixed16(pair.a),
                    Fixed16(pair.b)
                ))?;
            }
        }
        Ok(())
    }

    fn limits(&mut self) -> fmt::Result {
        self.line(format_args!("LIMITS:"))?;
        self.line(format_args!("VMIN: {}", Milli(LIMITS.vmin)))?;
        self.line(format_args!("VMAX: {}", Milli(LIMITS.vmax)))?;
        self.line(format_args!("VSTEP: {}", Milli(LIMITS.vstep)))?;
        self.line(format_args!("CMIN: {}", Milli(LIMITS.cmin)))?;
        self.line(format_args!("CMAX: {}", Milli(LIMITS.cmax)))?;
        self.line(format_args!("CSTEP: {}", Milli(LIMITS.cstep)))
    }

    fn config(&mut self) -> fmt::Result {
        let output = self.ctx.output;
        self.line(format_args!("CONFIG:"))?;
        self.line(format_args!("OUTPUT: {}", OnOff(self.ctx.system.output)))?;
        self.line(format_args!("VOLTAGE SET: {}", Milli(output.vset)))?;
        self.line(format_args!("CURRENT SET: {}", Milli(output.cset)))?;
        self.line(format_args!("VOLTAGE SHUTDOWN: {}", Milli(output.vshutdown)))?;
        self.line(format_args!("CURRENT SHUTDOWN: {}", Milli(output.cshutdown)))
    }

    fn status(&mut self) -> fmt::Result {
        let state = self.ctx.runtime;
        self.line(format_args!("STATUS:"))?;
        self.line(format_args!("OUTPUT: {}", OnOff(self.ctx.system.output)))?;
        self.line(format_args!("VIN: {}", Milli(state.vin)))?;
        self.line(format_args!("VOUT: {}", Milli(state.vout)))?;
        self.line(format_args!("COUT: {}", Milli(state.cout)))?;
        self.constant(state.constant_current)
    }

    fn raw_status(&mut self) -> fmt::Result {
        let state = self.ctx.runtime;
        self.line(format_args!("RSTATUS:"))?;
        self.line(format_args!("OUTPUT: {}", OnOff(self.ctx.system.output)))?;
        self.line(format_args!("VIN ADC: {}", state.vin_raw))?;
        self.line(format_args!("VOUT ADC: {}", state.vout_raw))?;
        self.line(format_args!("COUT ADC: {}", state.cout_raw))?;
        self.constant(state.constant_current)
    }

    fn constant(&mut self, cc: bool) -> fmt::Result {
        let mode = if cc { "CURRENT" } else { "VOLTAGE" };
        self.line(format_args!("CONSTANT: {}", mode))
    }

    fn save(&mut self) -> fmt::Result {
        self.store.save_system(&self.ctx.system);
        self.store.save_output(&self.ctx.output);
        info!("configuration saved");
        self.line(format_args!("SAVED"))
    }

    fn load(&mut self) -> fmt::Result {
        self.ctx.system = self.store.load_system();
        self.ctx.output = self.store.load_output();
        info!("configuration loaded");
        self.autocommit()
    }

    fn restore(&mut self) -> fmt::Result {
        self.ctx.system = self.store.default_system();
        self.ctx.output = self.store.default_output();
        info!("factory defaults restored");
        self.autocommit()
    }

    fn help(&mut self) -> fmt::Result {
        self.line(format_args!("COMMANDS:"))?;
        for entry in table::entries() {
            if entry.arity == 0 {
                self.line(format_args!("{}", entry.name))?;
            } else {
                self.line(format_args!("{} <ARG>", entry.name))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1", false), Some(true));
        assert_eq!(parse_flag("0", false), Some(false));
        assert_eq!(parse_flag("YES", false), None);
        assert_eq!(parse_flag("YES", true), Some(true));
        assert_eq!(parse_flag("NO", true), Some(false));
        assert_eq!(parse_flag("2", true), None);
        assert_eq!(parse_flag("", false), None);
    }
}
