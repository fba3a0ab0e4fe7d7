//! The control loop context
//!
//! All mutable state of the device lives in one `Controller`: mode, sample,
//! calibration, both filters, both alarm latches, the actuator machines and
//! the scheduler timers. The firmware shell calls `tick` as fast as it likes;
//! each tick runs the cooperative schedule below and reports what happened.
//!
//! ```text
//! every tick   debounce button ─▶ (edge) toggle mode, cancel UV event, reset filters
//!              advance servo and buzzer machines
//! 300 ms       read UV ─▶ map ─▶ UV event latch ─▶ servo
//! 2500 ms      read climate ─▶ temperature alarm ─▶ buzzer
//!                           └─▶ telemetry publisher (own 20 s floor)
//! every tick   combined risk ─▶ RGB indicator
//! 1000 ms      status line
//! ```
//!
//! Only the simulated inputs are smoothed. The real UV sensor is oversampled
//! by the front end and mapped directly.

use crate::actuator::{BeepBurst, ServoMotion};
use crate::command::CalibrationCommand;
use crate::config::{ControllerConfig, ExecutionMode};
use crate::debounce::Debouncer;
use crate::errors::{ControllerError, ControllerResult};
use crate::filter::EmaFilter;
use crate::heat::Climate;
use crate::risk::{RiskLevel, Rgb};
use crate::sample::{Mode, Sample};
use crate::status::StatusLine;
use crate::telemetry::{PublishOutcome, PublishStats, TelemetryPublisher, TelemetryRecord};
use crate::temp_alarm::{TempAlarmState, TemperatureAlarm};
use crate::time::{Interval, TimeSource, Timestamp};
use crate::traits::{AnalogChannel, Board, Buzzer, Delay, ServoDriver};
use crate::uv::Calibration;
use crate::uv_event::{UvEventController, UvEventState, UvTransition};

/// What one `tick` did
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// New mode after a debounced button press
    pub mode_changed: Option<Mode>,
    /// UV event cancelled by this tick's mode switch
    pub uv_cancelled: Option<UvTransition>,
    /// UV event edge from this tick's UV read
    pub uv_transition: Option<UvTransition>,
    /// A temperature alarm burst was started, or queued behind one still sounding
    pub burst_started: bool,
    /// Real climate sensor failure on this tick's read
    pub climate_error: Option<ControllerError>,
    /// Publisher result; `None` when no climate read was due
    pub telemetry: Option<PublishOutcome>,
    /// Status line, when one was due
    pub status: Option<StatusLine>,
    /// Combined risk shown on the indicator
    pub risk: RiskLevel,
}

impl TickReport {
    /// Every UV event edge of the tick, in the order they happened
    ///
    /// A mode switch can cancel an event and the first read in the new mode
    /// can enter one again on the same tick.
    pub fn uv_transitions(&self) -> impl Iterator<Item = UvTransition> {
        self.uv_cancelled.into_iter().chain(self.uv_transition)
    }
}

pub struct Controller {
    config: ControllerConfig,
    mode: Mode,
    sample: Sample,
    calibration: Calibration,

    uv_filter: EmaFilter,
    temp_filter: EmaFilter,
    button: Debouncer,

    uv_event: UvEventController,
    temp_alarm: TemperatureAlarm,
    motion: ServoMotion,
    burst: BeepBurst,
    publisher: TelemetryPublisher,

    uv_timer: Interval,
    climate_timer: Interval,
    status_timer: Interval,
}

impl Controller {
    /// Build a controller that booted at `now`
    pub fn new(config: ControllerConfig, now: Timestamp) -> ControllerResult<Self> {
        config.validate()?;

        Ok(Self {
            mode: Mode::Real,
            sample: Sample { timestamp: now, ..Sample::default() },
            calibration: config.sim_calibration,
            uv_filter: EmaFilter::new(config.ema_alpha),
            temp_filter: EmaFilter::new(config.ema_alpha),
            button: Debouncer::new(config.debounce_ms),
            uv_event: UvEventController::new(config.uv_trigger, config.uv_clear, config.event_angle),
            temp_alarm: TemperatureAlarm::new(config.temp_trigger_c, config.temp_clear_c),
            motion: ServoMotion::new(config.motion, config.initial_angle),
            burst: BeepBurst::new(config.burst),
            publisher: TelemetryPublisher::new(config.telemetry_min_interval_ms, now),
            uv_timer: Interval::new(config.uv_interval_ms),
            climate_timer: Interval::new(config.climate_interval_ms),
            status_timer: Interval::new(config.status_interval_ms),
            config,
        })
    }

    /// Put outputs in a known quiet state and forget all readings
    ///
    /// Mode and calibration survive; everything else starts over.
    pub fn reset<B: Board>(&mut self, now: Timestamp, board: &mut B) {
        let config = self.config;
        self.sample = Sample { timestamp: now, ..Sample::default() };
        self.uv_filter.reset();
        self.temp_filter.reset();
        self.uv_event = UvEventController::new(config.uv_trigger, config.uv_clear, config.event_angle);
        self.temp_alarm = TemperatureAlarm::new(config.temp_trigger_c, config.temp_clear_c);
        self.motion = ServoMotion::new(config.motion, config.initial_angle);
        self.burst = BeepBurst::new(config.burst);
        self.uv_timer.reset();
        self.climate_timer.reset();
        self.status_timer.reset();

        board.detach();
        board.set_buzzer(false);
        board.set_color(self.indicator_color(Rgb::OFF));
        log_info!("Controller reset");
    }

    /// One pass of the cooperative schedule
    pub fn tick<B: Board>(&mut self, now: Timestamp, board: &mut B) -> TickReport {
        let mut report = TickReport::default();

        let raw = board.is_high();
        if self.button.rose(raw, now) {
            report.mode_changed = Some(self.toggle_mode(now, board, &mut report));
        }

        let _ = self.motion.poll(now, board);
        let _ = self.burst.poll(now, board);

        if self.uv_timer.tick(now) {
            if let Some(t) = self.acquire_uv(now, board) {
                report.uv_transition = Some(t);
            }
        }

        if self.climate_timer.tick(now) {
            self.acquire_climate(now, board, &mut report);

            let record = TelemetryRecord::new(&self.sample, self.risk(), self.motion.angle(), self.mode);
            report.telemetry = Some(self.publisher.poll(now, &record, board));
        }

        report.risk = self.risk();
        board.set_color(self.indicator_color(report.risk.color()));

        if self.status_timer.tick(now) {
            let line = self.status_line();
            #[cfg(feature = "log")]
            log::info!(target: "sunguard::status", "{}", line);
            #[cfg(all(not(feature = "log"), feature = "defmt"))]
            defmt::info!("risk={} servo={} hold={}", line.risk, line.servo_angle, line.hold);
            report.status = Some(line);
        }

        report
    }

    /// Read the clock and tick once
    pub fn run_once<T: TimeSource, B: Board>(&mut self, clock: &T, board: &mut B) -> TickReport {
        self.tick(clock.now(), board)
    }

    /// Apply an operator calibration command
    ///
    /// The current smoothed UV millivolts become the new zero or full-scale
    /// point. Accepted in either mode; only the simulated mapping uses it.
    pub fn apply_calibration_command(&mut self, command: CalibrationCommand) {
        match command {
            CalibrationCommand::SetZero => self.calibration.zero_mv = self.sample.uv_millivolts,
            CalibrationCommand::SetMax => self.calibration.max_mv = self.sample.uv_millivolts,
            CalibrationCommand::Reset => self.calibration.reset(),
        }
        log_info!("{}", command.confirmation());
    }

    /// Parse and apply a console character
    pub fn handle_console_char(&mut self, c: char) -> ControllerResult<CalibrationCommand> {
        let command = CalibrationCommand::try_from(c)?;
        self.apply_calibration_command(command);
        Ok(command)
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn sample(&self) -> &Sample {
        &self.sample
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn risk(&self) -> RiskLevel {
        self.sample.risk()
    }

    /// Last angle written to the servo
    pub fn servo_angle(&self) -> u8 {
        self.motion.angle()
    }

    /// Angle the servo is at or heading to
    pub fn servo_target(&self) -> u8 {
        self.motion.target()
    }

    pub fn uv_event_state(&self) -> UvEventState {
        self.uv_event.state()
    }

    pub fn temp_alarm_state(&self) -> TempAlarmState {
        self.temp_alarm.state()
    }

    /// A sweep or a burst is still in progress
    pub fn is_busy(&self) -> bool {
        self.motion.is_moving() || self.burst.is_active()
    }

    pub fn publish_stats(&self) -> &PublishStats {
        self.publisher.stats()
    }

    pub fn status_line(&self) -> StatusLine {
        StatusLine {
            mode: self.mode,
            risk: self.risk(),
            sample: self.sample,
            servo_angle: self.motion.angle(),
            hold: self.uv_event.is_active(),
        }
    }

    fn toggle_mode<B: Board>(&mut self, now: Timestamp, board: &mut B, report: &mut TickReport) -> Mode {
        self.mode = self.mode.toggled();
        log_info!("Mode switched to {}", self.mode);

        if let Some(t) = self.uv_event.cancel() {
            self.command_servo(t.target_angle(), now, board);
            report.uv_cancelled = Some(t);
        }
        self.uv_filter.reset();
        self.temp_filter.reset();
        self.mode
    }

    fn acquire_uv<B: Board>(&mut self, now: Timestamp, board: &mut B) -> Option<UvTransition> {
        let (mv, uvi) = match self.mode {
            Mode::Simulated => {
                let raw = board.read_millivolts(AnalogChannel::UvSim, self.config.oversample_sim);
                let mv = self.uv_filter.update(raw);
                (mv, self.calibration.uv_index(mv))
            }
            Mode::Real => {
                let mv = board.read_millivolts(AnalogChannel::UvReal, self.config.oversample_real);
                (mv, self.config.real_calibration.uv_index(mv))
            }
        };
        self.sample = self.sample.with_uv(mv, uvi, now);

        let transition = self.uv_event.update(uvi, self.motion.target())?;
        self.command_servo(transition.target_angle(), now, board);
        Some(transition)
    }

    fn acquire_climate<B: Board>(&mut self, now: Timestamp, board: &mut B, report: &mut TickReport) {
        let climate = match self.mode {
            Mode::Simulated => {
                let raw = board.read_millivolts(AnalogChannel::TempSim, self.config.oversample_sim);
                Some(Climate::simulated(self.temp_filter.update(raw)))
            }
            Mode::Real => match board.read_climate().and_then(|r| r.validated()) {
                Ok(r) => Some(Climate::measured(r.temperature_c, r.humidity_pct)),
                Err(err) => {
                    log_warn!("Climate read failed: {}", err);
                    report.climate_error = Some(err);
                    None
                }
            },
        };
        self.sample = self.sample.with_climate(climate, now);

        if self.temp_alarm.update(self.sample.temperature()) {
            report.burst_started = self.sound_burst(now, board);
        }
    }

    fn command_servo<H: ServoDriver + Delay>(&mut self, target: u8, now: Timestamp, hw: &mut H) {
        match self.config.execution_mode {
            ExecutionMode::Stepped => self.motion.start(target, now, hw),
            ExecutionMode::Blocking => self.motion.run_blocking(target, hw),
        }
    }

    fn sound_burst<H: Buzzer + Delay>(&mut self, now: Timestamp, hw: &mut H) -> bool {
        match self.config.execution_mode {
            ExecutionMode::Stepped => self.burst.start(now, hw),
            ExecutionMode::Blocking => {
                self.burst.run_blocking(hw);
                true
            }
        }
    }

    fn indicator_color(&self, color: Rgb) -> Rgb {
        if self.config.common_anode {
            color.inverted()
        } else {
            color
        }
    }
}
