//! Shared test board for integration tests
//!
//! `MockBoard` implements every hardware seam on one struct:
//! - analog channels and the climate sensor return whatever the test set
//! - servo, buzzer, indicator and telemetry calls are recorded
//! - `Delay` advances the board's virtual clock, so blocking mode and
//!   stepped mode run against the same timeline

#![allow(dead_code)]

use sunguard_core::{
    controller::{Controller, TickReport},
    errors::{ControllerError, ControllerResult},
    risk::Rgb,
    telemetry::TelemetryRecord,
    time::Timestamp,
    traits::{
        AnalogChannel, AnalogFrontEnd, Buzzer, ClimateReading, ClimateSensor, Delay,
        EntryId, ModeButton, RgbIndicator, ServoDriver, TelemetrySink,
    },
};

/// Scheduler granularity used by the helpers
pub const TICK_MS: u64 = 5;

pub struct MockBoard {
    pub clock: Timestamp,

    // Inputs
    pub uv_real_mv: f32,
    pub uv_sim_mv: f32,
    pub temp_sim_mv: f32,
    pub climate: ControllerResult<ClimateReading>,
    pub button: bool,
    pub connected: bool,
    pub accept: bool,

    // Recorded outputs
    pub servo_writes: Vec<(Timestamp, u8)>,
    pub servo_attached: bool,
    pub attaches: u32,
    pub detaches: u32,
    pub buzzer_edges: Vec<(Timestamp, bool)>,
    pub color: Option<Rgb>,
    pub pushes: Vec<(Timestamp, TelemetryRecord)>,
    pub slept_ms: u64,

    next_entry: u32,
}

impl Default for MockBoard {
    fn default() -> Self {
        Self {
            clock: 0,
            uv_real_mv: 100.0,
            uv_sim_mv: 0.0,
            temp_sim_mv: 0.0,
            climate: Ok(ClimateReading { temperature_c: 25.0, humidity_pct: 40.0 }),
            button: false,
            connected: false,
            accept: true,
            servo_writes: Vec::new(),
            servo_attached: false,
            attaches: 0,
            detaches: 0,
            buzzer_edges: Vec::new(),
            color: None,
            pushes: Vec::new(),
            slept_ms: 0,
            next_entry: 1,
        }
    }
}

impl MockBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Real climate sensor answers with this pair
    pub fn set_climate(&mut self, temperature_c: f32, humidity_pct: f32) {
        self.climate = Ok(ClimateReading { temperature_c, humidity_pct });
    }

    pub fn fail_climate(&mut self) {
        self.climate = Err(ControllerError::SensorUnavailable { reason: "timeout" });
    }

    /// Number of buzzer on-edges so far
    pub fn beeps(&self) -> usize {
        self.buzzer_edges.iter().filter(|(_, on)| *on).count()
    }

    pub fn last_servo_write(&self) -> Option<u8> {
        self.servo_writes.last().map(|(_, deg)| *deg)
    }
}

impl AnalogFrontEnd for MockBoard {
    fn read_millivolts(&mut self, channel: AnalogChannel, _samples: u8) -> f32 {
        match channel {
            AnalogChannel::UvReal => self.uv_real_mv,
            AnalogChannel::UvSim => self.uv_sim_mv,
            AnalogChannel::TempSim => self.temp_sim_mv,
        }
    }
}

impl ClimateSensor for MockBoard {
    fn read_climate(&mut self) -> ControllerResult<ClimateReading> {
        self.climate
    }
}

impl ModeButton for MockBoard {
    fn is_high(&mut self) -> bool {
        self.button
    }
}

impl ServoDriver for MockBoard {
    fn attach(&mut self) {
        self.servo_attached = true;
        self.attaches += 1;
    }

    fn write_angle(&mut self, degrees: u8) {
        assert!(self.servo_attached, "servo written while detached");
        self.servo_writes.push((self.clock, degrees));
    }

    fn detach(&mut self) {
        self.servo_attached = false;
        self.detaches += 1;
    }
}

impl Buzzer for MockBoard {
    fn set_buzzer(&mut self, on: bool) {
        self.buzzer_edges.push((self.clock, on));
    }
}

impl RgbIndicator for MockBoard {
    fn set_color(&mut self, color: Rgb) {
        self.color = Some(color);
    }
}

impl Delay for MockBoard {
    fn delay_ms(&mut self, ms: u32) {
        self.clock += ms as u64;
        self.slept_ms += ms as u64;
    }
}

impl TelemetrySink for MockBoard {
    fn is_connected(&self) -> bool {
        self.connected
    }

    fn publish(&mut self, record: &TelemetryRecord) -> ControllerResult<EntryId> {
        self.pushes.push((self.clock, *record));
        if !self.accept {
            return Err(ControllerError::TelemetryRejected { status: 0 });
        }
        let id = EntryId::new(self.next_entry).ok_or(ControllerError::TelemetryRejected { status: 0 })?;
        self.next_entry += 1;
        Ok(id)
    }
}

/// Tick every `TICK_MS` for `duration_ms` of board time
pub fn run(ctl: &mut Controller, board: &mut MockBoard, duration_ms: u64) -> Vec<TickReport> {
    let end = board.clock + duration_ms;
    let mut reports = Vec::new();
    while board.clock < end {
        let now = board.clock;
        reports.push(ctl.tick(now, board));
        board.clock += TICK_MS;
    }
    reports
}

/// Hold the mode button long enough to debounce, then release
pub fn press_button(ctl: &mut Controller, board: &mut MockBoard) -> Vec<TickReport> {
    board.button = true;
    let mut reports = run(ctl, board, 60);
    board.button = false;
    reports.extend(run(ctl, board, 60));
    reports
}
