//! Host Simulation Example
//!
//! Runs the SunGuard controller on the desktop against a scripted board: a
//! sunny afternoon where UV climbs past the event threshold and falls back,
//! the operator flips to simulated mode, and a hot spell trips the buzzer.
//!
//! ## What You'll Learn
//!
//! - Implementing the hardware traits on one struct
//! - Driving `Controller::tick` from a virtual clock
//! - Reading `TickReport` for servo, buzzer and telemetry events
//!
//! ## Running the Example
//!
//! ```bash
//! RUST_LOG=info cargo run --example host_simulation
//! ```

use sunguard_core::{
    errors::ControllerResult,
    risk::Rgb,
    telemetry::TelemetryRecord,
    traits::{
        AnalogChannel, AnalogFrontEnd, Buzzer, ClimateReading, ClimateSensor, Delay,
        EntryId, ModeButton, RgbIndicator, ServoDriver, TelemetrySink,
    },
    Controller, ControllerConfig, ControllerError, PublishOutcome,
};

const TICK_MS: u64 = 10;

/// Board whose inputs follow a script keyed on elapsed time
struct ScriptedBoard {
    now: u64,
    servo: u8,
    buzzer: bool,
    color: Rgb,
    entries: u32,
}

impl ScriptedBoard {
    fn new() -> Self {
        Self { now: 0, servo: 0, buzzer: false, color: Rgb::OFF, entries: 0 }
    }

    /// Real UV: triangle 100 → 2900 → 100 mV over the first 40 s
    fn uv_real(&self) -> f32 {
        let t = (self.now % 40_000) as f32 / 20_000.0;
        let ramp = if t < 1.0 { t } else { 2.0 - t };
        100.0 + ramp * 2800.0
    }

    /// Simulated temperature pot: 20 °C, then 38 °C from 60 s on
    fn temp_pot(&self) -> f32 {
        if self.now >= 60_000 { 2530.0 } else { 550.0 }
    }
}

impl AnalogFrontEnd for ScriptedBoard {
    fn read_millivolts(&mut self, channel: AnalogChannel, _samples: u8) -> f32 {
        match channel {
            AnalogChannel::UvReal => self.uv_real(),
            AnalogChannel::UvSim => 900.0,
            AnalogChannel::TempSim => self.temp_pot(),
        }
    }
}

impl ClimateSensor for ScriptedBoard {
    fn read_climate(&mut self) -> ControllerResult<ClimateReading> {
        // Every fifth conversion times out, like a marginal DHT11
        if (self.now / 2_500) % 5 == 4 {
            return Err(ControllerError::SensorUnavailable { reason: "timeout" });
        }
        Ok(ClimateReading { temperature_c: 29.0, humidity_pct: 48.0 })
    }
}

impl ModeButton for ScriptedBoard {
    fn is_high(&mut self) -> bool {
        // Operator holds the button for 100 ms at t = 45 s
        (45_000..45_100).contains(&self.now)
    }
}

impl ServoDriver for ScriptedBoard {
    fn attach(&mut self) {}

    fn write_angle(&mut self, degrees: u8) {
        self.servo = degrees;
    }

    fn detach(&mut self) {}
}

impl Buzzer for ScriptedBoard {
    fn set_buzzer(&mut self, on: bool) {
        if on && !self.buzzer {
            println!("  [{:6} ms] BEEP", self.now);
        }
        self.buzzer = on;
    }
}

impl RgbIndicator for ScriptedBoard {
    fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }
}

impl Delay for ScriptedBoard {
    fn delay_ms(&mut self, ms: u32) {
        self.now += ms as u64;
    }
}

impl TelemetrySink for ScriptedBoard {
    fn is_connected(&self) -> bool {
        true
    }

    fn publish(&mut self, record: &TelemetryRecord) -> ControllerResult<EntryId> {
        self.entries += 1;
        println!("  [{:6} ms] push {:?}", self.now, record.fields());
        EntryId::new(self.entries).ok_or(ControllerError::TelemetryRejected { status: 0 })
    }
}

fn main() -> ControllerResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("SunGuard Host Simulation");
    println!("========================\n");

    let mut board = ScriptedBoard::new();
    let mut controller = Controller::new(ControllerConfig::default(), board.now)?;
    controller.reset(board.now, &mut board);

    while board.now < 90_000 {
        let report = controller.tick(board.now, &mut board);

        if let Some(mode) = report.mode_changed {
            println!("  [{:6} ms] mode -> {}", board.now, mode);
        }
        for t in report.uv_transitions() {
            println!("  [{:6} ms] UV event {:?}", board.now, t);
        }
        if let Some(PublishOutcome::Rejected(err)) = report.telemetry {
            println!("  [{:6} ms] telemetry rejected: {}", board.now, err);
        }
        if board.now % 5_000 == 0 {
            if let Some(line) = report.status {
                println!("{line}  rgb={:?} servo_pwm={}", board.color, board.servo);
            }
        }

        board.now += TICK_MS;
    }

    let stats = controller.publish_stats();
    println!(
        "\nTelemetry: {} attempts, {} accepted, {} rejected",
        stats.attempts, stats.accepted, stats.rejected
    );
    Ok(())
}
