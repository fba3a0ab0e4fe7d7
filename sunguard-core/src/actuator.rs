//! Servo Motion and Buzzer Burst State Machines
//!
//! Both outputs are timed sequences: a servo sweep is a series of small steps
//! followed by a settle-and-detach, and an alarm burst is a series of on/off
//! pulses. Each sequence is an explicit finite-state machine whose progress is
//! recorded in its state and advanced by `poll(now, ..)`:
//!
//! ```text
//! ServoMotion:  Idle ─start→ Stepping ─(at target)→ Settling ─(settled)→ Idle
//! BeepBurst:    Idle ─start→ On(n) → Off(n) → On(n+1) → … → Off(last) → Idle
//! ```
//!
//! `poll` follows the `nb` convention: `Err(WouldBlock)` while the sequence is
//! still running, `Ok(())` once it is idle. The scheduler calls `poll` every
//! loop iteration so the rest of the system stays responsive during a sweep.
//!
//! ## Blocking mode
//!
//! `run_blocking` drives the same machine to completion inside the call,
//! sleeping between deadlines with a `Delay`. This reproduces the legacy
//! behaviour where nothing else is observed during a sweep or a burst.

use core::convert::Infallible;

use crate::constants::actuator::{
    BURST_OFF_MS, BURST_ON_MS, BURST_PULSES, SERVO_MAX_DEG, SERVO_MIN_DEG, SERVO_SETTLE_MS,
    SERVO_STEP_DEG, SERVO_STEP_DELAY_MS,
};
use crate::time::Timestamp;
use crate::traits::{Buzzer, Delay, ServoDriver};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of a servo sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionProfile {
    /// Largest change per step (degrees), at least 1
    pub step_deg: u8,
    /// Delay between steps (milliseconds)
    pub step_delay_ms: u64,
    /// Hold after the final step before detaching (milliseconds)
    pub settle_ms: u64,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            step_deg: SERVO_STEP_DEG,
            step_delay_ms: SERVO_STEP_DELAY_MS,
            settle_ms: SERVO_SETTLE_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MotionPhase {
    Idle,
    Stepping { next_step_at: Timestamp },
    Settling { detach_at: Timestamp },
}

/// Stepped servo sweep with lazy attach/detach
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServoMotion {
    profile: MotionProfile,
    angle: u8,
    target: u8,
    attached: bool,
    phase: MotionPhase,
}

impl ServoMotion {
    /// Servo resting (and detached) at `angle`
    pub fn new(profile: MotionProfile, angle: u8) -> Self {
        let angle = clamp_angle(angle);
        Self {
            profile,
            angle,
            target: angle,
            attached: false,
            phase: MotionPhase::Idle,
        }
    }

    /// Last angle written to the servo
    pub fn angle(&self) -> u8 {
        self.angle
    }

    /// Where the servo is heading, or resting when idle
    pub fn target(&self) -> u8 {
        self.target
    }

    pub fn is_moving(&self) -> bool {
        self.phase != MotionPhase::Idle
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Next time `poll` has work to do
    pub fn next_deadline(&self) -> Option<Timestamp> {
        match self.phase {
            MotionPhase::Idle => None,
            MotionPhase::Stepping { next_step_at } => Some(next_step_at),
            MotionPhase::Settling { detach_at } => Some(detach_at),
        }
    }

    /// Begin (or redirect) a sweep toward `target`
    ///
    /// A sweep already in progress continues from its current angle.
    pub fn start<S: ServoDriver>(&mut self, target: u8, now: Timestamp, servo: &mut S) {
        let target = clamp_angle(target);
        self.target = target;

        if target == self.angle && !self.is_moving() {
            return;
        }

        if !self.attached {
            servo.attach();
            self.attached = true;
        }
        self.phase = MotionPhase::Stepping { next_step_at: now };
    }

    /// Advance the sweep by at most one step
    pub fn poll<S: ServoDriver>(&mut self, now: Timestamp, servo: &mut S) -> nb::Result<(), Infallible> {
        match self.phase {
            MotionPhase::Idle => Ok(()),
            MotionPhase::Stepping { next_step_at } => {
                if now < next_step_at {
                    return Err(nb::Error::WouldBlock);
                }
                self.angle = step_toward(self.angle, self.target, self.profile.step_deg);
                servo.write_angle(self.angle);

                self.phase = if self.angle == self.target {
                    MotionPhase::Settling { detach_at: now + self.profile.settle_ms }
                } else {
                    MotionPhase::Stepping { next_step_at: now + self.profile.step_delay_ms }
                };
                Err(nb::Error::WouldBlock)
            }
            MotionPhase::Settling { detach_at } => {
                if now < detach_at {
                    return Err(nb::Error::WouldBlock);
                }
                servo.detach();
                self.attached = false;
                self.phase = MotionPhase::Idle;
                Ok(())
            }
        }
    }

    /// Sweep to `target` and return only once detached
    pub fn run_blocking<H>(&mut self, target: u8, hw: &mut H)
    where
        H: ServoDriver + Delay,
    {
        let mut now: Timestamp = 0;
        self.start(target, now, hw);
        loop {
            match self.poll(now, hw) {
                Ok(()) => break,
                Err(nb::Error::WouldBlock) => {
                    now = wait_until(self.next_deadline(), now, hw);
                }
                Err(nb::Error::Other(never)) => match never {},
            }
        }
    }
}

/// Shape of an alarm burst
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BurstProfile {
    /// Number of on/off pulses
    pub pulses: u8,
    /// On-time per pulse (milliseconds)
    pub on_ms: u64,
    /// Off-time per pulse (milliseconds)
    pub off_ms: u64,
}

impl Default for BurstProfile {
    fn default() -> Self {
        Self {
            pulses: BURST_PULSES,
            on_ms: BURST_ON_MS,
            off_ms: BURST_OFF_MS,
        }
    }
}

impl BurstProfile {
    /// Wall time of a whole burst
    pub fn duration_ms(&self) -> u64 {
        self.pulses as u64 * (self.on_ms + self.off_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BurstPhase {
    Idle,
    On { pulse: u8, until: Timestamp },
    Off { pulse: u8, until: Timestamp },
}

/// Fixed on/off pulse train on the buzzer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeepBurst {
    profile: BurstProfile,
    phase: BurstPhase,
    queued: u8,
}

impl BeepBurst {
    pub fn new(profile: BurstProfile) -> Self {
        Self { profile, phase: BurstPhase::Idle, queued: 0 }
    }

    pub fn is_active(&self) -> bool {
        self.phase != BurstPhase::Idle
    }

    /// Bursts waiting for the current one to finish
    pub fn queued(&self) -> u8 {
        self.queued
    }

    pub fn next_deadline(&self) -> Option<Timestamp> {
        match self.phase {
            BurstPhase::Idle => None,
            BurstPhase::On { until, .. } | BurstPhase::Off { until, .. } => Some(until),
        }
    }

    /// Start a burst, or queue it behind the one already sounding
    ///
    /// Returns false only for an empty profile.
    pub fn start<B: Buzzer>(&mut self, now: Timestamp, buzzer: &mut B) -> bool {
        if self.profile.pulses == 0 {
            return false;
        }
        if self.is_active() {
            self.queued = self.queued.saturating_add(1);
            return true;
        }
        buzzer.set_buzzer(true);
        self.phase = BurstPhase::On { pulse: 0, until: now + self.profile.on_ms };
        true
    }

    pub fn poll<B: Buzzer>(&mut self, now: Timestamp, buzzer: &mut B) -> nb::Result<(), Infallible> {
        match self.phase {
            BurstPhase::Idle => Ok(()),
            BurstPhase::On { pulse, until } => {
                if now < until {
                    return Err(nb::Error::WouldBlock);
                }
                buzzer.set_buzzer(false);
                self.phase = BurstPhase::Off { pulse, until: now + self.profile.off_ms };
                Err(nb::Error::WouldBlock)
            }
            BurstPhase::Off { pulse, until } => {
                if now < until {
                    return Err(nb::Error::WouldBlock);
                }
                let next = pulse + 1;
                if next < self.profile.pulses {
                    buzzer.set_buzzer(true);
                    self.phase = BurstPhase::On { pulse: next, until: now + self.profile.on_ms };
                    Err(nb::Error::WouldBlock)
                } else if self.queued > 0 {
                    self.queued -= 1;
                    buzzer.set_buzzer(true);
                    self.phase = BurstPhase::On { pulse: 0, until: now + self.profile.on_ms };
                    Err(nb::Error::WouldBlock)
                } else {
                    self.phase = BurstPhase::Idle;
                    Ok(())
                }
            }
        }
    }

    /// Sound the whole burst before returning
    pub fn run_blocking<H>(&mut self, hw: &mut H)
    where
        H: Buzzer + Delay,
    {
        let mut now: Timestamp = 0;
        if !self.start(now, hw) {
            return;
        }
        loop {
            match self.poll(now, hw) {
                Ok(()) => break,
                Err(nb::Error::WouldBlock) => {
                    now = wait_until(self.next_deadline(), now, hw);
                }
                Err(nb::Error::Other(never)) => match never {},
            }
        }
    }
}

fn clamp_angle(angle: u8) -> u8 {
    angle.clamp(SERVO_MIN_DEG, SERVO_MAX_DEG)
}

/// One step from `from` toward `to`, never overshooting
fn step_toward(from: u8, to: u8, step: u8) -> u8 {
    let step = step.max(1);
    if from < to {
        from.saturating_add(step).min(to)
    } else {
        from.saturating_sub(step).max(to)
    }
}

/// Sleep until `deadline` on the virtual clock, returning the new time
fn wait_until<D: Delay>(deadline: Option<Timestamp>, now: Timestamp, delay: &mut D) -> Timestamp {
    let deadline = deadline.unwrap_or(now);
    let wait = deadline.saturating_sub(now);
    if wait > 0 {
        delay.delay_ms(wait as u32);
    }
    deadline.max(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingServo {
        writes: heapless::Vec<u8, 128>,
        attached: bool,
        attaches: u32,
        detaches: u32,
        slept_ms: u64,
    }

    impl Delay for RecordingServo {
        fn delay_ms(&mut self, ms: u32) {
            self.slept_ms += ms as u64;
        }
    }

    impl ServoDriver for RecordingServo {
        fn attach(&mut self) {
            self.attached = true;
            self.attaches += 1;
        }
        fn write_angle(&mut self, degrees: u8) {
            let _ = self.writes.push(degrees);
        }
        fn detach(&mut self) {
            self.attached = false;
            self.detaches += 1;
        }
    }

    #[derive(Default)]
    struct RecordingBuzzer {
        edges: heapless::Vec<bool, 32>,
        slept_ms: u64,
    }

    impl Delay for RecordingBuzzer {
        fn delay_ms(&mut self, ms: u32) {
            self.slept_ms += ms as u64;
        }
    }

    impl Buzzer for RecordingBuzzer {
        fn set_buzzer(&mut self, on: bool) {
            let _ = self.edges.push(on);
        }
    }

    #[test]
    fn step_toward_never_overshoots() {
        assert_eq!(step_toward(0, 180, 3), 3);
        assert_eq!(step_toward(179, 180, 3), 180);
        assert_eq!(step_toward(180, 0, 3), 177);
        assert_eq!(step_toward(2, 0, 3), 0);
        assert_eq!(step_toward(10, 10, 3), 10);
        // Zero step still makes progress
        assert_eq!(step_toward(10, 20, 0), 11);
    }

    #[test]
    fn stepped_sweep_writes_every_step_then_detaches() {
        let mut servo = RecordingServo::default();
        let mut motion = ServoMotion::new(MotionProfile::default(), 0);

        motion.start(9, 1000, &mut servo);
        assert!(servo.attached);
        assert!(motion.is_moving());

        // Not due yet only for future deadlines; the first step is immediate
        let mut now = 1000;
        while motion.poll(now, &mut servo).is_err() {
            now += 1;
        }

        assert_eq!(&servo.writes[..], &[3, 6, 9]);
        assert_eq!(motion.angle(), 9);
        assert!(!servo.attached);
        assert_eq!(servo.detaches, 1);
        // 2 step delays + settle
        assert_eq!(now, 1000 + 2 * 12 + 120);
    }

    #[test]
    fn start_at_current_angle_is_noop() {
        let mut servo = RecordingServo::default();
        let mut motion = ServoMotion::new(MotionProfile::default(), 90);
        motion.start(90, 0, &mut servo);
        assert!(!motion.is_moving());
        assert_eq!(servo.attaches, 0);
    }

    #[test]
    fn redirect_mid_sweep_continues_from_current_angle() {
        let mut servo = RecordingServo::default();
        let mut motion = ServoMotion::new(MotionProfile::default(), 0);

        motion.start(180, 0, &mut servo);
        let _ = motion.poll(0, &mut servo);
        let _ = motion.poll(12, &mut servo);
        assert_eq!(motion.angle(), 6);

        motion.start(0, 20, &mut servo);
        let mut now = 20;
        while motion.poll(now, &mut servo).is_err() {
            now += 1;
        }
        assert_eq!(&servo.writes[..], &[3, 6, 3, 0]);
        assert_eq!(servo.attaches, 1);
    }

    #[test]
    fn odd_distance_terminates() {
        let mut servo = RecordingServo::default();
        let mut motion = ServoMotion::new(MotionProfile::default(), 0);

        motion.run_blocking(10, &mut servo);
        assert_eq!(&servo.writes[..], &[3, 6, 9, 10]);
        assert_eq!(motion.angle(), 10);
    }

    #[test]
    fn blocking_sweep_full_range() {
        let mut servo = RecordingServo::default();
        let mut motion = ServoMotion::new(MotionProfile::default(), 0);

        motion.run_blocking(180, &mut servo);
        assert_eq!(servo.writes.len(), 60);
        assert_eq!(servo.writes.last(), Some(&180));
        assert!(!motion.is_moving());
        assert!(!servo.attached);
        assert_eq!(servo.slept_ms, 59 * 12 + 120);
    }

    #[test]
    fn targets_are_clamped() {
        let mut servo = RecordingServo::default();
        let mut motion = ServoMotion::new(MotionProfile::default(), 200);
        assert_eq!(motion.angle(), 180);

        motion.run_blocking(250, &mut servo);
        assert!(servo.writes.is_empty());
    }

    #[test]
    fn burst_pulse_train() {
        let mut buzzer = RecordingBuzzer::default();
        let mut burst = BeepBurst::new(BurstProfile::default());

        assert!(burst.start(0, &mut buzzer));

        let mut now = 0;
        while burst.poll(now, &mut buzzer).is_err() {
            now += 1;
        }

        assert_eq!(buzzer.edges.len(), 10);
        assert_eq!(buzzer.edges.iter().filter(|on| **on).count(), 5);
        assert_eq!(buzzer.edges.last(), Some(&false));
        assert_eq!(now, BurstProfile::default().duration_ms());
    }

    #[test]
    fn start_while_sounding_queues_second_burst() {
        let mut buzzer = RecordingBuzzer::default();
        let mut burst = BeepBurst::new(BurstProfile::default());

        assert!(burst.start(0, &mut buzzer));
        assert!(burst.start(10, &mut buzzer));
        assert_eq!(burst.queued(), 1);
        // Queued burst does not touch the buzzer until its turn
        assert_eq!(buzzer.edges.len(), 1);

        let mut now = 0;
        while burst.poll(now, &mut buzzer).is_err() {
            now += 1;
        }

        assert_eq!(buzzer.edges.len(), 20);
        assert_eq!(buzzer.edges.iter().filter(|on| **on).count(), 10);
        assert_eq!(burst.queued(), 0);
        assert!(!burst.is_active());
        assert_eq!(now, 2 * BurstProfile::default().duration_ms());
    }

    #[test]
    fn empty_profile_never_starts() {
        let mut buzzer = RecordingBuzzer::default();
        let mut burst = BeepBurst::new(BurstProfile { pulses: 0, ..BurstProfile::default() });

        assert!(!burst.start(0, &mut buzzer));
        assert!(buzzer.edges.is_empty());
    }

    #[test]
    fn blocking_burst_timing() {
        let mut buzzer = RecordingBuzzer::default();
        let mut burst = BeepBurst::new(BurstProfile::default());

        burst.run_blocking(&mut buzzer);
        assert_eq!(buzzer.slept_ms, 5 * (320 + 120));
        assert!(!burst.is_active());
    }
}
