//! Test doubles for the hardware traits

use std::vec::Vec;

use crate::config::MotionConfig;
use crate::geometry::Pose;
use crate::motion::Chassis;
use crate::traits::{Clock, DriveTrain, PoseSource, Wheel};

/// Clock that only moves when slept on
#[derive(Debug, Default)]
pub struct ManualClock {
    pub now: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for ManualClock {
    fn now_ms(&mut self) -> u64 {
        self.now
    }

    fn delay_ms(&mut self, ms: u32) {
        self.now += ms as u64;
    }
}

/// Drive train that records every command
///
/// Each `count()` of an energized wheel advances its encoder by `step`
/// pulses; a step of zero models stalled wheels.
#[derive(Debug)]
pub struct FakeDrive {
    pub powers: [f32; 2],
    pub counts: [u32; 2],
    pub step: u32,
    pub commands: Vec<(Wheel, f32)>,
    pub stop_calls: usize,
    pub reset_calls: usize,
}

impl FakeDrive {
    /// Wheels that reach any encoder target on the first poll
    pub fn new() -> Self {
        Self::with_step(10_000)
    }

    pub fn with_step(step: u32) -> Self {
        Self {
            powers: [0.0; 2],
            counts: [0; 2],
            step,
            commands: Vec::new(),
            stop_calls: 0,
            reset_calls: 0,
        }
    }

    pub fn stalled() -> Self {
        Self::with_step(0)
    }

    pub fn ever_energized(&self) -> bool {
        self.commands.iter().any(|&(_, percent)| percent != 0.0)
    }

    pub fn is_stopped(&self) -> bool {
        self.powers == [0.0; 2]
    }

    /// First power commanded to a wheel since the log was cleared
    pub fn first_power(&self, wheel: Wheel) -> Option<f32> {
        self.commands
            .iter()
            .find(|&&(w, _)| w == wheel)
            .map(|&(_, percent)| percent)
    }

    /// Every power commanded to a wheel, in order
    pub fn powers_for(&self, wheel: Wheel) -> Vec<f32> {
        self.commands
            .iter()
            .filter(|&&(w, _)| w == wheel)
            .map(|&(_, percent)| percent)
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.commands.clear();
    }
}

fn index(wheel: Wheel) -> usize {
    match wheel {
        Wheel::Left => 0,
        Wheel::Right => 1,
    }
}

impl DriveTrain for FakeDrive {
    fn set_power(&mut self, wheel: Wheel, percent: f32) {
        self.powers[index(wheel)] = percent;
        self.commands.push((wheel, percent));
    }

    fn stop(&mut self, wheel: Wheel) {
        self.powers[index(wheel)] = 0.0;
        self.stop_calls += 1;
    }

    fn reset_count(&mut self, wheel: Wheel) {
        self.counts[index(wheel)] = 0;
        self.reset_calls += 1;
    }

    fn count(&mut self, wheel: Wheel) -> u32 {
        let i = index(wheel);
        if self.powers[i] != 0.0 {
            self.counts[i] = self.counts[i].saturating_add(self.step);
        }
        self.counts[i]
    }
}

/// Pose source that plays back readings, repeating the last one
#[derive(Debug)]
pub struct ScriptedPose {
    readings: Vec<Pose>,
    next: usize,
    pub initialized: usize,
    pub reads: usize,
}

impl ScriptedPose {
    pub fn new(readings: &[Pose]) -> Self {
        assert!(!readings.is_empty());
        Self {
            readings: readings.to_vec(),
            next: 0,
            initialized: 0,
            reads: 0,
        }
    }

    pub fn fixed(pose: Pose) -> Self {
        Self::new(&[pose])
    }
}

impl PoseSource for ScriptedPose {
    fn initialize(&mut self) {
        self.initialized += 1;
    }

    fn pose(&mut self) -> Pose {
        let reading = self.readings[self.next.min(self.readings.len() - 1)];
        self.next += 1;
        self.reads += 1;
        reading
    }
}

/// Default-calibration chassis over a fresh fake drive
pub fn chassis_with(pose: ScriptedPose) -> Chassis<FakeDrive, ScriptedPose, ManualClock> {
    Chassis::new(FakeDrive::new(), pose, ManualClock::new(), MotionConfig::default())
}
