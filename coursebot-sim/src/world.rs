//! Simulated course world
//!
//! A kinematic differential-drive model with perfect odometry: wheels move
//! at a speed proportional to their power the instant they are commanded,
//! never slip and stop dead. Time only passes when the control code
//! sleeps, so a whole course runs in milliseconds of real time.
//!
//! The chassis sees the world through three handles sharing one
//! [`World`]: [`SimDrive`], [`SimPose`] and [`SimClock`].

use std::cell::RefCell;
use std::f64::consts::PI;
use std::rc::Rc;

use coursebot_core::config::{DriveGeometry, MotionConfig};
use coursebot_core::geometry::normalize_heading;
use coursebot_core::traits::{saturate_percent, Clock, DriveTrain, PoseSource, Wheel};
use coursebot_core::{Chassis, Pose};
use serde::Deserialize;

/// Physical parameters of the simulated robot
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Wheel surface speed at 100% power (inches per second)
    pub max_speed_in_per_s: f32,
    /// Every Nth pose reading reports no fix (0 disables dropouts)
    pub dropout_every: u32,
    /// Pose at power-up: `[x, y, heading]`
    pub start: [f32; 3],
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_speed_in_per_s: 20.0,
            dropout_every: 0,
            start: [0.0, 0.0, 0.0],
        }
    }
}

/// Ground truth of the simulation
#[derive(Debug)]
pub struct World {
    geometry: DriveGeometry,
    max_speed: f64,
    dropout_every: u32,
    x: f64,
    y: f64,
    /// Heading in radians, counter-clockwise from +X
    theta: f64,
    powers: [f32; 2],
    /// Distance rolled by each wheel since its last reset (inches)
    travel: [f64; 2],
    now_ms: u64,
    reads: u64,
}

fn index(wheel: Wheel) -> usize {
    match wheel {
        Wheel::Left => 0,
        Wheel::Right => 1,
    }
}

impl World {
    pub fn new(config: &WorldConfig, geometry: DriveGeometry) -> Self {
        let [x, y, heading] = config.start;
        Self {
            geometry,
            max_speed: config.max_speed_in_per_s as f64,
            dropout_every: config.dropout_every,
            x: x as f64,
            y: y as f64,
            theta: (heading as f64).to_radians(),
            powers: [0.0; 2],
            travel: [0.0; 2],
            now_ms: 0,
            reads: 0,
        }
    }

    /// True pose of the robot
    pub fn pose(&self) -> Pose {
        Pose::new(self.x as f32, self.y as f32, self.theta.to_degrees() as f32)
    }

    /// Pick the robot up and set it down somewhere else
    pub fn place(&mut self, pose: Pose) {
        self.x = pose.x as f64;
        self.y = pose.y as f64;
        self.theta = (pose.heading as f64).to_radians();
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn power(&self, wheel: Wheel) -> f32 {
        self.powers[index(wheel)]
    }

    /// Pose service reading, honoring the configured dropouts
    pub fn read_pose(&mut self) -> Pose {
        self.reads += 1;
        if self.dropout_every > 0 && self.reads % self.dropout_every as u64 == 0 {
            Pose::INVALID
        } else {
            self.pose()
        }
    }

    pub fn set_power(&mut self, wheel: Wheel, percent: f32) {
        self.powers[index(wheel)] = saturate_percent(percent);
    }

    pub fn reset_count(&mut self, wheel: Wheel) {
        self.travel[index(wheel)] = 0.0;
    }

    /// Whole encoder pulses since the last reset
    pub fn count(&self, wheel: Wheel) -> u32 {
        let per_inch = self.geometry.counts_per_inch() as f64;
        (self.travel[index(wheel)] * per_inch).floor() as u32
    }

    /// Let `ms` milliseconds pass in one-millisecond steps
    pub fn advance(&mut self, ms: u32) {
        for _ in 0..ms {
            self.step(0.001);
        }
        self.now_ms += ms as u64;
    }

    fn step(&mut self, dt: f64) {
        if self.powers == [0.0; 2] {
            return;
        }
        let left = self.powers[0] as f64 / 100.0 * self.max_speed * dt;
        let right = self.powers[1] as f64 / 100.0 * self.max_speed * dt;
        self.travel[0] += left.abs();
        self.travel[1] += right.abs();

        let forward = (left + right) / 2.0;
        let turn = (right - left) / self.geometry.track_width_in as f64;
        let mid = self.theta + turn / 2.0;
        self.x += forward * mid.cos();
        self.y += forward * mid.sin();
        self.theta = (self.theta + turn).rem_euclid(2.0 * PI);
    }
}

/// Shared handle to a [`World`]
pub type SharedWorld = Rc<RefCell<World>>;

/// Simulated wheels and encoders
pub struct SimDrive {
    world: SharedWorld,
}

impl DriveTrain for SimDrive {
    fn set_power(&mut self, wheel: Wheel, percent: f32) {
        self.world.borrow_mut().set_power(wheel, percent);
    }

    fn stop(&mut self, wheel: Wheel) {
        self.world.borrow_mut().set_power(wheel, 0.0);
    }

    fn reset_count(&mut self, wheel: Wheel) {
        self.world.borrow_mut().reset_count(wheel);
    }

    fn count(&mut self, wheel: Wheel) -> u32 {
        self.world.borrow().count(wheel)
    }
}

/// Simulated positioning service
pub struct SimPose {
    world: SharedWorld,
    initialized: bool,
}

impl SimPose {
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl PoseSource for SimPose {
    fn initialize(&mut self) {
        self.initialized = true;
    }

    /// No fix until the service has been initialized
    fn pose(&mut self) -> Pose {
        if !self.initialized {
            return Pose::INVALID;
        }
        self.world.borrow_mut().read_pose()
    }
}

/// Virtual clock; sleeping advances the world
pub struct SimClock {
    world: SharedWorld,
}

impl Clock for SimClock {
    fn now_ms(&mut self) -> u64 {
        self.world.borrow().now_ms()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.world.borrow_mut().advance(ms);
    }
}

/// A simulated robot on a simulated course
pub struct Simulation {
    world: SharedWorld,
}

impl Simulation {
    pub fn new(config: &WorldConfig, geometry: DriveGeometry) -> Self {
        Self {
            world: Rc::new(RefCell::new(World::new(config, geometry))),
        }
    }

    pub fn world(&self) -> SharedWorld {
        Rc::clone(&self.world)
    }

    /// Ground truth pose
    pub fn pose(&self) -> Pose {
        self.world.borrow().pose()
    }

    pub fn drive(&self) -> SimDrive {
        SimDrive { world: self.world() }
    }

    pub fn pose_source(&self) -> SimPose {
        SimPose {
            world: self.world(),
            initialized: false,
        }
    }

    pub fn clock(&self) -> SimClock {
        SimClock { world: self.world() }
    }

    /// Chassis over this world
    pub fn chassis(&self, config: MotionConfig) -> Chassis<SimDrive, SimPose, SimClock> {
        Chassis::new(self.drive(), self.pose_source(), self.clock(), config)
    }
}

/// Shortest angular distance between two headings in degrees
pub fn heading_gap(a: f32, b: f32) -> f32 {
    let diff = normalize_heading(a - b);
    diff.min(360.0 - diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        let geometry = DriveGeometry {
            turn_correction: 1.0,
            ..Default::default()
        };
        World::new(&WorldConfig::default(), geometry)
    }

    #[test]
    fn test_straight_line() {
        let mut world = world();
        world.set_power(Wheel::Left, 50.0);
        world.set_power(Wheel::Right, 50.0);
        world.advance(1000);

        let pose = world.pose();
        assert!((pose.x - 10.0).abs() < 1e-3);
        assert!(pose.y.abs() < 1e-3);
        assert_eq!(world.count(Wheel::Left), world.count(Wheel::Right));
        assert_eq!(world.now_ms(), 1000);
    }

    #[test]
    fn test_pivot_stays_in_place() {
        let mut world = world();
        world.set_power(Wheel::Left, -30.0);
        world.set_power(Wheel::Right, 30.0);
        world.advance(500);

        let pose = world.pose();
        assert!(pose.x.abs() < 1e-3 && pose.y.abs() < 1e-3);
        // 6 in/s per wheel over a 7.86 in track
        let expected = (2.0 * 6.0 * 0.5 / 7.86f64).to_degrees() as f32;
        assert!(heading_gap(pose.heading, expected) < 0.01);
    }

    #[test]
    fn test_counts_track_travel_magnitude() {
        let mut world = world();
        world.set_power(Wheel::Left, -100.0);
        world.set_power(Wheel::Right, -100.0);
        world.advance(100);

        // 2 in backward at ~42 counts per inch
        assert_eq!(world.count(Wheel::Left), 84);
        world.reset_count(Wheel::Left);
        assert_eq!(world.count(Wheel::Left), 0);
        assert_eq!(world.count(Wheel::Right), 84);
    }

    #[test]
    fn test_dropouts() {
        let config = WorldConfig {
            dropout_every: 3,
            ..Default::default()
        };
        let mut world = World::new(&config, DriveGeometry::default());

        assert!(world.read_pose().is_valid());
        assert!(world.read_pose().is_valid());
        assert!(!world.read_pose().is_valid());
        assert!(world.read_pose().is_valid());
    }

    #[test]
    fn test_pose_source_needs_initialize() {
        let sim = Simulation::new(&WorldConfig::default(), DriveGeometry::default());
        let mut pose = sim.pose_source();

        assert!(pose.fix().is_none());
        pose.initialize();
        assert_eq!(pose.fix(), Some(Pose::new(0.0, 0.0, 0.0)));
    }
}
