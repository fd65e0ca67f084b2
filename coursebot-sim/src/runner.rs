//! Course runs and recording sessions on the simulated robot

use coursebot_core::config::PointRecord;
use coursebot_core::navigation::{calibrate, Confirm, Navigator};
use coursebot_core::Pose;
use tracing::info;

use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::store::FilePointStore;
use crate::world::{heading_gap, Simulation};

/// Where the robot ended up after one route stop
#[derive(Debug, Clone)]
pub struct Arrival {
    pub name: String,
    pub target: Pose,
    pub actual: Pose,
}

impl Arrival {
    /// Distance from the target (inches)
    pub fn position_error(&self) -> f32 {
        self.actual.distance_to(&self.target)
    }

    /// Heading difference from the target (degrees)
    pub fn heading_error(&self) -> f32 {
        heading_gap(self.actual.heading, self.target.heading)
    }
}

/// Load the point table and drive the configured route
pub fn run_route(config: &SimConfig, sim: &Simulation) -> Result<Vec<Arrival>> {
    let layout = config.layout()?;
    let mut store = FilePointStore::new(&config.course.points);
    let mut navigator = Navigator::start(sim.chassis(config.motion), &layout, &mut store)?;

    let mut arrivals = Vec::with_capacity(config.course.route.len());
    for name in &config.course.route {
        let target = match (config.course.facing, config.course.mid_course) {
            (true, true) => navigator.go_to_facing_via_midpoint(name),
            (true, false) => navigator.go_to_facing(name),
            (false, true) => navigator.go_to_via_midpoint(name),
            (false, false) => navigator.go_to(name),
        };

        let arrival = Arrival {
            name: name.clone(),
            target,
            actual: sim.pose(),
        };
        info!(
            "{}: off by {:.3} in, {:.2} deg",
            arrival.name,
            arrival.position_error(),
            arrival.heading_error()
        );
        arrivals.push(arrival);
    }
    Ok(arrivals)
}

/// Record every waypoint at its configured placement and save the table
///
/// The simulated operator sets the robot down on each placement, waits
/// for the pose service to see it there and confirms.
pub fn record_course(config: &SimConfig, sim: &Simulation) -> Result<Vec<PointRecord>> {
    let layout = config.layout()?;
    if config.course.placements.len() != layout.len() {
        return Err(SimError::Config(String::from(
            "recording needs one placement per waypoint",
        )));
    }

    let world = sim.world();
    let mut placements = config.course.placements.iter();
    let mut placed = false;

    let mut store = FilePointStore::new(&config.course.points);
    let records = calibrate(
        &layout,
        &mut sim.pose_source(),
        &mut sim.clock(),
        &mut store,
        |name, _fix| {
            if placed {
                placed = false;
                return Confirm::Record;
            }
            match placements.next() {
                Some(&[x, y, heading]) => {
                    info!("placing robot on {}", name);
                    world.borrow_mut().place(Pose::new(x, y, heading));
                    placed = true;
                    Confirm::Wait
                }
                None => Confirm::Abort,
            }
        },
    )?;

    Ok(records.to_vec())
}
