//! Waypoint recording
//!
//! Before a run the robot is walked around the course by hand. For every
//! layout name the operator parks the robot on the spot and confirms; the
//! live pose at that moment becomes the waypoint.

use heapless::Vec;

use crate::config::points::{CourseLayout, PointRecord, MAX_WAYPOINTS};
use crate::geometry::Pose;
use crate::traits::{Clock, PointStore, PoseSource, StoreError};

/// Pose sampling period while waiting for the operator
pub const SAMPLE_INTERVAL_MS: u32 = 100;

/// Pause after each recorded waypoint so one touch records one point
pub const RECORD_PAUSE_MS: u32 = 1000;

/// Operator answer to a live pose reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Confirm {
    /// Record this reading for the current name
    Record,
    /// Keep sampling
    Wait,
    /// Abandon the recording
    Abort,
}

/// Errors from a recording session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// The operator abandoned the session
    Aborted,
    /// The recorded table could not be stored
    Storage(StoreError),
}

impl From<StoreError> for RecordError {
    fn from(e: StoreError) -> Self {
        RecordError::Storage(e)
    }
}

/// Record one pose per layout name, in layout order
///
/// `confirm` is shown every reading that carries a fix along with the name
/// being recorded. Readings without a fix are skipped, so a point can never
/// be recorded as the invalid sentinel.
pub fn record_waypoints<P, C, F>(
    layout: &CourseLayout,
    pose: &mut P,
    clock: &mut C,
    mut confirm: F,
) -> Result<Vec<PointRecord, MAX_WAYPOINTS>, RecordError>
where
    P: PoseSource,
    C: Clock,
    F: FnMut(&str, &Pose) -> Confirm,
{
    let mut records = Vec::new();

    for name in layout.names() {
        loop {
            if let Some(fix) = pose.fix() {
                match confirm(name, &fix) {
                    Confirm::Record => {
                        records
                            .push(PointRecord::from(fix))
                            .map_err(|_| StoreError::Full)?;
                        info!("recorded {} at ({}, {}, {})", name, fix.x, fix.y, fix.heading);
                        clock.delay_ms(RECORD_PAUSE_MS);
                        break;
                    }
                    Confirm::Abort => {
                        warn!("recording abandoned at {}", name);
                        return Err(RecordError::Aborted);
                    }
                    Confirm::Wait => {}
                }
            }
            clock.delay_ms(SAMPLE_INTERVAL_MS);
        }
    }

    Ok(records)
}

/// Bring up the pose service, record every waypoint and persist the table
pub fn calibrate<P, C, S, F>(
    layout: &CourseLayout,
    pose: &mut P,
    clock: &mut C,
    store: &mut S,
    confirm: F,
) -> Result<Vec<PointRecord, MAX_WAYPOINTS>, RecordError>
where
    P: PoseSource,
    C: Clock,
    S: PointStore,
    F: FnMut(&str, &Pose) -> Confirm,
{
    pose.initialize();
    let records = record_waypoints(layout, pose, clock, confirm)?;
    store.save(&records)?;
    info!("saved {} waypoints", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ManualClock, ScriptedPose};

    #[derive(Default)]
    struct MemoryStore {
        saved: std::vec::Vec<PointRecord>,
    }

    impl PointStore for MemoryStore {
        fn load(&mut self) -> Result<Vec<PointRecord, MAX_WAYPOINTS>, StoreError> {
            Vec::from_slice(&self.saved).map_err(|_| StoreError::Full)
        }

        fn save(&mut self, records: &[PointRecord]) -> Result<(), StoreError> {
            self.saved = records.to_vec();
            Ok(())
        }
    }

    fn layout() -> CourseLayout {
        CourseLayout::from_names(&["Start", "Ramp"]).unwrap()
    }

    #[test]
    fn test_records_confirmed_fixes_in_order() {
        let mut pose = ScriptedPose::new(&[
            Pose::INVALID,
            Pose::new(1.0, 2.0, 0.0),
            Pose::new(1.5, 2.0, 10.0),
            Pose::new(20.0, 30.0, 90.0),
        ]);
        let mut clock = ManualClock::new();
        let mut prompts = std::vec::Vec::new();

        let records = record_waypoints(&layout(), &mut pose, &mut clock, |name, fix| {
            prompts.push((std::string::String::from(name), fix.x));
            if fix.x == 1.5 || fix.x == 20.0 {
                Confirm::Record
            } else {
                Confirm::Wait
            }
        })
        .unwrap();

        assert_eq!(
            records.as_slice(),
            &[PointRecord::new(1.5, 2.0, 10.0), PointRecord::new(20.0, 30.0, 90.0)]
        );
        // the invalid reading is never offered
        assert_eq!(prompts.len(), 3);
        assert_eq!(prompts[2].0, "Ramp");
        // three samples, then a pause after each record
        assert_eq!(clock.now, 2 * 100 + 2 * 1000);
    }

    #[test]
    fn test_abort() {
        let mut pose = ScriptedPose::fixed(Pose::new(0.0, 0.0, 0.0));
        let mut clock = ManualClock::new();

        let result = record_waypoints(&layout(), &mut pose, &mut clock, |_, _| Confirm::Abort);
        assert_eq!(result, Err(RecordError::Aborted));
    }

    #[test]
    fn test_calibrate_saves_table() {
        let mut pose = ScriptedPose::fixed(Pose::new(4.0, 5.0, 180.0));
        let mut clock = ManualClock::new();
        let mut store = MemoryStore::default();

        let records =
            calibrate(&layout(), &mut pose, &mut clock, &mut store, |_, _| Confirm::Record).unwrap();

        assert_eq!(pose.initialized, 1);
        assert_eq!(records.len(), 2);
        assert_eq!(store.saved.as_slice(), records.as_slice());
    }
}
