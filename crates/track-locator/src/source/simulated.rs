//! Simulated train run along a list of waypoints.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::types::{Coordinate, FixProvenance, LocatorError, PositionFix, Result};
use crate::source::LocationSource;
use crate::spatial::{haversine_distance, initial_bearing};

/// Meters per degree of latitude, for turning jitter into degrees
const METERS_PER_DEGREE: f64 = 111_320.0;

struct RunState {
    rng: StdRng,
    leg: usize,
    progress_m: f64,
}

/// Moves at constant speed along the waypoints, wrapping to the start at
/// the end, and adds receiver-like noise to every fix.
///
/// Each call to [`next_fix`](LocationSource::next_fix) advances the run by
/// `step_s` seconds regardless of wall-clock time.
pub struct SimulatedSource {
    waypoints: Vec<Coordinate>,
    speed_mps: f64,
    step_s: f64,
    state: Mutex<RunState>,
}

impl SimulatedSource {
    pub fn new(waypoints: Vec<Coordinate>, speed_mps: f64, step_s: f64, seed: u64) -> Result<Self> {
        if waypoints.len() < 2 {
            return Err(LocatorError::InvalidData(
                "simulated run needs at least two waypoints".into(),
            ));
        }
        if !speed_mps.is_finite() || speed_mps < 0.0 || !step_s.is_finite() || step_s <= 0.0 {
            return Err(LocatorError::InvalidData(format!(
                "invalid simulated speed {speed_mps} m/s or step {step_s} s"
            )));
        }

        Ok(Self {
            waypoints,
            speed_mps,
            step_s,
            state: Mutex::new(RunState {
                rng: StdRng::seed_from_u64(seed),
                leg: 0,
                progress_m: 0.0,
            }),
        })
    }

    fn leg(&self, index: usize) -> (Coordinate, Coordinate) {
        let from = self.waypoints[index];
        let to = self.waypoints[(index + 1) % self.waypoints.len()];
        (from, to)
    }

    fn advance(&self, timestamp_ms: i64) -> PositionFix {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let (from, to) = self.leg(state.leg);
        let leg_length = haversine_distance(from, to);

        // Linear interpolation in degrees is close enough over a few km
        let t = if leg_length > 0.0 {
            (state.progress_m / leg_length).min(1.0)
        } else {
            1.0
        };
        let on_track = Coordinate::new(
            from.latitude + (to.latitude - from.latitude) * t,
            from.longitude + (to.longitude - from.longitude) * t,
        );

        let accuracy_m: f64 = state.rng.random_range(3.0..15.0);
        let north_m = state.rng.random_range(-accuracy_m..accuracy_m);
        let east_m = state.rng.random_range(-accuracy_m..accuracy_m);
        let lat_scale = on_track.latitude.to_radians().cos().max(1e-6);
        let coordinate = Coordinate::new(
            (on_track.latitude + north_m / METERS_PER_DEGREE).clamp(-90.0, 90.0),
            on_track.longitude + east_m / (METERS_PER_DEGREE * lat_scale),
        );

        state.progress_m += self.speed_mps * self.step_s;
        if state.progress_m >= leg_length {
            state.progress_m -= leg_length;
            state.leg = (state.leg + 1) % self.waypoints.len();
        }

        PositionFix::new(coordinate, accuracy_m, timestamp_ms)
            .with_speed(self.speed_mps)
            .with_heading(initial_bearing(from, to))
            .with_provenance(FixProvenance::Simulated)
    }
}

impl LocationSource for SimulatedSource {
    fn next_fix<'a>(&'a self) -> Pin<Box<dyn Future<Output = Result<PositionFix>> + Send + 'a>> {
        Box::pin(async move { Ok(self.advance(chrono::Utc::now().timestamp_millis())) })
    }
}
