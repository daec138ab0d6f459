use wayplan_proto::{Mission, Waypoint};

use crate::MissionSettings;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

pub fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat/2.0).sin().powi(2) + lat1.to_radians().cos()*lat2.to_radians().cos()*(dlon/2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0-a).sqrt());
    EARTH_RADIUS_M * c
}

/// Straight-line leg length including the altitude change.
pub fn leg_length_m(from: &Waypoint, to: &Waypoint) -> f64 {
    let ground = haversine_m(from.latitude, from.longitude, to.latitude, to.longitude);
    let climb = (to.altitude - from.altitude) as f64;
    (ground * ground + climb * climb).sqrt()
}

pub fn path_length_m(mission: &Mission) -> f64 {
    mission.waypoints().windows(2).map(|leg| leg_length_m(&leg[0], &leg[1])).sum()
}

/// Speed the aircraft flies towards `to`: the waypoint's own speed, or the
/// mission's auto speed when the waypoint leaves it at 0.
pub fn leg_speed(to: &Waypoint, settings: &MissionSettings) -> f32 {
    if to.speed > 0.0 { to.speed } else { settings.auto_flight_speed }
}

/// Rough flight time, ignoring acceleration and curved corners.
pub fn estimated_duration_s(mission: &Mission, settings: &MissionSettings) -> f64 {
    mission.waypoints().windows(2)
        .map(|leg| {
            let speed = leg_speed(&leg[1], settings) as f64;
            if speed > 0.0 { leg_length_m(&leg[0], &leg[1]) / speed } else { 0.0 }
        })
        .sum()
}
