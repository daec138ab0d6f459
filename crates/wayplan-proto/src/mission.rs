use serde::{Deserialize, Serialize};

/// One georeferenced point of a flight path plus the camera/gimbal settings
/// the aircraft applies when it gets there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "long")]
    pub longitude: f64,
    // meters above takeoff point
    pub altitude: f32,
    // m/s, 0 = use the mission's auto flight speed
    pub speed: f32,
    // degrees, -180..=180
    pub heading: i32,
    // degrees, -90 is straight down
    pub gimbal_pitch: f32,
    // meters between photos, 0 = no photos
    pub shoot_photo_distance_interval: f32,
    #[serde(rename = "actionTimeoutInSeconds")]
    pub action_timeout_seconds: i32,
}

impl Waypoint {
    /// Waypoint at the given coordinate with the autopilot's defaults for
    /// everything else.
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: 0.0,
            speed: 0.0,
            heading: 0,
            gimbal_pitch: 0.0,
            shoot_photo_distance_interval: 0.0,
            action_timeout_seconds: 60,
        }
    }
}

/// Ordered flight path. Waypoints can only be appended or cleared, never
/// edited in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    waypoints: Vec<Waypoint>,
}

impl Mission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, waypoint: Waypoint) {
        self.waypoints.push(waypoint);
    }

    pub fn remove_all(&mut self) {
        self.waypoints.clear();
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Waypoint> {
        self.waypoints.iter()
    }
}

impl FromIterator<Waypoint> for Mission {
    fn from_iter<I: IntoIterator<Item = Waypoint>>(iter: I) -> Self {
        Self { waypoints: iter.into_iter().collect() }
    }
}

impl Extend<Waypoint> for Mission {
    fn extend<I: IntoIterator<Item = Waypoint>>(&mut self, iter: I) {
        self.waypoints.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Mission {
    type Item = &'a Waypoint;
    type IntoIter = std::slice::Iter<'a, Waypoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.waypoints.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_flight_order() {
        let mut m = Mission::new();
        m.push(Waypoint::at(1.0, 2.0));
        m.push(Waypoint::at(3.0, 4.0));
        let lats: Vec<f64> = m.iter().map(|w| w.latitude).collect();
        assert_eq!(lats, vec![1.0, 3.0]);
    }

    #[test]
    fn remove_all_empties_mission() {
        let mut m: Mission = (0..5).map(|i| Waypoint::at(i as f64, 0.0)).collect();
        assert_eq!(m.len(), 5);
        m.remove_all();
        assert!(m.is_empty());
    }

    #[test]
    fn default_waypoint_timeout_is_one_minute() {
        assert_eq!(Waypoint::at(0.0, 0.0).action_timeout_seconds, 60);
    }
}
