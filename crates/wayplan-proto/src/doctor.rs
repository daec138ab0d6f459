use anyhow::{Context, Result};

use crate::mission::{Mission, Waypoint};

pub fn check_waypoint(wp: &Waypoint) -> Result<()> {
    anyhow::ensure!(wp.latitude.abs() <= 90.0, "lat {} outside -90..=90", wp.latitude);
    anyhow::ensure!(wp.longitude.abs() <= 180.0, "long {} outside -180..=180", wp.longitude);
    anyhow::ensure!((-180..=180).contains(&wp.heading), "heading {} outside -180..=180", wp.heading);
    anyhow::ensure!(wp.action_timeout_seconds >= 0, "actionTimeoutInSeconds {} is negative", wp.action_timeout_seconds);
    anyhow::ensure!(wp.altitude.is_finite(), "altitude is not finite");
    anyhow::ensure!(wp.speed.is_finite() && wp.speed >= 0.0, "speed {} invalid", wp.speed);
    anyhow::ensure!(wp.gimbal_pitch.is_finite(), "gimbalPitch is not finite");
    anyhow::ensure!(
        wp.shoot_photo_distance_interval.is_finite() && wp.shoot_photo_distance_interval >= 0.0,
        "shootPhotoDistanceInterval {} invalid",
        wp.shoot_photo_distance_interval
    );
    Ok(())
}

/// Fails on the first waypoint that breaks a range invariant.
pub fn check_mission(mission: &Mission) -> Result<()> {
    for (i, wp) in mission.iter().enumerate() {
        check_waypoint(wp).with_context(|| format!("waypoint #{}", i))?;
    }
    Ok(())
}
