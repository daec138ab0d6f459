use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};

use wayplan_ops::sim::{check_uploadable, SimConfig, SimOperator};
use wayplan_ops::{geo, MissionManager, MissionSettings};
use wayplan_proto::{codec, doctor as mission_doctor, Mission, Sample};

#[derive(Debug, Parser)]
#[command(name = "wayplan", version, about = "wayplan - waypoint mission loader and runner")]
struct Cli {
    /// TOML config; built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check settings and, optionally, a mission file.
    Doctor {
        #[arg(long)]
        mission: Option<String>,
    },
    /// Print a built-in sample mission as JSON.
    Export {
        #[arg(long, value_enum)]
        sample: SampleArg,
        #[arg(long)]
        pretty: bool,
    },
    /// Decode a mission file and summarize it.
    Inspect { path: String },
    /// Load, upload, start and follow a mission on the simulated aircraft.
    Run {
        #[arg(long, value_enum, conflicts_with = "mission")]
        sample: Option<SampleArg>,
        #[arg(long)]
        mission: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SampleArg { M1, M2 }

impl From<SampleArg> for Sample {
    fn from(s: SampleArg) -> Self {
        match s {
            SampleArg::M1 => Sample::M1,
            SampleArg::M2 => Sample::M2,
        }
    }
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct Config {
    mission: MissionSettings,
    sim: SimConfig,
}

fn load_config(path: Option<&str>) -> Result<Config> {
    let Some(path) = path else { return Ok(Config::default()); };
    let s = std::fs::read_to_string(path).with_context(|| format!("read config {}", path))?;
    Ok(toml::from_str(&s).context("parse config toml")?)
}

fn read_mission(path: &str) -> Result<Mission> {
    let s = std::fs::read_to_string(path).with_context(|| format!("read mission {}", path))?;
    Ok(codec::decode(&s).with_context(|| format!("decode mission {}", path))?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;

    match cli.cmd {
        Command::Doctor { mission } => doctor(&cfg, mission.as_deref())?,
        Command::Export { sample, pretty } => export(sample.into(), pretty)?,
        Command::Inspect { path } => inspect(&cfg, &path)?,
        Command::Run { sample, mission } => run(&cfg, sample.map(Sample::from), mission.as_deref()).await?,
    }
    Ok(())
}

fn doctor(cfg: &Config, mission: Option<&str>) -> Result<()> {
    info!("doctor: starting");

    cfg.mission.check()?;
    anyhow::ensure!(cfg.sim.time_scale >= 0.0 && cfg.sim.time_scale.is_finite(), "sim.time_scale must be >= 0");
    if !cfg.sim.connected {
        warn!("sim.connected=false: uploads will fail");
    }

    if let Some(path) = mission {
        let m = read_mission(path)?;
        // Includes the range checks of the mission doctor.
        check_uploadable(&m, &cfg.mission).with_context(|| format!("mission {}", path))?;
        info!("doctor: mission {} OK ({} waypoints)", path, m.len());
    }

    info!("doctor: OK");
    println!("OK");
    Ok(())
}

fn export(sample: Sample, pretty: bool) -> Result<()> {
    let m = sample.load().with_context(|| format!("sample {}", sample.name()))?;
    if pretty {
        println!("{}", codec::encode_pretty(&m));
    } else {
        println!("{}", codec::encode(&m));
    }
    Ok(())
}

fn inspect(cfg: &Config, path: &str) -> Result<()> {
    let m = read_mission(path)?;
    println!("waypoints={}", m.len());
    println!("path_length_m={:.1}", geo::path_length_m(&m));
    println!("est_duration_s={:.0}", geo::estimated_duration_s(&m, &cfg.mission));
    for (i, wp) in m.iter().enumerate() {
        println!(
            "#{} lat={} long={} alt={} speed={} heading={} gimbal={} photo_every_m={} timeout_s={}",
            i, wp.latitude, wp.longitude, wp.altitude, wp.speed, wp.heading,
            wp.gimbal_pitch, wp.shoot_photo_distance_interval, wp.action_timeout_seconds
        );
    }
    if let Err(e) = mission_doctor::check_mission(&m) {
        println!("WARN: {:#}", e);
    }
    Ok(())
}

async fn run(cfg: &Config, sample: Option<Sample>, mission: Option<&str>) -> Result<()> {
    info!("run: starting");
    let mut mgr = MissionManager::new(cfg.mission.clone(), Some(SimOperator::new(cfg.sim.clone())));

    match (sample, mission) {
        (Some(s), _) => { mgr.load_sample(s)?; }
        (None, Some(path)) => {
            let s = std::fs::read_to_string(path).with_context(|| format!("read mission {}", path))?;
            mgr.load_json(&s).with_context(|| format!("decode mission {}", path))?;
        }
        (None, None) => anyhow::bail!("run needs --sample or --mission"),
    }
    println!("{}", mgr.status());

    let res = mgr.upload_mission().await;
    println!("{}", mgr.status());
    res.context("upload mission")?;

    let res = mgr.start_mission().await;
    println!("{}", mgr.status());
    res.context("start mission")?;

    // Ctrl-C stops the aircraft instead of leaving it mid-mission.
    let outcome = tokio::select! {
        res = mgr.wait_for_execution() => Some(res),
        _ = tokio::signal::ctrl_c() => None,
    };
    match outcome {
        Some(res) => {
            println!("{}", mgr.status());
            res.context("mission execution")?;
        }
        None => {
            warn!("run: interrupted, stopping mission");
            let res = mgr.stop_mission().await;
            println!("{}", mgr.status());
            res.context("stop mission")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipped_config_matches_defaults() {
        let cfg: Config = toml::from_str(include_str!("../../../config/wayplan.toml")).unwrap();
        assert_eq!(cfg.mission, MissionSettings::default());
        assert!(cfg.sim.connected);
        assert_eq!(cfg.sim.time_scale, 0.0);
    }

    #[test]
    fn empty_config_is_valid() {
        let cfg: Config = toml::from_str("").unwrap();
        cfg.mission.check().unwrap();
    }

    #[test]
    fn cli_rejects_sample_and_mission_together() {
        let res = Cli::try_parse_from(["wayplan", "run", "--sample", "m1", "--mission", "x.json"]);
        assert!(res.is_err());
    }

    #[test]
    fn doctor_reports_a_bad_waypoint_once() {
        let path = std::env::temp_dir().join(format!("wayplan-doctor-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"waypoints":[
            {"lat":37.0,"long":-122.0,"altitude":30,"speed":5,"heading":0,"gimbalPitch":0,"shootPhotoDistanceInterval":0,"actionTimeoutInSeconds":60},
            {"lat":37.001,"long":-122.0,"altitude":30,"speed":5,"heading":270,"gimbalPitch":0,"shootPhotoDistanceInterval":0,"actionTimeoutInSeconds":60}
        ]}"#)
        .unwrap();
        let res = doctor(&Config::default(), path.to_str());
        std::fs::remove_file(&path).unwrap();

        let msg = format!("{:#}", res.unwrap_err());
        assert_eq!(msg.matches("heading 270").count(), 1, "{}", msg);
        assert!(msg.contains("waypoint #1"), "{}", msg);
    }

    #[test]
    fn cli_parses_export() {
        let cli = Cli::try_parse_from(["wayplan", "export", "--sample", "m2"]).unwrap();
        assert!(matches!(cli.cmd, Command::Export { sample: SampleArg::M2, pretty: false }));
    }
}
