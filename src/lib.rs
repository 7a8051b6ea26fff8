use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use clap::{Arg, ArgAction, Command};

pub mod core;
pub mod error;
pub mod objects;
pub mod pipeline;
pub mod util;
pub mod viewport;

pub use self::core::geometry;
pub use self::core::Camera;
pub use self::core::Color;
pub use self::core::Entity;
pub use self::core::LightRig;
pub use self::core::Scene;
pub use error::OrreryError;
pub use objects::Planet;
pub use util::format_mat4;
pub use viewport::{GeometryPreset, Viewport, ViewportConfig};

#[derive(Debug, Clone, Copy)]
pub enum DisplayTarget {
    Terminal,
    Window,
}

/// Frame statistics for the window title and the log.
pub struct Metrics {
    pub last_frame: Instant,
    pub fps_counter: u32,
    pub fps_update_timer: Instant,
    pub current_fps: f32,
    pub frame_times: Vec<f32>,
    // Snapshots of the last completed window, taken at rollover so the
    // log line still has them after frame_times is cleared
    pub min_frame_ms: f32,
    pub avg_frame_ms: f32,
    pub max_frame_ms: f32,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            fps_counter: 0,
            fps_update_timer: Instant::now(),
            current_fps: 0.0,
            frame_times: Vec::with_capacity(120),
            min_frame_ms: 0.0,
            avg_frame_ms: 0.0,
            max_frame_ms: 0.0,
        }
    }

    /// Record one frame. Returns the fresh FPS figure once a second, so
    /// callers can update a title or log line on rollover only.
    pub fn update(&mut self, frame_delta: Duration) -> Option<f32> {
        self.fps_counter += 1;
        self.frame_times.push(frame_delta.as_secs_f32() * 1000.0);

        let elapsed = self.fps_update_timer.elapsed();
        if elapsed >= Duration::from_secs(1) {
            self.current_fps = self.fps_counter as f32 / elapsed.as_secs_f32();
            // Snapshot the window's frame-time stats before resetting it
            self.min_frame_ms = self
                .frame_times
                .iter()
                .copied()
                .reduce(f32::min)
                .unwrap_or(0.0);
            self.max_frame_ms = self
                .frame_times
                .iter()
                .copied()
                .reduce(f32::max)
                .unwrap_or(0.0);
            self.avg_frame_ms =
                self.frame_times.iter().sum::<f32>() / self.frame_times.len().max(1) as f32;
            self.fps_counter = 0;
            self.fps_update_timer = Instant::now();
            self.frame_times.clear();
            return Some(self.current_fps);
        }
        None
    }
}

impl Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "FPS: {:.2} | Min: {:.2}ms | Avg: {:.2}ms | Max: {:.2}ms",
            self.current_fps, self.min_frame_ms, self.avg_frame_ms, self.max_frame_ms
        )
    }
}

pub fn create_clap_command() -> Command {
    Command::new("orrery")
        .about("Software-rendered solar system viewer")
        .version("0.1")
        .subcommand(
            Command::new("render")
                .about("Render the scene in a window (minifb) or the terminal")
                .arg(
                    Arg::new("mode")
                        .short('m')
                        .long("mode")
                        .value_name("MODE")
                        .help("Display target ('terminal', 'video', 't', or 'v')")
                        .required(false)
                        .value_parser(["terminal", "video", "t", "v"]),
                )
                .arg(
                    Arg::new("width")
                        .long("width")
                        .value_name("PIXELS")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("800"),
                )
                .arg(
                    Arg::new("height")
                        .long("height")
                        .value_name("PIXELS")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("600"),
                )
                .arg(
                    Arg::new("fov")
                        .long("fov")
                        .value_name("DEGREES")
                        .help("Vertical field of view")
                        .value_parser(clap::value_parser!(f32))
                        .default_value("75"),
                )
                .arg(
                    Arg::new("rig")
                        .long("rig")
                        .value_name("RIG")
                        .help("Lighting rig preset")
                        .value_parser(["ambient", "single", "three"])
                        .default_value("single"),
                )
                .arg(
                    Arg::new("scene")
                        .long("scene")
                        .value_name("SCENE")
                        .help("Geometry preset")
                        .value_parser(["cube", "planets"])
                        .default_value("planets"),
                )
                .arg(
                    Arg::new("animate")
                        .long("animate")
                        .help("Spin the demo cube")
                        .action(ArgAction::SetTrue),
                ),
        )
}

pub fn handle_clap_matches(matches: &clap::ArgMatches) -> (DisplayTarget, ViewportConfig) {
    let mut config = ViewportConfig::default();
    let mut target = DisplayTarget::Window;

    if let Some(("render", sub_matches)) = matches.subcommand() {
        target = match sub_matches.get_one::<String>("mode").map(|s| s.as_str()) {
            Some("terminal") | Some("t") => DisplayTarget::Terminal,
            Some("video") | Some("v") | None => DisplayTarget::Window,
            Some(other) => {
                eprintln!("Invalid mode: {}. Defaulting to video.", other);
                DisplayTarget::Window
            }
        };

        config.width = *sub_matches.get_one::<usize>("width").unwrap_or(&800);
        config.height = *sub_matches.get_one::<usize>("height").unwrap_or(&600);
        config.fov = *sub_matches.get_one::<f32>("fov").unwrap_or(&75.0);
        config.animate = sub_matches.get_flag("animate");

        config.light_rig = match sub_matches.get_one::<String>("rig").map(|s| s.as_str()) {
            Some("ambient") => LightRig::AmbientOnly,
            Some("three") => LightRig::ThreePoint,
            _ => LightRig::SinglePoint,
        };

        config.geometry = match sub_matches.get_one::<String>("scene").map(|s| s.as_str()) {
            Some("cube") => GeometryPreset::DemoCube,
            _ => GeometryPreset::PlanetSystem(viewport::default_planets()),
        };
    }

    (target, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_args_build_a_config() {
        let matches = create_clap_command().get_matches_from([
            "orrery", "render", "-m", "t", "--width", "120", "--height", "40", "--rig", "three",
            "--scene", "cube", "--animate",
        ]);
        let (target, config) = handle_clap_matches(&matches);

        assert!(matches!(target, DisplayTarget::Terminal));
        assert_eq!(config.width, 120);
        assert_eq!(config.height, 40);
        assert_eq!(config.light_rig, LightRig::ThreePoint);
        assert!(matches!(config.geometry, GeometryPreset::DemoCube));
        assert!(config.animate);
    }

    #[test]
    fn rollover_reports_the_completed_window_stats() {
        let mut metrics = Metrics::new();
        for _ in 0..59 {
            assert!(metrics.update(Duration::from_millis(16)).is_none());
        }

        // Force the one-second window closed on the next frame
        metrics.fps_update_timer = Instant::now() - Duration::from_secs(2);
        assert!(metrics.update(Duration::from_millis(32)).is_some());

        // The log line carries the stats of the window that just ended,
        // not the freshly cleared accumulator
        assert!((metrics.min_frame_ms - 16.0).abs() < 0.01);
        assert!((metrics.max_frame_ms - 32.0).abs() < 0.01);
        assert!(metrics.avg_frame_ms > 16.0 && metrics.avg_frame_ms < 32.0);
        assert!(metrics.frame_times.is_empty());

        let line = metrics.to_string();
        assert!(line.contains("Min: 16.00ms"), "got: {line}");
        assert!(line.contains("Max: 32.00ms"), "got: {line}");
        assert!(line.contains("Avg:"), "got: {line}");
    }

    #[test]
    fn bare_invocation_falls_back_to_defaults() {
        let matches = create_clap_command().get_matches_from(["orrery"]);
        let (target, config) = handle_clap_matches(&matches);

        assert!(matches!(target, DisplayTarget::Window));
        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.light_rig, LightRig::SinglePoint);
        assert!(matches!(config.geometry, GeometryPreset::PlanetSystem(_)));
    }
}
