mod app;
mod controls;
mod scene;

use anyhow::{bail, Result};
use winit::dpi::LogicalSize;

use stereolace_engine::compositor::InterlaceMode;
use stereolace_engine::device::GpuInit;
use stereolace_engine::logging::{init_logging, LoggingConfig};
use stereolace_engine::orientation::RotationMode;
use stereolace_engine::pipeline::StereoConfig;
use stereolace_engine::window::{Runtime, RuntimeConfig};

use crate::app::StudioApp;

const USAGE: &str = "usage: stereolace-studio [--vertical] [--euler] [--separation <units>]";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = parse_args(std::env::args().skip(1))?;
    log::info!(
        "controls: WASD move, Space/Shift up/down, F boost, Q/E roll, Z/C yaw, \
         arrows look, click to grab mouse, Esc release/quit, R reset, T interlace"
    );

    Runtime::run(
        RuntimeConfig {
            title: "Stereolace Studio".to_string(),
            initial_size: LogicalSize::new(1280.0, 800.0),
        },
        GpuInit::default(),
        StudioApp::new(config),
    )
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<StereoConfig> {
    let mut config = StereoConfig::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--vertical" => config.interlace_mode = InterlaceMode::Vertical,
            "--euler" => config.rotation_mode = RotationMode::Euler,
            "--separation" => {
                let Some(value) = args.next() else { bail!("--separation needs a value\n{USAGE}") };
                config.interocular_distance = value.parse()?;
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument {other:?}\n{USAGE}"),
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse_args(args(&["--vertical", "--euler", "--separation", "0.1"])).unwrap();
        assert_eq!(config.interlace_mode, InterlaceMode::Vertical);
        assert_eq!(config.rotation_mode, RotationMode::Euler);
        assert_eq!(config.interocular_distance, 0.1);
    }

    #[test]
    fn unknown_flag_is_an_error() {
        assert!(parse_args(args(&["--sideways"])).is_err());
        assert!(parse_args(args(&["--separation"])).is_err());
    }
}
