//! Command-line argument parsing.

use clap::Parser;

use crate::camera::CameraMode;
use crate::params::RenderConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Seaglow")]
#[command(about = "Glowing procedural wave surface with a dual-mode camera rig", long_about = None)]
pub struct Args {
    /// Initial camera mode: default | debug
    #[arg(long, value_name = "MODE", default_value = "debug")]
    pub mode: String,

    /// Window width (pixels)
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, default_value_t = 720)]
    pub height: u32,

    /// Disable the debug panel overlay
    #[arg(long)]
    pub no_panel: bool,
}

impl Args {
    /// Parse the initial camera mode, falling back to debug on unknown
    /// input.
    pub fn parse_mode(&self) -> CameraMode {
        match self.mode.to_lowercase().as_str() {
            "default" => CameraMode::Default,
            "debug" => CameraMode::Debug,
            other => {
                log::warn!("unknown camera mode '{}', using debug", other);
                CameraMode::Debug
            }
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
            debug_panel: !self.no_panel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        let args = Args::parse_from(["seaglow", "--mode", "default"]);
        assert_eq!(args.parse_mode(), CameraMode::Default);

        let args = Args::parse_from(["seaglow", "--mode", "DEBUG"]);
        assert_eq!(args.parse_mode(), CameraMode::Debug);

        let args = Args::parse_from(["seaglow", "--mode", "cinematic"]);
        assert_eq!(args.parse_mode(), CameraMode::Debug);
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["seaglow"]);
        assert_eq!(args.parse_mode(), CameraMode::Debug);
        let config = args.render_config();
        assert_eq!(config.window_width, 1280);
        assert_eq!(config.window_height, 720);
        assert!(config.debug_panel);
    }

    #[test]
    fn test_no_panel_flag() {
        let args = Args::parse_from(["seaglow", "--no-panel"]);
        assert!(!args.render_config().debug_panel);
    }
}
