//! Command line handling.
//!
//! ```text
//! tui-match3 [--config PATH] [--seed N]        play in the terminal
//! tui-match3 dump [--config PATH] [--seed N]   print a settled board as JSON
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};

use crate::core::GridSnapshot;
use crate::engine::{EngineConfig, TurnController};
use crate::types::Phase;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Play,
    Dump,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub mode: Mode,
    pub config_path: Option<PathBuf>,
    pub seed: Option<u32>,
}

pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let (mode, rest) = match args.first().map(String::as_str) {
        Some("dump") => (Mode::Dump, &args[1..]),
        _ => (Mode::Play, args),
    };

    let mut config_path = None;
    let mut seed = None;
    let mut i = 0usize;
    while i < rest.len() {
        match rest[i].as_str() {
            "--config" => {
                i += 1;
                let v = rest
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                config_path = Some(PathBuf::from(v));
            }
            "--seed" => {
                i += 1;
                let v = rest
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            other => bail!("unknown argument: {}", other),
        }
        i += 1;
    }

    Ok(CliArgs {
        mode,
        config_path,
        seed,
    })
}

impl CliArgs {
    /// Defaults, then the config file, then the environment, then `--seed`.
    pub fn load_config(&self) -> Result<EngineConfig> {
        self.load_config_with(|key| std::env::var(key).ok())
    }

    pub fn load_config_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<EngineConfig> {
        let mut config = match &self.config_path {
            Some(path) => read_config_file(path)?,
            None => EngineConfig::default(),
        };
        config.apply_vars(lookup);
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

pub fn read_config_file(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    EngineConfig::from_json(&text).with_context(|| format!("parsing config file {}", path.display()))
}

/// Upper bound on cascade passes before `dump` gives up.
const MAX_SETTLE_PASSES: u32 = 10_000;

/// Build a board and run it, without input, until it is stable.
pub fn dump_settled(config: EngineConfig) -> Result<GridSnapshot> {
    let step = config.move_ms.max(1) as u64;
    let mut controller = TurnController::new(config)?;
    let mut now = 0u64;
    for _ in 0..MAX_SETTLE_PASSES {
        controller.advance(now, None);
        if controller.phase() == Phase::Idle {
            return Ok(controller.grid().snapshot());
        }
        now = controller.next_ready_ms().max(now + step);
    }
    bail!("board did not settle after {} passes", MAX_SETTLE_PASSES)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_args_defaults_to_play() {
        let cli = parse_args(&[]).unwrap();
        assert_eq!(
            cli,
            CliArgs {
                mode: Mode::Play,
                config_path: None,
                seed: None
            }
        );
    }

    #[test]
    fn parse_args_dump_with_flags() {
        let cli = parse_args(&args(&["dump", "--config", "board.json", "--seed", "9"])).unwrap();
        assert_eq!(cli.mode, Mode::Dump);
        assert_eq!(cli.config_path, Some(PathBuf::from("board.json")));
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn parse_args_rejects_bad_input() {
        assert!(parse_args(&args(&["--seed"])).is_err());
        assert!(parse_args(&args(&["--seed", "-1"])).is_err());
        assert!(parse_args(&args(&["--frobnicate"])).is_err());
    }

    #[test]
    fn seed_flag_beats_environment() {
        let cli = parse_args(&args(&["--seed", "5"])).unwrap();
        let config = cli
            .load_config_with(|key| match key {
                "MATCH3_SEED" => Some("77".to_string()),
                "MATCH3_WIDTH" => Some("9".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.seed, 5);
        assert_eq!(config.width, 9);
    }

    #[test]
    fn invalid_environment_config_is_reported() {
        let cli = parse_args(&[]).unwrap();
        let err = cli
            .load_config_with(|key| (key == "MATCH3_KINDS").then(|| "0".to_string()))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("at least one tile kind"));
    }

    #[test]
    fn single_kind_environment_config_is_reported() {
        let cli = parse_args(&[]).unwrap();
        let err = cli
            .load_config_with(|key| (key == "MATCH3_KINDS").then(|| "1".to_string()))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("never settles"));
    }

    #[test]
    fn missing_config_file_names_the_path() {
        let cli = parse_args(&args(&["--config", "/nonexistent/match3.json"])).unwrap();
        let err = cli.load_config_with(|_| None).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/match3.json"));
    }

    #[test]
    fn dump_settles_the_board() {
        let snap = dump_settled(EngineConfig {
            seed: 3,
            ..EngineConfig::default()
        })
        .unwrap();
        assert_eq!(snap.exploded, 0);
        assert_eq!(snap.kinds.len(), 49);
    }
}
