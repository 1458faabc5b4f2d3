use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::runner::{ClientRunner, DEFAULT_PROGRAM};
use crate::script::Step;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            host: None,
            port: None,
            args: Vec::new(),
        }
    }
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause_ms: Option<u64>,
}

impl From<&Step> for StepConfig {
    fn from(step: &Step) -> Self {
        match step {
            Step::Run { command } => StepConfig {
                command: Some(command.to_string()),
                pause_ms: None,
            },
            Step::Pause { duration } => StepConfig {
                command: None,
                pause_ms: Some(duration.as_millis() as u64),
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResolvedConfig {
    pub client: ClientConfig,
    pub steps: Vec<Step>,
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ClientOverrides {
    pub program: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl ClientConfig {
    pub fn with_overrides(mut self, overrides: &ClientOverrides) -> Self {
        if let Some(program) = &overrides.program {
            self.program = program.clone();
        }
        if let Some(host) = &overrides.host {
            self.host = Some(host.clone());
        }
        if let Some(port) = overrides.port {
            self.port = Some(port);
        }
        self
    }

    pub fn runner(&self) -> ClientRunner {
        let mut base_args = Vec::new();
        if let Some(host) = &self.host {
            base_args.push("-h".to_string());
            base_args.push(host.clone());
        }
        if let Some(port) = self.port {
            base_args.push("-p".to_string());
            base_args.push(port.to_string());
        }
        base_args.extend(self.args.iter().cloned());
        ClientRunner::new(self.program.clone()).with_base_args(base_args)
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let proj = directories::ProjectDirs::from("", "", "redis-smoke")
        .context("could not determine config directory")?;
    Ok(proj.config_dir().join("config.toml"))
}

/// Loads `explicit` if given (it must exist). Otherwise loads the default
/// config file, falling back to built-in defaults when there is none.
pub fn load(explicit: Option<&Path>) -> Result<ResolvedConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                bail!("config not found at {}", path.display());
            }
            load_config(path)
        }
        None => load_default_config(),
    }
}

pub fn load_default_config() -> Result<ResolvedConfig> {
    let path = default_config_path()?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(ResolvedConfig::default());
    }
    load_config(&path)
}

pub fn load_config(path: &Path) -> Result<ResolvedConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config from {}", path.display()))?;
    parse_config(&contents).with_context(|| format!("invalid config at {}", path.display()))
}

pub fn parse_config(contents: &str) -> Result<ResolvedConfig> {
    let raw: Config = toml::from_str(contents).context("failed to parse config TOML")?;

    if raw.client.program.trim().is_empty() {
        bail!("client.program must not be empty");
    }

    let mut steps = Vec::with_capacity(raw.steps.len());
    for (i, step) in raw.steps.iter().enumerate() {
        let n = i + 1;
        let resolved = match (&step.command, step.pause_ms) {
            (Some(command), None) => {
                let step = Step::run(command);
                if matches!(&step, Step::Run { command } if command.is_empty()) {
                    bail!("step {} has a blank command", n);
                }
                step
            }
            (None, Some(ms)) => Step::pause(Duration::from_millis(ms)),
            (Some(_), Some(_)) => bail!("step {} sets both command and pause_ms", n),
            (None, None) => bail!("step {} needs either command or pause_ms", n),
        };
        steps.push(resolved);
    }

    Ok(ResolvedConfig {
        client: raw.client,
        steps,
    })
}

pub fn write_config_atomic(path: &Path, config: &Config, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "config already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }

    let content = toml::to_string_pretty(config).context("failed to serialize config")?;

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, &content)
        .with_context(|| format!("failed to write temp config to {}", tmp_path.display()))?;
    std::fs::rename(&tmp_path, path)
        .with_context(|| format!("failed to rename temp config to {}", path.display()))?;

    Ok(())
}
