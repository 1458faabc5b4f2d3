use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::{ClientConfig, ClientOverrides, Config, StepConfig};
use crate::script::{builtin, ScriptName};

#[derive(Debug, Serialize)]
pub struct InitResult {
    pub config_path: PathBuf,
    pub client: ClientConfig,
    pub steps: usize,
}

/// Writes a config seeded with the basic script so it can be edited in place.
pub fn cmd_init(overrides: &ClientOverrides, config_path: &Path, force: bool) -> Result<InitResult> {
    let client = ClientConfig::default().with_overrides(overrides);
    let steps: Vec<StepConfig> = builtin(ScriptName::Basic)
        .steps
        .iter()
        .map(StepConfig::from)
        .collect();

    let config = Config {
        client: client.clone(),
        steps,
    };
    crate::config::write_config_atomic(config_path, &config, force)?;
    tracing::info!(path = %config_path.display(), "config written");

    Ok(InitResult {
        config_path: config_path.to_path_buf(),
        client,
        steps: config.steps.len(),
    })
}

pub fn format_init_human(result: &InitResult) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Config written to {}", result.config_path.display()));
    lines.push(format!("Client: {}", result.client.program));
    if let Some(host) = &result.client.host {
        lines.push(format!("Host: {}", host));
    }
    if let Some(port) = result.client.port {
        lines.push(format!("Port: {}", port));
    }
    lines.push(format!("Steps: {}", result.steps));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::Step;

    #[test]
    fn cmd_init_creates_config_file() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config").join("config.toml");

        let result = cmd_init(&ClientOverrides::default(), &config_path, false).unwrap();
        assert_eq!(result.config_path, config_path);
        assert_eq!(result.client.program, "redis-cli");
        assert_eq!(result.steps, 7);
        assert!(config_path.exists());

        // Verify it's valid TOML that can be parsed back
        let loaded = crate::config::load_config(&config_path).unwrap();
        assert_eq!(loaded.steps, builtin(ScriptName::Basic).steps);
        assert!(loaded
            .steps
            .iter()
            .any(|s| matches!(s, Step::Pause { .. })));
    }

    #[test]
    fn cmd_init_records_overrides() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.toml");
        let overrides = ClientOverrides {
            program: Some("valkey-cli".to_string()),
            host: Some("db.internal".to_string()),
            port: Some(6380),
        };

        let result = cmd_init(&overrides, &config_path, false).unwrap();
        let text = format_init_human(&result);
        assert!(text.contains("Client: valkey-cli"));
        assert!(text.contains("Host: db.internal"));
        assert!(text.contains("Port: 6380"));

        let loaded = crate::config::load_config(&config_path).unwrap();
        assert_eq!(loaded.client.runner().base_args, ["-h", "db.internal", "-p", "6380"]);
    }

    #[test]
    fn cmd_init_without_force_errors_on_existing_config() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.toml");

        cmd_init(&ClientOverrides::default(), &config_path, false).unwrap();
        let result = cmd_init(&ClientOverrides::default(), &config_path, false);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }

    #[test]
    fn cmd_init_force_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = tmp.path().join("config.toml");

        cmd_init(&ClientOverrides::default(), &config_path, false).unwrap();
        let overrides = ClientOverrides {
            port: Some(7000),
            ..ClientOverrides::default()
        };
        cmd_init(&overrides, &config_path, true).unwrap();

        let loaded = crate::config::load_config(&config_path).unwrap();
        assert_eq!(loaded.client.port, Some(7000));
    }
}
