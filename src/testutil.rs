#![cfg(test)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        std::fs::create_dir_all(dir.path().join("bin")).unwrap();
        std::fs::create_dir_all(dir.path().join("store")).unwrap();
        std::fs::create_dir_all(dir.path().join("config")).unwrap();
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn store_dir(&self) -> PathBuf {
        self.dir.path().join("store")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config").join("config.toml")
    }

    /// Writes an executable `/bin/sh` script named `name` and returns its path.
    #[cfg(unix)]
    pub fn fake_client(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = self.dir.path().join("bin").join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}", body)).expect("failed to write fake client");
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("failed to chmod fake client");
        path
    }

    /// A stand-in for `redis-cli` that keeps keys as files under `store_dir()`.
    /// Missing keys print an empty line, like `redis-cli` does for nil when
    /// stdout is not a terminal.
    #[cfg(unix)]
    pub fn redis_like_client(&self) -> PathBuf {
        let body = format!(
            r#"store="{store}"
while [ "$1" = "-h" ] || [ "$1" = "-p" ]; do shift 2; done
case "$1" in
  PING) echo PONG ;;
  ECHO) echo "$2" ;;
  SET) printf '%s' "$3" > "$store/$2"; echo OK ;;
  GET) if [ -f "$store/$2" ]; then cat "$store/$2"; fi; echo ;;
  *) echo "(error) ERR unknown command '$1'" ;;
esac
"#,
            store = self.store_dir().display()
        );
        self.fake_client("redis-cli", &body)
    }

    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.config_path();
        std::fs::write(&path, contents).expect("failed to write config");
        path
    }
}
