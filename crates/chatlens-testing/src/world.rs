//! TestWorld pattern for CLI integration tests.
//!
//! Each world owns a temp directory holding the data dir (`.chatlens`) and
//! any input files a test writes, so tests never touch the user's data.

use anyhow::Result;
use assert_cmd::Command;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Declarative test environment.
///
/// # Example
/// ```no_run
/// use chatlens_testing::{ConversationBuilder, TestWorld};
///
/// let world = TestWorld::new().with_json_format();
/// world.run(&["agent", "add", "--user-id", "user-1", "--name", "Soporte", "--model", "gpt-4"]).unwrap();
///
/// let input = world.write_input("conv.json", &ConversationBuilder::new("c1").user("hola").to_json()).unwrap();
/// let result = world.run(&["analyze", input.to_str().unwrap()]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    format: &'static str,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".chatlens");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            data_dir,
            format: "plain",
            env_vars: HashMap::new(),
        }
    }

    /// Run commands with `--format json`.
    pub fn with_json_format(mut self) -> Self {
        self.format = "json";
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a JSON input file under the temp root and return its path.
    pub fn write_input(&self, name: &str, value: &Value) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, serde_json::to_vec_pretty(value)?)?;
        Ok(path)
    }

    /// Write an arbitrary file under the temp root and return its path.
    pub fn write_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Configure a CLI command with this world's data dir, format and env.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .arg("--format")
            .arg(self.format)
            .current_dir(self.temp_dir.path())
            .env_remove("CHATLENS_PATH")
            .env_remove("RUST_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    /// Execute the `chatlens` binary with `args`.
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        self.run_with_stdin(args, None)
    }

    /// Execute the `chatlens` binary, feeding `stdin` to it.
    #[allow(deprecated)]
    pub fn run_with_stdin(&self, args: &[&str], stdin: Option<&str>) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("chatlens")
            .map_err(|e| anyhow::anyhow!("Failed to find chatlens binary: {}", e))?;
        self.configure_command(&mut cmd);
        cmd.args(args);
        if let Some(input) = stdin {
            cmd.write_stdin(input.to_string());
        }

        let output = cmd.output()?;
        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
