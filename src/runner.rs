use serde::Serialize;
use std::io::ErrorKind;
use std::process::{Command, Stdio};

use crate::command_line::CommandLine;

pub const DEFAULT_PROGRAM: &str = "redis-cli";

const RULE_WIDTH: usize = 50;

/// Result of one client invocation. Only `Success` means the client exited 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Success {
        exit_code: i32,
        output: String,
    },
    /// `exit_code` is `None` when the client was killed by a signal.
    Failure {
        exit_code: Option<i32>,
        stderr: String,
    },
    NotFound {
        program: String,
    },
    Unexpected {
        message: String,
    },
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRunner {
    pub program: String,
    /// Arguments placed before every command, e.g. `-h 127.0.0.1 -p 6379`.
    pub base_args: Vec<String>,
}

impl ClientRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            base_args: Vec::new(),
        }
    }

    pub fn with_base_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.base_args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn argv(&self, cmd: &CommandLine) -> Vec<String> {
        self.base_args
            .iter()
            .chain(cmd.tokens())
            .cloned()
            .collect()
    }

    /// Runs the client to completion with `cmd` as its arguments. Never fails;
    /// every way the invocation can go wrong is folded into the `Outcome`.
    pub fn run(&self, cmd: &CommandLine) -> Outcome {
        let args = self.argv(cmd);
        tracing::debug!(program = %self.program, ?args, "spawning client");

        let output = match Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
        {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(program = %self.program, "client not found");
                return Outcome::NotFound {
                    program: self.program.clone(),
                };
            }
            Err(e) => {
                return Outcome::Unexpected {
                    message: e.to_string(),
                }
            }
        };

        let code = output.status.code();
        tracing::debug!(
            exit_code = %code.map_or("signal".to_string(), |c| c.to_string()),
            "client exited"
        );

        if output.status.success() {
            Outcome::Success {
                exit_code: code.unwrap_or(0),
                output: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            }
        } else {
            Outcome::Failure {
                exit_code: code,
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }
        }
    }
}

pub fn format_outcome_human(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success { output, .. } => {
            format!("Command executed successfully.\nOutput: {}", output)
        }
        Outcome::Failure { stderr, .. } => format!("Error occurred:\n{}", stderr),
        Outcome::NotFound { program } => {
            format!("{} is not installed or not found in the system PATH.", program)
        }
        Outcome::Unexpected { message } => format!("An error occurred: {}", message),
    }
}

/// Frames `body` with the `TEST:` header and separator rules.
pub fn format_banner(body: &str) -> String {
    let rule = "-".repeat(RULE_WIDTH);
    format!("TEST:\n{rule}\n{body}\n{rule}")
}
