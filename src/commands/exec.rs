use anyhow::{bail, Result};
use serde::Serialize;

use crate::command_line::CommandLine;
use crate::runner::{format_banner, format_outcome_human, ClientRunner, Outcome};

#[derive(Debug, Serialize)]
pub struct ExecResult {
    pub command: CommandLine,
    pub outcome: Outcome,
}

/// Runs a single command through the client. Only an empty command is an
/// error; whatever the client does is reported in the outcome.
pub fn cmd_exec(runner: &ClientRunner, cmd: &CommandLine) -> Result<ExecResult> {
    if cmd.is_empty() {
        bail!("no command specified");
    }

    Ok(ExecResult {
        command: cmd.clone(),
        outcome: runner.run(cmd),
    })
}

pub fn format_exec_human(result: &ExecResult) -> String {
    format_banner(&format_outcome_human(&result.outcome))
}


#[cfg(all(test, unix))]
mod process_tests {
    use super::*;
    use crate::testutil::TestEnv;

    #[test]
    fn cmd_exec_runs_command() {
        let env = TestEnv::new();
        let runner = ClientRunner::new(env.redis_like_client().display().to_string());

        let result = cmd_exec(&runner, &CommandLine::parse("PING")).unwrap();
        assert!(result.outcome.is_success());
        assert!(format_exec_human(&result).contains("Output: PONG"));
    }

    #[test]
    fn cmd_exec_missing_client_is_reported_not_raised() {
        let env = TestEnv::new();
        let runner = ClientRunner::new(env.path().join("gone").display().to_string());

        let result = cmd_exec(&runner, &CommandLine::parse("PING")).unwrap();
        let text = format_exec_human(&result);
        assert_eq!(text.matches("not installed or not found").count(), 1);
    }

    #[test]
    fn cmd_exec_non_executable_client_is_reported_not_raised() {
        let env = TestEnv::new();
        let path = env.path().join("plain-file");
        std::fs::write(&path, "not a program").unwrap();
        let runner = ClientRunner::new(path.display().to_string());

        let result = cmd_exec(&runner, &CommandLine::parse("PING")).unwrap();
        let text = format_exec_human(&result);
        assert_eq!(text.matches("An error occurred: ").count(), 1);
    }
}
