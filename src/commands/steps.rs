use serde::Serialize;

use crate::runner::ClientRunner;
use crate::script::{Script, Step};

#[derive(Debug, Serialize)]
pub struct StepsResult {
    pub script: Script,
    pub client: ClientRunner,
}

pub fn cmd_steps(script: Script, runner: &ClientRunner) -> StepsResult {
    StepsResult {
        script,
        client: runner.clone(),
    }
}

pub fn format_steps_human(result: &StepsResult) -> String {
    let mut lines = Vec::new();
    let mut prefix = vec![result.client.program.clone()];
    prefix.extend(result.client.base_args.iter().cloned());
    lines.push(format!(
        "Script: {} ({} steps)",
        result.script.name,
        result.script.steps.len()
    ));
    for (i, step) in result.script.steps.iter().enumerate() {
        let line = match step {
            Step::Run { command } => format!("{} {}", prefix.join(" "), command),
            Step::Pause { duration } => format!("(pause {} ms)", duration.as_millis()),
        };
        lines.push(format!("  {:>2}. {}", i + 1, line));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::{builtin, ScriptName};

    #[test]
    fn lists_basic_script_with_client_prefix() {
        let runner = ClientRunner::new("redis-cli").with_base_args(["-p", "6379"]);
        let text = format_steps_human(&cmd_steps(builtin(ScriptName::Basic), &runner));
        insta::assert_snapshot!(text, @r"
        Script: basic (7 steps)
           1. redis-cli -p 6379 PING
           2. redis-cli -p 6379 SET foo bar
           3. redis-cli -p 6379 GET foo
           4. redis-cli -p 6379 SET test123 gonsnoig px 5000
           5. redis-cli -p 6379 GET test123
           6. (pause 6000 ms)
           7. redis-cli -p 6379 GET test123
        ");
    }
}
