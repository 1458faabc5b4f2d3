use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::command_line::CommandLine;
use crate::runner::{format_banner, format_outcome_human, ClientRunner, Outcome};
use crate::script::{serialize_millis, Script, Step};

/// Blocks the driver between steps. Tests substitute a recorder.
pub trait Pause {
    fn pause(&mut self, duration: Duration);
}

pub struct ThreadSleep;

impl Pause for ThreadSleep {
    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub script: String,
    pub client: ClientRunner,
    pub steps: Vec<StepReport>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepReport {
    Run {
        command: CommandLine,
        started_at: DateTime<Utc>,
        elapsed_ms: u64,
        outcome: Outcome,
    },
    Pause {
        started_at: DateTime<Utc>,
        #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
        duration: Duration,
    },
}

/// Executes `script` in order, handing each finished step to `on_step` before
/// moving on. Client failures never stop the run.
pub fn cmd_run(
    script: &Script,
    runner: &ClientRunner,
    pause: &mut dyn Pause,
    on_step: &mut dyn FnMut(&StepReport),
) -> RunReport {
    let mut steps = Vec::with_capacity(script.steps.len());

    for step in &script.steps {
        let started_at = Utc::now();
        let report = match step {
            Step::Run { command } => {
                let clock = Instant::now();
                let outcome = runner.run(command);
                StepReport::Run {
                    command: command.clone(),
                    started_at,
                    elapsed_ms: clock.elapsed().as_millis() as u64,
                    outcome,
                }
            }
            Step::Pause { duration } => {
                tracing::info!(duration_ms = duration.as_millis() as u64, "pausing");
                pause.pause(*duration);
                StepReport::Pause {
                    started_at,
                    duration: *duration,
                }
            }
        };
        on_step(&report);
        steps.push(report);
    }

    tracing::debug!(
        succeeded = steps
            .iter()
            .filter(|s| matches!(s, StepReport::Run { outcome, .. } if outcome.is_success()))
            .count(),
        "run finished"
    );

    RunReport {
        script: script.name.clone(),
        client: runner.clone(),
        steps,
    }
}

/// Human rendering of one step. Pauses print nothing.
pub fn format_step_human(step: &StepReport) -> String {
    match step {
        StepReport::Run { outcome, .. } => format_banner(&format_outcome_human(outcome)),
        StepReport::Pause { .. } => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_step_renders_nothing() {
        let step = StepReport::Pause {
            started_at: Utc::now(),
            duration: Duration::from_secs(6),
        };
        assert_eq!(format_step_human(&step), "");
    }

    #[test]
    fn run_step_renders_failure_inside_banner() {
        let step = StepReport::Run {
            command: CommandLine::parse("GET"),
            started_at: Utc::now(),
            elapsed_ms: 1,
            outcome: Outcome::Failure {
                exit_code: Some(1),
                stderr: "ERR wrong number of arguments\n".to_string(),
            },
        };
        assert_eq!(
            format_step_human(&step),
            "TEST:\n--------------------------------------------------\n\
             Error occurred:\nERR wrong number of arguments\n\n\
             --------------------------------------------------"
        );
    }
}
