use clap::ValueEnum;
use serde::{Serialize, Serializer};
use std::time::Duration;

use crate::command_line::CommandLine;

/// Long enough for a key set with `px 5000` to have expired.
pub const EXPIRY_PAUSE: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    Run {
        command: CommandLine,
    },
    Pause {
        #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
        duration: Duration,
    },
}

impl Step {
    pub fn run(command: &str) -> Self {
        Step::Run {
            command: CommandLine::parse(command),
        }
    }

    pub fn pause(duration: Duration) -> Self {
        Step::Pause { duration }
    }
}

pub(crate) fn serialize_millis<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScriptName {
    /// PING, SET/GET and a SET with expiry observed across a pause
    Basic,
    /// The basic script plus ECHO, CONFIG GET and KEYS
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Script {
    pub name: String,
    pub steps: Vec<Step>,
}

pub fn builtin(name: ScriptName) -> Script {
    let mut steps = vec![
        Step::run("PING"),
        Step::run("SET foo bar"),
        Step::run("GET foo"),
        Step::run("SET test123 gonsnoig px 5000"),
        Step::run("GET test123"),
        Step::pause(EXPIRY_PAUSE),
        Step::run("GET test123"),
    ];

    let label = match name {
        ScriptName::Basic => "basic",
        ScriptName::Full => {
            steps.extend([
                Step::run("ECHO hey"),
                Step::run("CONFIG GET dir"),
                Step::run("CONFIG GET dbfilename"),
                Step::run("KEYS *"),
            ]);
            "full"
        }
    };

    Script {
        name: label.to_string(),
        steps,
    }
}

/// An explicit `--script` wins, then steps from the config file, then `basic`.
pub fn resolve(requested: Option<ScriptName>, config_steps: &[Step]) -> Script {
    match requested {
        Some(name) => builtin(name),
        None if !config_steps.is_empty() => Script {
            name: "config".to_string(),
            steps: config_steps.to_vec(),
        },
        None => builtin(ScriptName::Basic),
    }
}
