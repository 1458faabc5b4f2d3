use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::ClientOverrides;
use crate::script::ScriptName;

#[derive(Parser)]
#[command(
    name = "redis-smoke",
    version,
    about = "Smoke-test a key-value server through its command-line client"
)]
pub struct Cli {
    #[arg(long, global = true)]
    pub json: bool,

    /// Log debug diagnostics to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    // None runs the configured or basic script, like `run`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a script of client commands, framing each result
    Run {
        /// Built-in script to run instead of the configured steps
        #[arg(long, value_enum)]
        script: Option<ScriptName>,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Run a single client command
    Exec {
        #[command(flatten)]
        client: ClientArgs,
        /// Command and arguments, e.g. `-- SET foo bar`. Tokens are joined and
        /// re-split on whitespace, so empty arguments are dropped
        #[arg(last = true)]
        cmd: Vec<String>,
    },
    /// Print the steps a run would execute
    Script {
        #[arg(long, value_enum)]
        script: Option<ScriptName>,
        #[command(flatten)]
        client: ClientArgs,
    },
    /// Write a config file seeded with the basic script
    Init {
        #[command(flatten)]
        client: ClientArgs,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
        /// Print config path and exit
        #[arg(long)]
        show_path: bool,
    },
}

#[derive(Args, Clone, Default)]
pub struct ClientArgs {
    /// Client executable (default: redis-cli)
    #[arg(long)]
    pub client: Option<String>,
    /// Server host, passed to the client as -h
    #[arg(long)]
    pub host: Option<String>,
    /// Server port, passed to the client as -p
    #[arg(long)]
    pub port: Option<u16>,
}

impl From<ClientArgs> for ClientOverrides {
    fn from(args: ClientArgs) -> Self {
        ClientOverrides {
            program: args.client,
            host: args.host,
            port: args.port,
        }
    }
}
