mod cli;
mod command_line;
mod commands;
mod config;
mod logging;
mod runner;
mod script;
mod testutil;

use anyhow::Result;
use clap::Parser;
use cli::{ClientArgs, Cli, Command};
use command_line::CommandLine;
use config::ClientOverrides;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Command::Run {
        script: None,
        client: ClientArgs::default(),
    });

    match command {
        Command::Run { script, client } => {
            let config = config::load(cli.config.as_deref())?;
            let runner = config
                .client
                .with_overrides(&ClientOverrides::from(client))
                .runner();
            let script = script::resolve(script, &config.steps);
            tracing::debug!(script = %script.name, steps = script.steps.len(), "starting run");

            let json = cli.json;
            let report = commands::cmd_run(
                &script,
                &runner,
                &mut commands::ThreadSleep,
                &mut |step| {
                    if !json {
                        let text = commands::format_step_human(step);
                        if !text.is_empty() {
                            println!("{}", text);
                        }
                    }
                },
            );
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
        Command::Exec { client, cmd } => {
            let config = config::load(cli.config.as_deref())?;
            let runner = config
                .client
                .with_overrides(&ClientOverrides::from(client))
                .runner();
            let result = commands::cmd_exec(&runner, &CommandLine::from_tokens(&cmd))?;
            output(&result, cli.json, commands::format_exec_human)?;
        }
        Command::Script { script, client } => {
            let config = config::load(cli.config.as_deref())?;
            let runner = config
                .client
                .with_overrides(&ClientOverrides::from(client))
                .runner();
            let script = script::resolve(script, &config.steps);
            let result = commands::cmd_steps(script, &runner);
            output(&result, cli.json, commands::format_steps_human)?;
        }
        Command::Init {
            client,
            force,
            show_path,
        } => {
            let config_path = match cli.config {
                Some(path) => path,
                None => config::default_config_path()?,
            };
            if show_path {
                println!("{}", config_path.display());
                return Ok(());
            }

            let result = commands::cmd_init(&ClientOverrides::from(client), &config_path, force)?;
            output(&result, cli.json, commands::format_init_human)?;
        }
    }
    Ok(())
}

fn output<T: serde::Serialize>(result: &T, json: bool, human_fn: fn(&T) -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        let text = human_fn(result);
        if !text.is_empty() {
            println!("{}", text);
        }
    }
    Ok(())
}
