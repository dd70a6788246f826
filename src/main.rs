//! Blade's main application entry point.
//! Parses arguments, loads settings and hands the command to the registry.

use blade::{
    cli::{get_args, Args},
    commands::{CommandOutput, CommandRegistry},
    config::Settings,
    error::{default_error_handler, Result},
    logger::init_logger,
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    match run(args) {
        Ok(CommandOutput::Completed(lines)) => {
            for line in lines {
                println!("{}", line);
            }
        }
        Ok(CommandOutput::Rejected(message)) => {
            log::debug!("Command rejected its arguments");
            eprintln!("{}", message);
            std::process::exit(1);
        }
        Err(err) => default_error_handler(err),
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads settings from the settings file, if any
/// 2. Builds the command registry
/// 3. Dispatches the parsed command
fn run(args: Args) -> Result<CommandOutput> {
    let settings = Settings::load(args.config.as_deref())?;
    let registry = CommandRegistry::with_builtin(settings);
    registry.dispatch(&args.command)
}
