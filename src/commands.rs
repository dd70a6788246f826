//! Command registry.
//! Maps command names to handlers; the built-in set is registered once at startup.

use indexmap::IndexMap;
use log::debug;

use crate::cli::{Command, CreateArgs, MigrateArgs};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::generator::{Outcome, ProjectGenerator, ProjectRequest};
use crate::migration::{builtin_rules, Migrator};

/// Registered name of the project generator
pub const CREATE_PROJECT: &str = "createProject";

/// Registered name of the migration check
pub const MIGRATE: &str = "migrate";

impl Command {
    /// Name the command is registered under.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create(_) => CREATE_PROJECT,
            Command::Migrate(_) => MIGRATE,
        }
    }
}

/// What a command reports back to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Lines to print on success
    Completed(Vec<String>),
    /// The command refused its input; the message explains why
    Rejected(String),
}

type Handler = Box<dyn Fn(&Command) -> Result<CommandOutput>>;

/// Mapping from command name to handler.
#[derive(Default)]
pub struct CommandRegistry {
    handlers: IndexMap<&'static str, Handler>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `createProject` and `migrate`.
    pub fn with_builtin(settings: Settings) -> Self {
        let mut registry = Self::new();
        registry.register(CREATE_PROJECT, move |command| match command {
            Command::Create(args) => create_project(&settings, args),
            other => Err(Error::UnknownCommand(other.name().to_string())),
        });
        registry.register(MIGRATE, |command| match command {
            Command::Migrate(args) => migrate(args),
            other => Err(Error::UnknownCommand(other.name().to_string())),
        });
        registry
    }

    /// Registers `handler` under `name`, replacing any previous handler.
    pub fn register<F>(&mut self, name: &'static str, handler: F)
    where
        F: Fn(&Command) -> Result<CommandOutput> + 'static,
    {
        self.handlers.insert(name, Box::new(handler));
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.keys().copied()
    }

    /// Runs the handler registered for `command`.
    ///
    /// # Errors
    /// * `Error::UnknownCommand` if nothing is registered under the command's name
    pub fn dispatch(&self, command: &Command) -> Result<CommandOutput> {
        let name = command.name();
        let handler =
            self.handlers.get(name).ok_or_else(|| Error::UnknownCommand(name.to_string()))?;
        debug!("Dispatching {}", name);
        handler(command)
    }
}

fn create_project(settings: &Settings, args: &CreateArgs) -> Result<CommandOutput> {
    let generator = ProjectGenerator::new(args.templates.clone())
        .with_configured_archive(settings.templates.clone())
        .with_default_build(settings.build)
        .with_overwrite(settings.overwrite && !args.no_overwrite);
    let request = ProjectRequest::from(args);

    match generator.generate(&request)? {
        Outcome::Rejected(message) => Ok(CommandOutput::Rejected(message)),
        Outcome::Generated { files, skipped } => {
            let mut lines: Vec<String> = files
                .iter()
                .map(|file| {
                    let action = if file.substituted { "Rendered" } else { "Copied" };
                    format!("{}: '{}'", action, file.path.display())
                })
                .collect();
            if skipped > 0 {
                lines.push(format!("Kept {} up to date file(s).", skipped));
            }
            lines.push(format!(
                "Project generation completed successfully in {}.",
                request.work_dir.display()
            ));
            Ok(CommandOutput::Completed(lines))
        }
    }
}

fn migrate(args: &MigrateArgs) -> Result<CommandOutput> {
    let migrator = Migrator::new(builtin_rules())?;
    let problems = migrator.run(&args.paths)?;

    if args.json {
        let report = serde_json::to_string_pretty(&problems)?;
        return Ok(CommandOutput::Completed(vec![report]));
    }

    let mut lines: Vec<String> = problems
        .iter()
        .map(|problem| {
            format!(
                "{}:{}:{}: {} ({}) [{}]",
                problem.result.file.display(),
                problem.result.line,
                problem.result.start + 1,
                problem.title,
                problem.tickets,
                problem.result.symbol
            )
        })
        .collect();
    lines.push(format!("Found {} problem(s).", problems.len()));
    Ok(CommandOutput::Completed(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_builtin_names() {
        let registry = CommandRegistry::with_builtin(Settings::default());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec![CREATE_PROJECT, MIGRATE]);
    }

    #[test]
    fn test_unknown_command() {
        let registry = CommandRegistry::new();
        let command =
            Command::Migrate(MigrateArgs { paths: vec![PathBuf::from(".")], json: false });
        match registry.dispatch(&command) {
            Err(Error::UnknownCommand(name)) => assert_eq!(name, MIGRATE),
            other => panic!("Expected UnknownCommand, got {:?}", other),
        }
    }

    #[test]
    fn test_registered_handler_replaces_previous() {
        let mut registry = CommandRegistry::with_builtin(Settings::default());
        registry.register(MIGRATE, |_| Ok(CommandOutput::Rejected("disabled".to_string())));
        let command = Command::Migrate(MigrateArgs { paths: vec![], json: false });
        assert_eq!(
            registry.dispatch(&command).unwrap(),
            CommandOutput::Rejected("disabled".to_string())
        );
        assert_eq!(registry.names().count(), 2);
    }
}
