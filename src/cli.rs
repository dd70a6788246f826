//! Command-line interface implementation for blade.
//! Provides argument parsing and help text formatting using clap.

use clap::{error::ErrorKind, CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

use crate::generator::ProjectRequest;
use crate::template::{BuildFlavor, TemplateKind};

/// Command-line arguments structure for blade.
#[derive(Parser, Debug)]
#[command(author, version, about = "Blade: project scaffolding and API migration checks", long_about = None)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Settings file; defaults to blade.json, blade.yml or blade.yaml in the current directory
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a project from the template archive
    Create(CreateArgs),
    /// Report usages of APIs removed or moved by the upgrade
    Migrate(MigrateArgs),
}

#[derive(clap::Args, Debug)]
pub struct CreateArgs {
    /// Directory where the project will be created
    #[arg(value_name = "WORK_DIR")]
    pub work_dir: PathBuf,

    /// Kind of project to create
    #[arg(short, long, value_enum)]
    pub template: TemplateKind,

    /// Build tool of the project [default: gradle, or the configured build]
    #[arg(short, long, value_enum)]
    pub build: Option<BuildFlavor>,

    /// Project name
    #[arg(short, long)]
    pub name: String,

    /// Main class name; defaults to the capitalized project name
    #[arg(long)]
    pub classname: Option<String>,

    /// Fully qualified name of the service to implement or wrap
    /// (required by the service and servicewrapper templates)
    #[arg(short, long)]
    pub service: Option<String>,

    /// Root package of the generated service builder classes
    /// (required by the servicebuilder template)
    #[arg(short, long = "package")]
    pub package_name: Option<String>,

    /// Template archive to read instead of the bundled one
    #[arg(long, value_name = "ARCHIVE")]
    pub templates: Option<PathBuf>,

    /// Only replace files older than their template
    #[arg(long)]
    pub no_overwrite: bool,
}

impl From<&CreateArgs> for ProjectRequest {
    fn from(args: &CreateArgs) -> Self {
        ProjectRequest {
            work_dir: args.work_dir.clone(),
            template: args.template,
            build: args.build,
            name: args.name.clone(),
            class_name: args.classname.clone(),
            service: args.service.clone(),
            package_name: args.package_name.clone(),
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct MigrateArgs {
    /// Files or directories to check
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Print the problems as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if required arguments are missing
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument
                || e.kind() == ErrorKind::MissingSubcommand
            {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
