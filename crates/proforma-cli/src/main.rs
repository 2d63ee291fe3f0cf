use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;

use proforma_cli::commands::Session;
use proforma_cli::config;

#[derive(Parser)]
#[command(name = "proforma", about = "Structured report questionnaires")]
struct Cli {
    /// Instance directory (overrides the configured one)
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the assembled report
    Report {
        id: String,
        /// Strip bold/underline markup
        #[arg(long)]
        plain: bool,
    },
    /// Print answered/reachable question counts
    Progress { id: String },
    /// Print the filled-in view: reachable, non-hidden questions
    Outline { id: String },
    /// List selection entries that no longer fit the tree
    Check { id: String },
    /// Export the report to .docx, or plain text for any other extension
    Export {
        id: String,
        #[arg(long)]
        out: PathBuf,
        /// Skip the unanswered-important-questions confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Render the report through a Tera template
    Render {
        id: String,
        #[arg(long)]
        template: Option<PathBuf>,
    },
    /// Set or clear the conclusion flag on the option at a tree path
    Conclusion {
        id: String,
        /// Dotted path, e.g. 0.options.1
        #[arg(long)]
        path: String,
        #[arg(long, conflicts_with = "off")]
        on: bool,
        #[arg(long)]
        off: bool,
    },
    /// Show the config file location, writing defaults with --init
    Config {
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut session = Session::new(config::load_config()?);
    if let Some(dir) = cli.dir {
        session = session.with_instances_dir(dir);
    }

    match cli.command {
        Command::Report { id, plain } => session.report(&id, plain),
        Command::Progress { id } => session.progress(&id),
        Command::Outline { id } => session.outline(&id),
        Command::Check { id } => session.check(&id),
        Command::Export { id, out, yes } => session.export(&id, &out, yes),
        Command::Render { id, template } => session.render(&id, template.as_deref()),
        Command::Conclusion { id, path, on, off } => {
            if on == off {
                return Err(eyre::eyre!("pass exactly one of --on or --off"));
            }
            session.set_conclusion(&id, &path, on)
        }
        Command::Config { init } => session.show_config(init),
    }
}
