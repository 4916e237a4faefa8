use crate::commands;
use crate::log_debug;
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};

const LOG_FILE: &str = "release-herald-debug.log";

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "Release Herald: release-candidate notes and Slack approval requests",
    long_about = "Release Herald derives release-candidate notes from Git tag/commit history and posts them to a Slack channel as an interactive approval request.",
    disable_version_flag = true,
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, status messages, etc.)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Generate release-candidate notes from Git history
    #[command(
        about = "Generate release-candidate notes from Git history",
        long_about = "Derives release notes from the commits since the most recent tag, writes them to release-notes.md, and emits them as a CI step output. Configured via INPUT_VERSION."
    )]
    Notes,

    /// Post the release notes to Slack as an approval request
    #[command(
        about = "Post the release notes to Slack as an approval request",
        long_about = "Reads the release notes from the RELEASE_NOTES environment variable or release-notes.md, posts them to Slack with approve/reject/request-changes buttons, and records the posted message in slack-message-info.json. Requires SLACK_BOT_TOKEN."
    )]
    Post,
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    if cli.log {
        let _ = crate::logger::init();
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;
        if std::env::var("RELEASE_HERALD_VERBOSE").is_ok() {
            crate::logger::set_verbose_logging(true);
        }
    } else {
        crate::logger::disable_logging();
    }

    // Set quiet mode in the UI module
    if cli.quiet {
        crate::ui::set_quiet_mode(true);
    }

    if let Some(command) = cli.command {
        handle_command(command).await
    } else {
        // If no subcommand is provided, print the help
        let _ = Cli::parse_from(["release-herald", "--help"]);
        Ok(())
    }
}

/// Handle the command and dispatch to the appropriate stage
async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Notes => {
            log_debug!("Handling 'notes' command");
            commands::handle_notes_command()
        }
        Commands::Post => {
            log_debug!("Handling 'post' command");
            commands::handle_post_command().await
        }
    }
}
