use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for classclock
/// CLI application to keep a scheduled class and count down to it
#[derive(Parser)]
#[command(
    name = "classclock",
    version = env!("CARGO_PKG_VERSION"),
    about = "Keep the next class schedule in a local store and count down to its start",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Fields accepted by `set`; anything omitted keeps its current value.
#[derive(Args, Debug, Clone, Default)]
pub struct RecordArgs {
    #[arg(long = "title", help = "Class title")]
    pub title: Option<String>,

    #[arg(long = "topic", help = "Class topic")]
    pub topic: Option<String>,

    #[arg(long = "subtitle", help = "Short description shown under the title")]
    pub subtitle: Option<String>,

    #[arg(long = "date", help = "Class date (YYYY-MM-DD)")]
    pub date: Option<String>,

    #[arg(long = "start", help = "Start time (HH:MM)")]
    pub start: Option<String>,

    #[arg(long = "end", help = "End time (HH:MM)")]
    pub end: Option<String>,

    #[arg(long = "link", help = "Join link (absolute URL)")]
    pub link: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields with their default values")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Show the active class schedule
    Show {
        #[arg(long = "json", help = "Print the stored JSON record")]
        json: bool,
    },

    /// Update the class schedule (only the given fields change)
    Set {
        #[command(flatten)]
        fields: RecordArgs,

        #[arg(long = "allow-past", help = "Accept a date/time that is already past")]
        allow_past: bool,

        #[arg(long = "dry-run", help = "Validate and preview without saving")]
        dry_run: bool,
    },

    /// Restore the default class schedule
    Reset,

    /// Count down to the start of the class
    Countdown {
        #[arg(long = "once", help = "Print the current countdown and exit")]
        once: bool,

        #[arg(
            long = "follow",
            conflicts_with = "once",
            help = "Keep running and pick up schedule changes from the store"
        )]
        follow: bool,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
