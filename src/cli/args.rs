use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "wordwise")]
#[command(about = "Concurrent word-by-word translation with a local history log")]
#[command(version)]
pub struct Args {
    /// File to translate (reads from stdin if not provided)
    pub file: Option<String>,

    /// Source language code (e.g., en)
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target language code (e.g., fr)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Translation backend endpoint URL
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// Concurrent backend calls
    #[arg(short = 'w', long)]
    pub workers: Option<usize>,

    /// Log debug detail to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List languages the backend can translate
    Languages,
    /// Show recently recorded translations
    History {
        /// Number of records to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },
}
