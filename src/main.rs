use anyhow::Result;
use clap::Parser;

use wordwise::cli::commands::{history, languages, translate};
use wordwise::cli::{Args, Command};
use wordwise::logging;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init(if args.verbose { "debug" } else { "warn" });

    match args.command {
        Some(Command::Languages) => {
            let options = languages::LanguagesOptions {
                endpoint: args.endpoint,
            };
            languages::run_languages(options).await?;
        }
        Some(Command::History { limit }) => {
            history::run_history(limit)?;
        }
        None => {
            let options = translate::TranslateOptions {
                file: args.file,
                from: args.from,
                to: args.to,
                endpoint: args.endpoint,
                workers: args.workers,
            };
            translate::run_translate(options).await?;
        }
    }

    Ok(())
}
