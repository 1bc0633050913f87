use anyhow::Result;

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::translation::HttpTranslationClient;

pub struct LanguagesOptions {
    pub endpoint: Option<String>,
}

/// Queries the backend for its supported languages and prints them.
pub async fn run_languages(options: LanguagesOptions) -> Result<()> {
    let file_config = ConfigManager::new().load().unwrap_or_default();
    let config = resolve_config(
        &ResolveOptions {
            endpoint: options.endpoint,
            workers: None,
        },
        &file_config,
    )?;

    let client = HttpTranslationClient::new(config.endpoint, config.api_key);
    let languages = client.list_languages().await?;

    if languages.is_empty() {
        println!("The backend reported no languages.");
        return Ok(());
    }

    println!("Available languages:");
    for language in languages {
        match language.name {
            Some(name) => println!("  {:<8} {name}", language.code),
            None => println!("  {}", language.code),
        }
    }

    Ok(())
}
