use anyhow::{Context, Result, bail};
use std::fs;
use std::io::{self, Read};
use std::sync::Arc;

use crate::config::{ConfigManager, ResolveOptions, resolve_config};
use crate::history::{RecordWriter, SqliteHistory};
use crate::translation::{HttpTranslationClient, TranslationRequest, Translator, WorkerPool};

const MAX_INPUT_SIZE: usize = 1024 * 1024; // 1MB

// Local invocations have no remote peer; the client ip slot belongs to
// whatever front end drives the service.
const LOCAL_CLIENT_IP: &str = "127.0.0.1";

pub struct TranslateOptions {
    pub file: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub endpoint: Option<String>,
    pub workers: Option<usize>,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let file_config = ConfigManager::new().load().unwrap_or_default();
    let config = resolve_config(
        &ResolveOptions {
            endpoint: options.endpoint,
            workers: options.workers,
        },
        &file_config,
    )?;

    let from = options.from.ok_or_else(|| {
        anyhow::anyhow!(
            "Missing required option: '--from' (source language)\n\n\
             Example: wordwise --from en --to fr ./notes.txt"
        )
    })?;
    let to = options.to.ok_or_else(|| {
        anyhow::anyhow!(
            "Missing required option: '--to' (target language)\n\n\
             Example: wordwise --from en --to fr ./notes.txt"
        )
    })?;

    let text = read_input(options.file.as_deref())?;
    if text.trim().is_empty() {
        bail!("Error: Input is empty");
    }

    let backend = Arc::new(HttpTranslationClient::new(
        config.endpoint.clone(),
        config.api_key.clone(),
    ));
    let pool = WorkerPool::new(config.workers);
    let history = SqliteHistory::new(config.history_path.clone())?;
    let writer =
        RecordWriter::new(history).with_max_insert_attempts(config.max_insert_attempts);
    let translator =
        Translator::new(backend, pool, writer).with_unit_timeout(config.unit_timeout);

    let request = TranslationRequest {
        text,
        source_language: from,
        target_language: to,
    };

    let outcome = translator.translate_text(&request, LOCAL_CLIENT_IP).await?;
    println!("{}", outcome.translated_text);

    Ok(())
}

fn read_input(file_path: Option<&str>) -> Result<String> {
    file_path.map_or_else(read_stdin, read_file)
}

fn read_file(path: &str) -> Result<String> {
    let metadata = fs::metadata(path).with_context(|| format!("Failed to access file: {path}"))?;

    if metadata.len() as usize > MAX_INPUT_SIZE {
        bail!(
            "Error: Input size ({:.1} MB) exceeds maximum allowed size (1 MB).",
            metadata.len() as f64 / 1024.0 / 1024.0
        );
    }

    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .lock()
        .take(MAX_INPUT_SIZE as u64 + 1)
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;

    if buffer.len() > MAX_INPUT_SIZE {
        bail!("Error: Input size exceeds maximum allowed size (1 MB).");
    }

    Ok(buffer)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_input_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "hello world").unwrap();

        let text = read_input(Some(temp_file.path().to_str().unwrap())).unwrap();
        assert_eq!(text, "hello world");
    }

    #[test]
    fn test_read_input_missing_file() {
        assert!(read_input(Some("/nonexistent/input.txt")).is_err());
    }

    #[test]
    fn test_read_file_rejects_oversized_input() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(&vec![b'x'; MAX_INPUT_SIZE + 1])
            .unwrap();

        let result = read_input(Some(temp_file.path().to_str().unwrap()));
        assert!(result.unwrap_err().to_string().contains("exceeds maximum"));
    }
}
