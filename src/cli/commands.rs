//! Command implementations for the Thesaurize CLI.

use std::io::{self, BufRead};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;

use crate::analysis::token_filter::StopFilter;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::ThesaurizeConfig;
use crate::engine::SubstitutionEngine;
use crate::error::{Result, ThesaurizeError};
use crate::loader;
use crate::store::memory::MemoryBackend;
use crate::store::synonym::SynonymStore;

/// Execute a CLI command.
pub fn execute_command(args: ThesaurizeArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Load(load_args) => load_thesaurus(load_args.clone(), config, &args),
        Command::Transform(transform_args) => {
            transform_text(transform_args.clone(), config, &args)
        }
    }
}

/// Read the configuration file, if one was given.
fn load_config(args: &ThesaurizeArgs) -> Result<ThesaurizeConfig> {
    match &args.config {
        Some(path) => {
            log::info!("Reading configuration from {}", path.display());
            ThesaurizeConfig::from_file(path)
        }
        None => Ok(ThesaurizeConfig::default()),
    }
}

/// Create an empty store and check that it answers.
fn open_store(config: &ThesaurizeConfig) -> Result<SynonymStore> {
    let store = SynonymStore::with_config(Arc::new(MemoryBackend::new()), config.store.clone());
    store.ping()?;
    Ok(store)
}

/// Load a thesaurus and report on it.
fn load_thesaurus(
    args: LoadArgs,
    mut config: ThesaurizeConfig,
    cli_args: &ThesaurizeArgs,
) -> Result<()> {
    if let Some(batch_size) = args.batch_size {
        config.store.batch_size = batch_size;
    }
    config.filter = args.filter.resolve(config.filter.as_ref())?;
    config.validate()?;

    let store = open_store(&config)?;
    let report = loader::load(&args.data, &store, &config.loader, config.filter.as_ref())
        .with_context(|| format!("unable to load {}", args.data))?;

    output_result("Thesaurus loaded", &report, cli_args)
}

/// Load a thesaurus in the background, wait for it, then transform text.
fn transform_text(
    args: TransformArgs,
    mut config: ThesaurizeConfig,
    cli_args: &ThesaurizeArgs,
) -> Result<()> {
    if let Some(max_length) = args.max_length {
        config.codec.max_length = max_length;
    }
    config.filter = args.filter.resolve(config.filter.as_ref())?;
    config.validate()?;

    let store = open_store(&config)?;
    // Subscribe first so the notification cannot be missed.
    let ready = store.subscribe_ready()?;

    let loader_handle = {
        let store = store.clone();
        let uri = args.data.clone();
        let loader_config = config.loader.clone();
        let filter = config.filter.clone();
        thread::spawn(move || loader::load(&uri, &store, &loader_config, filter.as_ref()))
    };

    if let Err(e) = ready.wait(Duration::from_secs(args.timeout)) {
        // A failed load never publishes readiness; report why.
        if loader_handle.is_finished() {
            join_loader(loader_handle)?;
        }
        return Err(e);
    }

    let stop_filter = match &config.ignore_words {
        Some(words) => StopFilter::from_words(words.iter().cloned()),
        None => StopFilter::english(),
    };
    let engine = SubstitutionEngine::new(store)
        .with_stop_filter(stop_filter)
        .with_max_length(config.codec.max_length);

    if args.text.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line?;
            transform_one(&engine, line, args.skip_common_words, cli_args)?;
        }
    } else {
        transform_one(&engine, args.text.join(" "), args.skip_common_words, cli_args)?;
    }

    join_loader(loader_handle)?;
    Ok(())
}

fn transform_one(
    engine: &SubstitutionEngine,
    input: String,
    skip_common_words: bool,
    cli_args: &ThesaurizeArgs,
) -> Result<()> {
    let output = engine.transform(&input, skip_common_words);
    output_transform(&TransformResult { input, output }, cli_args)
}

fn join_loader(handle: thread::JoinHandle<Result<loader::LoadReport>>) -> Result<()> {
    let report = handle
        .join()
        .map_err(|_| ThesaurizeError::ThreadJoin("loader thread panicked".to_string()))??;
    log::debug!("Loader finished: {report:?}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args(command: Command) -> ThesaurizeArgs {
        ThesaurizeArgs {
            verbose: 0,
            quiet: true,
            config: None,
            output_format: OutputFormat::Json,
            pretty: false,
            command,
        }
    }

    #[test]
    fn test_load_missing_archive() {
        let cli_args = args(Command::Load(LoadArgs {
            data: "file:///nonexistent/th.zip".to_string(),
            batch_size: None,
            filter: FilterArgs::default(),
        }));

        assert!(execute_command(cli_args).is_err());
    }

    #[test]
    fn test_invalid_batch_size() {
        let cli_args = args(Command::Load(LoadArgs {
            data: "file:///nonexistent/th.zip".to_string(),
            batch_size: Some(0),
            filter: FilterArgs::default(),
        }));

        let result = execute_command(cli_args);
        assert!(matches!(result, Err(ThesaurizeError::Config(_))));
    }

    #[test]
    fn test_missing_config_file() {
        let mut cli_args = args(Command::Load(LoadArgs {
            data: "file:///nonexistent/th.zip".to_string(),
            batch_size: None,
            filter: FilterArgs::default(),
        }));
        cli_args.config = Some(PathBuf::from("/nonexistent/thesaurize.json"));

        assert!(matches!(
            execute_command(cli_args),
            Err(ThesaurizeError::Config(_))
        ));
    }
}
