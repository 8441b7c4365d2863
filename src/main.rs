use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use magento_dynamic_translate::cache::{CacheFrontend, FileCache, MemoryCache};
use magento_dynamic_translate::config::{CacheMode, Cli, Config, OutputFormat};
use magento_dynamic_translate::context::StaticContext;
use magento_dynamic_translate::csv::CsvParser;
use magento_dynamic_translate::installation::MagentoInstallation;
use magento_dynamic_translate::translate::Translate;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_cli(cli)?;
    init_logging(config.verbose);

    // Validate Magento root
    if !config.magento_root.exists() {
        bail!("Magento root not found: {}", config.magento_root.display());
    }

    let env_php = config.magento_root.join("app").join("etc").join("env.php");
    if !env_php.exists() {
        bail!(
            "Not a Magento installation: {} (app/etc/env.php not found)",
            config.magento_root.display()
        );
    }

    let installation = MagentoInstallation::discover(&config.magento_root)
        .with_context(|| format!("Failed to scan {}", config.magento_root.display()))?;

    let design = installation
        .design(config.area, config.theme.as_ref())
        .context("Failed to resolve the active theme")?;

    let cache: Arc<dyn CacheFrontend> = match &config.cache {
        CacheMode::Memory => Arc::new(MemoryCache::new()),
        CacheMode::Directory(dir) => Arc::new(FileCache::new(dir)),
    };
    if config.clean_cache {
        cache.clean().context("Failed to clean translation cache")?;
    }

    let mut context = StaticContext::new(Some(config.area), config.locale.clone(), &config.scope);
    if let Some(module) = &config.module {
        context = context.with_module(module);
    }

    let mut translate = installation.translate(Arc::new(context), design, cache);
    translate
        .load_data(Some(config.area), config.force_reload)
        .with_context(|| {
            format!(
                "Failed to load {} translations for {}",
                config.locale,
                config.area
            )
        })?;

    if config.verbose {
        eprintln!(
            "Loaded {} phrase(s) for {}/{} ({})",
            translate.data().len(),
            config.area,
            translate.config().theme_str(),
            translate.cache_id()
        );
    }

    print_translations(&translate, &config)?;
    Ok(ExitCode::SUCCESS)
}

fn print_translations(translate: &Translate, config: &Config) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let pairs: Vec<(&str, &str)> = if config.phrases.is_empty() {
        translate
            .data()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    } else {
        config
            .phrases
            .iter()
            .map(|p| (p.as_str(), translate.translate(p)))
            .collect()
    };

    match config.format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = pairs
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::from(*v)))
                .collect();
            serde_json::to_writer_pretty(&mut out, &map)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let csv = CsvParser::new();
            for (phrase, translation) in pairs {
                writeln!(out, "{}", csv.write_row(&[phrase, translation]))?;
            }
        }
    }

    Ok(())
}
