//! Application orchestrator.
//! Resolves settings, initializes logging, then runs each configured service
//! in order (sonarr, radarr, lidarr).

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, error, info};

use sonarr_auto_import::cli::Args;
use sonarr_auto_import::config::{
    inline_transform_files, load_or_init, paths::config_path_from_env, LoadResult, CONFIG_ENV,
};
use sonarr_auto_import::output as out;
use sonarr_auto_import::{
    default_config_path, validate_service, Config, ImportError, Importer, RestNotifier, Settings,
};

use crate::logging::{init_tracing, with_bootstrap_logging};

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location(&args);
        return Ok(());
    }

    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);

    // Settings come first: they may set the log level and location.
    let (settings, load_error) = match args.adhoc_settings() {
        Some(mut settings) => {
            with_bootstrap_logging(|| inline_transform_files(&mut settings, Path::new(".")));
            (Some(settings), None)
        }
        None => match with_bootstrap_logging(|| load_or_init(cfg.settings_path.as_deref()))? {
            LoadResult::Loaded(path, settings) => {
                cfg.settings_path = Some(path);
                (Some(settings), None)
            }
            LoadResult::CreatedTemplate(path) => {
                out::print_success(&format!(
                    "A template settings file was written to: {}",
                    path.display()
                ));
                out::print_info(
                    "Fill in `url`, `apiKey`, `downloadsFolder` and `mappingPath` for each service, \
                     remove the services you do not run, then re-run this command.",
                );
                out::print_info(&format!(
                    "To use a different location pass --config or set {CONFIG_ENV}."
                ));
                return Ok(());
            }
            LoadResult::Unavailable(e) => (None, Some(e)),
        },
    };

    if let Some(s) = &settings {
        cfg.merge_settings(s, args.effective_log_level().is_some(), args.log_file.is_some());
    }

    let guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {}", e));
        e
    })?;

    debug!(
        dry_run = cfg.dry_run,
        level = %cfg.log_level,
        only = ?cfg.only,
        "Starting sonarr_auto_import"
    );

    let result = match (settings, load_error) {
        (Some(settings), _) => run_services(&cfg, &settings),
        (None, Some(e)) => {
            report_unavailable(&e);
            Ok(())
        }
        (None, None) => Ok(()),
    };

    // Flush the file appender before exit.
    drop(guard);
    result
}

fn run_services(cfg: &Config, settings: &Settings) -> Result<()> {
    if let Some(path) = &cfg.settings_path {
        debug!("Using settings from {}", path.display());
    }
    if cfg.dry_run {
        info!("Dry run: no files will be renamed and no services notified");
    }

    let notifier = RestNotifier::new().context("Failed to build HTTP client")?;
    let importer = Importer::new(notifier, cfg.dry_run);

    let services = settings.services();
    if services.is_empty() {
        info!("No services configured. Nothing to do!");
        return Ok(());
    }

    for (kind, svc) in services {
        if cfg.only.is_some_and(|only| only != kind) {
            debug!(service = %kind, "Skipping service (--only)");
            continue;
        }
        let profile = kind.profile();
        let (validated, warnings) = validate_service(svc, settings.global_transforms());
        importer.report_warnings(&profile, &warnings);

        let summary = importer.run(&profile, &validated);
        info!(
            service = %kind,
            skipped = summary.skipped,
            discovered = summary.discovered,
            renamed = summary.renamed,
            rename_failures = summary.rename_failures,
            notified = summary.notified,
            notify_failures = summary.notify_failures,
            trimmed_files = summary.trimmed_files,
            trimmed_dirs = summary.trimmed_dirs,
            trim_failures = summary.trim_failures,
            "Finished {kind}"
        );
    }
    Ok(())
}

fn report_unavailable(e: &ImportError) {
    error!(code = e.code(), kind = e.kind(), "{e}");
    if let ImportError::SettingsNotFound(path) = e {
        out::print_error(&format!(
            "No settings file at {}. Nothing was processed.",
            path.display()
        ));
    } else {
        out::print_error("Settings could not be used. Nothing was processed.");
    }
}

fn print_config_location(args: &Args) {
    if let Some(p) = &args.config {
        out::print_info(&format!("Using --config (explicit):\n  {}\n", p.display()));
        return;
    }
    if config_path_from_env()
        && let Some(p) = default_config_path()
    {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {}\n", p.display()));
        out::print_info(&format!(
            "To override, unset {CONFIG_ENV} or set it to another file."
        ));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!(
                "Default sonarr_auto_import settings path:\n  {}\n",
                p.display()
            ));
            if p.exists() {
                out::print_info("A settings file already exists at that location.");
            } else {
                out::print_info(
                    "No settings file exists there yet. Run without --print-config to create a template.",
                );
            }
        }
        None => out::print_error("Could not determine a default settings path."),
    }
}
