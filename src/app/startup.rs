//! Application startup
//!
//! Parses arguments, resolves configuration, initializes logging, then runs
//! the selected command on a current-thread runtime. Fatal errors decide the
//! exit code here; per-item failures only show up in the run report.

use std::io::IsTerminal;
use std::time::Duration;

use clap::Parser;

use crate::app::cli::args::{Args, Command, CreateFieldsArgs, UploadArgs};
use crate::app::cli::config::FileConfig;
use crate::app::report::RunReport;
use crate::artifact::api::ScanArtifact;
use crate::core::error_handling::{log_error_with_context, ContextualError};
use crate::core::logging::init_logging;
use crate::core::retry::RetryPolicy;
use crate::core::validation::validate_base_url;
use crate::core::version::version_line;
use crate::fields::api::{
    default_definitions, load_definitions, provision_fields, FieldError, FieldPatchSet,
    FieldReconciler,
};
use crate::hub::api::{HubSession, TransportError};
use crate::upload::api::UploadDispatcher;

/// Fatal error surfaced to the user before the process exits non-zero
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("{message}")]
    Usage { message: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ContextualError for RunError {
    fn is_user_actionable(&self) -> bool {
        matches!(self, RunError::Usage { .. })
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            RunError::Usage { message } => Some(message),
            RunError::Transport(_) => None,
        }
    }
}

fn usage(message: impl Into<String>) -> RunError {
    RunError::Usage {
        message: message.into(),
    }
}

/// Fatal side-file and lookup errors are things the user can act on;
/// transport faults stay system errors.
fn fatal_field_error(error: FieldError) -> RunError {
    match error {
        FieldError::Transport(t) => RunError::Transport(t),
        other => usage(other.to_string()),
    }
}

/// Process entry: parse, configure, run, decide the exit code
pub fn run() -> i32 {
    let args = Args::parse();

    let mut config = match FileConfig::load(args.config_file.as_deref()) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {}", message);
            return 1;
        }
    };
    config.apply_env();

    // CLI wins over the config file for every log setting
    let log_level = args.log_level.clone().or_else(|| config.log.level.clone());
    let log_format = args
        .log_format
        .clone()
        .or_else(|| config.log.format.clone());
    let log_file = args
        .log_file
        .clone()
        .or_else(|| config.log.file.clone())
        .map(|p| p.display().to_string());
    let use_color = (args.color || std::io::stderr().is_terminal()) && !args.no_color;

    if let Err(e) = init_logging(
        log_level.as_deref(),
        log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error initialising logging: {}", e);
        return 1;
    }

    log::info!("{} starting", version_line());

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("FATAL: failed to build async runtime: {}", e);
            return 1;
        }
    };

    match runtime.block_on(run_command(&args, &config)) {
        Ok(report) => {
            log::info!("{}", report.summary());
            if report.has_failures() {
                log::warn!("run completed with per-item failures; see log above for details");
            }
            0
        }
        Err(e) => {
            log_error_with_context(&e, "scan synchronization failed");
            1
        }
    }
}

async fn run_command(args: &Args, config: &FileConfig) -> Result<RunReport, RunError> {
    match &args.command {
        Command::Upload(upload) => run_upload(args, upload, config).await,
        Command::CreateFields(create) => run_create_fields(args, create, config).await,
    }
}

/// Build and authenticate a session from config plus CLI overrides
async fn open_session(args: &Args, config: &FileConfig) -> Result<HubSession, RunError> {
    let mut server = config.server.clone();
    if let Some(url) = &args.base_url {
        server.base_url = validate_base_url(url).map_err(usage)?;
    }
    if let Some(secs) = args.timeout {
        server.timeout_secs = secs;
    }

    let mut session = match HubSession::new(server) {
        Ok(session) => session,
        Err(TransportError::Configuration { message }) => return Err(usage(message)),
        Err(e) => return Err(e.into()),
    };
    session.authenticate().await?;
    Ok(session)
}

async fn run_upload(
    args: &Args,
    upload: &UploadArgs,
    config: &FileConfig,
) -> Result<RunReport, RunError> {
    let overrides = upload.identifier_override();
    let overridden = !overrides.is_empty();

    let session = open_session(args, config).await?;
    let dispatcher = UploadDispatcher::new(&session, upload.keep_temp_files);

    let mut report = RunReport::default();

    for file in &upload.scan_files {
        let mut artifact = ScanArtifact::load(file).map_err(|e| usage(e.to_string()))?;
        if overridden {
            artifact.apply_override(&overrides);
        }
        match dispatcher.dispatch(&artifact, overridden).await {
            Ok(receipt) => {
                log::debug!(
                    "scan upload of {} returned status {}",
                    receipt.uploaded_path.display(),
                    receipt.status
                );
                report.scans_uploaded += 1;
            }
            Err(e) => {
                log::error!("{}", e);
                report.scans_failed += 1;
            }
        }
    }

    if let Some(path) = &upload.custom_field_file {
        let patch = FieldPatchSet::load(path).map_err(fatal_field_error)?;

        // attempts below 1 would make the lookup loop vacuous
        let attempts = upload
            .retry_attempts
            .unwrap_or(config.upload.retry_attempts)
            .max(1);
        let delay = upload.retry_delay.unwrap_or(config.upload.retry_delay_secs);
        let policy = RetryPolicy::new(attempts, Duration::from_secs(delay));

        let reconciler = FieldReconciler::new(&session, policy);
        let reconcile_report = reconciler
            .reconcile(&patch, &overrides)
            .await
            .map_err(fatal_field_error)?;
        report.absorb_reconcile(&reconcile_report);
    }

    Ok(report)
}

async fn run_create_fields(
    args: &Args,
    create: &CreateFieldsArgs,
    config: &FileConfig,
) -> Result<RunReport, RunError> {
    let definitions = match &create.definitions_file {
        Some(path) => load_definitions(path).map_err(fatal_field_error)?,
        None => default_definitions(),
    };
    log::info!(
        "Provisioning {} custom field definition(s)",
        definitions.len()
    );

    let session = open_session(args, config).await?;
    let catalog = provision_fields(&session, &definitions).await;

    let mut report = RunReport::default();
    report.absorb_catalog(&catalog);
    Ok(report)
}
