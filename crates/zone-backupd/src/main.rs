// # zone-backupd - Route 53 zone backup function
//
// Thin integration layer: all backup logic lives in zone-backup-core.
//
// The binary is responsible for:
// 1. Reading configuration from environment variables (once, at cold start)
// 2. Initializing tracing and the runtime
// 3. Building the Route 53 source and the object store
// 4. Handing every Lambda invocation to the backup engine
//
// ## Trigger
//
// A CloudWatch Logs subscription on the CloudTrail log group, filtered with
// `{ $.eventSource = "route53.amazonaws.com" }` on a write-only trail.
//
// ## Configuration
//
// - `BUCKET`: Destination bucket (required)
// - `ZONE_ID`: Zone to back up on every invocation (optional)
// - `FULL_BACKUP`: Back up every zone in the account when set (optional;
//   `false`, `0`, `no` and `off` disable it)
// - `ZONE_BACKUP_LOG_LEVEL`: trace, debug, info, warn, error (default: info)
// - `ZONE_BACKUP_LOCAL_DIR`: Write to this directory instead of S3 (optional)
//
// ## Example
//
// ```bash
// export BUCKET=my-zone-backups
// export FULL_BACKUP=true
//
// zone-backupd
// ```

use anyhow::{Context, Result};
use aws_config::BehaviorVersion;
use lambda_runtime::{LambdaEvent, service_fn};
use std::env;
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use zone_backup_core::{
    BackupConfig, BackupEngine, DirectoryObjectStore, ObjectStore, TriggerEvent,
};
use zone_backup_provider_route53::Route53Source;
use zone_backup_store_s3::S3ObjectStore;

/// Exit codes for different termination scenarios
///
/// - 0: Runtime loop ended cleanly
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum BackupExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<BackupExitCode> for ExitCode {
    fn from(code: BackupExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
struct Config {
    bucket: String,
    zone_id: Option<String>,
    full_backup: bool,
    log_level: String,
    local_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            bucket: lookup("BUCKET").context("BUCKET is required")?,
            zone_id: lookup("ZONE_ID").filter(|id| !id.trim().is_empty()),
            full_backup: lookup("FULL_BACKUP").is_some_and(|value| parse_flag(&value)),
            log_level: lookup("ZONE_BACKUP_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            local_dir: lookup("ZONE_BACKUP_LOCAL_DIR"),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            anyhow::bail!(
                "BUCKET cannot be empty. \
                Set it via: export BUCKET=my-zone-backups"
            );
        }

        if self.local_dir.as_ref().is_some_and(|dir| dir.is_empty()) {
            anyhow::bail!("ZONE_BACKUP_LOCAL_DIR cannot be empty when set");
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "ZONE_BACKUP_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        self.backup_config()
            .validate()
            .context("Invalid backup configuration")?;

        Ok(())
    }

    fn backup_config(&self) -> BackupConfig {
        let config = BackupConfig::new(self.bucket.clone()).with_full_backup(self.full_backup);
        match &self.zone_id {
            Some(zone_id) => config.with_zone_id(zone_id.clone()),
            None => config,
        }
    }
}

/// A set variable enables a flag unless it spells out a negative
fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}

fn main() -> ExitCode {
    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return BackupExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return BackupExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // CloudWatch adds the ingestion time
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(false)
        .without_time()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return BackupExitCode::ConfigError.into();
    }

    info!(
        "Starting zone-backupd (bucket: {}, fixed zone: {}, full backup: {})",
        config.bucket,
        config.zone_id.as_deref().unwrap_or("none"),
        config.full_backup
    );

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return BackupExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run_function(config).await {
            error!("Function error: {:#}", e);
            BackupExitCode::RuntimeError
        } else {
            BackupExitCode::CleanShutdown
        }
    });

    result.into()
}

/// Build the engine and serve invocations until the runtime stops
async fn run_function(config: Config) -> Result<()> {
    let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;

    let source = Box::new(Route53Source::from_sdk_config(&sdk_config));

    let store: Box<dyn ObjectStore> = match &config.local_dir {
        Some(dir) => {
            warn!("Writing backups to local directory {} instead of S3", dir);
            Box::new(DirectoryObjectStore::new(dir).await?)
        }
        None => Box::new(S3ObjectStore::from_sdk_config(&sdk_config)),
    };

    let engine = BackupEngine::new(source, store, config.backup_config())?;
    let engine = &engine;

    info!("Backup engine ready");

    lambda_runtime::run(service_fn(
        move |event: LambdaEvent<TriggerEvent>| async move {
            engine
                .handle(&event.payload)
                .await
                .map_err(lambda_runtime::Error::from)
        },
    ))
    .await
    .map_err(|e| anyhow::anyhow!("Lambda runtime error: {}", e))
}
