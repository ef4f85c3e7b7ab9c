//! Broadcast Publisher CLI
//!
//! Automated audio publishing pipeline for internet radio broadcasts

use anyhow::Result;
use broadcast_publisher::{
    Actor, ActorRole, AudioPublisher, AuditLog, AuditQueryOptions, BroadcastConfig, ConfigLoader,
    DEFAULT_PASSWORD_SECRET_KEY, FtpTransportClient, LogType, SecretStore, UploadRequest,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

/// Automated audio publishing pipeline for internet radio broadcasts
#[derive(Parser)]
#[command(name = "broadcast-publisher")]
#[command(version = "0.1.0")]
#[command(about = "Publish AI-authored audio segments to the broadcast server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish an audio segment to the broadcast server
    Publish {
        /// Project path (defaults to current directory)
        #[arg(value_name = "PROJECT_PATH")]
        project_path: Option<PathBuf>,

        /// Upload request JSON file ({"audio_payload": "...", "filename": "..."})
        #[arg(short, long)]
        request: PathBuf,

        /// Acting user name, recorded in the audit log
        #[arg(long, default_value = "cli")]
        actor: String,

        /// Acting user role (admin, superadmin, dj, editor)
        #[arg(long, default_value = "admin")]
        role: String,

        /// Explicit configuration file (defaults to PROJECT_PATH/broadcast.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check broadcast configuration and credential readiness
    Check {
        /// Project path (defaults to current directory)
        #[arg(value_name = "PROJECT_PATH")]
        project_path: Option<PathBuf>,

        /// Explicit configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Display recent audit log entries
    Logs {
        /// Project path (defaults to current directory)
        #[arg(value_name = "PROJECT_PATH")]
        project_path: Option<PathBuf>,

        /// Show only error and critical entries
        #[arg(long)]
        errors_only: bool,

        /// Filter by module name
        #[arg(short, long)]
        module: Option<String>,

        /// Maximum number of entries shown
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Initialize broadcast-publisher configuration
    Init {
        /// Project path (defaults to current directory)
        #[arg(value_name = "PROJECT_PATH")]
        project_path: Option<PathBuf>,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    let result = run().await;

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("\n❌ Error");
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Publish {
            project_path,
            request,
            actor,
            role,
            config,
        } => {
            let path = project_path.unwrap_or_else(|| PathBuf::from("."));
            publish_command(path, request, actor, role, config).await
        }
        Commands::Check {
            project_path,
            config,
        } => {
            let path = project_path.unwrap_or_else(|| PathBuf::from("."));
            check_command(path, config).await
        }
        Commands::Logs {
            project_path,
            errors_only,
            module,
            limit,
        } => {
            let path = project_path.unwrap_or_else(|| PathBuf::from("."));
            logs_command(path, errors_only, module, limit).await
        }
        Commands::Init {
            project_path,
            force,
        } => {
            let path = project_path.unwrap_or_else(|| PathBuf::from("."));
            init_command(path, force).await
        }
    }
}

async fn load_config(
    project_path: &PathBuf,
    config_path: Option<PathBuf>,
) -> Result<Option<BroadcastConfig>> {
    let loaded = match config_path {
        Some(path) => Some(ConfigLoader::load_file(&path).await?),
        None => ConfigLoader::load_project(project_path).await?,
    };

    Ok(loaded)
}

async fn publish_command(
    project_path: PathBuf,
    request_path: PathBuf,
    actor: String,
    role: String,
    config_path: Option<PathBuf>,
) -> Result<i32> {
    println!("\n📻 broadcast-publisher\n");

    let role: ActorRole = role.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let request_text = tokio::fs::read_to_string(&request_path).await?;
    let request: UploadRequest = serde_json::from_str(&request_text)?;

    let config = load_config(&project_path, config_path).await?;

    let publisher = AudioPublisher::new(
        config,
        Arc::new(SecretStore::from_env()),
        Arc::new(FtpTransportClient::new()),
        AuditLog::new(&project_path),
    );

    let result = publisher.publish(Actor::new(actor, role), request).await;

    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.success {
        println!("\n✅ Publishing completed successfully!");
        Ok(0)
    } else {
        println!("\n❌ Publishing failed");
        if let Some(hints) = &result.troubleshooting {
            for hint in hints {
                eprintln!("  - {}", hint);
            }
        }
        Ok(1)
    }
}

async fn check_command(project_path: PathBuf, config_path: Option<PathBuf>) -> Result<i32> {
    println!("\n📻 broadcast-publisher check\n");

    let Some(config) = load_config(&project_path, config_path).await? else {
        println!("❌ No broadcast.toml or broadcast.json found");
        return Ok(1);
    };

    let validation = ConfigLoader::validate(&config);

    for error in &validation.errors {
        println!("  ❌ [{}] {}", error.field, error.message);
    }
    for warning in &validation.warnings {
        println!("  ⚠️  [{}] {}", warning.field, warning.message);
    }

    let mut ready = validation.valid;

    match &config.ftp {
        Some(ftp) if ftp.enabled => {
            println!("  ✅ Upload target: {}", ftp.host);

            let key_name = ftp
                .password_secret_key
                .as_deref()
                .unwrap_or(DEFAULT_PASSWORD_SECRET_KEY);
            if SecretStore::from_env().has_secret(key_name) {
                println!("  ✅ Secret '{}' is available", key_name);
            } else {
                println!("  ❌ Secret '{}' is not set", key_name);
                ready = false;
            }
        }
        _ => {
            ready = false;
        }
    }

    if ready {
        println!("\n✅ Ready to publish");
        Ok(0)
    } else {
        println!("\n❌ Not ready to publish");
        Ok(1)
    }
}

async fn logs_command(
    project_path: PathBuf,
    errors_only: bool,
    module: Option<String>,
    limit: usize,
) -> Result<i32> {
    let audit = AuditLog::new(&project_path);
    let entries = audit.load().await?;

    let options = AuditQueryOptions {
        log_type: None,
        module,
        errors_only,
        limit: Some(limit),
    };
    let filtered = AuditLog::filter(&entries, &options);

    if filtered.is_empty() {
        println!("No audit log entries found");
        return Ok(0);
    }

    for entry in &filtered {
        let marker = match entry.log_type {
            LogType::Success => "✅",
            LogType::Info => "ℹ️ ",
            LogType::Warning => "⚠️ ",
            LogType::Error => "❌",
            LogType::Critical => "🔥",
        };

        println!(
            "{} {} [{}] {}: {}",
            marker,
            entry.created_at.format("%Y-%m-%d %H:%M:%S"),
            entry.log_type.as_str(),
            entry.module,
            entry.message
        );

        if let Some(stage) = entry.details.get("stage") {
            println!("    stage: {}", stage);
        }
    }

    Ok(0)
}

async fn init_command(project_path: PathBuf, force: bool) -> Result<i32> {
    let written = ConfigLoader::write_sample(&project_path, force).await?;

    println!("✅ Wrote {}", written.display());
    println!("   Edit the connection settings, then run `broadcast-publisher check`");
    Ok(0)
}
