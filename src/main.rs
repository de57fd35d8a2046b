use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, warn};

use ml_provisioner::{
    ArtifactKind, CancellationToken, ConnectorSpec, DeleteOutcome, Error, ModelGroupSpec,
    ModelRegisterSpec, Provider, ReadOutcome, RemoteId,
};
use provider_config::{ConfigManager, LogFormat};
use reconciler::Reconciler;
use remote_client::RemoteClient;
use resource_adapter::ResourceAdapter;

/// Declaratively provision OpenSearch ML Commons artifacts
#[derive(Debug, Parser)]
#[command(name = "ml-provisioner", version, about)]
struct Cli {
    /// Configuration file (defaults to <config_dir>/ml-provisioner/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log output format, overrides the configuration
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    kind: KindCommand,
}

#[derive(Debug, Subcommand)]
enum KindCommand {
    /// Model groups
    ModelGroup {
        #[command(subcommand)]
        action: Action,
    },
    /// Connectors
    Connector {
        #[command(subcommand)]
        action: Action,
    },
    /// Model registrations
    ModelRegister {
        #[command(subcommand)]
        action: Action,
    },
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Create the artifact declared in a JSON file and print its identifier
    Create {
        #[arg(long)]
        file: PathBuf,
    },
    /// Report whether the artifact still exists
    Read {
        #[arg(long)]
        id: String,
    },
    /// Re-affirm the stored identifier; declared fields are replace-only
    Update {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        file: PathBuf,
    },
    /// Delete the artifact; succeeds when it is already gone
    Delete {
        #[arg(long)]
        id: String,
    },
}

/// State document printed on stdout
#[derive(Debug, Serialize)]
struct StateDocument {
    kind: ArtifactKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<RemoteId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    present: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delete: Option<DeleteOutcome>,
}

impl StateDocument {
    fn new(kind: ArtifactKind) -> Self {
        Self {
            kind,
            id: None,
            present: None,
            delete: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut manager = ConfigManager::new();
    if let Some(path) = &cli.config {
        manager = manager.with_file(path);
    }
    let mut config = manager.load().context("Could not load provider configuration")?;

    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    let _guard = logging::init(&config.logging)?;

    let provider = Provider::new(&config)?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling");
            on_interrupt.cancel();
        }
    });

    let document = match cli.kind {
        KindCommand::ModelGroup { action } => {
            run(provider.model_groups(), action, parse_model_group, &cancel).await
        }
        KindCommand::Connector { action } => {
            run(provider.connectors(), action, |body| Ok(ConnectorSpec::new(body)), &cancel).await
        }
        KindCommand::ModelRegister { action } => {
            run(provider.model_registrations(), action, |body| Ok(ModelRegisterSpec::new(body)), &cancel).await
        }
    }
    .map_err(explain)?;

    println!("{}", serde_json::to_string_pretty(&document)?);

    Ok(())
}

async fn run<A, C>(
    reconciler: Reconciler<A, C>,
    action: Action,
    parse: fn(String) -> Result<A::Desired>,
    cancel: &CancellationToken,
) -> Result<StateDocument>
where
    A: ResourceAdapter,
    C: RemoteClient,
{
    let mut document = StateDocument::new(reconciler.adapter().kind());

    match action {
        Action::Create { file } => {
            let desired = parse(read_declaration(&file)?)?;
            document.id = Some(reconciler.create(&desired, cancel).await?);
            document.present = Some(true);
        }
        Action::Read { id } => {
            let id = RemoteId::new(id);
            let outcome = reconciler.read(Some(&id)).await?;
            if let ReadOutcome::Present(artifact) = &outcome {
                debug!(body = %artifact.body, "Remote artifact");
                document.id = Some(id);
            }
            document.present = Some(outcome.is_present());
        }
        Action::Update { id, file } => {
            let desired = parse(read_declaration(&file)?)?;
            let current = id.map(RemoteId::new);
            document.id = reconciler.update(current.as_ref(), &desired);
        }
        Action::Delete { id } => {
            let outcome = reconciler.delete(Some(&RemoteId::new(id))).await?;
            document.delete = Some(outcome);
            document.present = Some(false);
        }
    }

    Ok(document)
}

fn read_declaration(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Could not read {}", path.display()))
}

fn parse_model_group(body: String) -> Result<ModelGroupSpec> {
    serde_json::from_str(&body).context("Model group declaration must be {\"name\": ..., \"description\": ...}")
}

fn explain(err: anyhow::Error) -> anyhow::Error {
    match err.downcast_ref::<Error>() {
        Some(inner) if inner.is_unknown_outcome() => {
            err.context("Outcome unknown: the remote operation may still complete")
        }
        _ => err,
    }
}
