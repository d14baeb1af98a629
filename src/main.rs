mod cli;
mod config;

use cli::{Args, Command};
use config::{discover_config, load_config_from_path, ConfigFile, CONFIG_FILENAME};
use packwright::adapters::outbound::archive::ZipArchiver;
use packwright::adapters::outbound::console::{StderrProgressReporter, UploadSummaryPrinter};
use packwright::adapters::outbound::filesystem::{
    FileSystemArtifactStore, FileSystemItemSerializer, GraphFileReader,
};
use packwright::adapters::outbound::network::{PlatformSettings, PlatformUploadClient};
use packwright::application::dto::{DumpRequest, UploadRequest};
use packwright::application::use_cases::{
    DumpPackUseCase, UploadArchiveUseCase, UploadPackUseCase,
};
use packwright::content_graph::domain::{
    ContentGraph, ContentVersion, Marketplace, Pack, UploadError,
};
use packwright::ports::outbound::GraphReader;
use packwright::shared::error::{ExitCode, PackError};
use packwright::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

const API_KEY_ENV: &str = "PACKWRIGHT_API_KEY";
const AUTH_ID_ENV: &str = "PACKWRIGHT_AUTH_ID";
const BASE_URL_ENV: &str = "PACKWRIGHT_BASE_URL";

#[tokio::main]
async fn main() {
    let args = match Args::try_parse_args() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() {
                ExitCode::InvalidArguments
            } else {
                ExitCode::Success
            };
            let _ = e.print();
            process::exit(code.as_i32());
        }
    };

    init_tracing(&args);

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => report_error(&e),
    };
    process::exit(code.as_i32());
}

fn init_tracing(args: &Args) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn report_error(e: &anyhow::Error) -> ExitCode {
    eprintln!("\n❌ An error occurred:\n");
    eprintln!("{}", e);

    // Display error chain
    let mut source = e.source();
    while let Some(err) = source {
        eprintln!("\nCaused by: {}", err);
        source = err.source();
    }

    eprintln!();
    if e.downcast_ref::<UploadError>().is_some() {
        ExitCode::UploadFailed
    } else {
        ExitCode::ApplicationError
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let content_root = args.resolved_content_root();
    let config = match &args.config {
        Some(path) => load_config_from_path(path)?,
        None => discover_config(&content_root)?.unwrap_or_default(),
    };

    match &args.command {
        Command::Dump {
            pack,
            output,
            marketplace,
            tpb,
        } => {
            let graph = load_graph(&args.graph, &content_root)?;
            let marketplace = resolve_marketplace(*marketplace, &config);
            run_dump(&graph, pack, output, marketplace, *tpb, &config, &content_root)
        }
        Command::Upload {
            packs,
            marketplace,
            target_version,
            zip,
            tpb,
            skip_validation,
            destination_zip_dir,
        } => {
            let graph = load_graph(&args.graph, &content_root)?;
            let request = UploadRequest::new(
                resolve_marketplace(*marketplace, &config),
                target_version.clone(),
            )
            .zipped(*zip)
            .with_test_playbooks(*tpb)
            .with_skip_validation(*skip_validation)
            .with_destination_zip_dir(
                destination_zip_dir
                    .clone()
                    .or_else(|| resolve_path(config.destination_zip_dir.as_ref(), &content_root)),
            )
            .with_excluded_content_types(config.exclude_content_types.clone().unwrap_or_default())
            .with_documentation_dir(resolve_path(config.documentation_dir.as_ref(), &content_root));
            run_upload(&graph, packs, &request, &config).await
        }
        Command::UploadZip {
            file,
            target_version,
            marketplace,
            skip_validation,
        } => {
            let marketplace = resolve_marketplace(*marketplace, &config);
            run_upload_zip(file, marketplace, target_version, *skip_validation, &config).await
        }
        Command::Dependencies { pack } => {
            let graph = load_graph(&args.graph, &content_root)?;
            run_dependencies(&graph, pack)
        }
    }
}

fn load_graph(graph_path: &Path, content_root: &Path) -> Result<ContentGraph> {
    let graph = GraphFileReader::new().read_graph(graph_path, content_root)?;
    info!(
        nodes = graph.node_count(),
        relationships = graph.relationship_count(),
        "Loaded content graph"
    );
    Ok(graph)
}

/// CLI flag first, then the config file, then xsoar
fn resolve_marketplace(flag: Option<Marketplace>, config: &ConfigFile) -> Marketplace {
    flag.or(config.marketplace).unwrap_or_default()
}

/// Config paths are relative to the content root
fn resolve_path(path: Option<&PathBuf>, content_root: &Path) -> Option<PathBuf> {
    path.map(|p| {
        if p.is_absolute() {
            p.clone()
        } else {
            content_root.join(p)
        }
    })
}

fn run_dump(
    graph: &ContentGraph,
    pack_id: &str,
    output: &Path,
    marketplace: Marketplace,
    include_test_playbooks: bool,
    config: &ConfigFile,
    content_root: &Path,
) -> Result<ExitCode> {
    let mut pack = Pack::load(graph, pack_id)?;
    let use_case = DumpPackUseCase::new(
        FileSystemItemSerializer::new(),
        FileSystemArtifactStore::new(),
        StderrProgressReporter::new(),
    );
    let request = DumpRequest::new(output.to_path_buf(), marketplace)
        .with_test_playbooks(include_test_playbooks)
        .with_excluded_content_types(config.exclude_content_types.clone().unwrap_or_default())
        .with_documentation_dir(resolve_path(config.documentation_dir.as_ref(), content_root));

    let summary = use_case.execute(&mut pack, graph, &request)?;

    let printer = UploadSummaryPrinter::new();
    printer.print(&printer.render_dump(&summary));
    Ok(ExitCode::Success)
}

async fn run_upload(
    graph: &ContentGraph,
    pack_ids: &[String],
    request: &UploadRequest,
    config: &ConfigFile,
) -> Result<ExitCode> {
    let dumper = DumpPackUseCase::new(
        FileSystemItemSerializer::new(),
        FileSystemArtifactStore::new(),
        StderrProgressReporter::new(),
    );
    let use_case = UploadPackUseCase::new(dumper, ZipArchiver::new(), platform_client(config)?)?
        .with_delivery_policy(config.delivery_policy())
        .with_upload_concurrency(config.upload_concurrency.unwrap_or(1));

    let printer = UploadSummaryPrinter::new();
    let mut failed = false;
    for pack_id in pack_ids {
        let mut pack = Pack::load(graph, pack_id)?;
        match use_case.execute(&mut pack, graph, request).await {
            Ok(outcome) => printer.print(&printer.render_outcome(&outcome)),
            Err(e) => match e.downcast_ref::<UploadError>() {
                Some(UploadError::Multiple(result)) => {
                    printer.print(&printer.render_failures(pack_id, result));
                    failed = true;
                }
                Some(other) => {
                    eprintln!("❌ {}: {}\n", pack_id, other);
                    failed = true;
                }
                None => return Err(e),
            },
        }
    }

    Ok(if failed {
        ExitCode::UploadFailed
    } else {
        ExitCode::Success
    })
}

async fn run_upload_zip(
    file: &Path,
    marketplace: Marketplace,
    target_version: &ContentVersion,
    skip_validation: bool,
    config: &ConfigFile,
) -> Result<ExitCode> {
    let use_case = UploadArchiveUseCase::new(platform_client(config)?, StderrProgressReporter::new());
    use_case
        .execute(file, marketplace, target_version, skip_validation)
        .await?;
    eprintln!("✅ Uploaded {}", file.display());
    Ok(ExitCode::Success)
}

fn run_dependencies(graph: &ContentGraph, pack_id: &str) -> Result<ExitCode> {
    let pack = Pack::load(graph, pack_id)?;
    let dependencies = pack.compute_dependencies(graph)?;
    if dependencies.is_empty() {
        eprintln!("{} has no dependencies", pack_id);
    }
    for dependency in dependencies {
        println!(
            "{}\t{}\t{}",
            dependency.pack_id,
            if dependency.mandatory {
                "mandatory"
            } else {
                "optional"
            },
            dependency.display_name
        );
    }
    Ok(ExitCode::Success)
}

/// Builds the platform client from the environment and the config file
fn platform_client(config: &ConfigFile) -> Result<PlatformUploadClient> {
    let base_url = std::env::var(BASE_URL_ENV)
        .ok()
        .or_else(|| config.base_url.clone())
        .ok_or_else(|| PackError::Validation {
            message: format!(
                "No platform URL configured. Set base_url in {} or the {} environment variable",
                CONFIG_FILENAME,
                BASE_URL_ENV
            ),
        })?;
    let api_key = std::env::var(API_KEY_ENV).map_err(|_| PackError::Validation {
        message: format!("The {} environment variable is not set", API_KEY_ENV),
    })?;
    let auth_id = std::env::var(AUTH_ID_ENV).ok().filter(|id| !id.is_empty());

    PlatformUploadClient::new(PlatformSettings::new(base_url, api_key).with_auth_id(auth_id))
}
