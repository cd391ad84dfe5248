//! Courier API Client - command-line entry point
//!
//! Wires the file storage under the configured data directory to the
//! interchange service and the request use cases.

mod cli;

use anyhow::{Context, bail};
use clap::Parser;
use courier_application::ports::Storage;
use courier_application::use_cases::{
    AddRequest, AddRequestInput, DeleteRequest, ResolveRequestForDispatch, SetVariables,
};
use courier_domain::Request;
use courier_infrastructure::{AppConfig, CollectionInterchange, FileStorage, TokioFileSystem};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command, EnvCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.data_dir).context("invalid configuration")?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(data_dir = %config.data_dir.display(), "using data directory");
    let storage = FileStorage::new(&config.data_dir, TokioFileSystem::new());

    match cli.command {
        Command::Import { file } => {
            let interchange = CollectionInterchange::new(storage, TokioFileSystem::new())
                .with_config(config.import);
            let outcome = interchange.import(&file).await;
            if !outcome.success {
                bail!(outcome.message);
            }
            println!("{}", outcome.message);
            if let Some(collection) = outcome.collection {
                println!("id: {}", collection.id);
            }
        }
        Command::Export {
            collection_id,
            file,
            format,
        } => {
            let interchange = CollectionInterchange::new(storage, TokioFileSystem::new());
            let outcome = interchange
                .export_collection_id(&collection_id, &file, &format)
                .await;
            if !outcome.success {
                bail!(outcome.message);
            }
            println!("{}", outcome.message);
        }
        Command::Resolve { request_id, env } => {
            let output = ResolveRequestForDispatch::new(storage)
                .execute(&request_id, env.as_deref())
                .await?;
            if !output.unresolved.is_empty() {
                tracing::warn!(names = ?output.unresolved, "unresolved variables left verbatim");
            }
            println!("{}", serde_json::to_string_pretty(&output.request)?);
        }
        Command::Add {
            collection_id,
            name,
            url,
            method,
            folder,
        } => {
            let request = AddRequest::new(storage)
                .execute(AddRequestInput {
                    collection_id,
                    folder_id: folder,
                    request: Request::new(name, url).with_method(method),
                })
                .await?;
            println!("{}", request.id);
        }
        Command::Delete { request_id } => {
            let output = DeleteRequest::new(storage).execute(&request_id).await?;
            if !output.deleted {
                bail!("request {request_id} not found");
            }
            println!(
                "deleted {request_id} (detached from {} collection(s))",
                output.detached_from.len()
            );
        }
        Command::List => {
            let collections = storage.get_all_collections().await?;
            if collections.is_empty() {
                println!("no collections in {}", config.data_dir.display());
            }
            for collection in collections {
                println!(
                    "{}\t{}\t{} request(s)\t{} folder(s)",
                    collection.id,
                    collection.name,
                    collection.request_ids().len(),
                    collection.folder_count()
                );
            }
        }
        Command::Env { command } => match command {
            EnvCommand::Add { name, variables } => {
                let environment = SetVariables::new(storage).create(&name, variables).await?;
                println!("{}", environment.id);
            }
            EnvCommand::Set {
                environment_id,
                variables,
            } => {
                let environment = SetVariables::new(storage)
                    .set(&environment_id, variables)
                    .await?;
                println!("{} variable(s) in {}", environment.variables.len(), environment.name);
            }
            EnvCommand::List => {
                for environment in storage.get_all_environments().await? {
                    println!(
                        "{}\t{}\t{} variable(s)",
                        environment.id,
                        environment.name,
                        environment.variables.len()
                    );
                }
            }
        },
    }

    Ok(())
}
