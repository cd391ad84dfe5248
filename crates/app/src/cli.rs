//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use courier_domain::HttpMethod;

#[derive(Parser, Debug)]
#[command(name = "courier", version, about = "Import, export and resolve stored API requests")]
pub struct Cli {
    /// Data directory (default: COURIER_DATA_DIR, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Import a Postman or Insomnia collection file
    Import {
        /// Collection file (.json)
        file: PathBuf,
    },

    /// Export a stored collection
    Export {
        /// Id of the collection to export
        collection_id: String,
        /// Destination file
        file: PathBuf,
        /// postman (a) or insomnia (b)
        #[arg(short, long, default_value = "postman")]
        format: String,
    },

    /// Print a stored request with its {{variables}} substituted
    Resolve {
        /// Id of the request
        request_id: String,
        /// Environment supplying the values
        #[arg(short, long, value_name = "ENVIRONMENT_ID")]
        env: Option<String>,
    },

    /// Add a request to a collection
    Add {
        /// Collection receiving the request
        collection_id: String,
        /// Request name
        name: String,
        /// Request URL
        url: String,
        /// HTTP method
        #[arg(short, long, default_value = "GET")]
        method: HttpMethod,
        /// Folder inside the collection
        #[arg(long, value_name = "FOLDER_ID")]
        folder: Option<String>,
    },

    /// Delete a request and every reference to it
    Delete {
        /// Id of the request
        request_id: String,
    },

    /// List stored collections
    List,

    /// Manage environments
    Env {
        #[command(subcommand)]
        command: EnvCommand,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum EnvCommand {
    /// Create an environment
    Add {
        /// Environment name
        name: String,
        /// Variables to store
        #[arg(value_name = "KEY=VALUE", value_parser = parse_assignment)]
        variables: Vec<(String, String)>,
    },

    /// Set variables on an existing environment
    Set {
        /// Id of the environment
        environment_id: String,
        /// Variables to store
        #[arg(value_name = "KEY=VALUE", required = true, value_parser = parse_assignment)]
        variables: Vec<(String, String)>,
    },

    /// List stored environments
    List,
}

fn parse_assignment(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got `{input}`")),
    }
}
