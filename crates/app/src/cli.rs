//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use courier_domain::EXPORT_FILE_NAME;
use courier_infrastructure::DEFAULT_BACKEND_URL;

/// Send templated API requests through a Courier backend.
#[derive(Debug, Clone, Parser)]
#[command(name = "courier", version)]
pub struct Cli {
    /// Base URL of the Courier backend.
    #[arg(
        long = "backend",
        env = "COURIER_BACKEND_URL",
        value_name = "URL",
        default_value = DEFAULT_BACKEND_URL,
        global = true
    )]
    pub backend_url: String,

    /// Bearer token issued by the identity provider.
    #[arg(
        long,
        env = "COURIER_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub token: Option<String>,

    /// Per-request timeout.
    #[arg(
        long = "timeout",
        env = "COURIER_TIMEOUT_SECS",
        value_name = "SECS",
        default_value_t = 30,
        global = true
    )]
    pub timeout_secs: u64,

    /// Colour methods and status codes.
    #[arg(long, global = true)]
    pub color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// A request file plus the environment to resolve it against.
#[derive(Debug, Clone, Args)]
pub struct RequestArgs {
    /// Request file in the import format (`url` and `method` required).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Environment name used to fill `{{variables}}`.
    #[arg(long, short, value_name = "NAME")]
    pub env: Option<String>,
}

/// What to do.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the request as it would be sent, without sending it
    Resolve(RequestArgs),

    /// Send a request through the backend proxy and print the response
    Send(RequestArgs),

    /// Save a request, placeholders intact, into a collection
    Save {
        /// Request file in the import format.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Target collection id.
        #[arg(long, short, value_name = "ID")]
        collection: String,
    },

    /// List past sends
    History,

    /// Delete a history entry
    DeleteHistory {
        /// History entry id.
        id: String,
    },

    /// List collections
    Collections,

    /// Create a collection
    CreateCollection {
        /// Collection name.
        name: String,
    },

    /// Delete a collection and everything in it
    DeleteCollection {
        /// Collection id.
        id: String,
    },

    /// List the requests saved in a collection
    Items {
        /// Collection id.
        collection: String,
    },

    /// Delete a saved request
    DeleteItem {
        /// Item id.
        id: String,
    },

    /// List environments
    Envs,

    /// Create an environment
    CreateEnv {
        /// Environment name.
        name: String,
        /// Variables as a JSON object, e.g. '{"base": "https://api.x.com"}'.
        variables: String,
    },

    /// Normalize a request file into an export document
    Export {
        /// Request file in the import format.
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Where to write the export.
        #[arg(long, short, value_name = "PATH", default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },

    /// Print the editable form of a request file
    Import {
        /// Request file in the import format.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
