//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Command-line client for the biblioteca API
#[derive(Parser, Debug)]
#[command(name = "biblioteca")]
#[command(version)]
#[command(long_about = "
Talks to a biblioteca API server and prints every answer as a JSON envelope
{success, data | error, status}. The exit code is 0 for a success envelope
and 1 for a failure.

EXAMPLES:
    # Is the server up?
    biblioteca health

    # Totals for every collection
    biblioteca --base-url http://api.local:5000 stats

    # Books by price range
    biblioteca books --min-price 10 --max-price 30

    # One user by login
    biblioteca get usuarios joao123
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base address, overriding the configuration file
    #[arg(long, value_name = "URL", env = "BIBLIOTECA_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log every request and response to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Liveness check
    Health,

    /// General API information
    Info,

    /// Totals for states, cities, users, authors, categories and books
    Stats,

    /// List every record of a collection
    List {
        #[arg(value_enum)]
        resource: Resource,
    },

    /// Fetch one record
    ///
    /// The key is the id for most collections, the CEP for bairros and the
    /// login for usuarios.
    Get {
        #[arg(value_enum)]
        resource: Resource,
        key: String,
    },

    /// Search books on the client side
    Books {
        /// Author name, case-insensitive substring
        #[arg(long, conflicts_with_all = ["category", "min_price", "max_price"])]
        author: Option<String>,

        /// Category name, case-insensitive substring
        #[arg(long, conflicts_with_all = ["min_price", "max_price"])]
        category: Option<String>,

        /// Lowest price, inclusive
        #[arg(long, requires = "max_price")]
        min_price: Option<f64>,

        /// Highest price, inclusive
        #[arg(long, requires = "min_price")]
        max_price: Option<f64>,
    },

    /// Check that a CEP is exactly eight digits
    CheckCep { cep: String },

    /// Check the basic shape of an email address
    CheckEmail { email: String },

    /// Print a file's contents as base64
    Encode { file: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Estados,
    Cidades,
    Bairros,
    Usuarios,
    Autores,
    Categorias,
    Livros,
}
