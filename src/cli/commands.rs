use clap::{Parser, Subcommand};

use crate::domain::DEFAULT_CATEGORY;

#[derive(Parser)]
#[command(name = "newstag")]
#[command(about = "Category news aggregator that tags RSS items with Gemini")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web service
    Serve {
        /// Host to bind to
        #[arg(long, env = "NEWSTAG_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "NEWSTAG_PORT", default_value_t = 5000)]
        port: u16,
    },

    /// Fetch and tag one category, printing JSON to stdout
    Fetch {
        /// Category key (it, sports, economy)
        #[arg(short, long, default_value = DEFAULT_CATEGORY)]
        category: String,
    },

    /// List configured categories and their feed URLs
    Categories,
}
