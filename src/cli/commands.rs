use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "medbot")]
#[command(author, version, about = "Chat client for the MedBot medical assistant service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a single chat message and print the reply
    Chat {
        prompt: String,
    },

    /// Start an interactive chat session
    Interactive,

    /// Upload PDF documents into the conversation context
    Upload {
        /// Files to upload; anything that is not a PDF is skipped
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// List the documents the service has ingested
    Docs,

    /// Check the health of the MedBot service
    Health {
        /// Enable continuous monitoring (refresh every N seconds)
        #[arg(short, long)]
        watch: Option<u64>,
    },
}
