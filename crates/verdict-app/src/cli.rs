use clap::{Parser, Subcommand};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "verdict")]
#[command(about = "Analyze a court judgment and answer follow-up questions about it", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Analyze a document and start a new question session
    Open { document_id: String },
    /// Continue a session saved to the session bucket
    Resume { session_id: Uuid },
    /// Delete a session saved to the session bucket
    Forget { session_id: Uuid },
}
