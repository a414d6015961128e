//! CLI interface for the skillbridge engine

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "skillbridge")]
#[command(about = "Semantic skill matching and job-role recommendation engine")]
#[command(
    long_about = "Recommend job roles for a user profile, quantify skill gaps, and plan an upskilling roadmap using embedding similarity over a canonical skill taxonomy"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recommend roles for a profile
    Recommend {
        /// Path to the user profile JSON file
        #[arg(short, long)]
        profile: PathBuf,

        /// Path to the job roles JSON file
        #[arg(short, long)]
        roles: PathBuf,

        /// Path to the skills taxonomy JSON file
        #[arg(short, long)]
        taxonomy: PathBuf,

        /// Number of recommendations to return
        #[arg(long)]
        top_n: Option<usize>,

        /// Emit JSON instead of console output
        #[arg(long)]
        json: bool,
    },

    /// Analyze skill gaps against the top recommended roles
    Gaps {
        #[arg(short, long)]
        profile: PathBuf,

        #[arg(short, long)]
        roles: PathBuf,

        #[arg(short, long)]
        taxonomy: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Generate an upskilling roadmap from gaps and a course catalog
    Roadmap {
        #[arg(short, long)]
        profile: PathBuf,

        #[arg(short, long)]
        roles: PathBuf,

        #[arg(short, long)]
        taxonomy: PathBuf,

        /// Path to the course catalog JSON file
        #[arg(long)]
        courses: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Normalize free-text skills against the taxonomy
    Normalize {
        #[arg(short, long)]
        taxonomy: PathBuf,

        /// Skills to normalize
        skills: Vec<String>,
    },

    /// Model management commands
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List available and downloaded models
    List,

    /// Download a model
    Download {
        /// Model name or HuggingFace repo ID
        model: String,
    },

    /// Load the default model and run a warmup encode
    Warmup,
}
