use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dumpsight")]
#[command(about = "Web front end over Volatility 3 for Linux memory-dump analysis")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP server
    Serve {
        /// Listen address
        #[arg(short, long, default_value = crate::config::DEFAULT_LISTEN)]
        listen: String,
    },

    /// Analyze a dump from the command line, without the server
    Analyze {
        /// Memory dump to analyze
        dump: String,

        /// Extraction command to run after the profile (registry id)
        #[arg(short, long)]
        command: Option<String>,

        /// Output format (json, terminal)
        #[arg(short, long, default_value = "terminal")]
        format: OutputFormat,

        /// Report language (en, fr)
        #[arg(short, long, default_value = "en")]
        lang: String,
    },

    /// Export the last analysis to PDF
    Export {
        /// Output PDF path
        #[arg(short, long, default_value = "report.pdf")]
        output: String,

        /// Report language (en, fr)
        #[arg(short, long, default_value = "en")]
        lang: String,
    },

    /// List the supported extraction commands
    Commands,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output for machine consumption
    Json,
    /// Human-readable terminal output
    Terminal,
}
