//! dumpsight - web front end over Volatility 3 for Linux memory dumps.
//!
//! Upload a dump, extract an OS profile from its kernel banner, run
//! extraction plugins (process list, environment variables, network
//! interfaces, loaded modules, ...), parse their text output into typed
//! tables, persist the last analysis as JSON, and render it as a bilingual
//! HTML report or a PDF.
//!
//! The core is the schema-driven output parser (`parsers` + `registry`);
//! the tool integration, store, renderer and HTTP layer are thin shells
//! around it.
//!
//! # Example
//!
//! ```no_run
//! use dumpsight::{registry, parsers};
//!
//! let spec = registry::lookup("linux.pslist.PsList").unwrap();
//! let table = parsers::parse_output("1 1 0 systemd Mon Jan 1 -", spec);
//! assert_eq!(table.len(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod i18n;
pub mod parsers;
pub mod pdf;
pub mod profile;
pub mod registry;
pub mod render;
pub mod server;
pub mod store;
pub mod volatility;

pub use config::Config;
pub use document::{AnalysisDocument, ProfileInfo, Record, Table};
pub use error::{DumpsightError, Result};
pub use i18n::Lang;
pub use registry::{CommandSpec, FieldSpec, FieldWidth};
pub use store::AnalysisStore;
pub use volatility::VolatilityRunner;

use std::path::Path;

/// One-shot analysis of a dump: extract the profile, optionally run one
/// extraction command, and return the resulting document without touching
/// the persisted slot.
///
/// This is the programmatic entry point the CLI uses; the server drives the
/// same pieces itself so it can persist between steps.
pub async fn analyze_dump(
    config: &Config,
    dump: &Path,
    command: Option<&str>,
) -> Result<AnalysisDocument> {
    config.validate()?;

    let runner = VolatilityRunner::new(&config.volatility_bin, config.tool_timeout);

    let banner_text = runner.banner(dump).await?;
    let profile = profile::extract_profile(&banner_text)?;

    let (command, output) = match command {
        Some(id) => {
            let spec =
                registry::lookup(id).ok_or_else(|| DumpsightError::unsupported_command(id))?;
            let stdout = runner.run_plugin(dump, spec.id).await?;
            (spec.id, parsers::parse_output(&stdout, spec))
        }
        None => {
            let spec = registry::lookup(volatility::BANNER_COMMAND)
                .ok_or_else(|| DumpsightError::unsupported_command(volatility::BANNER_COMMAND))?;
            (spec.id, parsers::parse_output(&banner_text, spec))
        }
    };

    Ok(AnalysisDocument::from_profile(&profile, command, output))
}
