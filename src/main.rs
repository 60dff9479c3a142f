use anyhow::{Context, Result};
use clap::Parser;
use dumpsight::cli::{Args, Command, OutputFormat};
use dumpsight::i18n::Lang;
use dumpsight::pdf::PdfExporter;
use dumpsight::render::{self, RenderMode};
use dumpsight::store::AnalysisStore;
use dumpsight::{registry, Config};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse args early to get verbose flag for logging initialization
    let args = Args::parse();

    // Use RUST_LOG env var if set, otherwise use verbose flag
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if args.verbose {
        EnvFilter::new("dumpsight=debug")
    } else {
        EnvFilter::new("dumpsight=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    debug!("logging initialized (verbose={})", args.verbose);

    match args.command {
        Command::Serve { listen } => {
            let mut config = Config::from_env()?;
            config.listen = listen;
            dumpsight::server::serve(config).await?;
        }

        Command::Analyze { dump, command, format, lang } => {
            let config = Config::from_env()?;
            let doc = dumpsight::analyze_dump(&config, std::path::Path::new(&dump), command.as_deref())
                .await
                .with_context(|| format!("failed to analyze {dump}"))?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&doc)?),
                OutputFormat::Terminal => {
                    let lang = Lang::from_code(&lang);
                    println!(
                        "{} {} — kernel {}",
                        doc.distribution, doc.distribution_version, doc.kernel_version
                    );
                    match registry::lookup(&doc.command) {
                        Some(spec) => print!("{}", render::render_text(&doc.output, spec, lang)),
                        None => println!("(unsupported output format: {})", doc.command),
                    }
                }
            }
        }

        Command::Export { output, lang } => {
            let config = Config::from_env()?;
            let store = AnalysisStore::new(config.analysis_path());
            let doc = store.load()?;

            let lang = Lang::from_code(&lang);
            let html = render::render_document(&doc, lang, RenderMode::Static);
            let exporter = PdfExporter::new(&config.wkhtmltopdf_bin, config.tool_timeout);
            let bytes = exporter.render(&html).await?;

            std::fs::write(&output, bytes)
                .with_context(|| format!("failed to write {output}"))?;
            println!("wrote {output}");
        }

        Command::Commands => {
            for id in registry::supported_commands() {
                println!("{id}");
            }
        }
    }

    Ok(())
}
