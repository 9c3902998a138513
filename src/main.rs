#![forbid(unsafe_code)]

//! HCMS guide CLI
//!
//! One-shot analysis (`check`) or the HTTP API (`serve`).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use hcms_guide::api::{start_api_server, ApiContext};
use hcms_guide::config;
use hcms_guide::extraction::{extract_document, ExtractedDocument, PdfTextExtractor};
use hcms_guide::guidance::{analyze, ExamRequest, ExamTables, ResultView, Toggles};

/// Special health examination guide for construction trades
#[derive(Parser, Debug)]
#[command(name = "hcms-guide", author, version, about, long_about = None)]
struct Args {
    /// Exam tables JSON replacing the bundled tables
    #[arg(long, global = true, env = config::TABLES_ENV)]
    tables: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyse a query and/or safety data sheet and print the result
    Check(CheckArgs),
    /// Serve the HTTP API
    Serve {
        #[arg(long, env = config::ADDR_ENV, default_value = config::DEFAULT_BIND_ADDR)]
        addr: SocketAddr,
    },
}

#[derive(clap::Args, Debug)]
struct CheckArgs {
    /// Trade or substance, e.g. 도장공, 벤젠
    #[arg(short, long, default_value = "")]
    query: String,

    /// Safety data sheet PDF
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// File with already extracted document text
    #[arg(long, conflicts_with = "pdf")]
    text_file: Option<PathBuf>,

    /// Periodic exam (default is pre-placement)
    #[arg(long)]
    periodic: bool,

    /// Vibration exposure
    #[arg(long)]
    vibration: bool,

    /// Outdoor / UV exposure
    #[arg(long)]
    outdoor: bool,

    /// Print JSON instead of the text panels
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    hcms_guide::init_tracing();
    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);

    let tables = ExamTables::resolve(args.tables.as_deref())
        .context("Failed to load exam tables")?;

    match args.command {
        Command::Check(check_args) => check(&tables, check_args),
        Command::Serve { addr } => serve(tables, addr).await,
    }
}

fn check(tables: &ExamTables, args: CheckArgs) -> Result<()> {
    let document_text = if let Some(path) = &args.pdf {
        let document = read_pdf(path)?;
        if let Some(warning) = &document.warning {
            eprintln!("warning: {}: {warning}", path.display());
        }
        Some(document.text)
    } else if let Some(path) = &args.text_file {
        Some(
            std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read {}", path.display()))?,
        )
    } else {
        None
    };

    let toggles = Toggles {
        pre_placement: !args.periodic,
        vibration: args.vibration,
        outdoor: args.outdoor,
    };
    let mut request = ExamRequest::new(args.query).with_toggles(toggles);
    if let Some(text) = document_text {
        request = request.with_document_text(text);
    }

    let view = ResultView::new(&request, analyze(tables, &request));

    if args.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", view.render_text());
    }
    Ok(())
}

/// Read a safety data sheet. Unreadable content comes back as a warning on
/// the document; only a missing or unreadable file is an error.
fn read_pdf(path: &Path) -> Result<ExtractedDocument> {
    let bytes = std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    Ok(extract_document(&PdfTextExtractor, &bytes))
}

async fn serve(tables: ExamTables, addr: SocketAddr) -> Result<()> {
    let mut server = start_api_server(ApiContext::new(tables), addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;

    tracing::info!(
        session_id = %server.session.session_id,
        addr = %server.session.addr,
        "Serving HCMS guide API; press Ctrl+C to stop"
    );

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for Ctrl+C")?;

    server.shutdown();
    server.stopped().await;
    Ok(())
}
