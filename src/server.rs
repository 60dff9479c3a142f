//! HTTP API over the analysis pipeline.
//!
//! Routes:
//! - `POST /upload_dump/` - multipart dump upload; extracts the OS profile
//! - `POST /analyze/{command}` - run one registered plugin on the last dump
//! - `GET /results` - interactive HTML report (`?lang=en|fr`)
//! - `GET /results/pdf` - static report rendered to PDF
//! - `GET /api/results` - the raw persisted document
//! - `GET /health` - liveness

use crate::config::Config;
use crate::document::AnalysisDocument;
use crate::error::{DumpsightError, Result};
use crate::i18n::Lang;
use crate::pdf::PdfExporter;
use crate::profile;
use crate::render::{self, RenderMode};
use crate::registry;
use crate::store::AnalysisStore;
use crate::volatility::{VolatilityRunner, BANNER_COMMAND};
use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

pub struct AppState {
    config: Config,
    store: AnalysisStore,
    runner: VolatilityRunner,
    exporter: PdfExporter,
    /// Path of the last uploaded dump; process-lifetime, like the store slot.
    dump_path: RwLock<Option<PathBuf>>,
}

type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = AnalysisStore::new(config.analysis_path());
        let runner = VolatilityRunner::new(&config.volatility_bin, config.tool_timeout);
        let exporter = PdfExporter::new(&config.wkhtmltopdf_bin, config.tool_timeout);
        Self { config, store, runner, exporter, dump_path: RwLock::new(None) }
    }
}

#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> {
        Json(Self { success: true, data: Some(data), error: None })
    }
}

/// Error wrapper mapping the pipeline taxonomy onto HTTP statuses.
struct AppError(DumpsightError);

impl From<DumpsightError> for AppError {
    fn from(err: DumpsightError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DumpsightError::ProfileNotFound => StatusCode::UNPROCESSABLE_ENTITY,
            DumpsightError::UnsupportedCommand { .. } | DumpsightError::InvalidUpload { .. } => {
                StatusCode::BAD_REQUEST
            }
            DumpsightError::NoPriorAnalysis | DumpsightError::NoDump => StatusCode::NOT_FOUND,
            DumpsightError::ToolTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            DumpsightError::ExternalTool { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if !self.0.is_user_error() {
            error!("request failed: {}", self.0);
        }
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct LangQuery {
    lang: Option<String>,
}

impl LangQuery {
    fn lang(&self) -> Lang {
        self.lang.as_deref().map_or(Lang::En, Lang::from_code)
    }
}

#[derive(Debug, Serialize)]
struct UploadResponse {
    kernel_version: String,
    distribution: String,
    distro_version: String,
}

#[derive(Debug, Serialize)]
struct AnalyzeResponse {
    command: String,
    rows: usize,
}

/// POST /upload_dump/ - store the dump, extract and persist the OS profile.
async fn upload_dump(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> std::result::Result<impl IntoResponse, AppError> {
    let dump_path = state.config.dump_path();
    let mut received = false;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| DumpsightError::invalid_upload(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let mut file = tokio::fs::File::create(&dump_path)
            .await
            .map_err(DumpsightError::from)?;
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| DumpsightError::invalid_upload(format!("upload aborted: {e}")))?
        {
            file.write_all(&chunk).await.map_err(DumpsightError::from)?;
        }
        file.flush().await.map_err(DumpsightError::from)?;
        received = true;
        break;
    }

    if !received {
        return Err(DumpsightError::invalid_upload("no file field in upload").into());
    }

    let banner_text = state.runner.banner(&dump_path).await?;
    let profile = profile::extract_profile(&banner_text)?;

    let spec = registry::lookup(BANNER_COMMAND)
        .ok_or_else(|| DumpsightError::unsupported_command(BANNER_COMMAND))?;
    let output = crate::parsers::parse_output(&banner_text, spec);

    let doc = AnalysisDocument::from_profile(&profile, BANNER_COMMAND, output);
    state.store.save(&doc)?;
    *state.dump_path.write().await = Some(dump_path);

    info!(
        "dump uploaded: {} {} (kernel {})",
        profile.distribution, profile.distro_version, profile.kernel_version
    );

    Ok(ApiResponse::ok(UploadResponse {
        kernel_version: profile.kernel_version,
        distribution: profile.distribution,
        distro_version: profile.distro_version,
    }))
}

/// POST /analyze/{command} - run one plugin against the last uploaded dump.
async fn analyze(
    State(state): State<SharedState>,
    Path(command): Path<String>,
) -> std::result::Result<impl IntoResponse, AppError> {
    let spec = registry::lookup(&command)
        .ok_or_else(|| DumpsightError::unsupported_command(command.as_str()))?;

    let dump_path = state
        .dump_path
        .read()
        .await
        .clone()
        .ok_or(DumpsightError::NoDump)?;

    let stdout = state.runner.run_plugin(&dump_path, spec.id).await?;
    let output = crate::parsers::parse_output(&stdout, spec);

    let mut doc = state.store.load()?;
    doc.replace_output(spec.id, output);
    state.store.save(&doc)?;

    info!("{}: {} rows parsed", spec.id, doc.output.len());

    Ok(ApiResponse::ok(AnalyzeResponse { command: spec.id.to_string(), rows: doc.output.len() }))
}

/// GET /results - interactive HTML report.
async fn results(
    State(state): State<SharedState>,
    Query(query): Query<LangQuery>,
) -> Response {
    let lang = query.lang();
    match state.store.load() {
        Ok(doc) => Html(render::render_document(&doc, lang, RenderMode::Interactive))
            .into_response(),
        Err(DumpsightError::NoPriorAnalysis) => (
            StatusCode::NOT_FOUND,
            Html(render::render_error_page(lang, "no_analysis")),
        )
            .into_response(),
        Err(err) => AppError(err).into_response(),
    }
}

/// GET /results/pdf - static report rendered by wkhtmltopdf.
async fn results_pdf(
    State(state): State<SharedState>,
    Query(query): Query<LangQuery>,
) -> std::result::Result<Response, AppError> {
    let lang = query.lang();
    let doc = state.store.load()?;
    let html = render::render_document(&doc, lang, RenderMode::Static);
    let pdf_bytes = state.exporter.render(&html).await?;

    let filename = format!(
        "dump_report_{}.pdf",
        doc.analysis_timestamp.format("%Y%m%d_%H%M%S")
    );
    let content_disposition = format!("attachment; filename=\"{filename}\"");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, content_disposition),
        ],
        pdf_bytes,
    )
        .into_response())
}

/// GET /api/results - the persisted document, verbatim.
async fn api_results(
    State(state): State<SharedState>,
) -> std::result::Result<Json<AnalysisDocument>, AppError> {
    Ok(Json(state.store.load()?))
}

async fn health() -> &'static str {
    "ok"
}

/// Build the application router.
pub fn router(state: SharedState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/upload_dump/", post(upload_dump))
        .route("/analyze/{command}", post(analyze))
        .route("/results", get(results))
        .route("/results/pdf", get(results_pdf))
        .route("/api/results", get(api_results))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(config: Config) -> Result<()> {
    config.validate()?;
    let listen = config.listen.clone();
    let state = Arc::new(AppState::new(config));

    if !state.runner.is_available() {
        tracing::warn!("volatility binary not runnable; uploads will fail until it is installed");
    }

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    info!("listening on {}", listen);
    axum::serve(listener, router(state))
        .await
        .map_err(DumpsightError::from)?;
    Ok(())
}
