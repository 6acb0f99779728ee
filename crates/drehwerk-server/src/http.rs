// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Request handlers and router.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::info;

use drehwerk_core::{AppConfig, BatchReport};
use drehwerk_pipeline::{BatchRequest, BatchRunner};
use drehwerk_print::installed_printers;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `POST /process-pdfs`.
///
/// Directory and printer fields are optional; absent fields fall back to the
/// environment configuration. `fileName` restricts the batch to that one
/// file.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub source: Option<PathBuf>,
    pub destination: Option<PathBuf>,
    pub printer: Option<String>,
    pub file_name: Option<String>,
}

/// Body of a successful `POST /process-pdfs`.
#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub message: String,
    pub report: BatchReport,
}

/// Body of a successful `GET /printers`.
#[derive(Debug, Serialize)]
pub struct PrintersResponse {
    pub printers: Vec<String>,
}

/// Assemble the service router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/printers", get(list_printers))
        .route("/process-pdfs", post(process_pdfs))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `GET /printers` — the destinations the host spooler currently knows.
async fn list_printers() -> Result<Json<PrintersResponse>, ApiError> {
    let printers = installed_printers().await.map_err(ApiError::Registry)?;
    Ok(Json(PrintersResponse { printers }))
}

/// `POST /process-pdfs` — run one batch over the source directory.
async fn process_pdfs(
    State(state): State<AppState>,
    Json(request): Json<ProcessRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    let batch = resolve_request(request, &state.config)?;
    info!(
        source = %batch.source_dir.display(),
        destination = %batch.destination_dir.display(),
        printer = %batch.printer,
        "processing request"
    );

    let runner = BatchRunner::new(Arc::clone(&state.spooler));
    let report = runner.run(&batch).await.map_err(ApiError::Batch)?;

    Ok(Json(ProcessResponse {
        message: "PDFs processed successfully.".to_string(),
        report,
    }))
}

/// Merge request fields with the configured defaults.
fn resolve_request(request: ProcessRequest, config: &AppConfig) -> Result<BatchRequest, ApiError> {
    let source_dir = request.source.or_else(|| config.source_dir.clone());
    let destination_dir = request.destination.or_else(|| config.destination_dir.clone());
    let printer = request.printer.or_else(|| config.printer.clone());

    match (source_dir, destination_dir, printer) {
        (Some(source_dir), Some(destination_dir), Some(printer)) => Ok(BatchRequest {
            source_dir,
            destination_dir,
            printer,
            file_filter: request.file_name,
        }),
        _ => Err(ApiError::MissingFields),
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use lopdf::{Document, Object, Stream, dictionary};

    use drehwerk_core::MediaSize;
    use drehwerk_core::error::{DrehwerkError, Result as CoreResult};
    use drehwerk_print::Spooler;

    use super::*;

    /// One-page PDF for request fixtures.
    fn sample_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 283.into(), 142.into()],
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("serialise fixture PDF");
        bytes
    }

    fn write_pdf(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), sample_pdf()).expect("write fixture");
    }

    /// Spooler double recording the printer each submission targeted.
    #[derive(Clone, Default)]
    struct FakeSpooler {
        printers_used: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Spooler for FakeSpooler {
        async fn submit(&self, _document: &Path, printer: &str, _media: MediaSize) -> CoreResult<()> {
            self.printers_used
                .lock()
                .expect("lock printers")
                .push(printer.to_string());
            Ok(())
        }
    }

    fn state_with(config: AppConfig, spooler: FakeSpooler) -> AppState {
        AppState {
            config,
            spooler: Arc::new(spooler),
        }
    }

    fn empty_request() -> ProcessRequest {
        ProcessRequest {
            source: None,
            destination: None,
            printer: None,
            file_name: None,
        }
    }

    #[test]
    fn request_body_uses_camel_case_file_name() {
        let request: ProcessRequest =
            serde_json::from_str(r#"{"source":"/in","fileName":"label.pdf"}"#)
                .expect("parse request");
        assert_eq!(request.source, Some(PathBuf::from("/in")));
        assert_eq!(request.file_name.as_deref(), Some("label.pdf"));
        assert_eq!(request.printer, None);
    }

    #[test]
    fn partially_resolved_requests_are_rejected() {
        let config = AppConfig {
            printer: Some("LabelPrinter".to_string()),
            ..AppConfig::default()
        };
        let request = ProcessRequest {
            source: Some(PathBuf::from("/in")),
            ..empty_request()
        };
        let err = resolve_request(request, &config).expect_err("destination is missing");
        assert!(matches!(err, ApiError::MissingFields));
    }

    #[tokio::test]
    async fn fully_unconfigured_request_is_bad() {
        let state = state_with(AppConfig::default(), FakeSpooler::default());
        let err = process_pdfs(State(state), Json(empty_request()))
            .await
            .expect_err("nothing is configured");
        assert!(matches!(err, ApiError::MissingFields));
    }

    #[tokio::test]
    async fn request_falls_back_to_configured_defaults() {
        let source = tempfile::tempdir().expect("source dir");
        let dest = tempfile::tempdir().expect("dest dir");
        write_pdf(source.path(), "label.pdf");

        let config = AppConfig {
            source_dir: Some(source.path().to_path_buf()),
            destination_dir: Some(dest.path().to_path_buf()),
            printer: Some("ConfigPrinter".to_string()),
            ..AppConfig::default()
        };
        let spooler = FakeSpooler::default();
        let state = state_with(config, spooler.clone());

        let Json(response) = process_pdfs(State(state), Json(empty_request()))
            .await
            .expect("batch runs");

        assert_eq!(response.message, "PDFs processed successfully.");
        assert_eq!(response.report.processed, 1);
        assert!(dest.path().join("label-processed.pdf").exists());
        assert_eq!(
            spooler.printers_used.lock().expect("lock printers").as_slice(),
            ["ConfigPrinter"]
        );
    }

    #[tokio::test]
    async fn request_fields_override_the_configuration() {
        let source = tempfile::tempdir().expect("source dir");
        let dest = tempfile::tempdir().expect("dest dir");
        write_pdf(source.path(), "label.pdf");

        let config = AppConfig {
            printer: Some("ConfigPrinter".to_string()),
            ..AppConfig::default()
        };
        let spooler = FakeSpooler::default();
        let state = state_with(config, spooler.clone());

        let request = ProcessRequest {
            source: Some(source.path().to_path_buf()),
            destination: Some(dest.path().to_path_buf()),
            printer: Some("RequestPrinter".to_string()),
            file_name: None,
        };
        let Json(response) = process_pdfs(State(state), Json(request))
            .await
            .expect("batch runs");

        assert_eq!(response.report.printer, "RequestPrinter");
        assert_eq!(
            spooler.printers_used.lock().expect("lock printers").as_slice(),
            ["RequestPrinter"]
        );
    }

    #[tokio::test]
    async fn file_name_restricts_the_batch() {
        let source = tempfile::tempdir().expect("source dir");
        let dest = tempfile::tempdir().expect("dest dir");
        write_pdf(source.path(), "a.pdf");
        write_pdf(source.path(), "b.pdf");

        let config = AppConfig {
            source_dir: Some(source.path().to_path_buf()),
            destination_dir: Some(dest.path().to_path_buf()),
            printer: Some("LabelPrinter".to_string()),
            ..AppConfig::default()
        };
        let state = state_with(config, FakeSpooler::default());

        let request = ProcessRequest {
            file_name: Some("b.pdf".to_string()),
            ..empty_request()
        };
        let Json(response) = process_pdfs(State(state), Json(request))
            .await
            .expect("batch runs");

        assert_eq!(response.report.outcomes.len(), 1);
        assert_eq!(response.report.outcomes[0].file_name, "b.pdf");
        assert!(source.path().join("a.pdf").exists());
        assert!(dest.path().join("b-processed.pdf").exists());
    }

    #[tokio::test]
    async fn unresolvable_source_directory_is_a_batch_error() {
        let dest = tempfile::tempdir().expect("dest dir");
        let config = AppConfig {
            source_dir: Some(PathBuf::from("/nonexistent/drehwerk-in")),
            destination_dir: Some(dest.path().to_path_buf()),
            printer: Some("LabelPrinter".to_string()),
            ..AppConfig::default()
        };
        let state = state_with(config, FakeSpooler::default());

        let err = process_pdfs(State(state), Json(empty_request()))
            .await
            .expect_err("source cannot resolve");
        assert!(matches!(err, ApiError::Batch(DrehwerkError::Batch(_))));
    }
}
