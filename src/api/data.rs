//! Data backup download, merge import upload and the change history.

use super::AppState;
use crate::{
    core::{data, history},
    errors::{Error, Result},
    models::{HistoryEntry, ImportChanges},
};
use axum::{
    Json,
    extract::{Multipart, Path, State, multipart::MultipartRejection},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Multipart field carrying the uploaded data file.
const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    success: bool,
    message: &'static str,
    changes: ImportChanges,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    message: &'static str,
    deleted: u64,
}

pub async fn export_handler(State(state): State<AppState>) -> Result<Response> {
    let export = data::export_data(&state.db).await?;
    let disposition = format!("attachment; filename=\"{}\"", export.filename);
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(export.snapshot)).into_response())
}

/// Reads the `file` field of the upload, returning its name and contents.
async fn read_upload(mut multipart: Multipart) -> Result<(Option<String>, Vec<u8>)> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().map(ToString::to_string);
        let bytes = field.bytes().await?;
        return Ok((filename, bytes.to_vec()));
    }
    Err(Error::validation("Upload must include a 'file' field"))
}

pub async fn import_handler(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ImportResponse>> {
    let (filename, bytes) = read_upload(multipart?).await?;
    let snapshot = data::parse_data_file(&bytes)?;
    let changes = data::import_data(&state.db, snapshot, filename).await?;
    Ok(Json(ImportResponse {
        success: true,
        message: "Data imported successfully",
        changes,
    }))
}

pub async fn history_handler(State(state): State<AppState>) -> Result<Json<Vec<HistoryEntry>>> {
    Ok(Json(history::list(&state.db).await?))
}

pub async fn delete_history_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    history::delete(&state.db, &id).await?;
    Ok(Json(serde_json::json!({ "message": format!("History entry {id} deleted") })))
}

pub async fn clear_history_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    let deleted = history::clear(&state.db).await?;
    Ok(Json(ClearResponse {
        message: "History cleared",
        deleted,
    }))
}
