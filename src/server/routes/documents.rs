//! Document management endpoints: multipart upload, listing, download,
//! deletion.

use crate::auth::rbac::{require_permission, Action, Module};
use crate::server::middleware::AuthenticatedUser;
use crate::server::routes::{ApiResponse, PageQuery};
use crate::server::AppState;
use crate::storage::database::NewDocument;
use crate::storage::files::LocalStorage;
use crate::utils::error::{AppError, Result};
use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::TryStreamExt;
use tracing::info;
use uuid::Uuid;

/// Configure document routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/documents")
            .route("", web::get().to(list_documents))
            .route("", web::post().to(upload_document))
            .route("/{id}", web::get().to(download_document))
            .route("/{id}", web::delete().to(delete_document)),
    );
}

async fn list_documents(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Documents, Action::View)?;

    let (page, per_page) = query.clamped();
    let documents = state.storage.db().list_documents(page, per_page).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(documents)))
}

/// Upload a document as the `file` field of a multipart form.
async fn upload_document(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Documents, Action::Create)?;

    let max_size = state.config.uploads.max_size_bytes;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut data: Vec<u8> = Vec::new();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart payload: {}", e)))?
    {
        let (is_file_field, field_filename) = match field.content_disposition() {
            Some(disposition) => (
                disposition.get_name() == Some("file"),
                disposition.get_filename().map(str::to_string),
            ),
            None => (false, None),
        };
        if !is_file_field {
            continue;
        }

        filename = field_filename;
        content_type = field.content_type().map(|mime| mime.to_string());

        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::validation(format!("Invalid multipart payload: {}", e)))?
        {
            if data.len() + chunk.len() > max_size {
                return Err(AppError::validation(format!(
                    "File exceeds the {} byte upload limit",
                    max_size
                )));
            }
            data.extend_from_slice(&chunk);
        }
    }

    let filename =
        filename.ok_or_else(|| AppError::validation("Missing required field: file"))?;
    if data.is_empty() {
        return Err(AppError::validation("Uploaded file is empty"));
    }

    let content_type = content_type
        .unwrap_or_else(|| LocalStorage::detect_content_type(&filename).to_string());

    let storage_key = state.storage.files.store(&data).await?;
    let document = state
        .storage
        .db()
        .create_document(NewDocument {
            filename,
            content_type,
            size: data.len() as i64,
            storage_key,
            uploaded_by: user.0.id,
        })
        .await?;

    info!(
        "Document {} uploaded by {} ({} bytes)",
        document.filename, user.0.username, document.size
    );
    Ok(HttpResponse::Created().json(ApiResponse::success(document)))
}

async fn download_document(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Documents, Action::View)?;

    let document = state
        .storage
        .db()
        .find_document_by_id(path.into_inner())
        .await?
        .ok_or_else(|| AppError::not_found("Document not found"))?;

    let content = state.storage.files.get(&document.storage_key).await?;

    Ok(HttpResponse::Ok()
        .content_type(document.content_type.clone())
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{}\"", document.filename),
        ))
        .body(content))
}

async fn delete_document(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse> {
    require_permission(user.role()?, Module::Documents, Action::Delete)?;

    let document = state.storage.db().delete_document(path.into_inner()).await?;
    state.storage.files.delete(&document.storage_key).await?;

    info!("Document {} deleted by {}", document.filename, user.0.username);
    Ok(HttpResponse::Ok().json(ApiResponse::success("Document deleted")))
}
