//! Irei record detail endpoint.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use super::request_context;
use crate::errors::{keys, single_key_body, AppError};
use crate::models::{project_objects, IreiRecord, NrId};
use crate::AppState;

/// Successful outcomes of a record lookup.
#[derive(Debug)]
pub enum RecordDetail {
    /// Record with its DDR objects attached
    Found(IreiRecord),
    /// Record exists but is not linked to a person
    NoPerson(String),
    /// Record's person has no DDR objects
    NoDdrObjects(String),
}

impl IntoResponse for RecordDetail {
    fn into_response(self) -> Response {
        match self {
            RecordDetail::Found(record) => (StatusCode::OK, Json(record)).into_response(),
            RecordDetail::NoPerson(id) => {
                (StatusCode::NO_CONTENT, Json(single_key_body(keys::NO_PERSON, id))).into_response()
            }
            RecordDetail::NoDdrObjects(id) => {
                let body = single_key_body(keys::NO_DDR_OBJECTS, id);
                (StatusCode::NO_CONTENT, Json(body)).into_response()
            }
        }
    }
}

/// Record IDs are limited to `[0-9a-zA-Z_:-]+`.
pub fn is_valid_object_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-'))
}

/// GET /api/1.0/:id - Get a record and the DDR objects of its person.
pub async fn get_ireirecord(
    State(state): State<AppState>,
    Path(object_id): Path<String>,
    headers: HeaderMap,
) -> Result<RecordDetail, AppError> {
    if !is_valid_object_id(&object_id) {
        return Err(AppError::NotFound(object_id));
    }

    let Some(document) = state.docstore.get(&object_id).await? else {
        tracing::debug!(irei_id = %object_id, "Record not in docstore");
        return Err(AppError::NotFound(object_id));
    };

    let ctx = request_context(&headers);
    let Some(mut record) = IreiRecord::from_document(document, &ctx) else {
        return Err(AppError::Docstore {
            reason: "document carries no irei_id".to_string(),
            irei_id: object_id,
        });
    };

    let Some(person) = &record.person else {
        return Ok(RecordDetail::NoPerson(object_id));
    };
    let Some(nr_id) = NrId::parse(&person.nr_id) else {
        tracing::warn!(irei_id = %object_id, nr_id = %person.nr_id, "Malformed person identifier");
        return Ok(RecordDetail::NoPerson(object_id));
    };

    let ddr = state
        .ddr
        .fetch(&nr_id)
        .await
        .map_err(|error| {
            tracing::warn!(irei_id = %object_id, %nr_id, "DDR query failed: {}", error);
            AppError::Upstream {
                irei_id: object_id.clone(),
                error,
            }
        })?;

    if !ddr.status.is_success() {
        tracing::warn!(
            irei_id = %object_id,
            api_url = %ddr.api_url,
            status = ddr.status.as_u16(),
            "DDR query returned an error status"
        );
        return Err(AppError::UpstreamStatus(ddr.status));
    }

    // Entries that are not objects project to nothing.
    let objects = project_objects(&ddr.objects);
    if objects.is_empty() {
        return Ok(RecordDetail::NoDdrObjects(object_id));
    }

    tracing::debug!(
        irei_id = %object_id,
        ui_url = %ddr.ui_url,
        count = ddr.objects.len(),
        "DDR objects found"
    );
    record.ddr_objects = objects;
    Ok(RecordDetail::Found(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_object_ids() {
        assert!(is_valid_object_id("1-1"));
        assert!(is_valid_object_id("ireirecord:abc_123"));
        assert!(!is_valid_object_id(""));
        assert!(!is_valid_object_id("1 1"));
        assert!(!is_valid_object_id("1.1"));
        assert!(!is_valid_object_id("../_search"));
    }

    #[test]
    fn test_empty_outcome_statuses() {
        let resp = RecordDetail::NoPerson("1-1".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let resp = RecordDetail::NoDdrObjects("1-1".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }
}
