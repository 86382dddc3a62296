use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::StatusCode,
    response::Response,
    Json,
};
use serde_json::json;
use tracing::debug;

use crate::form::{FormAction, FormErrors, FormState, Payload, UploadedFile};
use crate::middleware::logging::{to_response, ApiError};

/// Turns a submitted multipart form into form actions, in field order.
///
/// Text fields: `title`, `description`, `price`, `category`, `image` (URL).
/// The uploaded image travels in a file part named `file`.
pub async fn read_form_actions(
    mut multipart: Multipart,
    file_size_limit: usize,
) -> Result<Vec<FormAction>, Response> {
    let mut actions = Vec::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(err) => return Err(multipart_failure(err)),
        };

        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(str::to_owned);
            let data = field.bytes().await.map_err(multipart_failure)?;

            //Browsers send an empty part when no file was picked
            if data.is_empty() && file_name.is_empty() {
                continue;
            }

            if data.len() > file_size_limit {
                let tmp = "Payload too large";
                return Err(to_response(
                    (
                        StatusCode::PAYLOAD_TOO_LARGE,
                        Json(json!({
                            "error": tmp
                        })),
                    ),
                    Err(ApiError::General(tmp.to_string())),
                ));
            }

            actions.push(FormAction::SelectFile(UploadedFile::new(
                file_name,
                content_type,
                data.to_vec(),
            )));
            continue;
        }

        let value = field.text().await.map_err(multipart_failure)?;
        match name.as_str() {
            "title" => actions.push(FormAction::SetTitle(value)),
            "description" => actions.push(FormAction::SetDescription(value)),
            "price" => actions.push(FormAction::SetPrice(value)),
            "category" => actions.push(FormAction::SetCategory(value)),
            "image" => actions.push(FormAction::SetImageUrl(value)),
            _ => debug!(field = %name, "Ignoring unknown form field"),
        }
    }

    Ok(actions)
}

/// Applies the actions, then submits. A rejected file type sticks no matter
/// which fields follow it, and wins over the validation message for `image`.
pub fn submit(form: FormState, actions: Vec<FormAction>) -> Result<(FormState, Payload), FormErrors> {
    let mut form = form;
    let mut input_errors = FormErrors::new();

    for action in actions {
        let rejected_file = matches!(&action, FormAction::SelectFile(file) if !file.is_image());
        let (next, errors) = form.reduce(action);
        form = next;

        if rejected_file {
            if let Some(message) = errors.get("image") {
                input_errors.insert("image".to_string(), message.clone());
            }
        }
    }

    let (form, mut errors) = form.reduce(FormAction::Submit);
    errors.extend(input_errors);
    if !errors.is_empty() {
        return Err(errors);
    }

    let payload = form.payload()?;
    Ok((form, payload))
}

pub fn validation_failure(errors: FormErrors) -> Response {
    let fields = errors.keys().cloned().collect::<Vec<_>>().join(", ");

    to_response(
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "errors": errors
            })),
        ),
        Err(ApiError::ValidationFail(fields)),
    )
}

/// The draft stays intact; only the form-level error is added.
pub fn submission_failure(form: FormState, reason: String) -> Response {
    let (_, errors) = form.reduce(FormAction::SubmissionFailed);

    to_response(
        (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "errors": errors
            })),
        ),
        Err(ApiError::Upstream(reason)),
    )
}

fn multipart_failure(err: MultipartError) -> Response {
    let status = err.status();
    to_response(
        (
            status,
            Json(json!({
                "error": err.body_text()
            })),
        ),
        Err(ApiError::InvalidForm(err.to_string())),
    )
}
