//! HTTP entry point for method calls.
//!
//! `/okapi/services/<path>` is decoded once into an okapi [`Request`] tagged
//! with the external transport, handed to the dispatcher, and the okapi
//! [`OkapiResponse`] is converted back into an HTTP response.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Form,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;

use okapi_core::error::{ClientCode, OkapiError, Result};
use okapi_core::method::SERVICES_PREFIX;
use okapi_core::request::{Request, Transport};
use okapi_core::response::Response as OkapiResponse;

use crate::app_state::AppState;
use crate::views;

/// Query parameters consumed by the transport itself.
pub const PARAM_CONSUMER_KEY: &str = "consumer_key";
pub const PARAM_ACCESS_TOKEN: &str = "access_token";
pub const PARAM_LANGPREF: &str = "langpref";

pub async fn okapi_get(
    State(app): State<AppState>,
    Path(path): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    dispatch_http(&app, &path, query).await
}

/// POST accepts the same arguments as a urlencoded form; form fields win over the query.
pub async fn okapi_post(
    State(app): State<AppState>,
    Path(path): Path<String>,
    Query(mut params): Query<HashMap<String, String>>,
    form: Option<Form<HashMap<String, String>>>,
) -> Response {
    if let Some(Form(fields)) = form {
        params.extend(fields);
    }
    dispatch_http(&app, &path, params).await
}

async fn dispatch_http(app: &AppState, path: &str, params: HashMap<String, String>) -> Response {
    let name = format!("{SERVICES_PREFIX}{path}");

    let req = match build_request(app, params) {
        Ok(r) => r,
        Err(e) => return error_response(&e),
    };

    match app.dispatcher().call(&name, &req).await {
        Ok(resp) => into_http(resp),
        // Only the requested method itself gets the HTML page; a handler
        // naming some other unknown method answers with the JSON error.
        Err(OkapiError::UnknownMethod(_)) if !app.dispatcher().registry().exists(&name) => {
            app.metrics().not_found.inc(&[("kind", "method")]);
            into_http(views::not_found::render(&app.cfg().gateway))
        }
        Err(e) => error_response(&e),
    }
}

/// Resolve identity and arguments from the request parameters.
pub fn build_request(app: &AppState, mut query: HashMap<String, String>) -> Result<Request> {
    let consumer_key = query.remove(PARAM_CONSUMER_KEY);
    let access_token = query.remove(PARAM_ACCESS_TOKEN);
    let langpref = query.remove(PARAM_LANGPREF);

    let req = match (access_token, consumer_key) {
        (Some(tk), ck) => {
            let (consumer, token) = app.resolve_token(&tk)?;
            if let Some(ck) = ck {
                if ck != consumer.key {
                    return Err(OkapiError::BadRequest(
                        "token was issued to a different consumer".into(),
                    ));
                }
            }
            Request::with_token(consumer, token, Transport::Http)
        }
        (None, Some(ck)) => Request::with_consumer(app.resolve_consumer(&ck)?, Transport::Http),
        (None, None) => Request::anonymous(Transport::Http),
    };

    let langs: Vec<String> = langpref
        .map(|l| l.split('|').filter(|s| !s.is_empty()).map(str::to_string).collect())
        .unwrap_or_default();

    Ok(req.langpref(langs).params(query))
}

pub fn into_http(resp: OkapiResponse) -> Response {
    let status = StatusCode::from_u16(resp.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, resp.content_type)], resp.body).into_response()
}

fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::UnknownMethod | ClientCode::MissingDocumentation => StatusCode::NOT_FOUND,
        ClientCode::AuthPrecondition => StatusCode::UNAUTHORIZED,
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::MisconfiguredHandler | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(e: &OkapiError) -> Response {
    let code = e.client_code();
    let body = json!({
        "error": {
            "code": code.as_str(),
            "message": e.to_string(),
        }
    });
    (status_for(code), axum::Json(body)).into_response()
}
