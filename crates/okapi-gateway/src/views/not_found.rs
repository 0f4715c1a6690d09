//! HTTP 404 page.

use axum::extract::State;
use axum::response::Response;

use okapi_core::response::Response as OkapiResponse;

use crate::app_state::AppState;
use crate::config::GatewaySection;
use crate::transport::http::into_http;

/// Fallback handler for every unrouted path.
pub async fn handler(State(app): State<AppState>) -> Response {
    app.metrics().not_found.inc(&[("kind", "route")]);
    into_http(render(&app.cfg().gateway))
}

/// Render the 404 page for this installation.
pub fn render(gw: &GatewaySection) -> OkapiResponse {
    let base = escape_html(&gw.okapi_base_url());
    let body = format!(
        "<!doctype html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>OKAPI - 404 Not Found</title></head>\n\
         <body>\n\
         <h1>404 Not Found</h1>\n\
         <p>The page you requested does not exist.</p>\n\
         <p>See the <a href=\"{base}\">OKAPI documentation</a> for the list of available methods.</p>\n\
         <p class=\"rev\">OKAPI v{rev}</p>\n\
         </body>\n\
         </html>\n",
        rev = env!("CARGO_PKG_VERSION"),
    );
    OkapiResponse::html(404, body)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
