use std::env;
use axum::{
    body::Body,
    extract::State,
    http::{Request, Response, StatusCode, Uri},
    response::{IntoResponse, Response as AxumResponse},
};
use axum::http::{header, HeaderValue};
use leptos::prelude::{Errors, LeptosOptions};
use leptos::view;
use tower::util::ServiceExt;
use tower_http::services::ServeDir;

use scroll_pager_utils::error_template::ErrorTemplate;
use scroll_pager_utils::errors::AppError;

/// Serves static files from the site root, renders the not found page for anything else.
pub async fn file_and_error_handler(
    uri: Uri,
    State(options): State<LeptosOptions>,
    req: Request<Body>,
) -> AxumResponse {
    let root = options.site_root.clone();
    match get_static_file(uri, &root).await {
        Some(response) if response.status() == StatusCode::OK => response.into_response(),
        _ => {
            let mut errors = Errors::default();
            errors.insert_with_default_key(AppError::NotFound);
            let handler = leptos_axum::render_app_to_stream(
                move || view! {<ErrorTemplate outside_errors=errors.clone()/>},
            );
            handler(req).await.into_response()
        }
    }
}

async fn get_static_file(uri: Uri, root: &str) -> Option<Response<Body>> {
    let req = match Request::builder().uri(uri).body(Body::empty()) {
        Ok(req) => req,
        Err(e) => {
            log::warn!("Cannot build static file request: {e}");
            return None
        }
    };
    // `ServeDir` implements `tower::Service` so we can call it with `tower::ServiceExt::oneshot`
    let mut response = ServeDir::new(root)
        .oneshot(req)
        .await
        .unwrap_or_else(|err| match err {})
        .into_response();

    if env::var("LEPTOS_ENV").is_ok_and(|leptos_env| leptos_env == "PROD" ) {
        response.headers_mut().append(header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=31536000, immutable"));
    }

    Some(response)
}
