use std::env;
use std::env::VarError;
use std::str::FromStr;
use std::time::Duration;

use axum::{body::Body as AxumBody, extract::{Path, State}, http::Request, response::{IntoResponse, Response}, routing::get, Router};
use axum::body::Body;
use axum::http::HeaderValue;
use leptos::prelude::*;
use leptos_axum::{generate_route_list, handle_server_fns_with_context, LeptosRoutes};

use scroll_pager_app::app::*;
use scroll_pager_app::item::ssr::ItemCatalog;
use scroll_pager_utils::constants::{DEFAULT_CATALOG_SIZE, DEFAULT_PAGE_LATENCY_MS};
use crate::fallback::file_and_error_handler;
use crate::state::AppState;

mod fallback;
mod state;

pub const ITEM_CATALOG_SIZE_ENV: &str = "ITEM_CATALOG_SIZE";
pub const PAGE_LATENCY_MS_ENV: &str = "PAGE_LATENCY_MS";

/// Parses the value of the env variable `env_name`, falls back to `default` when it is missing or invalid.
fn parse_env_value<T: FromStr>(env_name: &str, env_value: Result<String, VarError>, default: T) -> T {
    match env_value {
        Ok(value) => match T::from_str(value.trim()) {
            Ok(value) => {
                log::debug!("Got {env_name} from env variable.");
                value
            },
            Err(_) => {
                log::error!("Could not parse {env_name} value '{value}', take default value.");
                default
            }
        },
        Err(_) => {
            log::debug!("Could not find {env_name} in env variable, take default value.");
            default
        }
    }
}

pub fn get_item_catalog_size() -> usize {
    parse_env_value(ITEM_CATALOG_SIZE_ENV, env::var(ITEM_CATALOG_SIZE_ENV), DEFAULT_CATALOG_SIZE)
}

pub fn get_page_latency() -> Duration {
    Duration::from_millis(parse_env_value(PAGE_LATENCY_MS_ENV, env::var(PAGE_LATENCY_MS_ENV), DEFAULT_PAGE_LATENCY_MS))
}

async fn server_fn_handler(
    State(app_state): State<AppState>,
    path: Path<String>,
    request: Request<AxumBody>,
) -> impl IntoResponse {
    log::info!("Serve fn handler for path: {path:?}");

    handle_server_fns_with_context(
        move || {
            provide_context(app_state.item_catalog);
        },
        request,
    ).await
}

async fn leptos_routes_handler(
    app_state: State<AppState>,
    req: Request<AxumBody>,
) -> Response {
    let leptos_options = app_state.leptos_options.clone();
    let item_catalog = app_state.item_catalog;

    log::info!("leptos_routes_handler for uri: {:?}", req.uri());
    let handler = leptos_axum::render_route_with_context(
        app_state.routes.clone(),
        move || {
            provide_context(item_catalog);
        },
        move || shell(leptos_options.clone()),
    );
    let mut response = handler(app_state, req).await.into_response();
    add_security_headers(&mut response);
    response
}

fn add_security_headers(response: &mut Response<Body>) {
    let headers = response.headers_mut();

    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert("Referrer-Policy", HeaderValue::from_static("strict-origin-when-cross-origin"));
    headers.insert("Cross-Origin-Opener-Policy", HeaderValue::from_static("same-origin"));
    headers.insert("Cross-Origin-Resource-Policy", HeaderValue::from_static("same-origin"));
}

#[tokio::main]
async fn main() {
    simple_logger::init_with_level(log::Level::Info).expect("Should be able to initialize logging.");

    // Setting get_configuration(None) means we'll be using cargo-leptos's env values
    let conf = get_configuration(None).expect("Should load leptos configuration.");
    let leptos_options = conf.leptos_options;
    let addr = leptos_options.site_addr;
    let routes = generate_route_list(App);

    let item_catalog = ItemCatalog::new(get_item_catalog_size(), get_page_latency());
    log::info!("Serve catalog of {} items with a page latency of {:?}", item_catalog.size(), item_catalog.latency());

    let app_state = AppState {
        leptos_options: leptos_options.clone(),
        item_catalog,
        routes: routes.clone(),
    };

    let app = Router::new()
        .route(
            "/api/{id}",
            get(server_fn_handler).post(server_fn_handler)
        )
        .leptos_routes_with_handler(routes, get(leptos_routes_handler))
        .fallback(file_and_error_handler)
        .with_state(app_state);

    log::info!("listening on http://{}", &addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.expect("Should bind server address.");
    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server should run.");
}
