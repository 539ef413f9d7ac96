use axum::extract::FromRef;
use leptos::prelude::LeptosOptions;
use leptos_axum::AxumRouteListing;

use scroll_pager_app::item::ssr::ItemCatalog;

/// Server state, `FromRef` lets handlers extract any of its fields. The leptos route handlers need `LeptosOptions`.
#[derive(FromRef, Debug, Clone)]
pub struct AppState {
    pub leptos_options: LeptosOptions,
    pub item_catalog: ItemCatalog,
    pub routes: Vec<AxumRouteListing>,
}
