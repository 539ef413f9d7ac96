use leptos::prelude::*;
use leptos_meta::{provide_meta_context, Meta, MetaTags, Stylesheet, Title};
use leptos_router::{components::{Route, Router, Routes, A}, StaticSegment};
use strum::IntoEnumIterator;

use scroll_pager_utils::constants::PANEL_ROUTE;
use scroll_pager_utils::error_template::ErrorTemplate;
use scroll_pager_utils::errors::AppError;

use crate::feed::{FeedKind, PanelFeed, WindowFeed};

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <Meta
                    http_equiv="Content-Security-Policy"
                    content=move || {
                        // inserts the CSP with nonce on the server, empty on the client
                        use_nonce().map(|nonce| {
                            format!(
                                "default-src 'self';
                                script-src 'strict-dynamic' 'nonce-{nonce}' 'wasm-unsafe-eval';
                                img-src 'self' data:;
                                style-src 'self' 'nonce-{nonce}';
                                connect-src 'self' ws://localhost:3001/ ws://127.0.0.1:3001/;"
                            )
                        }).unwrap_or_default()
                    }
                />
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/scroll_pager.css"/>

        <Title text="Scroll pager"/>
        <Router>
            <main class="min-h-screen">
                <FeedNavigation/>
                <Routes fallback=|| {
                    let mut outside_errors = Errors::default();
                    outside_errors.insert_with_default_key(AppError::NotFound);
                    view! {
                        <ErrorTemplate outside_errors/>
                    }
                }>
                    <Route path=StaticSegment("") view=WindowFeed/>
                    <Route path=StaticSegment(PANEL_ROUTE) view=PanelFeed/>
                </Routes>
            </main>
        </Router>
    }
}

/// Links to every feed
#[component]
fn FeedNavigation() -> impl IntoView {
    view! {
        <nav class="sticky top-0 z-10 flex gap-4 justify-center p-2 bg-base-300">
        {
            FeedKind::iter().map(|feed_kind| view! {
                <A href=feed_kind.path()>{feed_kind.to_string()}</A>
            }).collect_view()
        }
        </nav>
    }
}
