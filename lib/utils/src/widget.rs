use leptos::prelude::*;

use crate::errors::{AppError, ErrorDisplay};
use crate::icons::LoadingIcon;

/// Component to display a loading indicator or error depending on the input signals
#[component]
pub fn LoadIndicators(
    #[prop(into)]
    is_loading: Signal<bool>,
    #[prop(into)]
    load_error: Signal<Option<AppError>>,
) -> impl IntoView {
    view! {
        {
            move || load_error.get().map(|error| view! {
                <div class="flex justify-start py-4"><ErrorDisplay error/></div>
            })
        }
        <div class="w-full min-h-9">
            <Show
                when=is_loading
            >
                <LoadingIcon/>
            </Show>
        </div>
    }
}

/// Displays a closing line once every page has been loaded
#[component]
pub fn EndOfFeed(
    #[prop(into)]
    is_exhausted: Signal<bool>,
    #[prop(into)]
    item_count: Signal<usize>,
) -> impl IntoView {
    view! {
        <Show when=is_exhausted>
            <div class="w-full py-4 text-center text-sm text-gray-400">
                {move || format!("All {} items loaded.", item_count.get())}
            </div>
        </Show>
    }
}
