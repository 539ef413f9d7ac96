use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use scroll_pager_components::dom_target::ScrollTarget;
use scroll_pager_components::scroll_pager::{ScrollPager, ScrollPagerHandle};
use scroll_pager_core::policy::PageRequest;
use scroll_pager_core::trigger::PageChange;
use scroll_pager_utils::constants::{ITEMS_PER_PAGE, PANEL_PATH, SITE_ROOT};
use scroll_pager_utils::errors::AppError;
use scroll_pager_utils::unpack::handle_additional_load;
use scroll_pager_utils::widget::{EndOfFeed, LoadIndicators};

use crate::item::{get_item_page, Item};

/// Trigger offset of the window feed, pages are requested slightly before the end of the list is visible.
const WINDOW_TRIGGER_OFFSET: f64 = 200.0;

#[derive(Clone, Copy, Debug, Default, Display, EnumIter, EnumString, Eq, IntoStaticStr, Hash, PartialEq, Serialize, Deserialize)]
pub enum FeedKind {
    #[default]
    Window,
    Panel,
}

impl FeedKind {
    pub fn path(&self) -> &'static str {
        match self {
            FeedKind::Window => SITE_ROOT,
            FeedKind::Panel => PANEL_PATH,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FeedKind::Window => "Items load while the page itself scrolls.",
            FeedKind::Panel => "Items load while a fixed height panel scrolls.",
        }
    }
}

/// Reactive state of an item feed loaded page by page.
#[derive(Clone, Copy, Debug)]
pub struct FeedState {
    pub item_vec: RwSignal<Vec<Item>>,
    pub is_loading: RwSignal<bool>,
    pub is_exhausted: RwSignal<bool>,
    pub load_error: RwSignal<Option<AppError>>,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            item_vec: RwSignal::new(Vec::new()),
            is_loading: RwSignal::new(false),
            is_exhausted: RwSignal::new(false),
            load_error: RwSignal::new(None),
        }
    }

    pub fn item_count(&self) -> Signal<usize> {
        let item_vec = self.item_vec;
        Signal::derive(move || item_vec.read().len())
    }

    /// Stops paging on errors and short pages, the pager stays disabled afterwards.
    pub fn is_disabled(&self) -> Signal<bool> {
        let state = *self;
        Signal::derive(move || state.is_exhausted.get() || state.load_error.read().is_some())
    }

    /// Fetches the requested page, the pager waits for the fetch before checking again.
    pub fn load_page(&self, request: PageRequest) -> PageChange {
        let state = *self;
        PageChange::deferred(async move {
            state.is_loading.set(true);
            let load_result = get_item_page(request.item_count, request.items_per_page).await;
            if handle_additional_load(load_result, request.items_per_page, state.item_vec, state.load_error) {
                state.is_exhausted.set(true);
            }
            state.is_loading.set(false);
        })
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

#[component]
pub fn ItemList(
    #[prop(into)]
    item_vec: Signal<Vec<Item>>,
) -> impl IntoView {
    view! {
        <ul class="flex flex-col gap-1 w-full">
            <For
                each=move || item_vec.get().into_iter()
                key=|item| item.item_id
                children=move |item| view! {
                    <li class="px-3 py-2 rounded-sm bg-base-200">{item.title}</li>
                }
            />
        </ul>
    }
}

/// Feed scrolled with the page, the body is the scrolling element of the document.
#[component]
pub fn WindowFeed() -> impl IntoView {
    let feed_state = FeedState::new();
    let use_page = Callback::new(|handle: ScrollPagerHandle| handle.set_container(ScrollTarget::body()));

    view! {
        <div class="flex flex-col w-full max-w-2xl mx-auto p-2 gap-2">
            <p class="text-sm">{FeedKind::Window.description()}</p>
            <ItemList item_vec=feed_state.item_vec/>
            <LoadIndicators is_loading=feed_state.is_loading load_error=feed_state.load_error/>
            <EndOfFeed is_exhausted=feed_state.is_exhausted item_count=feed_state.item_count()/>
            <ScrollPager
                on_page_change=move |request| feed_state.load_page(request)
                trigger_offset=WINDOW_TRIGGER_OFFSET
                item_count=feed_state.item_count()
                items_per_page=ITEMS_PER_PAGE
                disabled=feed_state.is_disabled()
                container_ref_setter=use_page
            />
        </div>
    }
}

/// Feed scrolled inside a fixed height panel, the pager listens to its parent element.
#[component]
pub fn PanelFeed() -> impl IntoView {
    let feed_state = FeedState::new();

    view! {
        <div class="flex flex-col w-full max-w-2xl mx-auto p-2 gap-2">
            <p class="text-sm">{FeedKind::Panel.description()}</p>
            <div class="itemPanel">
                <ItemList item_vec=feed_state.item_vec/>
                <LoadIndicators is_loading=feed_state.is_loading load_error=feed_state.load_error/>
                <EndOfFeed is_exhausted=feed_state.is_exhausted item_count=feed_state.item_count()/>
                <ScrollPager
                    on_page_change=move |request| feed_state.load_page(request)
                    item_count=feed_state.item_count()
                    items_per_page=ITEMS_PER_PAGE
                    disabled=feed_state.is_disabled()
                />
            </div>
        </div>
    }
}
