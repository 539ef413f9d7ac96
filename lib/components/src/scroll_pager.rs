use std::rc::Rc;

use leptos::html;
use leptos::prelude::*;
use send_wrapper::SendWrapper;

use scroll_pager_core::config::{TriggerConfig, DEFAULT_ITEMS_PER_PAGE, DEFAULT_TRIGGER_OFFSET};
use scroll_pager_core::policy::PageRequest;
use scroll_pager_core::trigger::{PageChange, ScrollTrigger};

use crate::dom_scheduler::DomScheduler;
use crate::dom_target::{ScrollTarget, Sentinel};

/// Class of the sentinel element, for host side styling.
pub const SCROLL_PAGER_CLASS: &str = "scrollPager";

pub type DomScrollTrigger = ScrollTrigger<ScrollTarget, Sentinel, DomScheduler>;

type TriggerCell = StoredValue<Option<SendWrapper<DomScrollTrigger>>>;

/// Handle given to the host through `container_ref_setter` once the pager is mounted, before the
/// trigger starts listening.
#[derive(Clone, Copy)]
pub struct ScrollPagerHandle {
    trigger: TriggerCell,
}

impl ScrollPagerHandle {
    /// Listen to `container` instead of the current one, `None` falls back to the sentinel's parent.
    pub fn set_container(&self, container: Option<ScrollTarget>) {
        if let Some(trigger) = self.trigger() {
            trigger.set_container(container);
        }
    }

    pub fn schedule_check(&self) {
        if let Some(trigger) = self.trigger() {
            trigger.schedule_check();
        }
    }

    /// False while a page change is in flight or when the pager is not mounted.
    pub fn is_armed(&self) -> bool {
        self.trigger().is_some_and(|trigger| trigger.is_armed())
    }

    fn trigger(&self) -> Option<DomScrollTrigger> {
        self.trigger.try_with_value(|trigger| trigger.as_deref().cloned()).flatten()
    }
}

pub fn sentinel_height(trigger_offset: f64) -> String {
    format!("{trigger_offset}px")
}

/// Invisible sentinel requesting the next page when it scrolls into its container's viewport.
///
/// The container is the sentinel's parent element unless the host replaces it through the handle
/// passed to `container_ref_setter`.
#[component]
pub fn ScrollPager<F: Fn(PageRequest) -> PageChange + 'static>(
    /// called with the page size and the item count, return a deferred result to suspend triggering until it completes
    on_page_change: F,
    /// pixels added to the sentinel's position before the visibility test, also the sentinel's height
    #[prop(into, default = Signal::stored(DEFAULT_TRIGGER_OFFSET))]
    trigger_offset: Signal<f64>,
    /// check once mounted without waiting for a scroll event
    #[prop(default = true)]
    run_at_start: bool,
    #[prop(into, default = Signal::stored(false))]
    disabled: Signal<bool>,
    /// number of loaded items, a change schedules a new check
    #[prop(into, default = Signal::stored(0))]
    item_count: Signal<usize>,
    #[prop(into, default = Signal::stored(DEFAULT_ITEMS_PER_PAGE))]
    items_per_page: Signal<usize>,
    /// stop once a page shorter than `items_per_page` was loaded
    #[prop(into, default = Signal::stored(true))]
    stop_on_odd_result_count: Signal<bool>,
    /// check immediately after the container is replaced
    #[prop(default = false)]
    check_on_container_change: bool,
    /// receives the handle to replace the scroll container
    #[prop(optional, into)]
    container_ref_setter: Option<Callback<ScrollPagerHandle>>,
) -> impl IntoView {
    let sentinel_ref = NodeRef::<html::Div>::new();
    let trigger: TriggerCell = StoredValue::new(None);
    let handle = ScrollPagerHandle { trigger };
    let on_page_change = Rc::new(on_page_change);

    let config = Memo::new(move |_| TriggerConfig {
        trigger_offset: trigger_offset.get(),
        run_at_start,
        disabled: disabled.get(),
        item_count: item_count.get(),
        items_per_page: items_per_page.get(),
        stop_on_odd_result_count: stop_on_odd_result_count.get(),
        check_on_container_change,
    });

    Effect::new(move |_| {
        let Some(sentinel) = sentinel_ref.get() else {
            return
        };
        if trigger.with_value(Option::is_some) {
            return
        }
        let on_page_change = on_page_change.clone();
        let dom_trigger = ScrollTrigger::new(config.get_untracked(), DomScheduler, move |request| on_page_change(request));
        trigger.set_value(Some(SendWrapper::new(dom_trigger.clone())));
        // a container set here is listened to from the first check on
        if let Some(container_ref_setter) = container_ref_setter {
            container_ref_setter.run(handle);
        }
        dom_trigger.attach(Sentinel::from(sentinel), None);
    });

    Effect::new(move |_| {
        let config = config.get();
        if let Some(dom_trigger) = handle.trigger() {
            dom_trigger.update_config(config);
        }
    });

    on_cleanup(move || {
        if let Some(Some(dom_trigger)) = trigger.try_update_value(Option::take) {
            dom_trigger.detach();
        }
    });

    view! {
        <div
            class=SCROLL_PAGER_CLASS
            style:height=move || sentinel_height(trigger_offset.get())
            node_ref=sentinel_ref
        />
    }
}
