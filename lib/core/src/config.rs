use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ScrollPagerError;

pub const DEFAULT_TRIGGER_OFFSET: f64 = 0.0;
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// Host supplied settings of a [`ScrollTrigger`](crate::trigger::ScrollTrigger).
///
/// Missing keys take their default value when deserializing, keys are camelCase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TriggerConfig {
    /// Pixels added to the marker's top before comparing it to the container's visible bounds.
    pub trigger_offset: f64,
    /// Evaluate immediately when attaching instead of waiting for the first scroll event.
    pub run_at_start: bool,
    pub disabled: bool,
    /// Number of items currently loaded.
    pub item_count: usize,
    pub items_per_page: usize,
    /// Stop triggering when the item count is not a multiple of the page size.
    pub stop_on_odd_result_count: bool,
    /// Evaluate immediately after the container is replaced.
    pub check_on_container_change: bool,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            trigger_offset: DEFAULT_TRIGGER_OFFSET,
            run_at_start: true,
            disabled: false,
            item_count: 0,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            stop_on_odd_result_count: true,
            check_on_container_change: false,
        }
    }
}

impl TriggerConfig {
    /// Whether the last loaded page was shorter than a full page.
    ///
    /// A page size of 0 has no defined remainder and always counts as a short page.
    pub fn is_short_page(&self) -> bool {
        self.item_count.checked_rem(self.items_per_page).is_none_or(|remainder| remainder != 0)
    }

    pub fn with_item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    pub fn with_items_per_page(mut self, items_per_page: usize) -> Self {
        self.items_per_page = items_per_page;
        self
    }

    pub fn with_trigger_offset(mut self, trigger_offset: f64) -> Self {
        self.trigger_offset = trigger_offset;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_run_at_start(mut self, run_at_start: bool) -> Self {
        self.run_at_start = run_at_start;
        self
    }

    pub fn with_stop_on_odd_result_count(mut self, stop_on_odd_result_count: bool) -> Self {
        self.stop_on_odd_result_count = stop_on_odd_result_count;
        self
    }

    pub fn with_check_on_container_change(mut self, check_on_container_change: bool) -> Self {
        self.check_on_container_change = check_on_container_change;
        self
    }
}

impl FromStr for TriggerConfig {
    type Err = ScrollPagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}
