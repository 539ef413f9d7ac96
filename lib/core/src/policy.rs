use serde::{Deserialize, Serialize};

use crate::config::TriggerConfig;
use crate::geometry::{trigger_point, ScrollGeometry, ViewportBounds};

/// Arguments handed to the page change callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub items_per_page: usize,
    pub item_count: usize,
}

impl PageRequest {
    pub fn from_config(config: &TriggerConfig) -> Self {
        Self {
            items_per_page: config.items_per_page,
            item_count: config.item_count,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The item count is not a multiple of the page size, there is no more data.
    OddResultCount,
    Disabled,
    /// A previous page change has not settled yet.
    Pending,
    /// No marker or container to measure.
    Detached,
}

/// Result of evaluating the trigger once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    Triggered(PageRequest),
    OutOfView,
    Skipped(SkipReason),
}

impl CheckOutcome {
    pub fn is_triggered(&self) -> bool {
        matches!(self, CheckOutcome::Triggered(_))
    }
}

/// Reason to skip a check before looking at any geometry, in order of precedence.
pub fn skip_reason(config: &TriggerConfig, armed: bool) -> Option<SkipReason> {
    if config.stop_on_odd_result_count && config.is_short_page() {
        Some(SkipReason::OddResultCount)
    } else if config.disabled {
        Some(SkipReason::Disabled)
    } else if !armed {
        Some(SkipReason::Pending)
    } else {
        None
    }
}

pub fn marker_in_view<C, M>(container: &C, marker: &M, trigger_offset: f64) -> bool
where
    C: ScrollGeometry + ?Sized,
    M: ScrollGeometry + ?Sized,
{
    ViewportBounds::of(container).contains(trigger_point(marker, trigger_offset))
}

/// Evaluate the trigger policy for one check.
pub fn evaluate<C, M>(config: &TriggerConfig, armed: bool, container: &C, marker: &M) -> CheckOutcome
where
    C: ScrollGeometry + ?Sized,
    M: ScrollGeometry + ?Sized,
{
    if let Some(reason) = skip_reason(config, armed) {
        return CheckOutcome::Skipped(reason);
    }
    match marker_in_view(container, marker, config.trigger_offset) {
        true => CheckOutcome::Triggered(PageRequest::from_config(config)),
        false => CheckOutcome::OutOfView,
    }
}
