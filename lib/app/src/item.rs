use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use scroll_pager_utils::errors::AppError;

#[cfg(feature = "ssr")]
use crate::item::ssr::get_item_catalog;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub item_id: usize,
    pub title: String,
}

impl Item {
    pub fn new(item_id: usize) -> Self {
        Self {
            item_id,
            title: format!("Item #{}", item_id + 1),
        }
    }
}

#[cfg(feature = "ssr")]
pub mod ssr {
    use std::time::Duration;

    use leptos::prelude::use_context;

    use scroll_pager_utils::constants::MAX_ITEMS_PER_PAGE;
    use scroll_pager_utils::errors::AppError;

    use crate::item::Item;

    /// Generated catalog of `size` items, answering page requests after `latency`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ItemCatalog {
        size: usize,
        latency: Duration,
    }

    impl ItemCatalog {
        pub fn new(size: usize, latency: Duration) -> Self {
            Self { size, latency }
        }

        pub fn size(&self) -> usize {
            self.size
        }

        pub fn latency(&self) -> Duration {
            self.latency
        }

        /// Returns the items in `[offset, offset + limit)`, truncated at the end of the catalog.
        pub async fn get_item_page(&self, offset: usize, limit: usize) -> Result<Vec<Item>, AppError> {
            if limit == 0 || limit > MAX_ITEMS_PER_PAGE {
                return Err(AppError::InvalidPageRequest(format!("Page limit must be between 1 and {MAX_ITEMS_PER_PAGE}, got {limit}.")))
            }
            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            let end = offset.saturating_add(limit).min(self.size);
            let start = offset.min(end);
            log::debug!("Serve items [{start}, {end}) out of {}", self.size);
            Ok((start..end).map(Item::new).collect())
        }
    }

    pub fn get_item_catalog() -> Result<ItemCatalog, AppError> {
        use_context::<ItemCatalog>().ok_or_else(|| AppError::new("Item catalog missing."))
    }
}

#[server]
pub async fn get_item_page(
    offset: usize,
    limit: usize,
) -> Result<Vec<Item>, AppError> {
    let item_catalog = get_item_catalog()?;
    item_catalog.get_item_page(offset, limit).await
}
