pub const SITE_ROOT: &str = "/";
pub const PANEL_ROUTE: &str = "panel";
pub const PANEL_PATH: &str = "/panel";

pub const ITEMS_PER_PAGE: usize = 20;
pub const MAX_ITEMS_PER_PAGE: usize = 100;
pub const DEFAULT_CATALOG_SIZE: usize = 1000;
pub const DEFAULT_PAGE_LATENCY_MS: u64 = 200;

pub const LOADING_ICON_PATH: &str = "/svg/loading.svg";
