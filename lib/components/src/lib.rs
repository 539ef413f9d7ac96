pub mod dom_scheduler;
pub mod dom_target;
pub mod scroll_pager;
