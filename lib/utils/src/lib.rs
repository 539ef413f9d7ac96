pub mod constants;
pub mod errors;
pub mod error_template;
pub mod icons;
pub mod unpack;
pub mod widget;
