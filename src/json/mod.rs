//! JSON formatting and parsing over `serde_json`

pub mod config;
pub mod json_util;

pub use config::JsonFormatConfig;
pub use json_util::{format, format_with_config, to_bean, to_json_string, to_vec};
