mod check;

pub use check::{check, config_error_hint};
