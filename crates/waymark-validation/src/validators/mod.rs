//! Built-in validators

pub mod pattern;

pub use pattern::PatternValidator;
