use console::style;
use std::fmt::Display;

/// Yellow: cache markers, warnings
pub fn yellow<D: Display>(text: D) -> String {
    style(text).yellow().to_string()
}

/// Dim: secondary text such as the conversation id
pub fn dim<D: Display>(text: D) -> String {
    style(text).dim().to_string()
}

/// Red bold: fatal error prefix
pub fn error<D: Display>(text: D) -> String {
    style(text).red().bold().to_string()
}
