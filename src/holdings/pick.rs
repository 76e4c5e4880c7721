//! Picking a display value out of several candidates

use indexmap::IndexSet;

use crate::models::enums::CallNumberMode;
use crate::services::translator::Translator;

/// Reduce `values` to one display string.
///
/// Duplicates are dropped first (first occurrence keeps its place). A single
/// distinct value, or `first` mode, yields that value; `all` joins every
/// distinct value with `", "`; `msg` yields the translated `message` and
/// ignores the values. With a `prefix`, values are translated through
/// `prefix + value` and fall back to the raw value.
pub fn pick_value<S: AsRef<str>>(
    values: &[S],
    mode: CallNumberMode,
    message: &str,
    prefix: Option<&str>,
    translator: &dyn Translator,
) -> String {
    let distinct: IndexSet<&str> = values.iter().map(AsRef::as_ref).collect();

    let display = |value: &str| match prefix {
        Some(prefix) => translator.translate_or(&format!("{prefix}{value}"), value),
        None => value.to_string(),
    };

    match distinct.first() {
        None => String::new(),
        Some(&first) if mode == CallNumberMode::First || distinct.len() == 1 => display(first),
        Some(_) if mode == CallNumberMode::All => distinct
            .iter()
            .map(|&v| display(v))
            .collect::<Vec<_>>()
            .join(", "),
        Some(_) => translator.translate_key(message),
    }
}
