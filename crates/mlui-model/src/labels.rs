#![forbid(unsafe_code)]

//! Label chips.
//!
//! Labels are edited as `"key: value"` chips and stored as a key/value map.

use std::collections::BTreeMap;

/// Label key to value.
pub type LabelMap = BTreeMap<String, String>;

/// Convert chips into a label map.
///
/// The key is the text before the first `:`; the value is the text after it
/// with its first character (the separating space) dropped. A chip without a
/// `:` maps its whole text to an empty value. Later chips override earlier
/// ones with the same key.
pub fn parse_labels<S: AsRef<str>>(chips: &[S]) -> LabelMap {
    chips
        .iter()
        .map(|chip| {
            let chip = chip.as_ref();
            match chip.split_once(':') {
                Some((key, rest)) => {
                    let mut value = rest.chars();
                    value.next();
                    (key.to_owned(), value.as_str().to_owned())
                }
                None => (chip.to_owned(), String::new()),
            }
        })
        .collect()
}

/// Render a label map as `"key: value"` chips, in key order.
pub fn labels_to_chips(labels: &LabelMap) -> Vec<String> {
    labels
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect()
}
