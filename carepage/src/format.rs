//! Display string formatting.

use std::sync::LazyLock;

use regex::Regex;

static ISO_BIRTH_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid regex"));

/// `YYYY-MM-DD` to `DD/MM/YYYY`. Anything else is returned unchanged.
pub fn format_birth_date(raw: &str) -> String {
    ISO_BIRTH_DATE.replace(raw, "$3/$2/$1").into_owned()
}
