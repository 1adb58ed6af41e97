use crate::item::Item;

/// Lowercases and replaces every non-ASCII-alphanumeric character with `_`.
#[must_use]
pub fn sanitize_file_segment(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[must_use]
pub fn datasheet_file_name(item: &Item) -> String {
    format!(
        "ficha_{}_{}.pdf",
        sanitize_file_segment(&item.brand),
        sanitize_file_segment(&item.model)
    )
}
