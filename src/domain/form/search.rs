/// Options matching a search query: case-insensitive substring, original order.
///
/// An empty query matches everything.
pub fn filter_options(options: &[String], query: &str) -> Vec<String> {
    if query.is_empty() {
        return options.to_vec();
    }
    let needle = query.to_lowercase();
    options.iter().filter(|option| option.to_lowercase().contains(&needle)).cloned().collect()
}
