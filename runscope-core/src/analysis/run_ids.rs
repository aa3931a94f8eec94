/// Turn user input into a list of run ids.
///
/// Accepts a JSON array (`["a","b"]`), a comma separated list (`a, b`) or a
/// single id. Whitespace is trimmed and empty entries are dropped.
pub fn normalize_run_ids(input: &str) -> Vec<String> {
    let input = input.trim();

    if input.starts_with('[') {
        if let Ok(ids) = serde_json::from_str::<Vec<String>>(input) {
            return clean(ids.iter().map(String::as_str));
        }
    }

    clean(input.split(','))
}

fn clean<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    ids.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}
