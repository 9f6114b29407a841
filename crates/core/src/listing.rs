/// Truncate a listing to `limit` items when a limit is given.
pub fn apply_limit<T>(mut items: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    items
}

/// Parse a `limit` query value. Only positive integers are honoured.
pub fn parse_limit(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|&n| n > 0)
        .map(|n| n as usize)
}

/// Parse a boolean query flag. Only the literal `true` is true.
pub fn parse_flag(raw: Option<&str>) -> Option<bool> {
    raw.map(|v| v == "true")
}
