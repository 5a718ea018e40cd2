// Change detection between fetched batches and the rendered state

/// Whether the newest timestamp of a batch differs from the one last rendered.
///
/// Comparison is exact string equality. A producer that rewrites a row
/// under an already rendered timestamp is not detected.
pub fn has_new_data(latest_timestamp: &str, last_seen_timestamp: Option<&str>) -> bool {
    last_seen_timestamp != Some(latest_timestamp)
}
