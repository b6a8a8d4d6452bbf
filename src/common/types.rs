/// Statistics from the check step
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckStats {
    pub rows_processed: usize,
    pub cached: usize,
    pub rank_rejected: usize,
    pub malformed_ranking: usize,
    pub content_rejected: usize,
    pub confirmed: usize,
    pub rows_appended: usize,
    pub fetches: usize,
    pub hit_sentinel: bool,
}
