use super::Verdict;

/// Per-row verdicts in input order
#[derive(Debug, Clone, Default)]
pub struct ValidityLedger {
    entries: Vec<Verdict>,
}

impl ValidityLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(rows: usize) -> Self {
        Self {
            entries: Vec::with_capacity(rows),
        }
    }

    pub fn record(&mut self, verdict: Verdict) {
        self.entries.push(verdict);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Verdict> {
        self.entries.iter()
    }

    pub fn confirmed_count(&self) -> usize {
        self.entries.iter().filter(|v| v.confirmed()).count()
    }
}
