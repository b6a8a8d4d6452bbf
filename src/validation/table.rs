use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::path::Path;

use super::{format_flag, parse_flag, ValidityLedger};
use crate::common::rewrite_temp_path;

pub const COL_SCHOOL_NAME: &str = "SCH_NAME";
pub const COL_URL: &str = "URL";
pub const COL_QUERY_RANKING: &str = "QUERY_RANKING";
pub const COL_VALIDITY_CONFIRMED: &str = "VALIDITY_CONFIRMED";
pub const COL_EXPLANATION: &str = "EXPLANATION";
/// Older rewrites named the explanation column in the plural
pub const COL_EXPLANATION_LEGACY: &str = "EXPLANATIONS";

fn is_annotation_column(name: &str) -> bool {
    matches!(
        name,
        COL_VALIDITY_CONFIRMED | COL_EXPLANATION | COL_EXPLANATION_LEGACY
    )
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

/// The scraped school CSV, held in memory for the in-place rewrite
#[derive(Debug, Clone)]
pub struct SchoolTable {
    headers: StringRecord,
    /// Indices of the columns that are not validity annotations
    original: Vec<usize>,
    school_name: usize,
    url: usize,
    query_ranking: usize,
    validity: Option<usize>,
    explanation: Option<usize>,
    explanation_legacy: Option<usize>,
    rows: Vec<StringRecord>,
}

/// Borrowed view of one input row
#[derive(Debug, Clone, Copy)]
pub struct SchoolRow<'a> {
    table: &'a SchoolTable,
    record: &'a StringRecord,
}

impl<'a> SchoolRow<'a> {
    fn field(&self, idx: usize) -> &'a str {
        self.record.get(idx).unwrap_or("")
    }

    pub fn school_name(&self) -> &'a str {
        self.field(self.table.school_name)
    }

    pub fn url(&self) -> &'a str {
        self.field(self.table.url)
    }

    pub fn query_ranking(&self) -> &'a str {
        self.field(self.table.query_ranking)
    }

    /// A row whose every field is empty marks the end of usable data
    pub fn is_sentinel(&self) -> bool {
        self.record.iter().all(|f| f.is_empty())
    }

    /// VALIDITY_CONFIRMED from a previous run, if present and parseable
    pub fn stored_flag(&self) -> Option<bool> {
        self.table
            .validity
            .and_then(|idx| parse_flag(self.field(idx)))
    }

    /// EXPLANATION from a previous run, falling back to the legacy column
    pub fn stored_explanation(&self) -> &'a str {
        let current = self.table.explanation.map(|idx| self.field(idx));
        let legacy = self.table.explanation_legacy.map(|idx| self.field(idx));

        match (current, legacy) {
            (Some(text), _) if !text.is_empty() => text,
            (_, Some(text)) => text,
            (Some(text), None) => text,
            (None, None) => "",
        }
    }

    /// Field values for the original (non-annotation) columns
    pub fn original_fields(&self) -> Vec<&'a str> {
        self.table
            .original
            .iter()
            .map(|&idx| self.field(idx))
            .collect()
    }
}

impl SchoolTable {
    /// Load the input CSV, failing when a required column is missing
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open input file: {}", path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header of {}", path.display()))?
            .clone();

        let required = |name: &str| -> Result<usize> {
            match find_column(&headers, name) {
                Some(idx) => Ok(idx),
                None => bail!(
                    "Input file {} is missing required column {}",
                    path.display(),
                    name
                ),
            }
        };
        let school_name = required(COL_SCHOOL_NAME)?;
        let url = required(COL_URL)?;
        let query_ranking = required(COL_QUERY_RANKING)?;

        let original = headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !is_annotation_column(h.trim()))
            .map(|(idx, _)| idx)
            .collect();

        let mut rows = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record = result
                .with_context(|| format!("Failed to parse row {} of {}", line + 1, path.display()))?;
            rows.push(record);
        }

        debug!("Read {} rows from {}", rows.len(), path.display());

        Ok(Self {
            validity: find_column(&headers, COL_VALIDITY_CONFIRMED),
            explanation: find_column(&headers, COL_EXPLANATION),
            explanation_legacy: find_column(&headers, COL_EXPLANATION_LEGACY),
            headers,
            original,
            school_name,
            url,
            query_ranking,
            rows,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = SchoolRow<'_>> {
        self.rows.iter().map(move |record| SchoolRow {
            table: self,
            record,
        })
    }

    /// Header names without any validity annotation columns
    pub fn original_headers(&self) -> Vec<&str> {
        self.original
            .iter()
            .map(|&idx| self.headers.get(idx).unwrap_or(""))
            .collect()
    }

    /// Rewrite `path` with one line per ledger entry plus the two annotation columns.
    ///
    /// Rows past the ledger (the sentinel and anything after it) are dropped.
    /// The file is written to a sibling temp file first and renamed into place.
    pub fn write_annotated<P: AsRef<Path>>(&self, path: P, ledger: &ValidityLedger) -> Result<()> {
        let path = path.as_ref();
        let temp_path = rewrite_temp_path(path);

        let result = self.write_annotated_to(&temp_path, ledger).and_then(|_| {
            fs::rename(&temp_path, path).with_context(|| {
                format!(
                    "Failed to move {} over {}",
                    temp_path.display(),
                    path.display()
                )
            })
        });

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    fn write_annotated_to(&self, path: &Path, ledger: &ValidityLedger) -> Result<()> {
        let mut writer = WriterBuilder::new()
            .from_path(path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;

        let mut header = self.original_headers();
        header.push(COL_VALIDITY_CONFIRMED);
        header.push(COL_EXPLANATION);
        writer.write_record(&header)?;

        for (row, verdict) in self.rows().zip(ledger.iter()) {
            let mut fields = row.original_fields();
            fields.push(format_flag(verdict.confirmed()));
            fields.push(verdict.explanation());
            writer.write_record(&fields)?;
        }

        writer
            .flush()
            .with_context(|| format!("Failed to flush {}", path.display()))?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ConfirmedRow {
    #[serde(rename = "SCH_NAME")]
    school_name: String,
    #[serde(rename = "URL", default)]
    url: String,
}

/// Rows already present in a confirmed-output file from an earlier run.
///
/// School names decide whether a stored annotation may be reused; the
/// (school, URL) pairs decide whether a confirmed row is already recorded.
#[derive(Debug, Clone, Default)]
pub struct PriorOutput {
    schools: HashSet<String>,
    entries: HashSet<(String, String)>,
}

impl PriorOutput {
    /// Load school names from `path`, returning None if the file doesn't exist
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open output file: {}", path.display()))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header of {}", path.display()))?
            .clone();
        if find_column(&headers, COL_SCHOOL_NAME).is_none() {
            warn!(
                "{} has no {} column; treating it as empty",
                path.display(),
                COL_SCHOOL_NAME
            );
            return Ok(Some(Self::default()));
        }

        let mut prior = Self::default();
        for result in reader.deserialize::<ConfirmedRow>() {
            let row = result
                .with_context(|| format!("Failed to parse row of {}", path.display()))?;
            prior.schools.insert(row.school_name.clone());
            prior.entries.insert((row.school_name, row.url));
        }

        info!(
            "Loaded {} previously confirmed rows ({} schools) from {}",
            prior.entries.len(),
            prior.schools.len(),
            path.display()
        );
        Ok(Some(prior))
    }

    pub fn contains(&self, school_name: &str) -> bool {
        self.schools.contains(school_name)
    }

    /// True when this school was already confirmed at this URL
    pub fn contains_entry(&self, school_name: &str, url: &str) -> bool {
        self.entries
            .contains(&(school_name.to_string(), url.to_string()))
    }
}

/// Append one confirmed row, writing the header first if the file is new or empty
pub fn append_confirmed<P: AsRef<Path>>(path: P, header: &[&str], fields: &[&str]) -> Result<()> {
    let path = path.as_ref();
    let needs_header = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open output file: {}", path.display()))?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    if needs_header {
        writer.write_record(header)?;
    }
    writer.write_record(fields)?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;
    Ok(())
}
