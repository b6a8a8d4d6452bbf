use anyhow::Result;
use log::{debug, info, warn};
use std::time::Instant;

use crate::common::{
    create_count_progress_bar, format_elapsed, now_local_or_utc, CheckStats, RunLog,
};

use super::{
    append_confirmed, rank_gate, CheckerConfig, ContentChecker, PageFetcher, PriorOutput,
    SchoolRow, SchoolTable, ValidityLedger, Verdict,
};

/// Reuse a previous run's annotation for a school already in the confirmed output
fn cached_verdict(row: &SchoolRow<'_>, in_prior_output: bool) -> Option<Verdict> {
    if !in_prior_output {
        return None;
    }
    row.stored_flag().map(|confirmed| Verdict::Cached {
        confirmed,
        explanation: row.stored_explanation().to_string(),
    })
}

/// Check every row of the input file, append confirmed rows to the output
/// file and rewrite the input with VALIDITY_CONFIRMED / EXPLANATION columns.
///
/// Processing stops at the first all-empty row. The input is only rewritten
/// once all rows are done, so an interrupted run leaves it untouched.
pub async fn check_urls<F: PageFetcher>(config: &CheckerConfig, fetcher: F) -> Result<CheckStats> {
    let start = Instant::now();
    let started_at = now_local_or_utc();

    info!("Checking URLs in: {}", config.input_path.display());

    let table = SchoolTable::read(&config.input_path)?;
    let prior = PriorOutput::load(&config.output_path)?;
    if prior.is_some() {
        info!("An output file with this name already exists. Will avoid duplicate entries.");
    }

    let mut run_log = RunLog::create(&config.log_dir, started_at)?;
    info!("Run log: {}", run_log.path().display());

    let header = table.original_headers();
    let mut checker = ContentChecker::new(fetcher, config.fetch_delay);
    let mut ledger = ValidityLedger::with_capacity(table.len());
    let mut stats = CheckStats::default();

    let progress = create_count_progress_bar(table.len() as u64);

    for row in table.rows() {
        if row.is_sentinel() {
            run_log.line("End of file")?;
            debug!("Sentinel row reached after {} rows", ledger.len());
            stats.hit_sentinel = true;
            break;
        }

        let name = row.school_name();
        run_log.stamped(&format!("Checking validity for {}", name))?;

        let in_prior_output = prior.as_ref().is_some_and(|p| p.contains(name));

        let verdict = match cached_verdict(&row, in_prior_output) {
            Some(cached) => {
                stats.cached += 1;
                cached
            }
            None => {
                if in_prior_output {
                    run_log.line("Need to look at validity! This value is currently empty.")?;
                }

                match rank_gate(row.query_ranking()) {
                    Some(Verdict::MalformedRanking) => {
                        warn!(
                            "Row {} ({}): QUERY_RANKING '{}' is not an integer",
                            ledger.len() + 1,
                            name,
                            row.query_ranking()
                        );
                        stats.malformed_ranking += 1;
                        Verdict::MalformedRanking
                    }
                    Some(rejected) => {
                        stats.rank_rejected += 1;
                        rejected
                    }
                    None => {
                        if checker.fetch_and_contains(name, row.url()).await {
                            stats.confirmed += 1;
                            let already_recorded = prior
                                .as_ref()
                                .is_some_and(|p| p.contains_entry(name, row.url()));
                            if already_recorded {
                                debug!(
                                    "{} ({}) is already in the output file; not appending",
                                    name,
                                    row.url()
                                );
                            } else {
                                append_confirmed(&config.output_path, &header, &row.original_fields())?;
                                stats.rows_appended += 1;
                            }
                            Verdict::Confirmed
                        } else {
                            stats.content_rejected += 1;
                            Verdict::SchoolNotFound
                        }
                    }
                }
            }
        };

        let line = verdict.log_line();
        debug!("{}: {}", name, line);
        run_log.line(&line)?;

        ledger.record(verdict);
        progress.inc(1);
    }

    progress.finish_with_message("URL check complete");

    stats.rows_processed = ledger.len();
    stats.fetches = checker.fetches();

    info!(
        "Rewriting {} with validity for {} rows",
        config.input_path.display(),
        ledger.len()
    );
    table.write_annotated(&config.input_path, &ledger)?;

    info!("==================== FINAL SUMMARY ====================");
    info!("Total execution time: {}", format_elapsed(start.elapsed()));
    info!("Rows processed: {}", stats.rows_processed);
    info!("Reused previous results: {}", stats.cached);
    info!("Rejected by query ranking: {}", stats.rank_rejected);
    info!("Malformed query ranking: {}", stats.malformed_ranking);
    info!("Pages fetched: {}", stats.fetches);
    info!("School not found on page: {}", stats.content_rejected);
    info!("Newly confirmed: {}", stats.confirmed);
    info!("Total confirmed: {}", ledger.confirmed_count());
    info!("Rows appended to {}: {}", config.output_path.display(), stats.rows_appended);
    info!("========================================================");

    Ok(stats)
}
