use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::OffsetDateTime;
use uuid::Uuid;

/// Temp path next to `target` used for an atomic rewrite.
/// "data/schools.csv" -> "data/.schools.csv.1a2b3c4d.tmp"
pub fn rewrite_temp_path<P: AsRef<Path>>(target: P) -> PathBuf {
    let target = target.as_ref();
    let file_name = target
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("rewrite");
    let run_id = &Uuid::new_v4().simple().to_string()[..8];
    let temp_name = format!(".{}.{}.tmp", file_name, run_id);

    match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.join(temp_name),
        _ => PathBuf::from(temp_name),
    }
}

/// Per-run log file path, named after the run's start time
pub fn run_log_path<P: AsRef<Path>>(dir: P, started: OffsetDateTime) -> PathBuf {
    let stamp = started
        .format(format_description!(
            "[year]-[month]-[day]_[hour]-[minute]-[second]"
        ))
        .unwrap_or_else(|_| started.unix_timestamp().to_string());
    dir.as_ref().join(format!("URL_scraping_{}.log", stamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_rewrite_temp_path_stays_in_directory() {
        let temp = rewrite_temp_path("/path/to/schools.csv");
        assert_eq!(temp.parent(), Some(Path::new("/path/to")));

        let name = temp.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(".schools.csv."));
        assert!(name.ends_with(".tmp"));
    }

    #[test]
    fn test_rewrite_temp_path_is_unique() {
        assert_ne!(rewrite_temp_path("schools.csv"), rewrite_temp_path("schools.csv"));
    }

    #[test]
    fn test_rewrite_temp_path_bare_file_name() {
        let temp = rewrite_temp_path("schools.csv");
        assert_eq!(temp.parent(), Some(Path::new("")));
    }

    #[test]
    fn test_run_log_path_uses_start_time() {
        let path = run_log_path("/logs", datetime!(2024-03-05 07:08:09 UTC));
        assert_eq!(
            path,
            PathBuf::from("/logs/URL_scraping_2024-03-05_07-08-09.log")
        );
    }
}
