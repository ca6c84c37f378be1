use crate::models::MatchRecord;
use crate::schedule::validate_match;
use crate::store::{Change, RecordStore};
use crate::tournament::Tournament;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// True when `existing` holds a record equal to `candidate` on all six fields.
///
/// Player order matters: "A vs B" and "B vs A" are different records here.
pub fn exists(candidate: &MatchRecord, existing: &[MatchRecord]) -> bool {
    existing.iter().any(|record| record == candidate)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub record: MatchRecord,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportReport {
    pub imported: usize,
    pub duplicates: Vec<MatchRecord>,
    pub rejected: Vec<RejectedRecord>,
    pub refresh: bool,
}

/// Appends every valid, not-yet-present record of `batch` to the store.
///
/// Records repeated inside the batch are only imported once.
pub fn import(store: &mut RecordStore, tournament: &Tournament, batch: Vec<MatchRecord>) -> ImportReport {
    let mut report = ImportReport::default();
    let mut change = Change::default();

    for candidate in batch {
        let record = match validate_match(candidate.clone(), tournament) {
            Ok(record) => record,
            Err(err) => {
                warn!(player1 = %candidate.player1, player2 = %candidate.player2, "import rejected: {err}");
                report.rejected.push(RejectedRecord {
                    record: candidate,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        if exists(&record, store.all_matches()) {
            report.duplicates.push(record);
            continue;
        }
        change = change.merge(store.append_match(record));
    }

    report.imported = change.affected;
    report.refresh = change.needs_refresh();
    info!(
        imported = report.imported,
        duplicates = report.duplicates.len(),
        rejected = report.rejected.len(),
        "import finished"
    );
    report
}
