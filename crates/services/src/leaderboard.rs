use std::cmp::Ordering;
use std::sync::Arc;

use storage::{AttemptLog, AttemptRecord, DurationSecs, StorageError};

/// Rank attempt records for display: score descending, then completion
/// duration ascending. Records with unknown duration sort after any known
/// duration at equal score. The sort is stable, so otherwise-equal records
/// keep their append order.
#[must_use]
pub fn ranked(mut records: Vec<AttemptRecord>) -> Vec<AttemptRecord> {
    records.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| compare_durations(a.duration, b.duration))
    });
    records
}

fn compare_durations(a: DurationSecs, b: DurationSecs) -> Ordering {
    match (a.known(), b.known()) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Read-only ranking view over an attempt log.
#[derive(Clone)]
pub struct LeaderboardService {
    log: Arc<dyn AttemptLog>,
}

impl LeaderboardService {
    #[must_use]
    pub fn new(log: Arc<dyn AttemptLog>) -> Self {
        Self { log }
    }

    /// All persisted attempts in rank order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the store cannot be read at all.
    pub fn ranked(&self) -> Result<Vec<AttemptRecord>, StorageError> {
        Ok(ranked(self.log.read_all()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn build_record(name: &str, score: u32, duration: DurationSecs) -> AttemptRecord {
        AttemptRecord {
            recorded_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
            name: name.into(),
            email: "x@myfiducia.com".into(),
            score,
            fully_completed: true,
            duration,
        }
    }

    #[test]
    fn higher_score_ranks_first() {
        let records = ranked(vec![
            build_record("low", 500, DurationSecs::Known(10.0)),
            build_record("high", 900, DurationSecs::Known(500.0)),
        ]);
        assert_eq!(records[0].name, "high");
    }

    #[test]
    fn equal_scores_rank_by_duration_ascending() {
        let records = ranked(vec![
            build_record("slow", 800, DurationSecs::Known(300.0)),
            build_record("fast", 800, DurationSecs::Known(120.0)),
        ]);
        assert_eq!(records[0].name, "fast");
        assert_eq!(records[1].name, "slow");
    }

    #[test]
    fn unknown_duration_never_outranks_a_known_one() {
        let records = ranked(vec![
            build_record("mystery", 800, DurationSecs::Unknown),
            build_record("timed", 800, DurationSecs::Known(5000.0)),
        ]);
        assert_eq!(records[0].name, "timed");
        assert_eq!(records[1].name, "mystery");
    }

    #[test]
    fn ranking_is_stable_for_ties() {
        let records = ranked(vec![
            build_record("first", 800, DurationSecs::Unknown),
            build_record("second", 800, DurationSecs::Unknown),
        ]);
        assert_eq!(records[0].name, "first");
        assert_eq!(records[1].name, "second");
    }

    #[test]
    fn service_reads_through_the_log() {
        let log = Arc::new(storage::InMemoryAttemptLog::new());
        log.append(&build_record("a", 100, DurationSecs::Unknown))
            .unwrap();
        log.append(&build_record("b", 700, DurationSecs::Known(60.0)))
            .unwrap();

        let service = LeaderboardService::new(log);
        let records = service.ranked().unwrap();
        assert_eq!(records[0].name, "b");
    }
}
