use std::collections::BTreeMap;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use dermscore_core::collections::{self, AGGREGATES, RESULTS, field};
use dermscore_core::models::aggregate::AggregateSnapshot;
use dermscore_core::models::result::ScoreResult;
use dermscore_storage::{DocumentStore, Query, Write};

use crate::error::ServiceError;

/// What one aggregation run wrote.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregationReport {
    pub day: Date,
    pub templates: usize,
    pub results: usize,
}

#[derive(Default)]
struct Accumulator {
    count: u64,
    numeric_count: u64,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
}

impl Accumulator {
    fn add(&mut self, score: Option<f64>) {
        self.count += 1;
        if let Some(score) = score {
            self.numeric_count += 1;
            self.sum += score;
            self.min = Some(self.min.map_or(score, |m| m.min(score)));
            self.max = Some(self.max.map_or(score, |m| m.max(score)));
        }
    }
}

/// Aggregate the UTC calendar day before `now`.
pub async fn run_nightly(
    store: &dyn DocumentStore,
    now: jiff::Timestamp,
) -> Result<AggregationReport, ServiceError> {
    let yesterday = now.to_zoned(TimeZone::UTC).date().yesterday()?;
    run_for_day(store, yesterday, now).await
}

/// Roll up every result created in `[day 00:00 UTC, next day 00:00 UTC)`
/// into one snapshot per template.
///
/// Snapshots are keyed by `(template, day)` and overwritten on re-run, so
/// running twice for the same day yields the same documents.
pub async fn run_for_day(
    store: &dyn DocumentStore,
    day: Date,
    now: jiff::Timestamp,
) -> Result<AggregationReport, ServiceError> {
    let start = day.to_zoned(TimeZone::UTC)?.timestamp();
    let end = day.tomorrow()?.to_zoned(TimeZone::UTC)?.timestamp();

    let snapshots = store
        .query(
            RESULTS,
            &Query::new()
                .where_gte(field::CREATED_AT, json!(start.to_string()))
                .where_lt(field::CREATED_AT, json!(end.to_string())),
        )
        .await?;

    let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();
    let mut counted = 0;
    for snapshot in &snapshots {
        let result: ScoreResult = match snapshot.decode() {
            Ok(r) => r,
            Err(e) => {
                warn!(result_id = %snapshot.id, error = %e, "skipping unreadable result");
                continue;
            }
        };
        groups
            .entry(result.template_id.clone())
            .or_default()
            .add(result.numeric_score());
        counted += 1;
    }

    let mut writes = Vec::with_capacity(groups.len());
    for (template_id, acc) in &groups {
        let snapshot = AggregateSnapshot {
            template_id: template_id.clone(),
            period_start: day,
            count: acc.count,
            numeric_count: acc.numeric_count,
            average_score: (acc.numeric_count > 0).then(|| acc.sum / acc.numeric_count as f64),
            min_score: acc.min,
            max_score: acc.max,
            updated_at: Some(now),
        };
        writes.push(Write::set(
            AGGREGATES,
            &collections::aggregate_id(template_id, day),
            serde_json::to_value(&snapshot)?,
            true,
        ));
    }

    if !writes.is_empty() {
        store.commit(writes).await?;
    }

    let report = AggregationReport {
        day,
        templates: groups.len(),
        results: counted,
    };
    info!(day = %report.day, templates = report.templates, results = report.results, "aggregation complete");
    Ok(report)
}
