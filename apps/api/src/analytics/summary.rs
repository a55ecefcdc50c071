//! Analytics reporting over an inclusive date range: totals, top projects by
//! clicks, and a per-day breakdown on the UTC calendar.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_page_views: i64,
    pub total_project_clicks: i64,
    pub top_projects: Vec<TopProject>,
    pub daily_stats: Vec<DailyStat>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TopProject {
    pub project_id: i32,
    pub project_title: String,
    pub clicks: i64,
}

/// One calendar day with at least one recorded event. Days with zero
/// activity on both counters are omitted, not zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStat {
    pub date: String,
    pub page_views: i64,
    pub project_clicks: i64,
}

/// Resolves the requested range. Values parse as RFC 3339 or bare
/// `YYYY-MM-DD`; a bare end date extends to the end of that day so the named
/// day is included. Missing or unparseable values fall back to the default
/// window of the last 30 days.
pub fn resolve_range(start: Option<&str>, end: Option<&str>) -> (DateTime<Utc>, DateTime<Utc>) {
    let (default_start, default_end) = default_range();
    let start = start.and_then(parse_start).unwrap_or(default_start);
    let end = end.and_then(parse_end).unwrap_or(default_end);
    (start, end)
}

fn default_range() -> (DateTime<Utc>, DateTime<Utc>) {
    let end = Utc::now();
    (end - Duration::days(30), end)
}

fn parse_start(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
}

fn parse_end(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_micro_opt(23, 59, 59, 999_999))
                .map(|dt| dt.and_utc())
        })
}

/// Computes the full summary for `[start, end]`.
pub async fn summarize(
    pool: &PgPool,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<AnalyticsSummary, sqlx::Error> {
    let total_page_views: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM page_views pv WHERE pv.timestamp >= $1 AND pv.timestamp <= $2",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;

    let total_project_clicks: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM project_clicks pc WHERE pc.timestamp >= $1 AND pc.timestamp <= $2",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;

    // Orphan clicks (deleted projects) survive in the totals but drop out
    // here via the inner join. Tie-break on project_id keeps the order stable.
    let top_projects = sqlx::query_as::<_, TopProject>(
        r#"
        SELECT pc.project_id, p.title AS project_title, COUNT(*) AS clicks
        FROM project_clicks pc
        INNER JOIN projects p ON p.id = pc.project_id
        WHERE pc.timestamp >= $1 AND pc.timestamp <= $2
        GROUP BY pc.project_id, p.title
        ORDER BY clicks DESC, pc.project_id ASC
        LIMIT 10
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    let daily_views = sqlx::query_as::<_, (NaiveDate, i64)>(
        r#"
        SELECT (pv.timestamp AT TIME ZONE 'UTC')::date AS day, COUNT(*)
        FROM page_views pv
        WHERE pv.timestamp >= $1 AND pv.timestamp <= $2
        GROUP BY day
        ORDER BY day
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    let daily_clicks = sqlx::query_as::<_, (NaiveDate, i64)>(
        r#"
        SELECT (pc.timestamp AT TIME ZONE 'UTC')::date AS day, COUNT(*)
        FROM project_clicks pc
        WHERE pc.timestamp >= $1 AND pc.timestamp <= $2
        GROUP BY day
        ORDER BY day
        "#,
    )
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(AnalyticsSummary {
        total_page_views,
        total_project_clicks,
        top_projects,
        daily_stats: merge_daily(daily_views, daily_clicks),
    })
}

/// Merges the two per-day groupings into one ascending series. A day appears
/// as soon as either counter has activity; the other counter reads zero.
pub fn merge_daily(views: Vec<(NaiveDate, i64)>, clicks: Vec<(NaiveDate, i64)>) -> Vec<DailyStat> {
    let mut days: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
    for (day, n) in views {
        days.entry(day).or_default().0 += n;
    }
    for (day, n) in clicks {
        days.entry(day).or_default().1 += n;
    }
    days.into_iter()
        .map(|(day, (page_views, project_clicks))| DailyStat {
            date: day.format("%Y-%m-%d").to_string(),
            page_views,
            project_clicks,
        })
        .collect()
}
