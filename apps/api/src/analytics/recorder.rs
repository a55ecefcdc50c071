//! Best-effort analytics event recording.
//!
//! The contract is at-most-once-visible, best-effort delivery: once a
//! visitor's request body parses, recording must never fail the request.
//! Insert errors are logged at WARN and counted per event kind; the counters
//! give operational visibility without a metrics stack.
//!
//! `AppState` holds an `EventRecorder` over an `Arc<dyn AnalyticsSink>`, so
//! tests can swap in failing or in-memory sinks.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::warn;

use crate::models::analytics::{NewPageView, NewProjectClick};

#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn insert_page_view(&self, event: &NewPageView) -> Result<(), sqlx::Error>;
    async fn insert_project_click(&self, event: &NewProjectClick) -> Result<(), sqlx::Error>;
}

/// The production sink: plain appends into the analytics tables.
pub struct PgAnalyticsSink {
    pool: PgPool,
}

impl PgAnalyticsSink {
    pub fn new(pool: PgPool) -> Self {
        PgAnalyticsSink { pool }
    }
}

#[async_trait]
impl AnalyticsSink for PgAnalyticsSink {
    async fn insert_page_view(&self, event: &NewPageView) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO page_views (page, user_agent, ip_address) VALUES ($1, $2, $3)")
            .bind(&event.page)
            .bind(&event.user_agent)
            .bind(&event.ip_address)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn insert_project_click(&self, event: &NewProjectClick) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO project_clicks (project_id, click_type, user_agent, ip_address) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(event.project_id)
        .bind(event.click_type.as_str())
        .bind(&event.user_agent)
        .bind(&event.ip_address)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[derive(Default)]
struct DroppedCounters {
    page_views: AtomicU64,
    project_clicks: AtomicU64,
}

/// Swallows sink failures; callers always proceed as if recording succeeded.
#[derive(Clone)]
pub struct EventRecorder {
    sink: Arc<dyn AnalyticsSink>,
    dropped: Arc<DroppedCounters>,
}

impl EventRecorder {
    pub fn new(sink: Arc<dyn AnalyticsSink>) -> Self {
        EventRecorder {
            sink,
            dropped: Arc::new(DroppedCounters::default()),
        }
    }

    pub async fn record_page_view(&self, event: NewPageView) {
        if let Err(e) = self.sink.insert_page_view(&event).await {
            let total = self.dropped.page_views.fetch_add(1, Ordering::Relaxed) + 1;
            warn!("Dropped page view for '{}' ({total} dropped so far): {e}", event.page);
        }
    }

    pub async fn record_project_click(&self, event: NewProjectClick) {
        if let Err(e) = self.sink.insert_project_click(&event).await {
            let total = self.dropped.project_clicks.fetch_add(1, Ordering::Relaxed) + 1;
            warn!(
                "Dropped {} click for project {} ({total} dropped so far): {e}",
                event.click_type.as_str(),
                event.project_id
            );
        }
    }

    pub fn dropped_page_views(&self) -> u64 {
        self.dropped.page_views.load(Ordering::Relaxed)
    }

    pub fn dropped_project_clicks(&self) -> u64 {
        self.dropped.project_clicks.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analytics::ClickType;
    use std::sync::Mutex;

    struct FailingSink;

    #[async_trait]
    impl AnalyticsSink for FailingSink {
        async fn insert_page_view(&self, _event: &NewPageView) -> Result<(), sqlx::Error> {
            Err(sqlx::Error::PoolClosed)
        }

        async fn insert_project_click(&self, _event: &NewProjectClick) -> Result<(), sqlx::Error> {
            Err(sqlx::Error::PoolClosed)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        pages: Mutex<Vec<String>>,
        clicks: Mutex<Vec<(i32, ClickType)>>,
    }

    #[async_trait]
    impl AnalyticsSink for RecordingSink {
        async fn insert_page_view(&self, event: &NewPageView) -> Result<(), sqlx::Error> {
            self.pages.lock().unwrap().push(event.page.clone());
            Ok(())
        }

        async fn insert_project_click(&self, event: &NewProjectClick) -> Result<(), sqlx::Error> {
            self.clicks
                .lock()
                .unwrap()
                .push((event.project_id, event.click_type));
            Ok(())
        }
    }

    fn page_view(page: &str) -> NewPageView {
        NewPageView {
            page: page.to_string(),
            user_agent: None,
            ip_address: None,
        }
    }

    #[tokio::test]
    async fn test_events_reach_the_sink() {
        let sink = Arc::new(RecordingSink::default());
        let recorder = EventRecorder::new(sink.clone());

        recorder.record_page_view(page_view("/")).await;
        recorder
            .record_project_click(NewProjectClick {
                project_id: 7,
                click_type: ClickType::Github,
                user_agent: None,
                ip_address: None,
            })
            .await;

        assert_eq!(*sink.pages.lock().unwrap(), vec!["/".to_string()]);
        assert_eq!(*sink.clicks.lock().unwrap(), vec![(7, ClickType::Github)]);
        assert_eq!(recorder.dropped_page_views(), 0);
        assert_eq!(recorder.dropped_project_clicks(), 0);
    }

    #[tokio::test]
    async fn test_sink_failures_are_swallowed_and_counted() {
        let recorder = EventRecorder::new(Arc::new(FailingSink));

        recorder.record_page_view(page_view("/projects")).await;
        recorder.record_page_view(page_view("/projects")).await;
        recorder
            .record_project_click(NewProjectClick {
                project_id: 1,
                click_type: ClickType::View,
                user_agent: None,
                ip_address: None,
            })
            .await;

        assert_eq!(recorder.dropped_page_views(), 2);
        assert_eq!(recorder.dropped_project_clicks(), 1);
    }
}
