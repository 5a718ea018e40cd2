// Refresh loop - fetch, detect change, render, publish
use crate::application::change_detector::has_new_data;
use crate::application::sample_feed::SampleFeed;
use crate::application::scene_renderer::SceneRenderer;
use crate::application::table_presenter::TablePresenter;
use crate::domain::dashboard::DashboardSnapshot;
use crate::domain::position::latest_timestamp;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Fetching,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// New data drawn and published
    Rendered,
    /// Newest timestamp already on screen
    Unchanged,
    /// Feed returned no samples
    Empty,
    /// Feed failed; display left as it was
    Failed,
}

pub struct RefreshLoop {
    feed: Arc<dyn SampleFeed>,
    scene: SceneRenderer,
    table: TablePresenter,
    last_rendered: Option<String>,
    state: LoopState,
    publisher: watch::Sender<DashboardSnapshot>,
}

impl RefreshLoop {
    /// Builds the loop and the receiver side of its snapshot channel.
    ///
    /// The first published snapshot holds the sensors and the placeholder row.
    pub fn new(
        feed: Arc<dyn SampleFeed>,
        scene: SceneRenderer,
        table: TablePresenter,
    ) -> (Self, watch::Receiver<DashboardSnapshot>) {
        let initial =
            DashboardSnapshot::new(scene.scene().clone(), table.rows().to_vec(), None, None);
        let (publisher, receiver) = watch::channel(initial);

        let refresh = Self {
            feed,
            scene,
            table,
            last_rendered: None,
            state: LoopState::Idle,
            publisher,
        };
        (refresh, receiver)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn last_rendered(&self) -> Option<&str> {
        self.last_rendered.as_deref()
    }

    /// Runs one refresh cycle to completion
    pub async fn tick(&mut self) -> CycleOutcome {
        self.state = LoopState::Fetching;
        let outcome = self.cycle().await;
        self.state = LoopState::Idle;
        outcome
    }

    async fn cycle(&mut self) -> CycleOutcome {
        let samples = match self.feed.fetch_recent().await {
            Ok(samples) => samples,
            Err(e) => {
                tracing::warn!("Skipping refresh cycle: {}", e);
                return CycleOutcome::Failed;
            }
        };

        let Some(latest) = latest_timestamp(&samples) else {
            tracing::debug!("No positions available yet");
            return CycleOutcome::Empty;
        };

        if !has_new_data(latest, self.last_rendered.as_deref()) {
            tracing::debug!("Latest position {} already rendered", latest);
            return CycleOutcome::Unchanged;
        }

        let latest = latest.to_string();
        self.scene.render(&samples);
        self.table.render(&samples);

        tracing::info!("Rendered {} positions, latest at {}", samples.len(), latest);
        self.last_rendered = Some(latest);
        self.publish();
        CycleOutcome::Rendered
    }

    fn publish(&self) {
        let snapshot = DashboardSnapshot::new(
            self.scene.scene().clone(),
            self.table.rows().to_vec(),
            self.last_rendered.clone(),
            Some(chrono::Utc::now()),
        );
        // Keep the value even when no handler is subscribed
        self.publisher.send_replace(snapshot);
    }

    /// Refreshes immediately, then once per `period`, never overlapping cycles.
    ///
    /// Ticks missed while a slow cycle is in flight are dropped.
    pub async fn run(mut self, period: Duration) {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!("Refresh loop started with a {:?} period", period);
        loop {
            interval.tick().await;
            let outcome = self.tick().await;
            tracing::trace!(
                "Refresh cycle finished: {:?}, back to {:?}, showing {:?}",
                outcome,
                self.state(),
                self.last_rendered()
            );
        }
    }
}
