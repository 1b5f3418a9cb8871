use crate::data_loader::UsageSource;
use crate::state::{DashboardState, Snapshot};

pub struct App<S> {
    pub dashboard: DashboardState<S>,
    pub selected_index: usize,
    pub should_quit: bool,
    refresh_requested: bool,
}

impl<S: UsageSource> App<S> {
    /// Starts in the loading state with the first fetch already queued.
    pub fn new(source: S) -> Self {
        Self {
            dashboard: DashboardState::new(source),
            selected_index: 0,
            should_quit: false,
            refresh_requested: true,
        }
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.dashboard.snapshot()
    }

    /// Queue a refresh; ignored while one is already pending.
    pub fn request_refresh(&mut self) {
        if self.refresh_requested || self.dashboard.is_loading() {
            return;
        }
        self.refresh_requested = true;
        self.dashboard.mark_loading();
    }

    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    pub async fn refresh(&mut self) {
        self.dashboard.refresh().await;
        let rows = self.snapshot().map_or(0, |s| s.records.len());
        if self.selected_index >= rows {
            self.selected_index = rows.saturating_sub(1);
        }
    }

    pub fn next_item(&mut self) {
        let max_index = self
            .snapshot()
            .map_or(0, |s| s.records.len().saturating_sub(1));

        if self.selected_index < max_index {
            self.selected_index += 1;
        }
    }

    pub fn previous_item(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}
