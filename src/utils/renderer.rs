use burn::train::renderer::{MetricState, MetricsRenderer, TrainingProgress};
use derive_new::new;

/// A Simple renderer for TUI-disabled modes, writing progress to the log
#[derive(new)]
pub struct Simple {}

impl MetricsRenderer for Simple {
    fn update_train(&mut self, state: MetricState) {
        if let MetricState::Numeric(entry, _) = state {
            log::trace!("train {}: {}", entry.name, entry.formatted);
        }
    }

    fn update_valid(&mut self, state: MetricState) {
        if let MetricState::Numeric(entry, _) = state {
            log::trace!("valid {}: {}", entry.name, entry.formatted);
        }
    }

    fn render_train(&mut self, item: TrainingProgress) {
        log::debug!(
            "train epoch {}/{} - iteration {} - {}/{} items",
            item.epoch,
            item.epoch_total,
            item.iteration,
            item.progress.items_processed,
            item.progress.items_total
        );
    }

    fn render_valid(&mut self, item: TrainingProgress) {
        log::debug!(
            "valid epoch {}/{} - iteration {}",
            item.epoch,
            item.epoch_total,
            item.iteration
        );
    }
}
