//! The rendering surface.
//!
//! The dashboard never draws anything itself. It keeps the bound view state
//! up to date and tells a [`RenderAdapter`] what changed, the way a charting
//! library is told to invalidate its data after the raw values were mutated.
#[cfg(test)]
use mockall::automock;
use peermap_primitives::{CountryCode, Counters, Metric, TimeSeriesPoint};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::selection::{Entity, Projection};
use crate::core::view::{Bubble, MetricToggles, ValueAxis};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("element `{0}` is not present on the rendering surface")]
    ElementAbsent(String),
}

#[cfg_attr(test, automock)]
pub trait RenderAdapter: Sync + Send {
    /// The chart points were mutated in place.
    fn invalidate_chart(&self, points: &[TimeSeriesPoint]);

    fn set_value_axis(&self, axis: &ValueAxis);

    /// The bubble counters were mutated in place.
    fn invalidate_bubbles(&self, bubbles: &[Bubble]);

    /// Shows the series of `metric`, hides the other two and colors the
    /// bubbles with the metric color.
    fn show_metric(&self, metric: Metric);

    fn set_toggles(&self, toggles: &MetricToggles);

    /// Value mapped to the biggest bubble radius.
    fn set_heat_ceiling(&self, ceiling: u64);

    /// Totals shown in the metric buttons.
    fn set_totals(&self, totals: &Counters);

    fn set_entity_label(&self, entity: &Entity);

    /// Zooms to the selected country, or back home for the world.
    ///
    /// On the globe the country is rotated into view before zooming in.
    fn focus(&self, entity: &Entity, projection: Projection);

    /// Highlights the polygon and the bubble of `country`, or removes the
    /// highlight with `None`.
    fn set_hover(&self, country: Option<CountryCode>);

    /// Redraws the world with `projection`.
    fn set_projection(&self, projection: Projection);

    /// Removes the date label left behind by the slider.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the label is not on the surface anymore.
    fn clear_stale_label(&self) -> Result<(), RenderError>;
}

/// Renders the dashboard as log lines.
///
/// Used when the dashboard runs headless: every change of the bound view
/// state is traced, bulk data at `debug` level and selection changes at
/// `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRenderer;

impl RenderAdapter for TracingRenderer {
    fn invalidate_chart(&self, points: &[TimeSeriesPoint]) {
        if let Some(last) = points.last() {
            debug!(
                points = points.len(),
                date = %last.date,
                awaiting_peers = last.counters.awaiting_peers(),
                used_ports = last.counters.used_ports(),
                all = last.counters.all(),
                "chart data invalidated"
            );
        }
    }

    fn set_value_axis(&self, axis: &ValueAxis) {
        debug!(min = ?axis.min, max = ?axis.max, "value axis range");
    }

    fn invalidate_bubbles(&self, bubbles: &[Bubble]) {
        let visible = bubbles.iter().filter(|bubble| !bubble.counters.is_zero()).count();
        debug!(bubbles = bubbles.len(), visible, "bubble data invalidated");
    }

    fn show_metric(&self, metric: Metric) {
        info!(%metric, color = metric.color(), "showing metric");
    }

    fn set_toggles(&self, toggles: &MetricToggles) {
        debug!(active = ?toggles.active(), "metric toggles");
    }

    fn set_heat_ceiling(&self, ceiling: u64) {
        debug!(ceiling, "bubble heat ceiling");
    }

    fn set_totals(&self, totals: &Counters) {
        info!(
            "{}: {} | {}: {} | {}: {}",
            Metric::All.label(),
            totals.all(),
            Metric::AwaitingPeers.label(),
            totals.awaiting_peers(),
            Metric::UsedPorts.label(),
            totals.used_ports()
        );
    }

    fn set_entity_label(&self, entity: &Entity) {
        info!(%entity, "selected entity");
    }

    fn focus(&self, entity: &Entity, projection: Projection) {
        debug!(%entity, %projection, "focus");
    }

    fn set_hover(&self, country: Option<CountryCode>) {
        debug!(hovered = ?country, "hover");
    }

    fn set_projection(&self, projection: Projection) {
        info!(%projection, "projection");
    }

    fn clear_stale_label(&self) -> Result<(), RenderError> {
        Ok(())
    }
}
