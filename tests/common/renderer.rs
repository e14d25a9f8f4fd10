use std::sync::Mutex;

use peermap::core::render::{RenderAdapter, RenderError};
use peermap::core::selection::{Entity, Projection};
use peermap::core::view::{Bubble, MetricToggles, ValueAxis};
use peermap_primitives::{CountryCode, Counters, Metric, TimeSeriesPoint};

/// Keeps the last value rendered for each element of the surface.
#[derive(Default, Debug)]
pub struct RecordingRenderer {
    surface: Mutex<Surface>,
}

#[derive(Default, Debug, Clone)]
pub struct Surface {
    pub chart: Vec<TimeSeriesPoint>,
    pub chart_refreshes: usize,
    pub bubbles: Vec<Bubble>,
    pub metric: Option<Metric>,
    pub totals: Option<Counters>,
    pub label: Option<Entity>,
    pub hovered: Option<CountryCode>,
    pub projection: Projection,
}

impl RecordingRenderer {
    pub fn surface(&self) -> Surface {
        self.surface.lock().unwrap().clone()
    }

    fn update(&self, f: impl FnOnce(&mut Surface)) {
        f(&mut self.surface.lock().unwrap());
    }
}

impl RenderAdapter for RecordingRenderer {
    fn invalidate_chart(&self, points: &[TimeSeriesPoint]) {
        self.update(|surface| {
            surface.chart = points.to_vec();
            surface.chart_refreshes += 1;
        });
    }

    fn set_value_axis(&self, _axis: &ValueAxis) {}

    fn invalidate_bubbles(&self, bubbles: &[Bubble]) {
        self.update(|surface| surface.bubbles = bubbles.to_vec());
    }

    fn show_metric(&self, metric: Metric) {
        self.update(|surface| surface.metric = Some(metric));
    }

    fn set_toggles(&self, _toggles: &MetricToggles) {}

    fn set_heat_ceiling(&self, _ceiling: u64) {}

    fn set_totals(&self, totals: &Counters) {
        self.update(|surface| surface.totals = Some(*totals));
    }

    fn set_entity_label(&self, entity: &Entity) {
        self.update(|surface| surface.label = Some(entity.clone()));
    }

    fn focus(&self, _entity: &Entity, _projection: Projection) {}

    fn set_hover(&self, country: Option<CountryCode>) {
        self.update(|surface| surface.hovered = country);
    }

    fn set_projection(&self, projection: Projection) {
        self.update(|surface| surface.projection = projection);
    }

    fn clear_stale_label(&self) -> Result<(), RenderError> {
        Ok(())
    }
}
