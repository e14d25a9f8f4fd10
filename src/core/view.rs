//! View state bound to the rendering surface.
//!
//! The rendering surface animates value transitions by interpolating the
//! fields of the objects it was bound to. These structures are bound once and
//! then only mutated in place: the vectors are never reallocated or replaced
//! after binding, only their leaf counters change.
use std::collections::HashMap;

use peermap_primitives::{CountryCode, CountrySnapshot, Counters, Metric, TimeSeriesPoint};

use crate::core::store::MetricMaxima;

/// Range of the chart value axis. `None` bounds mean auto-scale.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct ValueAxis {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl ValueAxis {
    /// Visual floor used when the selected country has no data at a time index.
    pub const NO_DATA: ValueAxis = ValueAxis {
        min: Some(0),
        max: Some(10),
    };

    #[must_use]
    pub fn auto() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_auto(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

/// Points of the line chart.
#[derive(Clone, Debug, Default)]
pub struct ChartData {
    points: Vec<TimeSeriesPoint>,
}

impl ChartData {
    /// Binds the chart to `series` unless it is already bound.
    ///
    /// Returns `false` when the chart was already bound, in which case the
    /// series is discarded and the caller has to merge instead.
    pub fn bind(&mut self, series: Vec<TimeSeriesPoint>) -> bool {
        if !self.points.is_empty() {
            return false;
        }
        self.points = series;
        true
    }

    #[must_use]
    pub fn is_bound(&self) -> bool {
        !self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn points_mut(&mut self) -> &mut [TimeSeriesPoint] {
        &mut self.points
    }
}

/// A map bubble. Its radius follows the active metric.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bubble {
    pub id: CountryCode,
    pub counters: Counters,
}

/// Bubbles of the map, one per country of the slide they were bound to.
#[derive(Clone, Debug, Default)]
pub struct BubbleSeries {
    items: Vec<Bubble>,
    positions: HashMap<CountryCode, usize>,
}

impl BubbleSeries {
    #[must_use]
    pub fn bind(snapshots: &[CountrySnapshot]) -> Self {
        let mut series = Self::default();
        for snapshot in snapshots {
            if series.positions.contains_key(&snapshot.id) {
                continue;
            }
            series.positions.insert(snapshot.id.clone(), series.items.len());
            series.items.push(Bubble {
                id: snapshot.id.clone(),
                counters: snapshot.counters,
            });
        }
        series
    }

    #[must_use]
    pub fn get(&self, id: &CountryCode) -> Option<&Bubble> {
        self.positions.get(id).map(|position| &self.items[*position])
    }

    pub fn get_mut(&mut self, id: &CountryCode) -> Option<&mut Bubble> {
        self.positions.get(id).map(|position| &mut self.items[*position])
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Bubble> {
        self.items.iter_mut()
    }

    #[must_use]
    pub fn items(&self) -> &[Bubble] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The three metric buttons. Exactly one of them is active.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MetricToggles {
    active: [bool; 3],
}

impl Default for MetricToggles {
    fn default() -> Self {
        let mut toggles = Self { active: [false; 3] };
        toggles.activate(Metric::default());
        toggles
    }
}

impl MetricToggles {
    /// Activates the button of `metric` and deactivates the other two.
    pub fn activate(&mut self, metric: Metric) {
        for (position, candidate) in Metric::VARIANTS.iter().enumerate() {
            self.active[position] = *candidate == metric;
        }
    }

    #[must_use]
    pub fn is_active(&self, metric: Metric) -> bool {
        Metric::VARIANTS
            .iter()
            .position(|candidate| *candidate == metric)
            .is_some_and(|position| self.active[position])
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|active| **active).count()
    }

    #[must_use]
    pub fn active(&self) -> Option<Metric> {
        Metric::VARIANTS.into_iter().find(|metric| self.is_active(*metric))
    }
}

/// Everything the rendering surface is bound to.
#[derive(Clone, Debug, Default)]
pub struct ViewState {
    pub chart: ChartData,
    pub value_axis: ValueAxis,
    pub bubbles: BubbleSeries,
    pub toggles: MetricToggles,
    /// Maxima of the loaded time index, used for the bubble heat rule.
    pub maxima: MetricMaxima,
    /// Value mapped to the biggest bubble radius.
    pub heat_ceiling: u64,
    /// Totals shown in the metric buttons.
    pub totals: Counters,
}
