//! The dashboard core.
//!
//! [`Dashboard`] owns the whole application state: the snapshot store, the
//! current selection and the view state bound to the rendering surface. Every
//! handler (a poller tick, a debounced country refresh, a user interaction)
//! takes the state lock for its mutation and releases it before awaiting the
//! network, so handlers run to completion one at a time. Fetches can still
//! complete in any order: the last writer wins.
//!
//! ```text
//! poller tick ──► refresh ─────────────► merge_map_point ──► RenderAdapter
//! click ────────► select_entity ─(debounce)─► merge_world_series ──► RenderAdapter
//! ```
pub mod debounce;
pub mod merge;
pub mod render;
pub mod selection;
pub mod source;
pub mod store;
pub mod view;

use std::sync::Arc;
use std::time::Duration;

use peermap_primitives::{CountryCode, Metric};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use self::debounce::Debouncer;
use self::merge::{merge_map_point, merge_world_series};
use self::render::RenderAdapter;
use self::selection::{Entity, EntityChange, Projection, SelectionState};
use self::source::SnapshotSource;
use self::store::{MetricMaxima, SnapshotStore, TimeIndex};
use self::view::{BubbleSeries, ValueAxis, ViewState};

/// Everything the dashboard knows and shows.
#[derive(Debug)]
pub struct AppState {
    pub store: SnapshotStore,
    pub selection: SelectionState,
    pub view: ViewState,
    debouncer: Debouncer<CountryCode>,
}

impl AppState {
    /// Binds the bubbles to the latest slide of the timeline.
    #[must_use]
    pub fn new(store: SnapshotStore) -> Self {
        let selection = SelectionState::default();
        let (_, latest) = store.timeline().resolve(TimeIndex::Latest);
        let maxima = MetricMaxima::of(&latest.list);

        let view = ViewState {
            bubbles: BubbleSeries::bind(&latest.list),
            maxima,
            heat_ceiling: maxima.ceiling(selection.metric),
            ..ViewState::default()
        };

        Self {
            store,
            selection,
            view,
            debouncer: Debouncer::default(),
        }
    }

    /// Country whose chart refresh is waiting for the debounce delay.
    #[must_use]
    pub fn pending_country(&self) -> Option<&CountryCode> {
        self.debouncer.pending_key()
    }
}

struct Shared<S, R> {
    state: Mutex<AppState>,
    source: S,
    renderer: R,
    debounce: Duration,
}

impl<S, R> Shared<S, R>
where
    S: SnapshotSource,
    R: RenderAdapter,
{
    /// Debounced part of a country selection: replaces the chart values with
    /// the country series.
    async fn set_country_data(&self, country: &CountryCode) {
        let mut state = self.state.lock().await;

        if !state.selection.is_selected(country) {
            debug!(%country, "Country refresh skipped, the country is not selected anymore");
            return;
        }

        let AppState { store, view, .. } = &mut *state;

        if !view.chart.is_bound() {
            debug!(%country, "Country refresh deferred, the chart is not bound yet");
            return;
        }

        let series = store.country_series(country);
        merge_world_series(&mut view.chart, &mut view.value_axis, |index| {
            series.get(index).copied().flatten()
        });

        self.renderer.invalidate_chart(view.chart.points());
        self.renderer.set_value_axis(&view.value_axis);
    }

    fn relabel(&self, selection: &SelectionState) {
        if let Err(err) = self.renderer.clear_stale_label() {
            warn!(%err, "Unable to clear the stale label");
        }
        self.renderer.set_entity_label(&selection.entity);
        self.renderer.focus(&selection.entity, selection.projection);
    }
}

/// The dashboard controller.
///
/// It is cheap to clone: clones share the same state.
pub struct Dashboard<S, R> {
    shared: Arc<Shared<S, R>>,
}

impl<S, R> Clone for Dashboard<S, R> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<S, R> Dashboard<S, R>
where
    S: SnapshotSource + 'static,
    R: RenderAdapter + 'static,
{
    #[must_use]
    pub fn new(store: SnapshotStore, source: S, renderer: R, debounce: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(AppState::new(store)),
                source,
                renderer,
                debounce,
            }),
        }
    }

    /// Locks the application state.
    pub async fn state(&self) -> MutexGuard<'_, AppState> {
        self.shared.state.lock().await
    }

    pub async fn selection(&self) -> SelectionState {
        self.state().await.selection.clone()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.shared.renderer
    }

    /// First render: binds the chart to the aggregate world series, shows the
    /// bubbles of the latest slide, activates the `all` metric and loads the
    /// totals.
    ///
    /// A failed fetch leaves the chart unbound. The next poller tick or world
    /// refresh binds it.
    pub async fn initialize(&self) {
        self.bind_unbound_chart().await;

        {
            let state = self.state().await;
            self.shared.renderer.invalidate_bubbles(state.view.bubbles.items());
            self.shared.relabel(&state.selection);
        }

        self.select_metric(Metric::default()).await;
        self.refresh_totals().await;
    }

    /// Handles a click on a country.
    ///
    /// Clicking the selected country goes back to the world. Any other
    /// country becomes the selected entity and its series replaces the chart
    /// values once the selection has been stable for the debounce delay.
    pub async fn select_entity(&self, country: CountryCode) {
        let mut state = self.state().await;

        let hovered = state.selection.hovered.is_some();
        let change = state.selection.toggle_country(country);
        if hovered {
            self.shared.renderer.set_hover(None);
        }

        match change {
            EntityChange::Deselected => {
                drop(state);
                self.show_world().await;
            }
            EntityChange::Selected(country) => {
                let shared = self.shared.clone();
                let selected = country.clone();

                state.debouncer.schedule(country, self.shared.debounce, async move {
                    shared.set_country_data(&selected).await;
                });

                self.shared.relabel(&state.selection);
                drop(state);

                self.refresh_totals().await;
            }
        }
    }

    /// Goes back to the world view and puts the aggregate series back in the
    /// chart.
    ///
    /// The series is fetched again. If the fetch fails the last fetched series
    /// is used.
    pub async fn show_world(&self) {
        {
            let mut state = self.state().await;
            state.selection.entity = Entity::World;
            if let Some(cancelled) = state.debouncer.cancel() {
                debug!(%cancelled, "Pending country refresh cancelled");
            }
            if state.selection.hovered.take().is_some() {
                self.shared.renderer.set_hover(None);
            }
            self.shared.relabel(&state.selection);
        }

        let fetched = match self.shared.source.world_aggregate_series().await {
            Ok(series) => Some(series),
            Err(err) => {
                warn!(%err, "Unable to refresh the aggregate world series, using the last fetched one");
                None
            }
        };

        {
            let mut state = self.state().await;

            if state.selection.entity != Entity::World {
                debug!("World refresh superseded by a country selection");
                return;
            }

            let AppState { store, view, .. } = &mut *state;

            if let Some(series) = fetched {
                store.set_aggregate_series(series);
            }
            let aggregate = store.aggregate_series();

            if view.chart.is_bound() {
                merge_world_series(&mut view.chart, &mut view.value_axis, |index| {
                    aggregate.get(index).map(|point| point.counters)
                });
            } else {
                view.chart.bind(aggregate.to_vec());
                view.value_axis = ValueAxis::auto();
            }

            self.shared.renderer.invalidate_chart(view.chart.points());
            self.shared.renderer.set_value_axis(&view.value_axis);
        }

        self.refresh_totals().await;
    }

    /// Pointer over a country polygon or bubble: highlights both.
    pub async fn hover_country(&self, country: CountryCode) {
        let mut state = self.state().await;

        if state.selection.hover(country) {
            self.shared.renderer.set_hover(state.selection.hovered.clone());
        }
    }

    /// Pointer out of a country polygon or bubble.
    pub async fn leave_country(&self, country: &CountryCode) {
        let mut state = self.state().await;

        if state.selection.hover_out(country) {
            self.shared.renderer.set_hover(None);
        }
    }

    /// Switches between the flat map and the globe, keeping the focus on the
    /// selected entity.
    pub async fn select_projection(&self, projection: Projection) {
        let mut state = self.state().await;

        if state.selection.projection == projection {
            return;
        }
        state.selection.projection = projection;

        self.shared.renderer.set_projection(projection);
        self.shared.renderer.focus(&state.selection.entity, projection);
    }

    /// The map/globe switch. Returns the projection now shown.
    pub async fn toggle_projection(&self) -> Projection {
        let projection = self.state().await.selection.projection.toggled();
        self.select_projection(projection).await;
        projection
    }

    /// Shows `metric` in the chart and the bubbles. Exactly one metric button
    /// stays active.
    pub async fn select_metric(&self, metric: Metric) {
        let mut state = self.state().await;
        state.selection.metric = metric;

        let view = &mut state.view;
        view.toggles.activate(metric);
        view.heat_ceiling = view.maxima.ceiling(metric);

        self.shared.renderer.set_toggles(&view.toggles);
        self.shared.renderer.show_metric(metric);
        self.shared.renderer.set_heat_ceiling(view.heat_ceiling);
    }

    /// Moves the map to a past time index. Out of range indexes fall back to
    /// the last one.
    ///
    /// Returns the time index actually shown.
    pub async fn select_time_index(&self, index: usize) -> usize {
        let mut state = self.state().await;
        let AppState {
            store, selection, view, ..
        } = &mut *state;

        let (resolved, entry) = store.timeline().resolve(TimeIndex::At(index));
        selection.time_index = TimeIndex::At(resolved);

        merge_map_point(&mut view.bubbles, &entry.list);
        view.maxima = MetricMaxima::of(&entry.list);
        view.heat_ceiling = view.maxima.ceiling(selection.metric);
        view.totals = entry.totals();

        self.shared.renderer.invalidate_bubbles(view.bubbles.items());
        self.shared.renderer.set_heat_ceiling(view.heat_ceiling);
        self.shared.renderer.set_totals(&view.totals);

        resolved
    }

    /// Slider drag. `position` goes from `0.0` (first time index) to `1.0`
    /// (last one).
    pub async fn select_slider_position(&self, position: f64) -> usize {
        let index = self.state().await.store.timeline().slider_index(position);
        self.select_time_index(index).await
    }

    /// Goes back to live data and refreshes it right away.
    pub async fn select_latest(&self) {
        {
            let mut state = self.state().await;
            let AppState {
                store, selection, view, ..
            } = &mut *state;

            selection.time_index = TimeIndex::Latest;
            let (_, latest) = store.timeline().resolve(TimeIndex::Latest);
            view.maxima = MetricMaxima::of(&latest.list);
            view.heat_ceiling = view.maxima.ceiling(selection.metric);

            self.shared.renderer.set_heat_ceiling(view.heat_ceiling);
        }

        self.refresh().await;
    }

    /// One poller tick: merges the latest world map into the bubbles and
    /// refreshes the totals.
    ///
    /// Failures are logged and swallowed; the next tick retries. While a past
    /// time index is selected the live map is not merged. An unbound chart is
    /// bound first.
    pub async fn refresh(&self) {
        self.bind_unbound_chart().await;

        match self.shared.source.latest_world_map().await {
            Ok(list) => {
                let mut state = self.state().await;

                if state.selection.time_index == TimeIndex::Latest {
                    let view = &mut state.view;
                    let overlaid = merge_map_point(&mut view.bubbles, &list);
                    debug!(received = list.len(), overlaid, "World map refreshed");
                    self.shared.renderer.invalidate_bubbles(view.bubbles.items());
                } else {
                    debug!("Live world map skipped, a past time index is selected");
                }
            }
            Err(err) => {
                warn!(%err, "Unable to refresh the world map, retrying on the next tick");
            }
        }

        self.refresh_totals().await;
    }

    /// Binds the chart to the aggregate world series if it is not bound yet.
    ///
    /// When a country is selected its series is merged right after binding.
    async fn bind_unbound_chart(&self) {
        if self.state().await.view.chart.is_bound() {
            return;
        }

        let series = match self.shared.source.world_aggregate_series().await {
            Ok(series) => series,
            Err(err) => {
                warn!(%err, "Unable to fetch the aggregate world series, the chart stays empty until the next refresh");
                return;
            }
        };

        let selected = {
            let mut state = self.state().await;
            let AppState {
                store, selection, view, ..
            } = &mut *state;

            store.set_aggregate_series(series.clone());

            if !view.chart.bind(series) || !view.chart.is_bound() {
                return;
            }
            view.value_axis = ValueAxis::auto();

            self.shared.renderer.invalidate_chart(view.chart.points());
            self.shared.renderer.set_value_axis(&view.value_axis);

            match &selection.entity {
                Entity::Country(country) => Some(country.clone()),
                Entity::World => None,
            }
        };

        if let Some(country) = selected {
            self.shared.set_country_data(&country).await;
        }
    }

    /// Reloads the totals shown in the metric buttons: fetched for live data,
    /// summed from the timeline for a past time index.
    pub async fn refresh_totals(&self) {
        let time_index = self.state().await.selection.time_index;

        let totals = match time_index {
            TimeIndex::Latest => match self.shared.source.current_totals().await {
                Ok(totals) => totals,
                Err(err) => {
                    warn!(%err, "Unable to refresh the totals");
                    return;
                }
            },
            TimeIndex::At(index) => self.state().await.store.timeline().resolve(TimeIndex::At(index)).1.totals(),
        };

        let mut state = self.state().await;

        if state.selection.time_index != time_index {
            debug!("Totals refresh superseded by a time index change");
            return;
        }

        state.view.totals = totals;
        self.shared.renderer.set_totals(&totals);
    }

    /// Cancels the pending country refresh, if any. Called at shutdown.
    pub async fn dispose(&self) {
        if let Some(cancelled) = self.state().await.debouncer.cancel() {
            debug!(%cancelled, "Pending country refresh cancelled on dispose");
        }
    }
}
