//! In-place reconciliation of fetched snapshots into the bound view state.
//!
//! Nothing here replaces a bound vector or object: only the counters of the
//! existing points and bubbles are overwritten.
use peermap_primitives::{CountrySnapshot, Counters, TimeSeriesPoint};

use crate::core::view::{BubbleSeries, ChartData, ValueAxis};

/// Merges one incoming value into a bound chart point.
///
/// With data the counters are overwritten and the value axis goes back to
/// auto-scale. `None` means the entity has no data at this time index: the
/// point is zeroed and the axis is clamped to [`ValueAxis::NO_DATA`].
///
/// Returns the axis range the point asks for.
pub fn merge_world_point(existing: &mut TimeSeriesPoint, incoming: Option<&Counters>) -> ValueAxis {
    match incoming {
        Some(counters) => {
            existing.counters.assign(counters);
            ValueAxis::auto()
        }
        None => {
            existing.counters.reset();
            ValueAxis::NO_DATA
        }
    }
}

/// Merges a whole series into the bound chart, point by point.
///
/// `incoming` is asked for the value of every time index of the chart. The
/// axis range requested by the last merged point wins; an unbound chart leaves
/// the axis untouched.
pub fn merge_world_series<F>(chart: &mut ChartData, axis: &mut ValueAxis, mut incoming: F)
where
    F: FnMut(usize) -> Option<Counters>,
{
    for (index, point) in chart.points_mut().iter_mut().enumerate() {
        *axis = merge_world_point(point, incoming(index).as_ref());
    }
}

/// Merges a per-country payload into the bound bubbles.
///
/// Every bubble is reset first and then the countries present in `incoming`
/// are overlaid. A country missing from the payload ends up at zero, which
/// hides its bubble. Countries without a bound bubble are ignored.
///
/// Returns how many bubbles were overlaid.
pub fn merge_map_point(bubbles: &mut BubbleSeries, incoming: &[CountrySnapshot]) -> usize {
    for bubble in bubbles.iter_mut() {
        bubble.counters.reset();
    }

    let mut overlaid = 0;
    for snapshot in incoming {
        if let Some(bubble) = bubbles.get_mut(&snapshot.id) {
            bubble.counters.assign(&snapshot.counters);
            overlaid += 1;
        }
    }
    overlaid
}
