//! What the user is looking at.
use derive_more::Display;
use peermap_primitives::{CountryCode, Metric};

use crate::core::store::TimeIndex;

/// Either one country or the whole world.
#[derive(Clone, Debug, Display, PartialEq, Eq, Hash, Default)]
pub enum Entity {
    #[default]
    #[display("World")]
    World,
    #[display("{_0}")]
    Country(CountryCode),
}

/// How the world is drawn.
///
/// On the globe the map rotates to the selected country before zooming in. On
/// the flat map it zooms to the country directly.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, Default)]
pub enum Projection {
    #[default]
    #[display("Map")]
    Map,
    #[display("Globe")]
    Globe,
}

impl Projection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Projection::Map => Projection::Globe,
            Projection::Globe => Projection::Map,
        }
    }
}

/// Outcome of clicking on a country.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntityChange {
    /// The country was already selected: back to the world view.
    Deselected,
    Selected(CountryCode),
}

/// Selected metric, entity and time index. One of each at any time.
///
/// The hovered country highlights both its polygon and its bubble. Any
/// selection change clears it.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SelectionState {
    pub metric: Metric,
    pub entity: Entity,
    pub time_index: TimeIndex,
    pub hovered: Option<CountryCode>,
    pub projection: Projection,
}

impl SelectionState {
    /// Selects `country`, or goes back to the world when it is the current one.
    ///
    /// The hover highlight is cleared either way.
    pub fn toggle_country(&mut self, country: CountryCode) -> EntityChange {
        self.hovered = None;
        if self.is_selected(&country) {
            self.entity = Entity::World;
            return EntityChange::Deselected;
        }
        self.entity = Entity::Country(country.clone());
        EntityChange::Selected(country)
    }

    #[must_use]
    pub fn is_selected(&self, country: &CountryCode) -> bool {
        matches!(&self.entity, Entity::Country(selected) if selected == country)
    }

    /// Highlights `country`, replacing the previous highlight.
    ///
    /// Returns `false` when `country` was already highlighted.
    pub fn hover(&mut self, country: CountryCode) -> bool {
        if self.hovered.as_ref() == Some(&country) {
            return false;
        }
        self.hovered = Some(country);
        true
    }

    /// Removes the highlight of `country`. The highlight of another country
    /// is kept.
    ///
    /// Returns `false` when `country` was not highlighted.
    pub fn hover_out(&mut self, country: &CountryCode) -> bool {
        if self.hovered.as_ref() != Some(country) {
            return false;
        }
        self.hovered = None;
        true
    }
}
