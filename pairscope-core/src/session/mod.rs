//! Session orchestration — the event-driven state machine.
//!
//! A `PairSession` owns the series store and the current pipeline state and
//! reacts to immutable `Event` values one at a time. Each transition returns
//! the list of `Effect`s to publish, so the transition itself is testable
//! without any presentation dependency; `publish_all` drives a
//! `PresentationSink` afterwards.

use thiserror::Error;

use crate::data::provider::DataError;
use crate::data::store::SeriesStore;
use crate::data::universe::Universe;
use crate::domain::dataset::{PairDataset, Selection};
use crate::pipeline::builder::{build_pair, BuildError};
use crate::pipeline::filter;
use crate::pipeline::summarize::{summarize, PairSummary};

/// One of the two identifier chooser slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub fn other(self) -> Slot {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::First => "first",
            Slot::Second => "second",
        }
    }
}

/// External events the session reacts to. No other transitions exist.
#[derive(Debug, Clone)]
pub enum Event {
    /// One chooser slot switched to a new identifier.
    IdentifierChanged { slot: Slot, identifier: String },
    /// The brushed selection was replaced wholesale.
    SelectionChanged { selection: Selection },
}

/// Publication effects a transition produces, in order.
#[derive(Debug, Clone)]
pub enum Effect {
    /// The rebuilt dataset, for charting.
    PublishDataset(PairDataset),
    /// The recomputed statistics report.
    PublishSummary(PairSummary),
    /// A slot's current value and its allowed identifier set, keeping the
    /// two choosers mutually exclusive.
    PublishChoices {
        slot: Slot,
        value: String,
        allowed: Vec<String>,
    },
}

/// Consumer of published effects (the excluded rendering layer's seam).
pub trait PresentationSink {
    fn dataset_changed(&mut self, dataset: &PairDataset);
    fn summary_changed(&mut self, summary: &PairSummary);
    fn choices_changed(&mut self, slot: Slot, value: &str, allowed: &[String]);
}

/// Drive a sink with a transition's effects.
pub fn publish_all(effects: &[Effect], sink: &mut dyn PresentationSink) {
    for effect in effects {
        match effect {
            Effect::PublishDataset(dataset) => sink.dataset_changed(dataset),
            Effect::PublishSummary(summary) => sink.summary_changed(summary),
            Effect::PublishChoices {
                slot,
                value,
                allowed,
            } => sink.choices_changed(*slot, value, allowed),
        }
    }
}

/// Errors from session transitions.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("identifier '{identifier}' is not in the universe")]
    UnknownIdentifier { identifier: String },

    #[error("slot clash: '{identifier}' is already selected in the other slot")]
    SlotClash { identifier: String },

    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// The orchestrator: current identifiers, dataset, selection, and summary.
///
/// Lives for the process lifetime; there is no terminal state. Events are
/// delivered strictly one at a time (single-threaded, `&mut self`), and a
/// cache-miss load blocks inline with the triggering event.
pub struct PairSession {
    store: SeriesStore,
    universe: Universe,
    first: String,
    second: String,
    dataset: PairDataset,
    selection: Selection,
    summary: PairSummary,
}

impl PairSession {
    /// Construct a session and perform the initial build.
    ///
    /// Returns the session plus the initial effects: choices for both slots,
    /// the dataset, and its full-range summary.
    pub fn new(
        mut store: SeriesStore,
        universe: Universe,
        first: impl Into<String>,
        second: impl Into<String>,
    ) -> Result<(Self, Vec<Effect>), SessionError> {
        let first = first.into();
        let second = second.into();
        for identifier in [&first, &second] {
            if !universe.contains(identifier) {
                return Err(SessionError::UnknownIdentifier {
                    identifier: identifier.clone(),
                });
            }
        }
        if first == second {
            return Err(SessionError::SlotClash { identifier: first });
        }

        let dataset = Self::rebuild(&mut store, &first, &second)?;
        let summary = summarize(&filter::apply(&dataset, &Selection::all()));

        let effects = vec![
            Effect::PublishChoices {
                slot: Slot::First,
                value: first.clone(),
                allowed: universe.excluding(&second),
            },
            Effect::PublishChoices {
                slot: Slot::Second,
                value: second.clone(),
                allowed: universe.excluding(&first),
            },
            Effect::PublishDataset(dataset.clone()),
            Effect::PublishSummary(summary.clone()),
        ];

        Ok((
            Self {
                store,
                universe,
                first,
                second,
                dataset,
                selection: Selection::all(),
                summary,
            },
            effects,
        ))
    }

    /// Process one event and return the effects to publish.
    ///
    /// A failed transition leaves all committed state untouched.
    pub fn handle(&mut self, event: Event) -> Result<Vec<Effect>, SessionError> {
        match event {
            Event::IdentifierChanged { slot, identifier } => {
                self.identifier_changed(slot, identifier)
            }
            Event::SelectionChanged { selection } => Ok(self.selection_changed(selection)),
        }
    }

    fn identifier_changed(
        &mut self,
        slot: Slot,
        identifier: String,
    ) -> Result<Vec<Effect>, SessionError> {
        if !self.universe.contains(&identifier) {
            return Err(SessionError::UnknownIdentifier { identifier });
        }
        let other_value = match slot {
            Slot::First => &self.second,
            Slot::Second => &self.first,
        };
        if &identifier == other_value {
            // The mutual-exclusion choices update is supposed to make this
            // state unreachable from the UI.
            return Err(SessionError::SlotClash { identifier });
        }

        let (first, second) = match slot {
            Slot::First => (identifier.clone(), self.second.clone()),
            Slot::Second => (self.first.clone(), identifier.clone()),
        };

        // Build before committing anything: a missing series must not
        // corrupt the previously published state.
        let dataset = Self::rebuild(&mut self.store, &first, &second)?;

        tracing::info!(
            slot = slot.label(),
            identifier = %identifier,
            rows = dataset.len(),
            "identifier changed, dataset rebuilt"
        );

        self.first = first;
        self.second = second;
        self.dataset = dataset;
        self.selection = Selection::all();
        self.summary = summarize(&filter::apply(&self.dataset, &self.selection));

        let other = slot.other();
        Ok(vec![
            Effect::PublishChoices {
                slot: other,
                value: match other {
                    Slot::First => self.first.clone(),
                    Slot::Second => self.second.clone(),
                },
                allowed: self.universe.excluding(&identifier),
            },
            Effect::PublishDataset(self.dataset.clone()),
            Effect::PublishSummary(self.summary.clone()),
        ])
    }

    fn selection_changed(&mut self, selection: Selection) -> Vec<Effect> {
        self.selection = selection;
        self.summary = summarize(&filter::apply(&self.dataset, &self.selection));

        tracing::debug!(
            selected = self.selection.len(),
            count = self.summary.count(),
            "selection changed, summary recomputed"
        );

        // The dataset itself is untouched; only the statistics republish.
        vec![Effect::PublishSummary(self.summary.clone())]
    }

    /// Build the pair, degrading an empty join to an empty dataset.
    fn rebuild(
        store: &mut SeriesStore,
        first: &str,
        second: &str,
    ) -> Result<PairDataset, SessionError> {
        match build_pair(store, first, second) {
            Ok(dataset) => Ok(dataset),
            Err(BuildError::EmptyJoin { first, second }) => {
                tracing::warn!(first = %first, second = %second, "series share no common dates");
                Ok(PairDataset::empty(first, second))
            }
            Err(BuildError::SameIdentifier { identifier }) => {
                Err(SessionError::SlotClash { identifier })
            }
            Err(BuildError::Data(e)) => Err(SessionError::Data(e)),
        }
    }

    pub fn first_id(&self) -> &str {
        &self.first
    }

    pub fn second_id(&self) -> &str {
        &self.second
    }

    pub fn dataset(&self) -> &PairDataset {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn summary(&self) -> &PairSummary {
        &self.summary
    }
}
