//! Scripted event scenarios against a [`MemoryPage`].
//!
//! A scenario is a page fixture plus an ordered list of events. Each event
//! targets the n-th element matching a selector; `input` events first set
//! the field value, like a keystroke would, then dispatch. File reads start
//! on `change` and finish immediately unless marked `deferred`, in which
//! case they wait for the next `flush_reads` (or the end of the run).

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::behaviors::{
    Completion, EventOutcome, PageBehaviors, PageEvent, PreviewRequest, SubmitDecision,
};
use crate::config::PageConfig;
use crate::error::{ConfigError, SelectorError};
use crate::page::Page;
use crate::platform::memory::{FileFixture, MemoryPage, NodeId, PageFixture, PageSnapshot};
use crate::selector::Selector;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid event target: {0}")]
    Selector(#[from] SelectorError),

    #[error("event #{step}: no element #{index} matches `{selector}`")]
    NoTarget {
        step: usize,
        selector: String,
        index: usize,
    },

    #[error("invalid scenario JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub selector: String,
    #[serde(default)]
    pub index: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioEvent {
    Scroll {
        y: f64,
    },
    PointerEnter {
        #[serde(flatten)]
        target: Target,
    },
    PointerLeave {
        #[serde(flatten)]
        target: Target,
    },
    Click {
        #[serde(flatten)]
        target: Target,
    },
    Input {
        #[serde(flatten)]
        target: Target,
        text: String,
    },
    Change {
        #[serde(flatten)]
        target: Target,
        /// Replaces the input's selected files before dispatching.
        #[serde(default)]
        files: Option<Vec<FileFixture>>,
        #[serde(default)]
        deferred: bool,
    },
    Submit {
        #[serde(flatten)]
        target: Target,
    },
    FlushReads,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub config: PageConfig,
    pub page: PageFixture,
    pub events: Vec<ScenarioEvent>,
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Ignored,
    Scrolled { scrolled: bool },
    Hovered,
    MenuToggled { active: bool },
    PhoneFormatted { value: String },
    PreviewPending { generation: u64 },
    PreviewApplied { generation: u64 },
    PreviewStale { generation: u64 },
    ReadsFlushed { applied: usize, stale: usize },
    SubmitAllowed,
    SubmitBlocked { invalid: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepReport {
    pub step: usize,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
    pub page: PageSnapshot,
}

struct PendingRead {
    request: PreviewRequest<NodeId>,
    data_url: String,
}

pub struct Replay {
    page: MemoryPage,
    behaviors: PageBehaviors<MemoryPage>,
    pending: VecDeque<PendingRead>,
}

impl Replay {
    pub fn new(fixture: &PageFixture, config: &PageConfig) -> Result<Self, ReplayError> {
        let page = MemoryPage::new(fixture);
        let behaviors = PageBehaviors::new(&page, config)?;
        Ok(Self {
            page,
            behaviors,
            pending: VecDeque::new(),
        })
    }

    /// Runs every event, then finishes reads still pending.
    pub fn run(scenario: &Scenario) -> Result<ReplayReport, ReplayError> {
        let mut replay = Self::new(&scenario.page, &scenario.config)?;
        let mut steps = Vec::with_capacity(scenario.events.len());
        for (step, event) in scenario.events.iter().enumerate() {
            let outcome = replay.apply(step, event)?;
            log::debug!("[Replay] #{step} {event:?} -> {outcome:?}");
            steps.push(StepReport { step, outcome });
        }
        if !replay.pending.is_empty() {
            let outcome = replay.flush_reads();
            steps.push(StepReport {
                step: scenario.events.len(),
                outcome,
            });
        }
        Ok(ReplayReport {
            steps,
            page: replay.page.snapshot(),
        })
    }

    pub fn page(&self) -> &MemoryPage {
        &self.page
    }

    pub fn apply(
        &mut self,
        step: usize,
        event: &ScenarioEvent,
    ) -> Result<StepOutcome, ReplayError> {
        let page_event = match event {
            ScenarioEvent::Scroll { y } => {
                self.page.set_scroll_y(*y);
                PageEvent::Scroll
            }
            ScenarioEvent::PointerEnter { target } => {
                PageEvent::PointerEnter(self.resolve(step, target)?)
            }
            ScenarioEvent::PointerLeave { target } => {
                PageEvent::PointerLeave(self.resolve(step, target)?)
            }
            ScenarioEvent::Click { target } => PageEvent::Click(self.resolve(step, target)?),
            ScenarioEvent::Input { target, text } => {
                let element = self.resolve(step, target)?;
                self.page.set_value(&element, text);
                PageEvent::Input(element)
            }
            ScenarioEvent::Change { target, files, .. } => {
                let element = self.resolve(step, target)?;
                if let Some(files) = files {
                    self.page.set_files(&element, files.clone());
                }
                PageEvent::Change(element)
            }
            ScenarioEvent::Submit { target } => PageEvent::Submit(self.resolve(step, target)?),
            ScenarioEvent::FlushReads => return Ok(self.flush_reads()),
        };

        let outcome = match self.behaviors.dispatch(&self.page, page_event) {
            EventOutcome::Ignored => StepOutcome::Ignored,
            EventOutcome::Scrolled { scrolled } => StepOutcome::Scrolled { scrolled },
            EventOutcome::Hovered => StepOutcome::Hovered,
            EventOutcome::MenuToggled { active } => StepOutcome::MenuToggled { active },
            EventOutcome::PhoneFormatted(value) => StepOutcome::PhoneFormatted { value },
            EventOutcome::Submit(SubmitDecision::Allow) => StepOutcome::SubmitAllowed,
            EventOutcome::Submit(SubmitDecision::Block { invalid }) => {
                StepOutcome::SubmitBlocked { invalid }
            }
            EventOutcome::PreviewRequested(request) => {
                let deferred = matches!(event, ScenarioEvent::Change { deferred: true, .. });
                self.start_read(request, deferred)
            }
        };
        Ok(outcome)
    }

    fn resolve(&self, step: usize, target: &Target) -> Result<NodeId, ReplayError> {
        let selector = Selector::parse(&target.selector)?;
        self.page
            .query_all(&selector)
            .get(target.index)
            .copied()
            .ok_or_else(|| ReplayError::NoTarget {
                step,
                selector: target.selector.clone(),
                index: target.index,
            })
    }

    fn start_read(&mut self, request: PreviewRequest<NodeId>, deferred: bool) -> StepOutcome {
        // The file is captured when the read starts, as FileReader does.
        let Some(data_url) = self.page.read_first_file_as_data_url(&request.input) else {
            return StepOutcome::Ignored;
        };
        let generation = request.generation();
        if deferred {
            self.pending.push_back(PendingRead { request, data_url });
            return StepOutcome::PreviewPending { generation };
        }
        match self.behaviors.complete_preview(&self.page, &request, &data_url) {
            Completion::Applied => StepOutcome::PreviewApplied { generation },
            Completion::Stale => StepOutcome::PreviewStale { generation },
        }
    }

    fn flush_reads(&mut self) -> StepOutcome {
        let (mut applied, mut stale) = (0, 0);
        while let Some(read) = self.pending.pop_front() {
            match self.behaviors.complete_preview(&self.page, &read.request, &read.data_url) {
                Completion::Applied => applied += 1,
                Completion::Stale => stale += 1,
            }
        }
        StepOutcome::ReadsFlushed { applied, stale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_deserialize_from_tagged_json() {
        let events: Vec<ScenarioEvent> = serde_json::from_str(
            r##"[
                { "kind": "scroll", "y": 80 },
                { "kind": "click", "selector": ".navbar-toggler" },
                { "kind": "input", "selector": "input[type=tel]", "index": 1, "text": "0612" },
                { "kind": "change", "selector": "#photo", "deferred": true },
                { "kind": "flush_reads" }
            ]"##,
        )
        .unwrap();
        assert_eq!(events[0], ScenarioEvent::Scroll { y: 80.0 });
        assert_eq!(
            events[2],
            ScenarioEvent::Input {
                target: Target {
                    selector: "input[type=tel]".to_string(),
                    index: 1,
                },
                text: "0612".to_string(),
            }
        );
        assert!(matches!(events[3], ScenarioEvent::Change { deferred: true, files: None, .. }));
        assert_eq!(events[4], ScenarioEvent::FlushReads);
    }

    #[test]
    fn missing_target_reports_step() {
        let scenario = Scenario {
            events: vec![ScenarioEvent::Click {
                target: Target {
                    selector: ".navbar-toggler".to_string(),
                    index: 0,
                },
            }],
            ..Scenario::default()
        };
        let error = Replay::run(&scenario).err().unwrap();
        assert!(matches!(error, ReplayError::NoTarget { step: 0, .. }));
        assert_eq!(error.to_string(), "event #0: no element #0 matches `.navbar-toggler`");
    }
}
