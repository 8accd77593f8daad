//! Recording cue service.
//!
//! Presentation is out of scope for the sandbox, so cues are kept as an event
//! log that tests and the CLI can inspect.

use skill_core::{ActorId, CueParams, CueService, GameplayTag};
use tracing::{trace, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueScope {
    Local,
    Net,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CueEvent {
    pub target: ActorId,
    pub cue: GameplayTag,
    pub params: CueParams,
    pub scope: CueScope,
}

#[derive(Clone, Debug, Default)]
pub struct CueLog {
    authoritative: bool,
    events: Vec<CueEvent>,
}

impl CueLog {
    pub fn new(authoritative: bool) -> Self {
        Self {
            authoritative,
            events: Vec::new(),
        }
    }

    pub fn events(&self) -> &[CueEvent] {
        &self.events
    }

    /// Events whose tag equals or descends from `cue`.
    pub fn matching<'a>(&'a self, cue: &'a GameplayTag) -> impl Iterator<Item = &'a CueEvent> {
        self.events.iter().filter(move |e| e.cue.matches(cue))
    }

    pub fn drain(&mut self) -> Vec<CueEvent> {
        std::mem::take(&mut self.events)
    }

    fn record(&mut self, target: ActorId, cue: &GameplayTag, params: &CueParams, scope: CueScope) {
        trace!(target: "runtime::cues", %target, %cue, ?scope, "cue");
        self.events.push(CueEvent {
            target,
            cue: cue.clone(),
            params: params.clone(),
            scope,
        });
    }
}

impl CueService for CueLog {
    fn play_local_cue(&mut self, target: ActorId, cue: &GameplayTag, params: &CueParams) {
        self.record(target, cue, params, CueScope::Local);
    }

    fn play_net_cue(&mut self, target: ActorId, cue: &GameplayTag, params: &CueParams) {
        if !self.authoritative {
            warn!(target: "runtime::cues", %cue, "net cue ignored without authority");
            return;
        }
        self.record(target, cue, params, CueScope::Net);
    }
}
