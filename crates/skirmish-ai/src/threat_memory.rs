//! Remembered enemy contacts.
//!
//! Facts are matched to sightings by source identity only, never by
//! proximity: two distinct contacts standing together stay two facts.
//! Anonymous (positional) facts have no identity and are the only ones
//! refreshed spatially.

use glam::DVec2;

use skirmish_core::components::Sighting;
use skirmish_core::constants::*;
use skirmish_core::types::AgentId;

/// Liveness side table consulted for identity references.
pub trait AgentLiveness {
    fn is_alive(&self, id: AgentId) -> bool;
}

impl<F> AgentLiveness for F
where
    F: Fn(AgentId) -> bool,
{
    fn is_alive(&self, id: AgentId) -> bool {
        self(id)
    }
}

/// One remembered contact.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreatFact {
    /// Agent that produced the fact, `None` for purely positional memories.
    pub source: Option<AgentId>,
    pub position: DVec2,
    /// Current confidence in [0, 1].
    pub confidence: f64,
    /// Confidence at the moment of the last observation.
    seen_confidence: f64,
    pub last_seen_tick: u64,
    pub visible: bool,
}

impl ThreatFact {
    fn sighted(source: AgentId, position: DVec2, tick: u64) -> Self {
        Self {
            source: Some(source),
            position,
            confidence: THREAT_SIGHTED_CONFIDENCE,
            seen_confidence: THREAT_SIGHTED_CONFIDENCE,
            last_seen_tick: tick,
            visible: true,
        }
    }

    fn refresh(&mut self, position: DVec2, confidence: f64, tick: u64) {
        self.position = position;
        self.confidence = confidence;
        self.seen_confidence = confidence;
        self.last_seen_tick = tick;
    }
}

/// Counts produced by one update, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ThreatUpdate {
    pub new_contacts: usize,
    pub purged_dead: usize,
    pub purged_stale: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ThreatMemory {
    facts: Vec<ThreatFact>,
}

impl ThreatMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold this tick's sightings into memory, then purge dead and stale facts.
    pub fn update(
        &mut self,
        sightings: &[Sighting],
        tick: u64,
        liveness: &impl AgentLiveness,
    ) -> ThreatUpdate {
        let mut result = ThreatUpdate::default();

        for fact in &mut self.facts {
            fact.visible = false;
        }

        for sighting in sightings {
            if !liveness.is_alive(sighting.source) {
                continue;
            }
            match self
                .facts
                .iter_mut()
                .find(|f| f.source == Some(sighting.source))
            {
                Some(fact) => {
                    fact.refresh(sighting.position, THREAT_SIGHTED_CONFIDENCE, tick);
                    fact.visible = true;
                }
                None => {
                    self.facts
                        .push(ThreatFact::sighted(sighting.source, sighting.position, tick));
                    result.new_contacts += 1;
                }
            }
        }

        let before = self.facts.len();
        self.facts
            .retain(|f| f.source.map_or(true, |id| liveness.is_alive(id)));
        result.purged_dead = before - self.facts.len();

        for fact in self.facts.iter_mut().filter(|f| !f.visible) {
            let elapsed = tick.saturating_sub(fact.last_seen_tick) as f64;
            let decayed = fact.seen_confidence - THREAT_CONFIDENCE_DECAY_PER_TICK * elapsed;
            fact.confidence = decayed.clamp(0.0, fact.confidence);
        }

        let before = self.facts.len();
        self.facts
            .retain(|f| f.visible || f.confidence > THREAT_PURGE_CONFIDENCE);
        result.purged_stale = before - self.facts.len();

        self.enforce_capacity();
        result
    }

    /// Remember an anonymous contact position (squad report, incoming fire).
    pub fn remember_position(&mut self, position: DVec2, tick: u64, confidence: f64) {
        let confidence = confidence.clamp(0.0, 1.0);
        let radius_sq = THREAT_POSITIONAL_MERGE_RADIUS * THREAT_POSITIONAL_MERGE_RADIUS;
        match self
            .facts
            .iter_mut()
            .find(|f| f.source.is_none() && f.position.distance_squared(position) <= radius_sq)
        {
            Some(fact) => {
                let confidence = confidence.max(fact.confidence);
                fact.refresh(position, confidence, tick);
            }
            None => self.facts.push(ThreatFact {
                source: None,
                position,
                confidence,
                seen_confidence: confidence,
                last_seen_tick: tick,
                visible: false,
            }),
        }
        self.enforce_capacity();
    }

    fn enforce_capacity(&mut self) {
        while self.facts.len() > THREAT_MEMORY_CAPACITY {
            let weakest = self
                .facts
                .iter()
                .enumerate()
                .filter(|(_, f)| !f.visible)
                .min_by(|(_, a), (_, b)| a.confidence.total_cmp(&b.confidence))
                .map(|(i, _)| i);
            match weakest {
                Some(i) => {
                    self.facts.swap_remove(i);
                }
                None => break,
            }
        }
    }

    pub fn visible_count(&self) -> usize {
        self.facts.iter().filter(|f| f.visible).count()
    }

    /// Distance to the closest visible contact, `f64::INFINITY` when none.
    pub fn closest_visible_dist(&self, x: f64, y: f64) -> f64 {
        let here = DVec2::new(x, y);
        self.closest_visible(here)
            .map_or(f64::INFINITY, |f| f.position.distance(here))
    }

    pub fn closest_visible(&self, from: DVec2) -> Option<&ThreatFact> {
        self.facts
            .iter()
            .filter(|f| f.visible)
            .min_by(|a, b| {
                a.position
                    .distance_squared(from)
                    .total_cmp(&b.position.distance_squared(from))
            })
    }

    /// The most confident fact that is not currently in view.
    pub fn strongest_remembered(&self) -> Option<&ThreatFact> {
        self.facts
            .iter()
            .filter(|f| !f.visible)
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }

    /// Whether anything is remembered beyond what is in view.
    pub fn has_remembered_contact(&self) -> bool {
        self.facts.iter().any(|f| !f.visible)
    }

    pub fn fact_for(&self, source: AgentId) -> Option<&ThreatFact> {
        self.facts.iter().find(|f| f.source == Some(source))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThreatFact> {
        self.facts.iter()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}
