//! Outcome table: the validated "beats" relation over a finite move set.
//!
//! Construction is the only place the relation is checked. Once an
//! `OutcomeTable` exists it is irreflexive, anti-symmetric and total, so the
//! resolver can rely on exactly one direction holding for any distinct pair.

use std::collections::{BTreeSet, HashMap, HashSet};

use super::errors::ConfigError;
use super::moves::{MoveId, MoveSpec};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeTable {
    /// Move identifiers in configured order (drives opponent draws and listings).
    order: Vec<MoveId>,
    beats: HashMap<MoveId, BTreeSet<MoveId>>,
}

impl OutcomeTable {
    /// Build and validate a table.
    ///
    /// Fails fast on the first violation found:
    /// empty set, duplicate id, unknown target, self-beat, mutual beat, undecided pair.
    pub fn new(specs: Vec<MoveSpec>) -> Result<Self, ConfigError> {
        if specs.is_empty() {
            return Err(ConfigError::EmptyMoveSet);
        }

        let mut seen = HashSet::with_capacity(specs.len());
        for spec in &specs {
            if !seen.insert(spec.id.clone()) {
                return Err(ConfigError::DuplicateMove(spec.id.clone()));
            }
        }

        let mut order = Vec::with_capacity(specs.len());
        let mut beats = HashMap::with_capacity(specs.len());
        for spec in specs {
            let mut targets = BTreeSet::new();
            for target in spec.beats {
                if !seen.contains(&target) {
                    return Err(ConfigError::UnknownMove {
                        owner: spec.id,
                        target,
                    });
                }
                if target == spec.id {
                    return Err(ConfigError::SelfBeating(spec.id));
                }
                targets.insert(target);
            }
            order.push(spec.id.clone());
            beats.insert(spec.id, targets);
        }

        let table = Self { order, beats };
        table.check_pairs()?;
        Ok(table)
    }

    /// Every unordered pair must be decided in exactly one direction.
    fn check_pairs(&self) -> Result<(), ConfigError> {
        for (i, a) in self.order.iter().enumerate() {
            for b in &self.order[i + 1..] {
                match (self.defeats(a, b), self.defeats(b, a)) {
                    (true, true) => return Err(ConfigError::MutualBeat(a.clone(), b.clone())),
                    (false, false) => return Err(ConfigError::Undecided(a.clone(), b.clone())),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    /// Rock-paper-scissors-lizard-Spock.
    pub fn standard() -> Self {
        Self {
            order: ["rock", "paper", "scissors", "lizard", "spock"]
                .into_iter()
                .map(MoveId::from)
                .collect(),
            beats: standard_specs()
                .into_iter()
                .map(|spec| (spec.id, spec.beats.into_iter().collect()))
                .collect(),
        }
    }

    /// Skips validation. Only for exercising the resolver's consistency guard.
    #[cfg(test)]
    pub(crate) fn unchecked(specs: Vec<MoveSpec>) -> Self {
        Self {
            order: specs.iter().map(|s| s.id.clone()).collect(),
            beats: specs
                .into_iter()
                .map(|spec| (spec.id, spec.beats.into_iter().collect()))
                .collect(),
        }
    }

    pub fn moves(&self) -> &[MoveId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: &MoveId) -> bool {
        self.beats.contains_key(id)
    }

    /// The set of moves `id` defeats, or `None` for an unknown move.
    pub fn beats(&self, id: &MoveId) -> Option<&BTreeSet<MoveId>> {
        self.beats.get(id)
    }

    pub fn get_by_index(&self, index: usize) -> Option<&MoveId> {
        self.order.get(index)
    }

    fn defeats(&self, a: &MoveId, b: &MoveId) -> bool {
        self.beats.get(a).is_some_and(|set| set.contains(b))
    }
}

/// Rule data of the standard table, in display order.
pub fn standard_specs() -> Vec<MoveSpec> {
    vec![
        MoveSpec::new("rock", &["scissors", "lizard"]),
        MoveSpec::new("paper", &["rock", "spock"]),
        MoveSpec::new("scissors", &["paper", "lizard"]),
        MoveSpec::new("lizard", &["spock", "paper"]),
        MoveSpec::new("spock", &["scissors", "rock"]),
    ]
}
