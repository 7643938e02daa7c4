//! Node Behaviours
//!
//! Strategy objects that give agents and sources their role-specific
//! behaviour. Agents carry a replication rule deciding whether a delivered
//! info replaces what they hold; sources carry a content generator that
//! produces fresh infos on every transmission.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::info::Info;

/// Outcome of applying a replication rule to a delivery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adoption {
    /// Replace the current info with the delivered one
    Adopt,
    /// Keep the current info
    Keep,
}

/// Decides how an agent updates its current info on receipt.
///
/// `incoming` is the most recent of the transmissions consumed by one
/// `receive_all` call.
pub trait ReplicationRule: Send {
    fn replicate(&self, current: Option<&Info>, incoming: &Info) -> Adoption;

    /// Fresh copy of this rule, used when a descendant inherits it.
    fn duplicate(&self) -> Box<dyn ReplicationRule>;

    fn name(&self) -> &'static str;
}

/// Overwrite with the most recently delivered info.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdoptLatest;

impl ReplicationRule for AdoptLatest {
    fn replicate(&self, _current: Option<&Info>, _incoming: &Info) -> Adoption {
        Adoption::Adopt
    }

    fn duplicate(&self) -> Box<dyn ReplicationRule> {
        Box::new(*self)
    }

    fn name(&self) -> &'static str {
        "adopt_latest"
    }
}

/// Adopt the first delivery and ignore everything after it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdoptOnce;

impl ReplicationRule for AdoptOnce {
    fn replicate(&self, current: Option<&Info>, _incoming: &Info) -> Adoption {
        match current {
            Some(_) => Adoption::Keep,
            None => Adoption::Adopt,
        }
    }

    fn duplicate(&self) -> Box<dyn ReplicationRule> {
        Box::new(*self)
    }

    fn name(&self) -> &'static str {
        "adopt_once"
    }
}

/// Produces the contents of a source's new infos.
pub trait ContentGenerator: Send {
    fn generate(&mut self) -> String;

    fn name(&self) -> &'static str;
}

/// Uniformly random strings of '0' and '1'.
#[derive(Debug, Clone)]
pub struct RandomBinaryString<R> {
    length: usize,
    rng: R,
}

impl<R: Rng> RandomBinaryString<R> {
    /// Default string length.
    pub const DEFAULT_LENGTH: usize = 2;

    pub fn new(length: usize, rng: R) -> Self {
        Self { length, rng }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl<R: Rng + Send> ContentGenerator for RandomBinaryString<R> {
    fn generate(&mut self) -> String {
        (0..self.length)
            .map(|_| if self.rng.gen::<bool>() { '1' } else { '0' })
            .collect()
    }

    fn name(&self) -> &'static str {
        "random_binary_string"
    }
}

/// Always emits the same contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedContent(pub String);

impl ContentGenerator for FixedContent {
    fn generate(&mut self) -> String {
        self.0.clone()
    }

    fn name(&self) -> &'static str {
        "fixed_content"
    }
}

/// Emits the given contents in order, cycling when exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentSequence {
    contents: Vec<String>,
    next: usize,
}

impl ContentSequence {
    pub fn new<I, S>(contents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            contents: contents.into_iter().map(Into::into).collect(),
            next: 0,
        }
    }
}

impl ContentGenerator for ContentSequence {
    fn generate(&mut self) -> String {
        if self.contents.is_empty() {
            return String::new();
        }
        let item = self.contents[self.next % self.contents.len()].clone();
        self.next += 1;
        item
    }

    fn name(&self) -> &'static str {
        "content_sequence"
    }
}

/// How a source emits to several targets in one transmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Emission {
    /// Generate one info and send it along every target vector
    #[default]
    Shared,
    /// Generate an independent info for each target vector
    PerTarget,
}
