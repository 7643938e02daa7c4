//! How a newborn's content is derived from its two parents.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::components::Info;

/// Inheritance rule for sexual Moran.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Inheritance {
    /// Copy one uniformly chosen parent's info verbatim
    #[default]
    CopyParent,
    /// Take each character from a uniformly chosen parent. Parents whose
    /// contents differ in length fall back to `CopyParent`.
    UniformCrossover,
}

/// The newborn's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Offspring {
    /// Reuse the info held by parent 0 or 1
    Copy(usize),
    /// New contents, attributed to the first parent
    Recombined(String),
}

impl Inheritance {
    pub(crate) fn inherit<R: Rng>(
        &self,
        parents: [&Info; 2],
        rng: &mut R,
    ) -> Offspring {
        match self {
            Inheritance::CopyParent => Offspring::Copy(rng.gen_range(0..2)),
            Inheritance::UniformCrossover => {
                let [first, second] = parents;
                if first.contents().chars().count() != second.contents().chars().count() {
                    return Offspring::Copy(rng.gen_range(0..2));
                }
                let contents = first
                    .contents()
                    .chars()
                    .zip(second.contents().chars())
                    .map(|(a, b)| if rng.gen::<bool>() { a } else { b })
                    .collect();
                Offspring::Recombined(contents)
            }
        }
    }
}
