//! Serializable read-only view of the deck, used by front ends for JSON
//! output. A snapshot is a copy; it cannot be turned back into a manifest.

use serde::{Deserialize, Serialize};

use stowage_core::{Container, ContainerKind};

use crate::manifest::Manifest;

/// One stack of a [`DeckSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSnapshot {
    /// Stack index, 0 nearest the bridge.
    pub index: usize,
    /// Kind held by the stack, `None` while empty.
    pub kind: Option<ContainerKind>,
    /// Containers, bottom first.
    pub containers: Vec<Container>,
}

/// Copy of a manifest's capacity parameters and deck contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSnapshot {
    /// Maximum containers per stack.
    pub max_height: usize,
    /// Weight limit in tonnes.
    pub max_weight: i32,
    /// Total gross weight on board.
    pub total_weight: i32,
    /// Every stack, bridge first.
    pub stacks: Vec<StackSnapshot>,
}

impl Manifest {
    /// Take a snapshot of the deck.
    pub fn snapshot(&self) -> DeckSnapshot {
        let stacks = self
            .stacks()
            .enumerate()
            .map(|(index, containers)| StackSnapshot {
                index,
                kind: containers.first().map(Container::kind),
                containers: containers.to_vec(),
            })
            .collect();

        DeckSnapshot {
            max_height: self.max_height(),
            max_weight: self.max_weight(),
            total_weight: self.total_weight(),
            stacks,
        }
    }
}
