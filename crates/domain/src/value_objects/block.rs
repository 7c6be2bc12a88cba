//! Namespaced type identifiers reported by the host (blocks, items, entities).

use serde::{Deserialize, Serialize};
use std::fmt;

const DEFAULT_NAMESPACE: &str = "minecraft:";

macro_rules! define_type_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Identifier without the default namespace, for player-facing text.
            pub fn display_name(&self) -> &str {
                self.0.strip_prefix(DEFAULT_NAMESPACE).unwrap_or(&self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

define_type_id!(
    /// A block type such as `minecraft:chest`.
    BlockType
);
define_type_id!(
    /// An item type such as `minecraft:book`.
    ItemType
);
define_type_id!(
    /// An entity type such as `minecraft:villager`.
    EntityType
);

impl BlockType {
    pub const AIR: &'static str = "minecraft:air";

    pub fn air() -> Self {
        Self(Self::AIR.to_string())
    }

    pub fn is_air(&self) -> bool {
        self.0 == Self::AIR
    }

    /// The item that places this block.
    pub fn as_item(&self) -> ItemType {
        ItemType(self.0.clone())
    }
}

/// A stack of items handed back to an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDescriptor {
    pub item_type: ItemType,
    pub amount: u32,
}

impl ItemDescriptor {
    pub fn single(item_type: ItemType) -> Self {
        Self {
            item_type,
            amount: 1,
        }
    }
}
