use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Last `n` characters, used when an id has to be shown to a player.
            pub fn short(&self, n: usize) -> &str {
                let start = self
                    .0
                    .char_indices()
                    .rev()
                    .nth(n.saturating_sub(1))
                    .map(|(idx, _)| idx)
                    .unwrap_or(0);
                &self.0[start..]
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

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

// Host-supplied identities
define_id!(ActorId);

// Claim identities
define_id!(RegionId);
define_id!(MarkerId);

const REGION_ID_PREFIX: &str = "area_";
const MARKER_ID_PREFIX: &str = "stone_";

impl RegionId {
    /// Region id derived from the persisted creation counter.
    pub fn from_counter(counter: u64) -> Self {
        Self(format!("{REGION_ID_PREFIX}{counter}"))
    }

    /// Counter encoded in the id, if it was minted by [`RegionId::from_counter`].
    ///
    /// Ids written by older versions carry a suffix (`area_7_lx3k9`); the
    /// counter is still the first numeric segment.
    pub fn counter(&self) -> Option<u64> {
        self.0
            .strip_prefix(REGION_ID_PREFIX)?
            .split('_')
            .next()?
            .parse()
            .ok()
    }
}

impl MarkerId {
    pub fn generate() -> Self {
        Self(format!("{MARKER_ID_PREFIX}{}", Uuid::new_v4().simple()))
    }
}

/// World partition a position belongs to (overworld, nether, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionId(String);

impl DimensionId {
    pub const OVERWORLD: &'static str = "minecraft:overworld";
    pub const NETHER: &'static str = "minecraft:nether";
    pub const THE_END: &'static str = "minecraft:the_end";

    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn overworld() -> Self {
        Self(Self::OVERWORLD.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id names one of the partitions the host can resolve.
    pub fn is_known(&self) -> bool {
        matches!(
            self.0.as_str(),
            Self::OVERWORLD | Self::NETHER | Self::THE_END
        )
    }
}

impl Default for DimensionId {
    fn default() -> Self {
        Self::overworld()
    }
}

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DimensionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
