//! Engine configuration from the environment.
//!
//! Every protection setting can be overridden with a `TERRACLAIM_*`
//! variable. Unset variables keep the default; unparsable ones are logged
//! and also keep the default.
//!
//! | variable | setting |
//! |---|---|
//! | `TERRACLAIM_MARKER_BLOCK` | marker block type |
//! | `TERRACLAIM_SETTINGS_ITEM` | settings / inspect item type |
//! | `TERRACLAIM_CLAIMS_PERMANENT` | whether new claims never expire |
//! | `TERRACLAIM_CLAIM_LIFETIME_TICKS` | lifetime of expiring claims |
//! | `TERRACLAIM_VISUAL_PERIOD_TICKS` | outline refresh period |
//! | `TERRACLAIM_NOTIFICATION_INTERVAL_TICKS` | on-screen indicator refresh |
//! | `TERRACLAIM_INITIAL_LOAD_DELAY_TICKS` | delay after world-ready |
//! | `TERRACLAIM_EXPLOSION_NOTICE_RADIUS` | blocked-explosion notice radius |
//! | `TERRACLAIM_INSPECT_RAY_DISTANCE` | settings item reach |
//! | `TERRACLAIM_DATA_DIR` | directory for the file-backed store |

use std::path::PathBuf;
use std::str::FromStr;

use terraclaim_domain::{BlockType, ItemType, ProtectionSettings};

const PREFIX: &str = "TERRACLAIM_";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub settings: ProtectionSettings,
    /// Where the file-backed store lives. `None` keeps state in memory only.
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(&format!("{PREFIX}{name}"))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut settings = ProtectionSettings::default();
        if let Some(block) = var("MARKER_BLOCK") {
            settings.marker_block = BlockType::new(block);
        }
        if let Some(item) = var("SETTINGS_ITEM") {
            settings.settings_item = ItemType::new(item);
        }
        override_parsed(&var, "CLAIMS_PERMANENT", &mut settings.claims_permanent);
        override_parsed(&var, "CLAIM_LIFETIME_TICKS", &mut settings.claim_lifetime_ticks);
        override_parsed(&var, "VISUAL_PERIOD_TICKS", &mut settings.visual_period_ticks);
        override_parsed(
            &var,
            "NOTIFICATION_INTERVAL_TICKS",
            &mut settings.notification_interval_ticks,
        );
        override_parsed(
            &var,
            "INITIAL_LOAD_DELAY_TICKS",
            &mut settings.initial_load_delay_ticks,
        );
        override_parsed(
            &var,
            "EXPLOSION_NOTICE_RADIUS",
            &mut settings.explosion_notice_radius,
        );
        override_parsed(&var, "INSPECT_RAY_DISTANCE", &mut settings.inspect_ray_distance);

        Self {
            settings,
            data_dir: var("DATA_DIR").map(PathBuf::from),
        }
    }
}

fn override_parsed<T: FromStr>(var: &impl Fn(&str) -> Option<String>, name: &str, target: &mut T) {
    let Some(raw) = var(name) else {
        return;
    };
    match raw.parse() {
        Ok(value) => *target = value,
        Err(_) => tracing::warn!(
            variable = %format!("{PREFIX}{name}"),
            value = %raw,
            "Ignoring unparsable configuration value"
        ),
    }
}
