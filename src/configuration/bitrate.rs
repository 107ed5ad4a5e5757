//! Bandwidth-tier manager: restores, validates and persists the selected
//! bitrate, reconfiguring the media transport.
//!
//! # Overview
//!
//! [`BitrateTable`] is the enumerated tier set plus its designated
//! default; it comes from [`BandwidthConfig`] in production and from a
//! hand-built map in tests.
//!
//! [`BitrateManager::initialize`] restores the persisted tier (or falls
//! back to the default) and applies it to the transport — exactly one
//! `configure_bandwidth` call, never zero, never more than one.
//! [`BitrateManager::select`] handles user selections: unknown candidates
//! are silently ignored; valid ones reconfigure the transport eagerly and
//! are persisted best-effort.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::{BandwidthConfig, TierLimits};
use crate::media::MediaTransport;
use crate::store::{PreferenceStore, ReadOutcome};

/// Preference-store key owned by this manager.
pub const BIT_RATE_KEY: &str = "bitRate";

// ---------------------------------------------------------------------------
// BitrateTable
// ---------------------------------------------------------------------------

/// The enumerated bandwidth-tier set with its designated default.
///
/// Invariant: the default tier is always a member of the set.
#[derive(Debug, Clone)]
pub struct BitrateTable {
    tiers: BTreeMap<String, TierLimits>,
    default_tier: String,
}

impl BitrateTable {
    /// Build a table from a tier map and a default-tier name.
    ///
    /// If `default_tier` is missing from `tiers` it is added as an
    /// unlimited tier, keeping the membership invariant without failing
    /// construction over a config typo.
    pub fn new(tiers: BTreeMap<String, TierLimits>, default_tier: impl Into<String>) -> Self {
        let default_tier = default_tier.into();
        let mut tiers = tiers;

        if !tiers.contains_key(&default_tier) {
            log::warn!(
                "default tier {default_tier:?} is not in the configured set; adding it unlimited"
            );
            tiers.insert(default_tier.clone(), TierLimits::unlimited());
        }

        Self {
            tiers,
            default_tier,
        }
    }

    /// Whether `name` is a member of the tier set.
    pub fn contains(&self, name: &str) -> bool {
        self.tiers.contains_key(name)
    }

    /// Name of the designated default tier.
    pub fn default_tier(&self) -> &str {
        &self.default_tier
    }

    /// Caps for the named tier, if it is a member.
    pub fn limits(&self, name: &str) -> Option<&TierLimits> {
        self.tiers.get(name)
    }

    /// Tier names in stable (sorted) order, for UI listings.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tiers.keys().map(String::as_str)
    }
}

impl From<&BandwidthConfig> for BitrateTable {
    fn from(config: &BandwidthConfig) -> Self {
        Self::new(config.tiers.clone(), config.default_tier.clone())
    }
}

impl Default for BitrateTable {
    fn default() -> Self {
        Self::from(&BandwidthConfig::default())
    }
}

// ---------------------------------------------------------------------------
// BitrateManager
// ---------------------------------------------------------------------------

/// Per-session manager for the bandwidth-tier preference.
pub struct BitrateManager {
    store: Arc<dyn PreferenceStore>,
    transport: Arc<dyn MediaTransport>,
    table: BitrateTable,
    selected: Option<String>,
}

impl BitrateManager {
    /// Create a manager.  Call [`initialize`] before anything else; no
    /// tier is applied until then.
    ///
    /// [`initialize`]: BitrateManager::initialize
    pub fn new(
        store: Arc<dyn PreferenceStore>,
        transport: Arc<dyn MediaTransport>,
        table: BitrateTable,
    ) -> Self {
        Self {
            store,
            transport,
            table,
            selected: None,
        }
    }

    /// Restore the persisted tier and apply it to the transport.
    ///
    /// The three read outcomes map onto tiers as follows:
    ///
    /// - `Value(v)`, `v` in the set → apply `v`;
    /// - `Value(v)`, `v` unknown → apply the default (a value we wrote
    ///   ourselves is always a member, so this indicates an edited or
    ///   stale document);
    /// - `Empty` or `Failure` → apply the default.
    ///
    /// Whatever the outcome, `configure_bandwidth` is called exactly once.
    pub async fn initialize(&mut self) {
        let tier = match self.store.get_item(BIT_RATE_KEY).await {
            ReadOutcome::Value(stored) if self.table.contains(&stored) => stored,
            ReadOutcome::Value(stored) => {
                log::warn!("stored bitrate {stored:?} is not a configured tier; using default");
                self.table.default_tier().to_string()
            }
            ReadOutcome::Empty => self.table.default_tier().to_string(),
            ReadOutcome::Failure(e) => {
                log::debug!("bitrate preference unavailable ({e}); using default");
                self.table.default_tier().to_string()
            }
        };

        self.apply(tier);
    }

    /// Handle a user tier selection.
    ///
    /// An unknown `candidate` is a silent no-op: no transport call, no
    /// store write, no error.  A valid one reconfigures the transport
    /// first — the store write is not allowed to delay or suppress it —
    /// and is then persisted; a write failure is logged and ignored.
    pub async fn select(&mut self, candidate: &str) {
        if !self.table.contains(candidate) {
            log::debug!("ignoring unknown bitrate selection {candidate:?}");
            return;
        }

        self.apply(candidate.to_string());

        if let Err(e) = self.store.set_item(BIT_RATE_KEY, candidate).await {
            log::warn!("could not persist bitrate {candidate:?}: {e}");
        }
    }

    /// The tier currently applied to the transport, once initialized.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The tier set this manager validates against.
    pub fn table(&self) -> &BitrateTable {
        &self.table
    }

    fn apply(&mut self, tier: String) {
        self.transport.configure_bandwidth(&tier);
        self.selected = Some(tier);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
