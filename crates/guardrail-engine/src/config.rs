//! Guardrail limits
//!
//! `GuardrailsConfig` is the whole set of operator limits a node enforces.
//! It is treated as an immutable snapshot: changes are made by building a
//! new value and swapping it into a [`ConfigSource`](crate::ConfigSource).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::{OrderedSet, Result};

/// Threshold value meaning "no limit at this level"
pub const DISABLED: i64 = -1;

/// Warn and abort levels of a single threshold guardrail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub warn_threshold: i64,
    pub abort_threshold: i64,
}

impl ThresholdConfig {
    pub fn new(warn_threshold: i64, abort_threshold: i64) -> Self {
        Self {
            warn_threshold,
            abort_threshold,
        }
    }

    /// Both levels disabled
    pub fn disabled() -> Self {
        Self::new(DISABLED, DISABLED)
    }

    pub fn warn_limit(&self) -> Option<i64> {
        (self.warn_threshold != DISABLED).then_some(self.warn_threshold)
    }

    pub fn abort_limit(&self) -> Option<i64> {
        (self.abort_threshold != DISABLED).then_some(self.abort_threshold)
    }

    /// True if at least one level is set
    pub fn is_enabled(&self) -> bool {
        self.warn_limit().is_some() || self.abort_limit().is_some()
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::disabled()
    }
}

/// Ignored and disallowed values for a values guardrail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuesConfig<T> {
    pub ignored: OrderedSet<T>,
    pub disallowed: OrderedSet<T>,
}

impl<T> ValuesConfig<T> {
    pub fn new(ignored: OrderedSet<T>, disallowed: OrderedSet<T>) -> Self {
        Self {
            ignored,
            disallowed,
        }
    }
}

impl<T> Default for ValuesConfig<T> {
    fn default() -> Self {
        Self::new(OrderedSet::new(), OrderedSet::new())
    }
}

/// Consistency levels a client may request for reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsistencyLevel {
    Any,
    One,
    Two,
    Three,
    Quorum,
    All,
    LocalQuorum,
    EachQuorum,
    Serial,
    LocalSerial,
    LocalOne,
}

impl ConsistencyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::One => "ONE",
            Self::Two => "TWO",
            Self::Three => "THREE",
            Self::Quorum => "QUORUM",
            Self::All => "ALL",
            Self::LocalQuorum => "LOCAL_QUORUM",
            Self::EachQuorum => "EACH_QUORUM",
            Self::Serial => "SERIAL",
            Self::LocalSerial => "LOCAL_SERIAL",
            Self::LocalOne => "LOCAL_ONE",
        }
    }
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every limit enforced by the node's guardrails.
///
/// Defaults leave every threshold disabled, every capability allowed and
/// every value list empty, so an empty file changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardrailsConfig {
    pub tables_warn_threshold: i64,
    pub tables_abort_threshold: i64,
    pub columns_per_table_warn_threshold: i64,
    pub columns_per_table_abort_threshold: i64,
    pub secondary_indexes_per_table_warn_threshold: i64,
    pub secondary_indexes_per_table_abort_threshold: i64,
    pub materialized_views_per_table_warn_threshold: i64,
    pub materialized_views_per_table_abort_threshold: i64,
    pub page_size_warn_threshold: i64,
    pub page_size_abort_threshold: i64,
    pub partition_keys_in_select_warn_threshold: i64,
    pub partition_keys_in_select_abort_threshold: i64,
    pub in_select_cartesian_product_warn_threshold: i64,
    pub in_select_cartesian_product_abort_threshold: i64,
    /// Collection size in bytes
    pub collection_size_warn_threshold: i64,
    pub collection_size_abort_threshold: i64,
    pub fields_per_udt_warn_threshold: i64,
    pub fields_per_udt_abort_threshold: i64,

    pub user_timestamps_enabled: bool,
    pub secondary_indexes_enabled: bool,
    pub drop_truncate_table_enabled: bool,

    pub table_properties_ignored: OrderedSet<String>,
    pub table_properties_disallowed: OrderedSet<String>,
    pub read_consistency_levels_disallowed: OrderedSet<ConsistencyLevel>,
    pub write_consistency_levels_disallowed: OrderedSet<ConsistencyLevel>,
}

impl Default for GuardrailsConfig {
    fn default() -> Self {
        Self {
            tables_warn_threshold: DISABLED,
            tables_abort_threshold: DISABLED,
            columns_per_table_warn_threshold: DISABLED,
            columns_per_table_abort_threshold: DISABLED,
            secondary_indexes_per_table_warn_threshold: DISABLED,
            secondary_indexes_per_table_abort_threshold: DISABLED,
            materialized_views_per_table_warn_threshold: DISABLED,
            materialized_views_per_table_abort_threshold: DISABLED,
            page_size_warn_threshold: DISABLED,
            page_size_abort_threshold: DISABLED,
            partition_keys_in_select_warn_threshold: DISABLED,
            partition_keys_in_select_abort_threshold: DISABLED,
            in_select_cartesian_product_warn_threshold: DISABLED,
            in_select_cartesian_product_abort_threshold: DISABLED,
            collection_size_warn_threshold: DISABLED,
            collection_size_abort_threshold: DISABLED,
            fields_per_udt_warn_threshold: DISABLED,
            fields_per_udt_abort_threshold: DISABLED,
            user_timestamps_enabled: true,
            secondary_indexes_enabled: true,
            drop_truncate_table_enabled: true,
            table_properties_ignored: OrderedSet::new(),
            table_properties_disallowed: OrderedSet::new(),
            read_consistency_levels_disallowed: OrderedSet::new(),
            write_consistency_levels_disallowed: OrderedSet::new(),
        }
    }
}

/// Name of the file section holding guardrail limits
pub const SECTION: &str = "guardrails";

impl GuardrailsConfig {
    /// Read the `[guardrails]` section of a node configuration file.
    ///
    /// A file without that section yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = guardrail_core::config::read_settings(path)?;

        match settings.get::<GuardrailsConfig>(SECTION) {
            Ok(config) => Ok(config),
            Err(config::ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Threshold settings by guardrail name, in a stable order
    pub fn thresholds(&self) -> Vec<(&'static str, ThresholdConfig)> {
        vec![
            (
                "tables",
                ThresholdConfig::new(self.tables_warn_threshold, self.tables_abort_threshold),
            ),
            (
                "columns_per_table",
                ThresholdConfig::new(
                    self.columns_per_table_warn_threshold,
                    self.columns_per_table_abort_threshold,
                ),
            ),
            (
                "secondary_indexes_per_table",
                ThresholdConfig::new(
                    self.secondary_indexes_per_table_warn_threshold,
                    self.secondary_indexes_per_table_abort_threshold,
                ),
            ),
            (
                "materialized_views_per_table",
                ThresholdConfig::new(
                    self.materialized_views_per_table_warn_threshold,
                    self.materialized_views_per_table_abort_threshold,
                ),
            ),
            (
                "page_size",
                ThresholdConfig::new(self.page_size_warn_threshold, self.page_size_abort_threshold),
            ),
            (
                "partition_keys_in_select",
                ThresholdConfig::new(
                    self.partition_keys_in_select_warn_threshold,
                    self.partition_keys_in_select_abort_threshold,
                ),
            ),
            (
                "in_select_cartesian_product",
                ThresholdConfig::new(
                    self.in_select_cartesian_product_warn_threshold,
                    self.in_select_cartesian_product_abort_threshold,
                ),
            ),
            (
                "collection_size",
                ThresholdConfig::new(
                    self.collection_size_warn_threshold,
                    self.collection_size_abort_threshold,
                ),
            ),
            (
                "fields_per_udt",
                ThresholdConfig::new(
                    self.fields_per_udt_warn_threshold,
                    self.fields_per_udt_abort_threshold,
                ),
            ),
        ]
    }

    pub fn table_properties(&self) -> ValuesConfig<String> {
        ValuesConfig::new(
            self.table_properties_ignored.clone(),
            self.table_properties_disallowed.clone(),
        )
    }

    pub fn read_consistency_levels(&self) -> ValuesConfig<ConsistencyLevel> {
        ValuesConfig::new(
            OrderedSet::new(),
            self.read_consistency_levels_disallowed.clone(),
        )
    }

    pub fn write_consistency_levels(&self) -> ValuesConfig<ConsistencyLevel> {
        ValuesConfig::new(
            OrderedSet::new(),
            self.write_consistency_levels_disallowed.clone(),
        )
    }
}
