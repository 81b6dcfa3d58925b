//! The node's concrete guardrails
//!
//! Every guardrail here reads its limits from the same [`ConfigSource`], so
//! storing a new snapshot updates all of them at once.

use crate::{
    guardrail::Guardrail, ConfigSource, ConsistencyLevel, DisableFlag, GuardrailsConfig,
    Threshold, ThresholdConfig, Values,
};

fn level(is_warn: bool) -> &'static str {
    if is_warn {
        "warning"
    } else {
        "failure"
    }
}

/// Threshold reading one warn/abort pair out of the snapshot
fn threshold<P, M>(source: &ConfigSource, name: &str, project: P, formatter: M) -> Threshold
where
    P: Fn(&GuardrailsConfig) -> (i64, i64) + Send + Sync + 'static,
    M: Fn(bool, &str, i64, i64) -> String + Send + Sync + 'static,
{
    let config = source.supplier(move |c| {
        let (warn, abort) = project(c);
        ThresholdConfig::new(warn, abort)
    });
    Threshold::new(name, config, formatter)
}

/// All guardrails enforced by a node
pub struct Guardrails {
    source: ConfigSource,

    pub tables: Threshold,
    pub columns_per_table: Threshold,
    pub secondary_indexes_per_table: Threshold,
    pub materialized_views_per_table: Threshold,
    pub page_size: Threshold,
    pub partition_keys_in_select: Threshold,
    pub in_select_cartesian_product: Threshold,
    pub collection_size: Threshold,
    pub fields_per_udt: Threshold,

    pub user_timestamps: DisableFlag,
    pub secondary_indexes: DisableFlag,
    pub drop_truncate_table: DisableFlag,

    pub table_properties: Values<String>,
    pub read_consistency_levels: Values<ConsistencyLevel>,
    pub write_consistency_levels: Values<ConsistencyLevel>,
}

impl Guardrails {
    pub fn new(source: &ConfigSource) -> Self {
        Self {
            source: source.clone(),

            tables: threshold(
                source,
                "tables",
                |c| (c.tables_warn_threshold, c.tables_abort_threshold),
                |is_warn, what, value, limit| {
                    format!(
                        "Creating table {}, current number of tables {} exceeds {} threshold of {}.",
                        what,
                        value,
                        level(is_warn),
                        limit
                    )
                },
            ),
            columns_per_table: threshold(
                source,
                "columns_per_table",
                |c| {
                    (
                        c.columns_per_table_warn_threshold,
                        c.columns_per_table_abort_threshold,
                    )
                },
                |is_warn, what, value, limit| {
                    if is_warn {
                        format!(
                            "The table {} has {} columns, this exceeds the warning threshold of {}.",
                            what, value, limit
                        )
                    } else {
                        format!(
                            "Tables cannot have more than {} columns, but {} provided for table {}",
                            limit, value, what
                        )
                    }
                },
            ),
            secondary_indexes_per_table: threshold(
                source,
                "secondary_indexes_per_table",
                |c| {
                    (
                        c.secondary_indexes_per_table_warn_threshold,
                        c.secondary_indexes_per_table_abort_threshold,
                    )
                },
                |is_warn, what, value, limit| {
                    format!(
                        "Creating secondary index {}, current number of indexes {} exceeds {} threshold of {}.",
                        what,
                        value,
                        level(is_warn),
                        limit
                    )
                },
            ),
            materialized_views_per_table: threshold(
                source,
                "materialized_views_per_table",
                |c| {
                    (
                        c.materialized_views_per_table_warn_threshold,
                        c.materialized_views_per_table_abort_threshold,
                    )
                },
                |is_warn, what, value, limit| {
                    format!(
                        "Creating materialized view {}, current number of views {} exceeds {} threshold of {}.",
                        what,
                        value,
                        level(is_warn),
                        limit
                    )
                },
            ),
            page_size: threshold(
                source,
                "page_size",
                |c| (c.page_size_warn_threshold, c.page_size_abort_threshold),
                |is_warn, what, value, limit| {
                    format!(
                        "Query for table {} with page size {} exceeds {} threshold of {}.",
                        what,
                        value,
                        level(is_warn),
                        limit
                    )
                },
            ),
            partition_keys_in_select: threshold(
                source,
                "partition_keys_in_select",
                |c| {
                    (
                        c.partition_keys_in_select_warn_threshold,
                        c.partition_keys_in_select_abort_threshold,
                    )
                },
                |is_warn, what, value, limit| {
                    format!(
                        "Query with partition keys in IN clause on table {}, with number of partition keys {} exceeds {} threshold of {}.",
                        what,
                        value,
                        level(is_warn),
                        limit
                    )
                },
            ),
            in_select_cartesian_product: threshold(
                source,
                "in_select_cartesian_product",
                |c| {
                    (
                        c.in_select_cartesian_product_warn_threshold,
                        c.in_select_cartesian_product_abort_threshold,
                    )
                },
                |is_warn, what, value, limit| {
                    format!(
                        "The cartesian product of the IN restrictions on {} produces {} values, this exceeds {} threshold of {}.",
                        what,
                        value,
                        level(is_warn),
                        limit
                    )
                },
            ),
            collection_size: threshold(
                source,
                "collection_size",
                |c| {
                    (
                        c.collection_size_warn_threshold,
                        c.collection_size_abort_threshold,
                    )
                },
                |is_warn, what, value, limit| {
                    format!(
                        "Detected collection {} of size {} bytes, this exceeds the {} threshold of {} bytes.",
                        what,
                        value,
                        level(is_warn),
                        limit
                    )
                },
            ),
            fields_per_udt: threshold(
                source,
                "fields_per_udt",
                |c| {
                    (
                        c.fields_per_udt_warn_threshold,
                        c.fields_per_udt_abort_threshold,
                    )
                },
                |is_warn, what, value, limit| {
                    format!(
                        "The user type {} has {} fields, this exceeds the {} threshold of {}.",
                        what,
                        value,
                        level(is_warn),
                        limit
                    )
                },
            ),

            user_timestamps: DisableFlag::new(
                "user_timestamps",
                source.supplier(|c| !c.user_timestamps_enabled),
                "User provided timestamps (USING TIMESTAMP)",
            ),
            secondary_indexes: DisableFlag::new(
                "secondary_indexes",
                source.supplier(|c| !c.secondary_indexes_enabled),
                "Creating secondary indexes",
            ),
            drop_truncate_table: DisableFlag::new(
                "drop_truncate_table",
                source.supplier(|c| !c.drop_truncate_table_enabled),
                "DROP and TRUNCATE TABLE functionality",
            ),

            table_properties: Values::new(
                "table_properties",
                source.supplier(GuardrailsConfig::table_properties),
                "table properties",
            ),
            read_consistency_levels: Values::new(
                "read_consistency_levels",
                source.supplier(GuardrailsConfig::read_consistency_levels),
                "read consistency levels",
            ),
            write_consistency_levels: Values::new(
                "write_consistency_levels",
                source.supplier(GuardrailsConfig::write_consistency_levels),
                "write consistency levels",
            ),
        }
    }

    /// Configuration the guardrails read from
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Every guardrail, in declaration order
    pub fn all(&self) -> Vec<&dyn Guardrail> {
        vec![
            &self.tables as &dyn Guardrail,
            &self.columns_per_table,
            &self.secondary_indexes_per_table,
            &self.materialized_views_per_table,
            &self.page_size,
            &self.partition_keys_in_select,
            &self.in_select_cartesian_product,
            &self.collection_size,
            &self.fields_per_udt,
            &self.user_timestamps,
            &self.secondary_indexes,
            &self.drop_truncate_table,
            &self.table_properties,
            &self.read_consistency_levels,
            &self.write_consistency_levels,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ClientContext, Outcome};
    use std::collections::HashSet;

    #[test]
    fn test_defaults_allow_everything() {
        let guardrails = Guardrails::new(&ConfigSource::default());

        assert!(guardrails.tables.guard(10_000, "ks.t", ClientContext::User).is_valid());
        assert!(guardrails.user_timestamps.ensure_enabled(ClientContext::User).is_valid());

        let props: HashSet<String> = ["compaction".to_string()].into_iter().collect();
        assert!(guardrails
            .table_properties
            .guard(&props, |_| {}, ClientContext::User)
            .is_valid());
    }

    #[test]
    fn test_tables_message() {
        let source = ConfigSource::new(GuardrailsConfig {
            tables_warn_threshold: 1,
            tables_abort_threshold: 2,
            ..Default::default()
        });
        let guardrails = Guardrails::new(&source);

        assert_eq!(
            guardrails.tables.guard(2, "ks.t", ClientContext::User),
            Outcome::Warned(
                "Creating table ks.t, current number of tables 2 exceeds warning threshold of 1."
                    .into()
            )
        );
        assert_eq!(
            guardrails.tables.guard(3, "ks.t", ClientContext::User),
            Outcome::Aborted(
                "Creating table ks.t, current number of tables 3 exceeds failure threshold of 2."
                    .into()
            )
        );
    }

    #[test]
    fn test_flags_follow_source() {
        let source = ConfigSource::default();
        let guardrails = Guardrails::new(&source);
        assert!(guardrails.secondary_indexes.ensure_enabled(ClientContext::User).is_valid());

        source.update(|c| c.secondary_indexes_enabled = false);
        assert_eq!(
            guardrails.secondary_indexes.ensure_enabled(ClientContext::User),
            Outcome::Aborted("Creating secondary indexes is not allowed".into())
        );
    }

    #[test]
    fn test_consistency_levels() {
        let source = ConfigSource::default();
        source.update(|c| {
            c.write_consistency_levels_disallowed =
                vec![ConsistencyLevel::Any, ConsistencyLevel::One].into();
        });
        let guardrails = Guardrails::new(&source);

        let requested: HashSet<ConsistencyLevel> = [ConsistencyLevel::Any].into_iter().collect();
        assert_eq!(
            guardrails
                .write_consistency_levels
                .guard(&requested, |_| {}, ClientContext::User)
                .message(),
            Some("Provided values [ANY] are not allowed for write consistency levels (disallowed values are: [ANY, ONE])")
        );
        assert!(guardrails
            .read_consistency_levels
            .guard(&requested, |_| {}, ClientContext::User)
            .is_valid());
    }

    #[test]
    fn test_all_lists_every_guardrail() {
        let guardrails = Guardrails::new(&ConfigSource::default());
        let all = guardrails.all();
        let names: Vec<&str> = all.iter().map(|g| g.name()).collect();
        assert_eq!(names.len(), 15);
        assert_eq!(names[0], "tables");
        assert!(names.contains(&"write_consistency_levels"));
        assert!(all.iter().all(|g| !g.enabled(ClientContext::Superuser)));
    }
}
