//! Process-wide, hot-reloadable guardrail configuration

use parking_lot::{Mutex, RwLock};
use std::path::Path;
use std::sync::Arc;

use crate::{GuardrailsConfig, Result};

/// Holder of the current [`GuardrailsConfig`] snapshot.
///
/// Readers get an `Arc` to a complete snapshot and never see a partially
/// applied change. Writers build a new snapshot and swap it in whole. The
/// snapshot lock is held only for the pointer clone or swap; writers are
/// serialized among themselves by a separate mutex.
#[derive(Clone, Default)]
pub struct ConfigSource {
    current: Arc<RwLock<Arc<GuardrailsConfig>>>,
    writer: Arc<Mutex<()>>,
}

impl ConfigSource {
    pub fn new(config: GuardrailsConfig) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(config))),
            writer: Arc::default(),
        }
    }

    /// Current snapshot
    pub fn load(&self) -> Arc<GuardrailsConfig> {
        Arc::clone(&self.current.read())
    }

    /// Replace the snapshot
    pub fn store(&self, config: GuardrailsConfig) {
        let _writer = self.writer.lock();
        *self.current.write() = Arc::new(config);
        tracing::info!("Guardrail configuration replaced");
    }

    /// Derive a new snapshot from the current one and swap it in.
    ///
    /// Concurrent updates are serialized; none of them is lost. Readers keep
    /// loading the old snapshot while `change` runs.
    pub fn update<F>(&self, change: F)
    where
        F: FnOnce(&mut GuardrailsConfig),
    {
        let _writer = self.writer.lock();
        let mut next = GuardrailsConfig::clone(&self.load());
        change(&mut next);
        *self.current.write() = Arc::new(next);
        tracing::debug!("Guardrail configuration updated");
    }

    /// Re-read limits from a node configuration file.
    ///
    /// On error the current snapshot stays in place.
    pub fn reload_from<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config = GuardrailsConfig::load(path)?;
        let _writer = self.writer.lock();
        *self.current.write() = Arc::new(config);
        tracing::info!("Guardrail configuration reloaded from {}", path.display());
        Ok(())
    }

    /// Accessor projecting the live snapshot onto one guardrail's settings.
    ///
    /// Each call reads whatever snapshot is current at that moment.
    pub fn supplier<C, F>(&self, project: F) -> impl Fn() -> C + Send + Sync + 'static
    where
        C: 'static,
        F: Fn(&GuardrailsConfig) -> C + Send + Sync + 'static,
    {
        let source = self.clone();
        move || project(&source.load())
    }
}

impl std::fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigSource")
            .field("current", &self.load())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DISABLED;
    use std::io::Write;

    #[test]
    fn test_store_is_visible_to_existing_suppliers() {
        let source = ConfigSource::default();
        let tables = source.supplier(|c| c.tables_warn_threshold);
        assert_eq!(tables(), DISABLED);

        source.store(GuardrailsConfig {
            tables_warn_threshold: 10,
            ..Default::default()
        });
        assert_eq!(tables(), 10);
    }

    #[test]
    fn test_old_snapshot_is_not_mutated() {
        let source = ConfigSource::default();
        let before = source.load();

        source.update(|c| c.user_timestamps_enabled = false);

        assert!(before.user_timestamps_enabled);
        assert!(!source.load().user_timestamps_enabled);
    }

    #[test]
    fn test_clones_share_state() {
        let source = ConfigSource::default();
        let other = source.clone();
        other.update(|c| c.page_size_abort_threshold = 5000);
        assert_eq!(source.load().page_size_abort_threshold, 5000);
    }

    #[test]
    fn test_readers_proceed_while_update_runs() {
        let source = ConfigSource::new(GuardrailsConfig {
            tables_abort_threshold: 7,
            ..Default::default()
        });

        source.update(|c| {
            let reader = source.clone();
            let seen = std::thread::spawn(move || reader.load().tables_abort_threshold)
                .join()
                .unwrap();
            assert_eq!(seen, 7);
            assert_eq!(source.load().tables_abort_threshold, 7);
            c.tables_abort_threshold = seen + 1;
        });

        assert_eq!(source.load().tables_abort_threshold, 8);
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let source = ConfigSource::new(GuardrailsConfig {
            tables_abort_threshold: 0,
            ..Default::default()
        });

        let writers: Vec<_> = (0..4)
            .map(|_| {
                let source = source.clone();
                std::thread::spawn(move || {
                    for _ in 0..250 {
                        source.update(|c| c.tables_abort_threshold += 1);
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        assert_eq!(source.load().tables_abort_threshold, 1_000);
    }

    #[test]
    fn test_reload_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[guardrails]\ncolumns_per_table_warn_threshold = 50").unwrap();

        let source = ConfigSource::default();
        source.reload_from(file.path()).unwrap();
        assert_eq!(source.load().columns_per_table_warn_threshold, 50);
    }

    #[test]
    fn test_failed_reload_keeps_snapshot() {
        let source = ConfigSource::new(GuardrailsConfig {
            tables_abort_threshold: 7,
            ..Default::default()
        });
        assert!(source.reload_from("nonexistent.toml").is_err());
        assert_eq!(source.load().tables_abort_threshold, 7);
    }
}
