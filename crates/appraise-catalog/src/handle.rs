//! Shared, refreshable access to the current catalog index.
//!
//! Readers take an `Arc` snapshot and keep using it for as long as they like; a refresh
//! builds the replacement index first and only then swaps the pointer, so a reader sees
//! either the old index or the new one, never a partial build.

use std::sync::{
    Arc, PoisonError, RwLock,
    atomic::{AtomicU64, Ordering},
};

use appraise_config::MatcherSettings;
use tracing::info;

use crate::{CatalogError, definition::ModifierDefinition, index::CatalogIndex};

/// Owner of the current [`CatalogIndex`].
#[derive(Debug, Default)]
pub struct CatalogHandle {
    /// Installed index, if any.
    current: RwLock<Option<Arc<CatalogIndex>>>,
    /// Last generation number handed out.
    generation: AtomicU64,
}

impl CatalogHandle {
    /// Creates a handle with no catalog installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a handle and installs an index built from `definitions`.
    pub fn with_definitions(
        definitions: Vec<ModifierDefinition>,
        settings: &MatcherSettings,
    ) -> Result<Self, CatalogError> {
        let handle = Self::new();
        handle.refresh(definitions, settings)?;
        Ok(handle)
    }

    /// Returns the installed index.
    pub fn snapshot(&self) -> Result<Arc<CatalogIndex>, CatalogError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(CatalogError::Unavailable)
    }

    /// True once an index has been installed.
    pub fn is_loaded(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Builds a new index and installs it. On failure the previous index stays in place.
    ///
    /// Returns the installed index.
    pub fn refresh(
        &self,
        definitions: Vec<ModifierDefinition>,
        settings: &MatcherSettings,
    ) -> Result<Arc<CatalogIndex>, CatalogError> {
        let index = CatalogIndex::build(definitions, settings)?;
        Ok(self.install(index))
    }

    /// Installs an already built index, assigning it the next generation number.
    ///
    /// The generation is taken under the write lock, so the installed index always carries
    /// the highest generation handed out.
    pub fn install(&self, index: CatalogIndex) -> Arc<CatalogIndex> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let index = Arc::new(index.with_generation(generation));
        *current = Some(Arc::clone(&index));
        drop(current);
        info!(generation, definitions = index.len(), "installed catalog index");
        index
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    fn defs(ids: &[&str]) -> Vec<ModifierDefinition> {
        ids.iter()
            .map(|id| ModifierDefinition::new(*id, format!("# to {id}"), "Explicit"))
            .collect()
    }

    #[test]
    fn empty_handle_is_unavailable() {
        let handle = CatalogHandle::new();
        assert!(!handle.is_loaded());
        assert!(matches!(handle.snapshot(), Err(CatalogError::Unavailable)));
    }

    #[test]
    fn refresh_bumps_generation() {
        let settings = MatcherSettings::default();
        let handle = CatalogHandle::with_definitions(defs(&["a1"]), &settings).unwrap();
        assert_eq!(handle.snapshot().unwrap().generation(), 1);

        let old = handle.snapshot().unwrap();
        handle.refresh(defs(&["b1", "b2"]), &settings).unwrap();
        let new = handle.snapshot().unwrap();

        assert_eq!(new.generation(), 2);
        assert_eq!(new.len(), 2);
        assert_eq!(old.len(), 1, "earlier snapshots are unaffected");
    }

    #[test]
    fn failed_refresh_keeps_previous_index() {
        let settings = MatcherSettings::default();
        let handle = CatalogHandle::with_definitions(defs(&["a1"]), &settings).unwrap();

        let err = handle.refresh(defs(&["x", "x"]), &settings).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { .. }));

        let current = handle.snapshot().unwrap();
        assert_eq!(current.generation(), 1);
        assert_eq!(current.definitions()[0].id, "a1");
    }

    #[test]
    fn concurrent_readers_see_whole_indexes() {
        let settings = MatcherSettings::default();
        let handle = CatalogHandle::with_definitions(defs(&["a1"]), &settings).unwrap();

        thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..50 {
                        let index = handle.snapshot().unwrap();
                        let expected = if index.generation() == 1 { 1 } else { 3 };
                        assert_eq!(index.len(), expected);
                    }
                });
            }
            scope.spawn(|| {
                for _ in 0..10 {
                    handle.refresh(defs(&["c1", "c2", "c3"]), &settings).unwrap();
                }
            });
        });

        assert_eq!(handle.snapshot().unwrap().generation(), 11);
    }

    #[test]
    fn concurrent_installs_leave_newest_generation() {
        let settings = MatcherSettings::default();
        let handle = CatalogHandle::new();

        let mut installed: Vec<u64> = thread::scope(|scope| {
            let workers: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| {
                        (0..25)
                            .map(|_| {
                                let index = CatalogIndex::build(defs(&["a1"]), &settings).unwrap();
                                handle.install(index).generation()
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            workers
                .into_iter()
                .flat_map(|w| w.join().unwrap())
                .collect()
        });

        installed.sort_unstable();
        installed.dedup();
        assert_eq!(installed.len(), 200);
        assert_eq!(handle.snapshot().unwrap().generation(), 200);
    }

    #[test]
    fn handle_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogHandle>();
    }
}
