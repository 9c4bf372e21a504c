//! Generic named asset registry.
//!
//! An [`AssetRegistry`] maps names to lazily materialized assets of a single
//! payload type. Each entry carries an optional load function, an optional
//! release function, the cached payload and an obsolescence flag.
//!
//! # Lifecycle
//!
//! 1. An entry is created by [`AssetRegistry::register`] (loadable asset) or
//!    [`AssetRegistry::register_asset`] (already built, unmanaged asset).
//! 2. The payload is created on the first [`AssetRegistry::get`] or eagerly by
//!    [`AssetRegistry::load_all`].
//! 3. [`AssetRegistry::release`] and friends drop the payload through the
//!    release function; the entry stays and can be loaded again.
//! 4. [`AssetRegistry::unregister`] and friends remove the entry, releasing a
//!    loaded payload first.
//!
//! Obsolete entries are skipped by [`AssetRegistry::load_all`] and are the
//! target of the `*_obsolete` bulk operations. They can still be fetched by
//! name.
//!
//! Registries are single-threaded: payloads are shared as [`Rc`] and the
//! registry is stored in the ECS world as a non-send resource.

use log::{debug, error, warn};
use rustc_hash::FxHashMap;
use std::rc::Rc;
use thiserror::Error;

/// Error type returned by asset load functions.
pub type LoadError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Builds a payload, or fails.
pub type LoadFn<T> = Box<dyn FnMut() -> Result<T, LoadError>>;

/// Frees the external resources held by a payload.
pub type ReleaseFn<T> = Box<dyn FnMut(&T)>;

/// Errors reported by [`AssetRegistry`] operations.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("cannot find '{0}' asset because it is not registered")]
    NotFound(String),
    #[error("cannot load '{0}' asset because it has no loading method")]
    NotLoadable(String),
    #[error("cannot register '{0}' asset because loading method is missing")]
    InvalidRegistration(String),
    #[error("failed to load '{name}' asset: {source}")]
    LoadFailure {
        name: String,
        #[source]
        source: LoadError,
    },
    #[error("loading all assets failed with {count} error(s): {failed:?}")]
    AggregateLoadFailure {
        count: usize,
        failed: Vec<String>,
        #[source]
        last: Box<AssetError>,
    },
}

struct AssetEntry<T> {
    name: String,
    load: Option<LoadFn<T>>,
    release: Option<ReleaseFn<T>>,
    asset: Option<Rc<T>>,
    obsolete: bool,
}

impl<T> AssetEntry<T> {
    fn is_managed(&self) -> bool {
        self.load.is_some()
    }

    /// Drop the cached payload through the release function.
    ///
    /// The entry itself is untouched and can be loaded again.
    fn release_asset(&mut self) {
        if self.asset.is_none() {
            return;
        }
        if !self.is_managed() {
            warn!(
                "cannot release '{}' asset because it is not managed by the registry",
                self.name
            );
            return;
        }
        let Some(release) = self.release.as_mut() else {
            warn!(
                "cannot release '{}' asset because release method is not defined",
                self.name
            );
            return;
        };
        if let Some(asset) = self.asset.take() {
            release(&asset);
            debug!("released '{}' asset", self.name);
        }
    }

    fn load_asset(&mut self) -> Result<Rc<T>, AssetError> {
        if let Some(asset) = &self.asset {
            return Ok(Rc::clone(asset));
        }
        let Some(load) = self.load.as_mut() else {
            return Err(AssetError::NotLoadable(self.name.clone()));
        };
        let asset = load().map_err(|source| AssetError::LoadFailure {
            name: self.name.clone(),
            source,
        })?;
        let asset = Rc::new(asset);
        self.asset = Some(Rc::clone(&asset));
        debug!("loaded '{}' asset", self.name);
        Ok(asset)
    }
}

/// Named registry of lazily loaded assets of type `T`.
pub struct AssetRegistry<T> {
    entries: FxHashMap<String, AssetEntry<T>>,
}

impl<T> Default for AssetRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AssetRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Register an already built asset that the registry does not manage.
    ///
    /// If `name` already holds this very instance, the entry is only marked
    /// not obsolete. Any other existing entry is unregistered first.
    pub fn register_asset(&mut self, name: impl Into<String>, asset: Rc<T>) -> Rc<T> {
        let name = name.into();
        if let Some(entry) = self.entries.get_mut(&name) {
            if entry.asset.as_ref().is_some_and(|a| Rc::ptr_eq(a, &asset)) {
                entry.obsolete = false;
                return asset;
            }
        }
        self.insert_entry(AssetEntry {
            name,
            load: None,
            release: None,
            asset: Some(Rc::clone(&asset)),
            obsolete: false,
        });
        asset
    }

    /// Register a loadable asset.
    ///
    /// Fails with [`AssetError::InvalidRegistration`] when `load` is `None`.
    /// A missing `release` is accepted; the asset then can never be released,
    /// only unregistered.
    ///
    /// Re-registering an existing name clears its obsolete flag and replaces
    /// its load and release functions. A payload built by the previous loader
    /// is released through the previous release function first, so the next
    /// [`get`](Self::get) goes through the new loader.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        load: Option<LoadFn<T>>,
        release: Option<ReleaseFn<T>>,
    ) -> Result<(), AssetError> {
        let name = name.into();
        let Some(load) = load else {
            return Err(AssetError::InvalidRegistration(name));
        };
        if release.is_none() {
            warn!("'{name}' asset is registered without release method, it cannot be released");
        }
        if let Some(entry) = self.entries.get_mut(&name) {
            if entry.is_managed() {
                entry.release_asset();
                entry.load = Some(load);
                entry.release = release;
                entry.obsolete = false;
                debug!("refreshed '{name}' asset registration");
                return Ok(());
            }
        }
        self.insert_entry(AssetEntry {
            name,
            load: Some(load),
            release,
            asset: None,
            obsolete: false,
        });
        Ok(())
    }

    /// Convenience wrapper over [`register`](Self::register) taking closures.
    pub fn register_loader<L, R>(
        &mut self,
        name: impl Into<String>,
        load: L,
        release: R,
    ) -> Result<(), AssetError>
    where
        L: FnMut() -> Result<T, LoadError> + 'static,
        R: FnMut(&T) + 'static,
    {
        self.register(name, Some(Box::new(load)), Some(Box::new(release)))
    }

    fn insert_entry(&mut self, entry: AssetEntry<T>) {
        if self.entries.contains_key(&entry.name) {
            warn!("'{}' asset is already registered, replacing it", entry.name);
            self.unregister(&entry.name);
        }
        self.entries.insert(entry.name.clone(), entry);
    }

    /// Remove an entry, releasing its payload first.
    pub fn unregister(&mut self, name: &str) {
        if let Some(mut entry) = self.entries.remove(name) {
            if entry.is_managed() {
                entry.release_asset();
            }
        }
    }

    /// Remove every obsolete entry.
    pub fn unregister_all_obsolete(&mut self) {
        let obsoletes: Vec<String> = self
            .entries
            .values()
            .filter(|e| e.obsolete)
            .map(|e| e.name.clone())
            .collect();
        for name in obsoletes {
            self.unregister(&name);
        }
    }

    /// Remove every entry.
    pub fn unregister_all(&mut self) {
        for (_, mut entry) in self.entries.drain() {
            if entry.is_managed() {
                entry.release_asset();
            }
        }
    }

    /// Remove the entry holding this exact instance.
    pub fn unregister_asset(&mut self, asset: &Rc<T>) {
        match self.find_name_of(asset) {
            Some(name) => self.unregister(&name),
            None => warn!("cannot unregister asset because it is not found"),
        }
    }

    /// Load every unloaded, loadable, non obsolete entry.
    ///
    /// Every entry is attempted even if some fail. Failures are logged by
    /// name and reported together as [`AssetError::AggregateLoadFailure`].
    pub fn load_all(&mut self) -> Result<(), AssetError> {
        let mut names: Vec<String> = self
            .entries
            .values()
            .filter(|e| e.asset.is_none() && e.is_managed() && !e.obsolete)
            .map(|e| e.name.clone())
            .collect();
        names.sort_unstable();

        let mut failed = Vec::new();
        let mut last = None;
        for name in names {
            let Some(entry) = self.entries.get_mut(&name) else {
                continue;
            };
            if let Err(e) = entry.load_asset() {
                error!("load asset failed for '{name}': {e}");
                failed.push(name);
                last = Some(e);
            }
        }
        match last {
            Some(last) => Err(AssetError::AggregateLoadFailure {
                count: failed.len(),
                failed,
                last: Box::new(last),
            }),
            None => Ok(()),
        }
    }

    /// Release the payload of `name`, keeping the entry registered.
    pub fn release(&mut self, name: &str) {
        match self.entries.get_mut(name) {
            Some(entry) => entry.release_asset(),
            None => warn!("cannot release '{name}' asset because it is not found"),
        }
    }

    /// Release every managed payload, keeping the entries registered.
    pub fn release_all(&mut self) {
        for entry in self.entries.values_mut().filter(|e| e.is_managed()) {
            entry.release_asset();
        }
    }

    /// Release every obsolete managed payload, keeping the entries registered.
    pub fn release_all_obsolete(&mut self) {
        for entry in self
            .entries
            .values_mut()
            .filter(|e| e.obsolete && e.is_managed())
        {
            entry.release_asset();
        }
    }

    /// Release the entry holding this exact instance.
    pub fn release_asset(&mut self, asset: &Rc<T>) {
        let found = self
            .entries
            .values_mut()
            .find(|e| e.asset.as_ref().is_some_and(|a| Rc::ptr_eq(a, asset)));
        match found {
            Some(entry) => entry.release_asset(),
            None => warn!("cannot release asset because it is not found"),
        }
    }

    pub fn mask_obsolete(&mut self, name: &str) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.obsolete = true;
        }
    }

    pub fn mask_not_obsolete(&mut self, name: &str) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.obsolete = false;
        }
    }

    /// Mark every entry obsolete.
    ///
    /// Used before re-registering a full set of assets: whatever is not
    /// registered again stays obsolete and can be swept with
    /// [`unregister_all_obsolete`](Self::unregister_all_obsolete).
    pub fn mask_all_obsolete(&mut self) {
        for entry in self.entries.values_mut() {
            entry.obsolete = true;
        }
    }

    /// Fetch an asset, loading it first if needed.
    pub fn get(&mut self, name: &str) -> Result<Rc<T>, AssetError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| AssetError::NotFound(name.to_string()))?;
        entry.load_asset()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|e| e.asset.is_some())
    }

    pub fn is_obsolete(&self, name: &str) -> bool {
        self.entries.get(name).is_some_and(|e| e.obsolete)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn find_name_of(&self, asset: &Rc<T>) -> Option<String> {
        self.entries
            .values()
            .find(|e| e.asset.as_ref().is_some_and(|a| Rc::ptr_eq(a, asset)))
            .map(|e| e.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    fn counting_registry(
        loads: &Rc<Cell<u32>>,
        releases: &Rc<RefCell<Vec<String>>>,
    ) -> AssetRegistry<String> {
        let mut registry = AssetRegistry::new();
        for name in ["first", "second"] {
            let loads = Rc::clone(loads);
            let releases = Rc::clone(releases);
            registry
                .register_loader(
                    name,
                    move || {
                        loads.set(loads.get() + 1);
                        Ok(format!("hello {name}"))
                    },
                    move |s: &String| releases.borrow_mut().push(s.clone()),
                )
                .unwrap();
        }
        registry
            .register_loader("error", || Err("big test error".into()), |_: &String| {})
            .unwrap();
        registry
    }

    // ==================== GET TESTS ====================

    #[test]
    fn test_get_unknown_name_is_not_found() {
        let mut registry: AssetRegistry<String> = AssetRegistry::new();
        assert!(matches!(registry.get("nope"), Err(AssetError::NotFound(n)) if n == "nope"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_get_loads_once_and_caches() {
        let loads = Rc::new(Cell::new(0));
        let releases = Rc::new(RefCell::new(Vec::new()));
        let mut registry = counting_registry(&loads, &releases);

        let a = registry.get("first").unwrap();
        let b = registry.get("first").unwrap();
        assert_eq!(*a, "hello first");
        assert!(Rc::ptr_eq(&a, &b));
        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn test_get_wraps_load_error_with_name() {
        let loads = Rc::new(Cell::new(0));
        let releases = Rc::new(RefCell::new(Vec::new()));
        let mut registry = counting_registry(&loads, &releases);

        let err = registry.get("error").unwrap_err();
        match err {
            AssetError::LoadFailure { name, source } => {
                assert_eq!(name, "error");
                assert_eq!(source.to_string(), "big test error");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert!(!registry.is_loaded("error"));
    }

    #[test]
    fn test_get_obsolete_entry_still_loads() {
        let loads = Rc::new(Cell::new(0));
        let releases = Rc::new(RefCell::new(Vec::new()));
        let mut registry = counting_registry(&loads, &releases);
        registry.mask_obsolete("first");
        assert_eq!(*registry.get("first").unwrap(), "hello first");
    }

    // ==================== REGISTRATION TESTS ====================

    #[test]
    fn test_register_without_load_is_invalid() {
        let mut registry: AssetRegistry<String> = AssetRegistry::new();
        let result = registry.register("bad", None, Some(Box::new(|_: &String| {})));
        assert!(matches!(result, Err(AssetError::InvalidRegistration(_))));
        assert!(!registry.contains("bad"));
    }

    #[test]
    fn test_register_without_release_is_accepted_but_never_released() {
        let mut registry: AssetRegistry<String> = AssetRegistry::new();
        registry
            .register("plain", Some(Box::new(|| Ok("x".to_string()))), None)
            .unwrap();
        registry.get("plain").unwrap();
        registry.release("plain");
        assert!(registry.is_loaded("plain"));
        registry.unregister("plain");
        assert!(!registry.contains("plain"));
    }

    #[test]
    fn test_register_again_refreshes_loader() {
        let releases = Rc::new(RefCell::new(Vec::new()));
        let mut registry: AssetRegistry<String> = AssetRegistry::new();
        let r = Rc::clone(&releases);
        registry
            .register_loader(
                "a",
                || Ok("old".to_string()),
                move |s: &String| r.borrow_mut().push(s.clone()),
            )
            .unwrap();
        registry.get("a").unwrap();
        registry.mask_obsolete("a");

        registry
            .register_loader("a", || Ok("new".to_string()), |_: &String| {})
            .unwrap();
        assert!(!registry.is_obsolete("a"));
        assert_eq!(*releases.borrow(), vec!["old".to_string()]);
        assert_eq!(*registry.get("a").unwrap(), "new");
    }

    #[test]
    fn test_register_asset_same_instance_only_unmarks_obsolete() {
        let mut registry = AssetRegistry::new();
        let asset = registry.register_asset("a", Rc::new(5));
        registry.mask_obsolete("a");
        registry.register_asset("a", Rc::clone(&asset));
        assert!(!registry.is_obsolete("a"));
        assert!(Rc::ptr_eq(&registry.get("a").unwrap(), &asset));
    }

    #[test]
    fn test_register_asset_replaces_loadable_entry() {
        let released = Rc::new(Cell::new(false));
        let mut registry = AssetRegistry::new();
        let flag = Rc::clone(&released);
        registry
            .register_loader("a", || Ok(1), move |_: &i32| flag.set(true))
            .unwrap();
        registry.get("a").unwrap();

        registry.register_asset("a", Rc::new(2));
        assert!(released.get());
        assert_eq!(*registry.get("a").unwrap(), 2);
    }

    #[test]
    fn test_unmanaged_asset_cannot_be_released() {
        let mut registry = AssetRegistry::new();
        let asset = registry.register_asset("a", Rc::new(1));
        registry.release_all();
        registry.release_asset(&asset);
        assert!(registry.is_loaded("a"));
    }

    // ==================== LOAD ALL TESTS ====================

    #[test]
    fn test_load_all_reports_failures_and_loads_the_rest() {
        let loads = Rc::new(Cell::new(0));
        let releases = Rc::new(RefCell::new(Vec::new()));
        let mut registry = counting_registry(&loads, &releases);

        match registry.load_all() {
            Err(AssetError::AggregateLoadFailure { count, failed, .. }) => {
                assert_eq!(count, 1);
                assert_eq!(failed, vec!["error".to_string()]);
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert!(registry.is_loaded("first"));
        assert!(registry.is_loaded("second"));
        assert_eq!(loads.get(), 2);

        // Second pass: only the failing entry is attempted again
        assert!(matches!(
            registry.load_all(),
            Err(AssetError::AggregateLoadFailure { count: 1, .. })
        ));
        assert_eq!(loads.get(), 2);
    }

    #[test]
    fn test_load_all_skips_obsolete() {
        let loads = Rc::new(Cell::new(0));
        let releases = Rc::new(RefCell::new(Vec::new()));
        let mut registry = counting_registry(&loads, &releases);
        registry.unregister("error");
        registry.mask_obsolete("first");

        registry.load_all().unwrap();
        assert!(!registry.is_loaded("first"));
        assert!(registry.is_loaded("second"));

        registry.mask_not_obsolete("first");
        registry.load_all().unwrap();
        assert!(registry.is_loaded("first"));
    }

    // ==================== RELEASE TESTS ====================

    #[test]
    fn test_release_keeps_entry_and_reloads() {
        let loads = Rc::new(Cell::new(0));
        let releases = Rc::new(RefCell::new(Vec::new()));
        let mut registry = counting_registry(&loads, &releases);

        registry.get("first").unwrap();
        registry.release("first");
        assert!(registry.contains("first"));
        assert!(!registry.is_loaded("first"));
        assert_eq!(*releases.borrow(), vec!["hello first".to_string()]);

        registry.get("first").unwrap();
        assert_eq!(loads.get(), 2);
    }

    #[test]
    fn test_release_all_obsolete_only_touches_obsolete() {
        let loads = Rc::new(Cell::new(0));
        let releases = Rc::new(RefCell::new(Vec::new()));
        let mut registry = counting_registry(&loads, &releases);
        registry.get("first").unwrap();
        registry.get("second").unwrap();
        registry.mask_obsolete("second");

        registry.release_all_obsolete();
        assert!(registry.is_loaded("first"));
        assert!(!registry.is_loaded("second"));
        assert!(registry.contains("second"));
    }

    #[test]
    fn test_release_asset_by_identity() {
        let loads = Rc::new(Cell::new(0));
        let releases = Rc::new(RefCell::new(Vec::new()));
        let mut registry = counting_registry(&loads, &releases);
        let first = registry.get("first").unwrap();

        // Same value, different instance: nothing happens
        registry.release_asset(&Rc::new("hello first".to_string()));
        assert!(registry.is_loaded("first"));

        registry.release_asset(&first);
        assert!(!registry.is_loaded("first"));
        assert!(registry.contains("first"));
    }

    // ==================== UNREGISTER TESTS ====================

    #[test]
    fn test_unregister_releases_loaded_payload() {
        let loads = Rc::new(Cell::new(0));
        let releases = Rc::new(RefCell::new(Vec::new()));
        let mut registry = counting_registry(&loads, &releases);
        registry.get("second").unwrap();

        registry.unregister("second");
        assert!(!registry.contains("second"));
        assert_eq!(*releases.borrow(), vec!["hello second".to_string()]);
    }

    #[test]
    fn test_unregister_asset_unknown_instance_is_noop() {
        let loads = Rc::new(Cell::new(0));
        let releases = Rc::new(RefCell::new(Vec::new()));
        let mut registry = counting_registry(&loads, &releases);
        registry.get("first").unwrap();

        registry.unregister_asset(&Rc::new("stranger".to_string()));
        assert_eq!(registry.len(), 3);
        assert!(registry.is_loaded("first"));
        assert!(releases.borrow().is_empty());
    }

    #[test]
    fn test_unregister_all_obsolete() {
        let loads = Rc::new(Cell::new(0));
        let releases = Rc::new(RefCell::new(Vec::new()));
        let mut registry = counting_registry(&loads, &releases);
        registry.mask_all_obsolete();
        registry.mask_not_obsolete("first");

        registry.unregister_all_obsolete();
        assert_eq!(registry.names(), vec!["first"]);

        registry.unregister_all();
        assert!(registry.is_empty());
    }
}
