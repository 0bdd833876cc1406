//! # Browser cache: memoized roots over one catalog
//!
//! This module defines [`BrowserCache`](crate::browser::BrowserCache), the object an application
//! creates once per session and passes by reference to its browser views. It wires together:
//!
//! 1. **The catalog** ([`CatalogQueryPort`](crate::catalog::CatalogQueryPort)), owned or borrowed.
//! 2. **The configuration** ([`BrowserConfig`](crate::config::BrowserConfig)): titles, labels, home star.
//! 3. **The validated rule tables** ([`GroupRules`](crate::builder::GroupRules)).
//! 4. **The cached roots**, each built on first access and reused afterwards.
//!
//! ## Caching rules
//!
//! | Root                                   | Built                      | Rebuilt                          |
//! |----------------------------------------|----------------------------|----------------------------------|
//! | Solar system                           | first successful lookup    | never (lookup retried until found) |
//! | Deep sky objects                       | first access               | never                            |
//! | Brightest stars (absolute magnitude)   | first access               | never                            |
//! | Stars                                  | first access               | when the context identity changes, or on [`refresh_star_root`](crate::browser::BrowserCache::refresh_star_root) |
//! | Satellites of an object                | first access per object    | never                            |
//!
//! The star root is keyed on the identity of the shared
//! [`ObservationContext`](crate::catalog::observation_context::ObservationContext): passing the same
//! `Arc` again returns the same tree, passing a different `Arc` rebuilds it even if the two
//! contexts compare equal.
//!
//! ## Threading
//!
//! The cache is meant to be used from the single thread that owns the catalog and the
//! observation context. Lazy slots use `once_cell::unsync::OnceCell`, so the cache is not
//! `Sync`. Returned roots are `Arc`s to immutable nodes and may be read anywhere.
//!
//! ## Typical usage
//!
//! ```rust
//! use catalog_browser::browser::BrowserCache;
//! use catalog_browser::catalog::memory_catalog::{InMemoryCatalog, StarRecord};
//! use catalog_browser::catalog::observation_context::ObservationContext;
//! use catalog_browser::config::BrowserConfig;
//! use hifitime::{Epoch, TimeScale};
//! use nalgebra::Vector3;
//!
//! let mut catalog = InMemoryCatalog::new();
//! catalog.add_star(StarRecord::new("Sol", Vector3::zeros(), 4.83, true))?;
//!
//! let mut cache = BrowserCache::new(catalog, BrowserConfig::default())?;
//! let epoch = Epoch::from_mjd_in_time_scale(60000.0, TimeScale::TT);
//! let here = ObservationContext::at_origin(epoch).shared();
//!
//! let solar = cache.solar_root().expect("Sol is in the catalog");
//! assert_eq!(solar.secondary_name(), Some("Solar System"));
//!
//! let stars = cache.star_root(&here).expect("at least one star");
//! assert!(std::sync::Arc::ptr_eq(&stars, &cache.star_root(&here).unwrap()));
//! # Ok::<(), catalog_browser::browser_errors::BrowserError>(())
//! ```
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use tracing::debug;

use crate::browser_errors::BrowserError;
use crate::builder::{BrowserTreeBuilder, GroupRules};
use crate::catalog::{
    observation_context::ObservationContext, star_browser_kind::StarBrowserKind,
    CatalogQueryPort, ObjectHandle,
};
use crate::config::BrowserConfig;
use crate::node::BrowserNode;

#[derive(Debug, Clone)]
struct StarRootEntry {
    context: Arc<ObservationContext>,
    root: Option<Arc<BrowserNode>>,
}

#[derive(Debug)]
pub struct BrowserCache<C: CatalogQueryPort> {
    catalog: C,
    config: BrowserConfig,
    rules: GroupRules,
    solar_root: OnceCell<Arc<BrowserNode>>,
    dso_root: OnceCell<Option<Arc<BrowserNode>>>,
    brightest_stars: OnceCell<Option<Arc<BrowserNode>>>,
    star_root: Option<StarRootEntry>,
    satellites: HashMap<ObjectHandle, Option<Arc<BrowserNode>>>,
}

impl<C: CatalogQueryPort> BrowserCache<C> {
    /// Construct an empty cache with the built-in rule tables.
    ///
    /// Nothing is queried yet; every root is built on first access.
    ///
    /// Arguments
    /// -----------------
    /// * `catalog`: The catalog to index (an owned value or a reference).
    /// * `config`: Titles, labels and home star.
    ///
    /// Return
    /// ----------
    /// * The cache, or an error if the built-in rule tables are inconsistent.
    pub fn new(catalog: C, config: BrowserConfig) -> Result<Self, BrowserError> {
        Ok(Self::with_rules(catalog, config, GroupRules::builtin()?))
    }

    /// Construct an empty cache using custom rule tables.
    pub fn with_rules(catalog: C, config: BrowserConfig, rules: GroupRules) -> Self {
        BrowserCache {
            catalog,
            config,
            rules,
            solar_root: OnceCell::new(),
            dso_root: OnceCell::new(),
            brightest_stars: OnceCell::new(),
            star_root: None,
            satellites: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    fn builder(&self) -> BrowserTreeBuilder<'_, C> {
        BrowserTreeBuilder::new(&self.catalog, &self.config, &self.rules)
    }

    /// Solar-system root, built on the first call where the home star can be found.
    ///
    /// A failed lookup is not remembered: the next call queries the catalog again.
    ///
    /// Return
    /// ----------
    /// * `None` while the home star is missing from the catalog.
    pub fn solar_root(&self) -> Option<Arc<BrowserNode>> {
        if let Some(root) = self.solar_root.get() {
            return Some(Arc::clone(root));
        }
        let root = Arc::new(self.builder().build_solar_root()?);
        Some(Arc::clone(self.solar_root.get_or_init(|| root)))
    }

    /// Deep-sky root, built on first access.
    ///
    /// Return
    /// ----------
    /// * `Ok(None)` when the deep-sky catalog is empty.
    ///
    /// Errors
    /// ----------
    /// * [`BrowserError::MissingGroupLabel`] if the label table does not cover the deep-sky
    ///   rule table. The failure is not cached; every call reports it again.
    /// * [`BrowserError::DuplicateGroupLabel`] if two populated buckets share a label.
    pub fn dso_root(&self) -> Result<Option<Arc<BrowserNode>>, BrowserError> {
        self.dso_root
            .get_or_try_init(|| -> Result<_, BrowserError> {
                Ok(self.builder().build_dso_root()?.map(Arc::new))
            })
            .cloned()
    }

    /// Branch listing the brightest stars by absolute magnitude.
    ///
    /// This ranking does not depend on the observer, so the branch is built once and
    /// merged into every star root.
    pub fn brightest_stars(&self) -> Option<Arc<BrowserNode>> {
        self.brightest_stars
            .get_or_init(|| {
                self.builder()
                    .build_star_kind(StarBrowserKind::Brightest, None)
                    .map(Arc::new)
            })
            .clone()
    }

    /// Star root for `context`.
    ///
    /// Returns the cached tree when `context` is the same `Arc` as the one used for the
    /// last build, and rebuilds it otherwise.
    ///
    /// Return
    /// ----------
    /// * `None` when every star branch is empty.
    pub fn star_root(&mut self, context: &Arc<ObservationContext>) -> Option<Arc<BrowserNode>> {
        if let Some(entry) = &self.star_root {
            if Arc::ptr_eq(&entry.context, context) {
                debug!("star root cache hit");
                return entry.root.clone();
            }
            debug!(%context, "observation context changed, rebuilding star root");
        }
        self.refresh_star_root(context)
    }

    /// Rebuild the star root for `context`, discarding the cached one.
    pub fn refresh_star_root(
        &mut self,
        context: &Arc<ObservationContext>,
    ) -> Option<Arc<BrowserNode>> {
        let brightest = self.brightest_stars();
        let root = self
            .builder()
            .build_star_root(context, brightest)
            .map(Arc::new);
        self.star_root = Some(StarRootEntry {
            context: Arc::clone(context),
            root: root.clone(),
        });
        root
    }

    /// Build every root that does not depend on the observation context: the solar-system
    /// root, the deep-sky root and the absolute magnitude star branch.
    ///
    /// Errors
    /// ----------
    /// * [`BrowserError::MissingGroupLabel`], see [`dso_root`](BrowserCache::dso_root).
    pub fn prepare_static(&self) -> Result<(), BrowserError> {
        self.solar_root();
        self.dso_root()?;
        self.brightest_stars();
        Ok(())
    }

    /// Satellite groups of `object`, built on first access and memoized per object.
    ///
    /// Errors
    /// ----------
    /// * [`BrowserError::MissingGroupLabel`] if the body label table is incomplete.
    pub fn satellites(
        &mut self,
        object: ObjectHandle,
    ) -> Result<Option<Arc<BrowserNode>>, BrowserError> {
        if let Some(root) = self.satellites.get(&object) {
            return Ok(root.clone());
        }
        let root = self.builder().build_satellite_root(object)?.map(Arc::new);
        debug!(%object, found = root.is_some(), "memoized satellites");
        self.satellites.insert(object, root.clone());
        Ok(root)
    }
}

#[cfg(test)]
mod test_browser_cache {
    use super::*;
    use crate::catalog::memory_catalog::{DsoRecord, InMemoryCatalog, StarRecord};
    use hifitime::{Epoch, TimeScale};
    use nalgebra::Vector3;

    fn epoch() -> Epoch {
        Epoch::from_mjd_in_time_scale(60000.0, TimeScale::TT)
    }

    fn cache() -> BrowserCache<InMemoryCatalog> {
        let mut catalog = InMemoryCatalog::new();
        catalog
            .add_star(StarRecord::new("Sol", Vector3::zeros(), 4.83, true))
            .unwrap();
        catalog
            .add_star(StarRecord::new("Sirius", Vector3::new(8.6, 0.0, 0.0), 1.42, false))
            .unwrap();
        catalog
            .add_deep_sky(DsoRecord {
                name: "M13".into(),
                type_tag: "Glob".into(),
            })
            .unwrap();
        BrowserCache::new(catalog, BrowserConfig::default()).unwrap()
    }

    #[test]
    fn test_star_root_identity() {
        let mut cache = cache();
        let here = ObservationContext::at_origin(epoch()).shared();

        let first = cache.star_root(&here).unwrap();
        let second = cache.star_root(&here).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        // equal value, different identity
        let twin = ObservationContext::at_origin(epoch()).shared();
        let third = cache.star_root(&twin).unwrap();
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(*first, *third);

        let refreshed = cache.refresh_star_root(&twin).unwrap();
        assert!(!Arc::ptr_eq(&third, &refreshed));
    }

    #[test]
    fn test_brightest_shared_between_star_roots() {
        let mut cache = cache();
        let a = ObservationContext::at_origin(epoch()).shared();
        let b = ObservationContext::new(Vector3::new(8.0, 0.0, 0.0), epoch(), None).shared();

        let root_a = cache.star_root(&a).unwrap();
        let root_b = cache.star_root(&b).unwrap();
        let title = "Brightest Stars (Absolute Magnitude)";
        assert!(Arc::ptr_eq(
            root_a.child(title).unwrap(),
            root_b.child(title).unwrap()
        ));

        let nearest_b: Vec<&str> = root_b
            .child("Nearest Stars")
            .unwrap()
            .children()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(nearest_b, vec!["Sirius", "Sol"]);
    }

    #[test]
    fn test_static_roots_are_memoized() {
        let cache = cache();
        cache.prepare_static().unwrap();

        let solar = cache.solar_root().unwrap();
        assert!(Arc::ptr_eq(&solar, &cache.solar_root().unwrap()));

        let dso = cache.dso_root().unwrap().unwrap();
        assert!(Arc::ptr_eq(&dso, &cache.dso_root().unwrap().unwrap()));
        assert!(dso.child("Globulars").is_some());
    }

    #[test]
    fn test_dso_label_defect_is_not_swallowed() {
        let mut config = BrowserConfig::default();
        config.deep_sky_labels.remove("Glob");
        let mut catalog = InMemoryCatalog::new();
        catalog
            .add_deep_sky(DsoRecord {
                name: "M13".into(),
                type_tag: "Glob".into(),
            })
            .unwrap();
        let cache = BrowserCache::new(catalog, config).unwrap();

        let expected = Err(BrowserError::MissingGroupLabel("Glob".into()));
        assert_eq!(cache.dso_root(), expected);
        assert_eq!(cache.dso_root(), expected);
        assert_eq!(cache.prepare_static(), Err(BrowserError::MissingGroupLabel("Glob".into())));
    }
}
