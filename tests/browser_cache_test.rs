mod common;

use std::sync::Arc;

use catalog_browser::browser::BrowserCache;
use catalog_browser::catalog::memory_catalog::InMemoryCatalog;
use catalog_browser::catalog::observation_context::ObservationContext;
use catalog_browser::catalog::star_browser_kind::StarBrowserKind;
use catalog_browser::catalog::{CatalogKind, CatalogQueryPort};
use catalog_browser::config::BrowserConfig;
use common::{epoch, local_catalog, star, RecordingCatalog};
use nalgebra::Vector3;

#[test]
fn test_solar_root_lookup_is_retried_until_found() {
    let mut catalog = InMemoryCatalog::new();
    catalog.add_star(star("Sirius", -1.61, 8.08, -2.47, 1.42, false)).unwrap();
    let recording = RecordingCatalog::new(catalog);
    let cache = BrowserCache::new(&recording, BrowserConfig::default()).unwrap();

    assert!(cache.solar_root().is_none());
    assert!(cache.solar_root().is_none());
    assert_eq!(recording.lookups.get(), 2);

    recording
        .inner
        .borrow_mut()
        .add_star(star("Sol", 0.0, 0.0, 0.0, 4.83, true))
        .unwrap();

    let solar = cache.solar_root().unwrap();
    assert_eq!(solar.name(), "Sol");
    assert!(solar.is_leaf());
    assert_eq!(recording.lookups.get(), 3);

    let again = cache.solar_root().unwrap();
    assert!(Arc::ptr_eq(&solar, &again));
    assert_eq!(recording.lookups.get(), 3);
}

#[test]
fn test_star_root_is_memoized_per_context_identity() {
    let recording = RecordingCatalog::new(local_catalog());
    let mut cache = BrowserCache::new(&recording, BrowserConfig::default()).unwrap();
    let home = ObservationContext::at_origin(epoch()).shared();

    let first = cache.star_root(&home).unwrap();
    let queries = recording.total_queries();
    assert_eq!(queries, 4);

    let second = cache.star_root(&home).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(recording.total_queries(), queries);

    let elsewhere =
        ObservationContext::new(Vector3::new(6.0, 8.0, -2.0), epoch(), Some("Eridanus".into()))
            .shared();
    let third = cache.star_root(&elsewhere).unwrap();
    assert!(!Arc::ptr_eq(&first, &third));

    let nearest = CatalogKind::Stars(StarBrowserKind::Nearest);
    let brightest = CatalogKind::Stars(StarBrowserKind::Brightest);
    assert_eq!(recording.query_count(nearest), 2);
    assert_eq!(recording.query_count(brightest), 1);

    let nearest_names: Vec<&str> = third
        .child("Nearest Stars")
        .unwrap()
        .children()
        .map(|(name, _)| name)
        .collect();
    assert_eq!(nearest_names[0], "Epsilon Eridani");
}

#[test]
fn test_star_branches_keep_catalog_order() {
    let recording = RecordingCatalog::new(local_catalog());
    let mut cache = BrowserCache::new(&recording, BrowserConfig::default()).unwrap();
    let home = ObservationContext::at_origin(epoch()).shared();
    let root = cache.star_root(&home).unwrap();

    assert_eq!(root.name(), "Stars");
    assert_eq!(root.len(), 4);

    for (title, kind) in [
        ("Nearest Stars", StarBrowserKind::Nearest),
        ("Brightest Stars", StarBrowserKind::Brighter),
        ("Stars with Planets", StarBrowserKind::WithPlanets),
        ("Brightest Stars (Absolute Magnitude)", StarBrowserKind::Brightest),
    ] {
        let expected: Vec<String> = recording
            .query_catalog(CatalogKind::Stars(kind), Some(&home))
            .into_iter()
            .map(|entry| entry.name)
            .collect();
        let branch = root.child(title).unwrap();
        assert!(branch.is_ordered());
        let got: Vec<String> = branch.listing().into_iter().map(|item| item.name).collect();
        assert_eq!(got, expected, "branch {title}");
    }
}

#[test]
fn test_static_roots_are_built_once() {
    let recording = RecordingCatalog::new(local_catalog());
    let cache = BrowserCache::new(&recording, BrowserConfig::default()).unwrap();

    cache.prepare_static().unwrap();
    cache.prepare_static().unwrap();
    let dso = cache.dso_root().unwrap().unwrap();
    let dso_again = cache.dso_root().unwrap().unwrap();

    assert!(Arc::ptr_eq(&dso, &dso_again));
    assert_eq!(recording.query_count(CatalogKind::DeepSky), 1);
    assert_eq!(
        recording.query_count(CatalogKind::Stars(StarBrowserKind::Brightest)),
        1
    );
    assert_eq!(recording.lookups.get(), 1);
}

#[test]
fn test_satellites_are_memoized() {
    let recording = RecordingCatalog::new(local_catalog());
    let mut cache = BrowserCache::new(&recording, BrowserConfig::default()).unwrap();

    let sol = cache.solar_root().unwrap().leaf_object().unwrap();
    let system = cache.satellites(sol).unwrap().unwrap();
    let groups: Vec<&str> = system.children().map(|(name, _)| name).collect();
    assert_eq!(groups, vec!["Planets", "Dwarf Planets", "Comets"]);

    let planets: Vec<String> = system
        .child("Planets")
        .unwrap()
        .listing()
        .into_iter()
        .map(|item| item.name)
        .collect();
    assert_eq!(planets, vec!["Mercury", "Venus", "Earth"]);

    let again = cache.satellites(sol).unwrap().unwrap();
    assert!(Arc::ptr_eq(&system, &again));
    assert_eq!(
        recording.query_count(CatalogKind::SolarSystem { primary: sol }),
        1
    );

    let earth = system
        .child("Planets")
        .unwrap()
        .child("Earth")
        .unwrap()
        .leaf_object()
        .unwrap();
    let earth_system = cache.satellites(earth).unwrap().unwrap();
    let groups: Vec<&str> = earth_system.children().map(|(name, _)| name).collect();
    assert_eq!(groups, vec!["Moons", "Spacecraft"]);

    let moon = earth_system
        .child("Moons")
        .unwrap()
        .child("Moon")
        .unwrap()
        .leaf_object()
        .unwrap();
    assert!(cache.satellites(moon).unwrap().is_none());
    assert!(cache.satellites(moon).unwrap().is_none());
    assert_eq!(
        recording.query_count(CatalogKind::SolarSystem { primary: moon }),
        1
    );
}
