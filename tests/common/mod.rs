#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use catalog_browser::catalog::memory_catalog::{
    BodyRecord, DsoRecord, InMemoryCatalog, StarRecord,
};
use catalog_browser::catalog::observation_context::ObservationContext;
use catalog_browser::catalog::{CatalogEntry, CatalogKind, CatalogQueryPort, ObjectHandle};
use hifitime::{Epoch, TimeScale};
use nalgebra::Vector3;

/// Catalog double counting every port call.
///
/// The wrapped catalog can be modified between calls, which lets tests add an object the
/// browser failed to find earlier.
#[derive(Default)]
pub struct RecordingCatalog {
    pub inner: RefCell<InMemoryCatalog>,
    pub lookups: Cell<usize>,
    pub queries: RefCell<HashMap<String, usize>>,
}

impl RecordingCatalog {
    pub fn new(inner: InMemoryCatalog) -> Self {
        RecordingCatalog {
            inner: RefCell::new(inner),
            ..Default::default()
        }
    }

    pub fn query_count(&self, kind: CatalogKind) -> usize {
        self.queries
            .borrow()
            .get(&format!("{kind:?}"))
            .copied()
            .unwrap_or(0)
    }

    pub fn total_queries(&self) -> usize {
        self.queries.borrow().values().sum()
    }
}

impl CatalogQueryPort for RecordingCatalog {
    fn lookup_by_name(&self, name: &str) -> Option<ObjectHandle> {
        self.lookups.set(self.lookups.get() + 1);
        self.inner.borrow().lookup_by_name(name)
    }

    fn query_catalog(
        &self,
        kind: CatalogKind,
        context: Option<&ObservationContext>,
    ) -> Vec<CatalogEntry> {
        *self
            .queries
            .borrow_mut()
            .entry(format!("{kind:?}"))
            .or_insert(0) += 1;
        self.inner.borrow().query_catalog(kind, context)
    }

    fn canonical_name(&self, handle: ObjectHandle) -> String {
        self.inner.borrow().canonical_name(handle)
    }
}

pub fn epoch() -> Epoch {
    Epoch::from_mjd_in_time_scale(60676.0, TimeScale::TT)
}

pub fn star(
    name: &str,
    x: f64,
    y: f64,
    z: f64,
    absolute_magnitude: f64,
    has_planets: bool,
) -> StarRecord {
    StarRecord::new(name, Vector3::new(x, y, z), absolute_magnitude, has_planets)
}

pub fn dso(name: &str, type_tag: &str) -> DsoRecord {
    DsoRecord {
        name: name.into(),
        type_tag: type_tag.into(),
    }
}

pub fn body(name: &str, type_tag: &str, primary: &str) -> BodyRecord {
    BodyRecord {
        name: name.into(),
        type_tag: type_tag.into(),
        primary: primary.into(),
    }
}

/// A few neighbours of the Sun, a handful of Messier objects and the inner solar system.
pub fn local_catalog() -> InMemoryCatalog {
    let mut catalog = InMemoryCatalog::new();
    for record in [
        star("Sol", 0.0, 0.0, 0.0, 4.83, true),
        star("Alpha Centauri A", -1.64, -1.37, -3.84, 4.38, false),
        star("Proxima Centauri", -1.54, -1.18, -3.77, 15.53, true),
        star("Barnard's Star", -0.06, -5.94, 0.49, 13.22, false),
        star("Sirius", -1.61, 8.08, -2.47, 1.42, false),
        star("Epsilon Eridani", 6.21, 8.32, -1.73, 6.19, true),
        star("Rigel", 104.0, 758.0, -377.0, -7.84, false),
    ] {
        catalog.add_star(record).expect("finite star record");
    }
    for record in [
        dso("M31", "SBb"),
        dso("M33", "Sc"),
        dso("M87", "E0"),
        dso("LMC", "Irr"),
        dso("M42", "Neb"),
        dso("M13", "Glob"),
        dso("M45", "Open cluster"),
        dso("M57", "PN"),
    ] {
        catalog.add_deep_sky(record).unwrap();
    }
    for record in [
        body("Mercury", "planet", "Sol"),
        body("Venus", "planet", "Sol"),
        body("Earth", "planet", "Sol"),
        body("Ceres", "dwarfplanet", "Sol"),
        body("Halley", "comet", "Sol"),
        body("Moon", "moon", "Earth"),
        body("ISS", "spacecraft", "Earth"),
    ] {
        catalog.add_body(record).unwrap();
    }
    catalog
}
