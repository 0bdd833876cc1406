//! # In-memory reference catalog
//!
//! [`InMemoryCatalog`](crate::catalog::memory_catalog::InMemoryCatalog) is a small, vector-backed
//! implementation of [`CatalogQueryPort`](crate::catalog::CatalogQueryPort). It is meant for
//! embedding the browser without a full simulation engine, for demos, and for tests.
//!
//! ## Rankings
//!
//! | Kind          | Order                                              | Context |
//! |---------------|----------------------------------------------------|---------|
//! | `Nearest`     | ascending distance from the observer               | yes     |
//! | `Brighter`    | ascending apparent magnitude seen from the observer | yes     |
//! | `Brightest`   | ascending absolute magnitude                       | no      |
//! | `WithPlanets` | stars with planets, ascending distance             | yes     |
//!
//! Each ranking is truncated to [`star_limit`](crate::catalog::memory_catalog::InMemoryCatalog::star_limit)
//! entries. A context dependent ranking queried without a context uses the origin.
//! Ranking keys are `NotNan`: a star whose key is NaN (seen from an observer with a NaN
//! position) is left out of the ranking.
//!
//! The apparent magnitude is `m = M + 5·log10(d_pc) − 5`, with `d_pc = d_ly / 3.26156`
//! and the distance clamped to [`MIN_STAR_DISTANCE`](crate::constants::MIN_STAR_DISTANCE).
//!
//! ## Loading
//!
//! Records can be added one by one or deserialized from CSV readers with a header row:
//!
//! ```text
//! stars:    name,x,y,z,absolute_magnitude,has_planets
//! deep sky: name,type_tag
//! bodies:   name,type_tag,primary
//! ```
//!
//! Non-finite coordinates or magnitudes are rejected with
//! [`BrowserError::InvalidCatalogRecord`](crate::browser_errors::BrowserError::InvalidCatalogRecord).
use std::collections::HashMap;
use std::io::Read;

use hifitime::Epoch;
use itertools::Itertools;
use nalgebra::Vector3;
use ordered_float::NotNan;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{
    observation_context::ObservationContext, star_browser_kind::StarBrowserKind, CatalogEntry,
    CatalogKind, CatalogQueryPort, ObjectHandle,
};
use crate::browser_errors::BrowserError;
use crate::constants::{
    LightYear, Magnitude, ObjectName, TypeTag, DEFAULT_STAR_LIMIT, LY_PER_PARSEC,
    MIN_STAR_DISTANCE,
};

const STAR_CLASS: u64 = 1;
const DSO_CLASS: u64 = 2;
const BODY_CLASS: u64 = 3;

/// Largest index a handle can encode within one object class
const MAX_INDEX: usize = u32::MAX as usize;

/// Type tag reported for stars
pub const STAR_TYPE_TAG: &str = "star";

/// Star row of a catalog CSV file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StarRecord {
    pub name: ObjectName,
    pub x: LightYear,
    pub y: LightYear,
    pub z: LightYear,
    pub absolute_magnitude: Magnitude,
    #[serde(default)]
    pub has_planets: bool,
}

impl StarRecord {
    pub fn new(
        name: impl Into<String>,
        position: Vector3<LightYear>,
        absolute_magnitude: Magnitude,
        has_planets: bool,
    ) -> Self {
        StarRecord {
            name: name.into(),
            x: position.x,
            y: position.y,
            z: position.z,
            absolute_magnitude,
            has_planets,
        }
    }

    pub fn position(&self) -> Vector3<LightYear> {
        Vector3::new(self.x, self.y, self.z)
    }
}

/// Deep-sky object row of a catalog CSV file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DsoRecord {
    pub name: ObjectName,
    pub type_tag: TypeTag,
}

/// Solar-system body row of a catalog CSV file.
///
/// `primary` is the name of the object the body orbits (a star or another body).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BodyRecord {
    pub name: ObjectName,
    pub type_tag: TypeTag,
    pub primary: ObjectName,
}

/// Vector-backed catalog implementing [`CatalogQueryPort`].
#[derive(Debug, Clone)]
pub struct InMemoryCatalog {
    stars: Vec<StarRecord>,
    dsos: Vec<DsoRecord>,
    bodies: Vec<BodyRecord>,
    names: HashMap<ObjectName, ObjectHandle>,
    star_limit: usize,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        InMemoryCatalog {
            stars: Vec::new(),
            dsos: Vec::new(),
            bodies: Vec::new(),
            names: HashMap::new(),
            star_limit: DEFAULT_STAR_LIMIT,
        }
    }

    /// Set the maximum number of stars returned by a star query.
    pub fn with_star_limit(mut self, star_limit: usize) -> Self {
        self.star_limit = star_limit;
        self
    }

    pub fn star_limit(&self) -> usize {
        self.star_limit
    }

    /// Add a star and return its handle.
    ///
    /// Return
    /// ----------
    /// * The new handle, or [`BrowserError::InvalidCatalogRecord`] if the position or
    ///   magnitude is not finite.
    pub fn add_star(&mut self, star: StarRecord) -> Result<ObjectHandle, BrowserError> {
        let finite = [star.x, star.y, star.z, star.absolute_magnitude]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(BrowserError::InvalidCatalogRecord(format!(
                "star {} has a non-finite position or magnitude",
                star.name
            )));
        }
        let handle = next_handle(STAR_CLASS, self.stars.len())?;
        self.register_name(&star.name, handle);
        self.stars.push(star);
        Ok(handle)
    }

    pub fn add_deep_sky(&mut self, dso: DsoRecord) -> Result<ObjectHandle, BrowserError> {
        let handle = next_handle(DSO_CLASS, self.dsos.len())?;
        self.register_name(&dso.name, handle);
        self.dsos.push(dso);
        Ok(handle)
    }

    pub fn add_body(&mut self, body: BodyRecord) -> Result<ObjectHandle, BrowserError> {
        let handle = next_handle(BODY_CLASS, self.bodies.len())?;
        self.register_name(&body.name, handle);
        self.bodies.push(body);
        Ok(handle)
    }

    /// Read stars from a CSV reader (`name,x,y,z,absolute_magnitude,has_planets`).
    ///
    /// Return
    /// ----------
    /// * The number of stars added.
    pub fn load_stars<R: Read>(&mut self, reader: R) -> Result<usize, BrowserError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut count = 0;
        for record in csv_reader.deserialize::<StarRecord>() {
            self.add_star(record?)?;
            count += 1;
        }
        debug!(count, "loaded stars");
        Ok(count)
    }

    /// Read deep-sky objects from a CSV reader (`name,type_tag`).
    pub fn load_deep_sky<R: Read>(&mut self, reader: R) -> Result<usize, BrowserError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let records: Vec<DsoRecord> = csv_reader.deserialize().collect::<Result<_, _>>()?;
        let count = records.len();
        for record in records {
            self.add_deep_sky(record)?;
        }
        debug!(count, "loaded deep sky objects");
        Ok(count)
    }

    /// Read solar-system bodies from a CSV reader (`name,type_tag,primary`).
    pub fn load_bodies<R: Read>(&mut self, reader: R) -> Result<usize, BrowserError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let records: Vec<BodyRecord> = csv_reader.deserialize().collect::<Result<_, _>>()?;
        let count = records.len();
        for record in records {
            self.add_body(record)?;
        }
        debug!(count, "loaded solar system bodies");
        Ok(count)
    }

    // The first object registered under a name keeps it.
    fn register_name(&mut self, name: &str, handle: ObjectHandle) {
        self.names.entry(name.to_string()).or_insert(handle);
    }

    fn star_entry(&self, index: usize) -> CatalogEntry {
        CatalogEntry::new(
            self.stars[index].name.clone(),
            STAR_TYPE_TAG,
            encode(STAR_CLASS, index),
        )
    }

    fn ranked_stars(
        &self,
        kind: StarBrowserKind,
        context: Option<&ObservationContext>,
    ) -> Vec<CatalogEntry> {
        let origin;
        let observer = match context {
            Some(context) => context,
            None => {
                origin = ObservationContext::at_origin(Epoch::from_tai_seconds(0.0));
                &origin
            }
        };

        let rank_key = |star: &StarRecord| match kind {
            StarBrowserKind::Nearest | StarBrowserKind::WithPlanets => {
                observer.distance_to(&star.position())
            }
            StarBrowserKind::Brighter => apparent_magnitude(
                star.absolute_magnitude,
                observer.distance_to(&star.position()),
            ),
            StarBrowserKind::Brightest => star.absolute_magnitude,
        };

        (0..self.stars.len())
            .filter(|&i| kind != StarBrowserKind::WithPlanets || self.stars[i].has_planets)
            .filter_map(|i| match NotNan::new(rank_key(&self.stars[i])) {
                Ok(key) => Some((key, i)),
                Err(_) => {
                    warn!(star = %self.stars[i].name, %kind, "NaN ranking key, star skipped");
                    None
                }
            })
            .sorted_by_key(|(key, _)| *key)
            .take(self.star_limit)
            .map(|(_, i)| self.star_entry(i))
            .collect_vec()
    }

    fn satellites_of(&self, primary: ObjectHandle) -> Vec<CatalogEntry> {
        let Some(primary_name) = self.name_of(primary) else {
            return Vec::new();
        };
        self.bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| body.primary == primary_name)
            .map(|(i, body)| {
                CatalogEntry::new(body.name.clone(), body.type_tag.clone(), encode(BODY_CLASS, i))
            })
            .collect()
    }

    fn name_of(&self, handle: ObjectHandle) -> Option<&str> {
        let (class, index) = decode(handle);
        match class {
            STAR_CLASS => self.stars.get(index).map(|s| s.name.as_str()),
            DSO_CLASS => self.dsos.get(index).map(|d| d.name.as_str()),
            BODY_CLASS => self.bodies.get(index).map(|b| b.name.as_str()),
            _ => None,
        }
    }
}

impl CatalogQueryPort for InMemoryCatalog {
    fn lookup_by_name(&self, name: &str) -> Option<ObjectHandle> {
        self.names.get(name).copied()
    }

    fn query_catalog(
        &self,
        kind: CatalogKind,
        context: Option<&ObservationContext>,
    ) -> Vec<CatalogEntry> {
        match kind {
            CatalogKind::Stars(star_kind) => self.ranked_stars(star_kind, context),
            CatalogKind::DeepSky => self
                .dsos
                .iter()
                .enumerate()
                .map(|(i, dso)| {
                    CatalogEntry::new(dso.name.clone(), dso.type_tag.clone(), encode(DSO_CLASS, i))
                })
                .collect(),
            CatalogKind::SolarSystem { primary } => self.satellites_of(primary),
        }
    }

    fn canonical_name(&self, handle: ObjectHandle) -> String {
        self.name_of(handle).unwrap_or("?").to_string()
    }
}

/// Apparent magnitude of a star of absolute magnitude `absolute` seen from `distance` light-years.
pub fn apparent_magnitude(absolute: Magnitude, distance: LightYear) -> Magnitude {
    let parsecs = distance.max(MIN_STAR_DISTANCE) / LY_PER_PARSEC;
    absolute + 5.0 * parsecs.log10() - 5.0
}

/// Handle of the object stored at `index`, rejecting indices the handle layout cannot hold.
fn next_handle(class: u64, index: usize) -> Result<ObjectHandle, BrowserError> {
    if index > MAX_INDEX {
        return Err(BrowserError::InvalidCatalogRecord(format!(
            "object class {class} is full ({} entries)",
            MAX_INDEX as u64 + 1
        )));
    }
    Ok(encode(class, index))
}

fn encode(class: u64, index: usize) -> ObjectHandle {
    debug_assert!(index <= MAX_INDEX, "index {index} overflows the handle layout");
    ObjectHandle::from_raw((class << 32) | index as u64)
}

fn decode(handle: ObjectHandle) -> (u64, usize) {
    let raw = handle.raw();
    (raw >> 32, (raw & 0xFFFF_FFFF) as usize)
}
