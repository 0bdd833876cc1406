//! # Catalog query port
//!
//! The browser does not own any astronomical data. Everything it lists comes from a
//! simulation engine through the [`CatalogQueryPort`](crate::catalog::CatalogQueryPort)
//! trait, which exposes three operations:
//!
//! - **Lookup** of a single object by name ([`lookup_by_name`](crate::catalog::CatalogQueryPort::lookup_by_name)),
//!   used to find the home star of the solar-system root.
//! - **Queries** returning a flat, already ranked list of entries
//!   ([`query_catalog`](crate::catalog::CatalogQueryPort::query_catalog)) for stars, deep-sky
//!   objects, or the satellites of a solar-system body.
//! - **Canonical naming** of an object handle ([`canonical_name`](crate::catalog::CatalogQueryPort::canonical_name)).
//!   Display names of leaves always come from here, never from local formatting.
//!
//! ## Handles
//!
//! [`ObjectHandle`](crate::catalog::ObjectHandle) is an opaque, copyable identifier chosen by the
//! catalog implementation. The browser stores it in leaves and hands it back to the
//! presentation layer unchanged.
//!
//! ## Threading
//!
//! All port calls are synchronous and happen on the thread that owns the catalog and the
//! observation context. Implementations are not required to be `Sync`.
//!
//! ## See also
//! ------------
//! * [`InMemoryCatalog`](crate::catalog::memory_catalog::InMemoryCatalog) – Reference implementation backed by vectors.
//! * [`ObservationContext`](crate::catalog::observation_context::ObservationContext) – Viewpoint for relative rankings.
//! * [`StarBrowserKind`](crate::catalog::star_browser_kind::StarBrowserKind) – Star rankings.

pub mod memory_catalog;
pub mod observation_context;
pub mod star_browser_kind;

use std::fmt;

use crate::constants::{ObjectName, TypeTag};
use observation_context::ObservationContext;
use star_browser_kind::StarBrowserKind;

/// Opaque identifier of a catalog object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(u64);

impl ObjectHandle {
    pub fn from_raw(raw: u64) -> Self {
        ObjectHandle(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

/// One row of a catalog query result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Raw catalog name of the object
    pub name: ObjectName,
    /// Type tag used for grouping (e.g. `"SBc"`, `"Glob"`, `"planet"`)
    pub type_tag: TypeTag,
    pub handle: ObjectHandle,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, type_tag: impl Into<String>, handle: ObjectHandle) -> Self {
        CatalogEntry {
            name: name.into(),
            type_tag: type_tag.into(),
            handle,
        }
    }
}

/// Which flat list a query should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// Stars ranked according to the given kind
    Stars(StarBrowserKind),
    /// The full deep-sky catalog, in catalog index order
    DeepSky,
    /// Bodies orbiting `primary`, in catalog order
    SolarSystem { primary: ObjectHandle },
}

impl CatalogKind {
    pub fn needs_context(self) -> bool {
        match self {
            CatalogKind::Stars(kind) => kind.needs_context(),
            CatalogKind::DeepSky | CatalogKind::SolarSystem { .. } => false,
        }
    }
}

/// Contract consumed from the simulation engine.
pub trait CatalogQueryPort {
    /// Find an object by name. `None` when the catalog does not contain it.
    fn lookup_by_name(&self, name: &str) -> Option<ObjectHandle>;

    /// Return the flat list of entries of `kind`, in the order the catalog ranks them.
    ///
    /// `context` is only meaningful for kinds where [`CatalogKind::needs_context`] is true.
    fn query_catalog(
        &self,
        kind: CatalogKind,
        context: Option<&ObservationContext>,
    ) -> Vec<CatalogEntry>;

    /// Canonical display name of an object.
    fn canonical_name(&self, handle: ObjectHandle) -> String;
}

impl<T: CatalogQueryPort + ?Sized> CatalogQueryPort for &T {
    fn lookup_by_name(&self, name: &str) -> Option<ObjectHandle> {
        (**self).lookup_by_name(name)
    }

    fn query_catalog(
        &self,
        kind: CatalogKind,
        context: Option<&ObservationContext>,
    ) -> Vec<CatalogEntry> {
        (**self).query_catalog(kind, context)
    }

    fn canonical_name(&self, handle: ObjectHandle) -> String {
        (**self).canonical_name(handle)
    }
}
