use std::fmt;
use std::sync::Arc;

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::LightYear;

/// Viewpoint used by distance and brightness relative catalog queries.
///
/// The browser cache keys the star root on the *identity* of the shared context
/// (`Arc::ptr_eq`), not on its value: two contexts with equal fields are still two
/// different viewpoints for caching purposes. Move the observer by creating a new
/// context.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationContext {
    /// Observer position in light-years, in the frame of the star catalog.
    pub position: Vector3<LightYear>,

    /// Simulation time of the observation.
    pub epoch: Epoch,

    /// Optional human-readable name of the viewpoint.
    pub name: Option<String>,
}

impl ObservationContext {
    pub fn new(position: Vector3<LightYear>, epoch: Epoch, name: Option<String>) -> Self {
        ObservationContext {
            position,
            epoch,
            name,
        }
    }

    /// Observer at the catalog origin (the home star).
    pub fn at_origin(epoch: Epoch) -> Self {
        ObservationContext::new(Vector3::zeros(), epoch, None)
    }

    /// Wrap the context for sharing with the browser cache.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Distance from the observer to `position`, in light-years.
    pub fn distance_to(&self, position: &Vector3<LightYear>) -> LightYear {
        (position - self.position).norm()
    }
}

impl fmt::Display for ObservationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.position;
        if let Some(name) = &self.name {
            write!(f, "{name} ")?;
        }
        write!(f, "({:.3}, {:.3}, {:.3}) ly @ {}", p.x, p.y, p.z, self.epoch)
    }
}
