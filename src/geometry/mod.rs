pub mod surface;
pub mod trim;

pub use surface::{Cone, Cylinder, NurbsSurface, Plane, Sphere, Surface, SurfaceDomain};
pub use trim::{TrimLoop, TrimRegion};
