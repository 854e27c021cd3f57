pub mod intersection;
pub mod point_location;
pub mod tessellation;

#[doc(inline)]
pub use point_location::locate_in_rings;
#[doc(inline)]
pub use tessellation::{tessellate_rings, Tessellator};
