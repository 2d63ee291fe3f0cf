//! proforma-geometry
//!
//! Image-map geometry: pointer normalization, polygon and rectangle capture,
//! hit testing and path serialization. Coordinates live in a 0–100 space
//! relative to the image, so areas survive any display resolution.

pub mod area;
pub mod capture;
pub mod editor;
pub mod error;
pub mod path;
pub mod point;

pub use area::{hit_test, Area, AreaColor};
pub use capture::{Capture, CaptureMode, MIN_POINT_DISTANCE};
pub use editor::{AreaEditor, EditorEvent, Key};
pub use error::GeometryError;
pub use path::serialize_path;
pub use point::{Point, Surface};
