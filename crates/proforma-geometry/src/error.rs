use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("reference surface has no area ({width}x{height} px)")]
    EmptySurface { width: f64, height: f64 },

    #[error("area index {index} out of range ({len} areas)")]
    AreaOutOfRange { index: usize, len: usize },
}
