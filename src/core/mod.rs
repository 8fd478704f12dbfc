pub mod scale;
pub mod types;

pub use scale::LinearScale;
pub use types::{CanvasGeometry, PlotParameters, PlotPoint, Viewport};
