pub mod carousel;
pub mod crane;
pub mod props;

pub use carousel::Carousel;
pub use crane::{CraneDimensions, CraneRig, DimensionError, JointLimits};
pub use props::{CargoId, CargoItem, CargoState, ContainerTarget};
