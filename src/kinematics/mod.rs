pub mod forward;
pub mod inverse;
pub mod transforms;
pub mod updater;

pub use forward::*;
pub use inverse::*;
pub use transforms::*;
pub use updater::*;
