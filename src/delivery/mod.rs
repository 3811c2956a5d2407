//! Automatic "deliver cargo to container" sequence.
//!
//! A detected collision arms the sequencer, which takes the rig away from the
//! user, lifts the claw, slews to the container bearing, runs the trolley out
//! to the drop point, lowers and releases, lifts again and hands control back.

pub mod plan;
pub mod sequencer;

pub use plan::*;
pub use sequencer::*;
