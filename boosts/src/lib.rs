//! Boost targeting and selection rules.
//!
//! Everything here is a pure function of its arguments: callers pass in the
//! active boosts, the profile defaults and the current instant. Nothing reads
//! the clock, the network or any storage.

pub mod boost;
pub mod category;
pub mod coordinates;
pub mod counties;
pub mod dialog;
pub mod form;
pub mod pricing;
pub mod selection;
