//! Meteorological core
//!
//! The three stateful and stateless stages a region's hour passes through:
//! the [`SystemScheduler`] moves pressure systems, [`synthesize`] turns them
//! into fields, and the [`TrendTracker`] derives trend and instability from
//! the rolling history.

pub(crate) mod rng;
pub mod scheduler;
pub mod synthesizer;
pub mod trend;

pub use scheduler::SystemScheduler;
pub use synthesizer::{feels_like, synthesize, FieldSample};
pub use trend::{instability_index, TrendEntry, TrendReading, TrendTracker};
