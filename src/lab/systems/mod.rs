//! Lab systems
//!
//! - `pour` - start and advance the pour, transfer fill
//! - `contents` - flask liquid, tube proxies, reagent log
//! - `clipping` - per-frame clip planes

pub mod clipping;
pub mod contents;
pub mod pour;

pub use clipping::*;
pub use contents::*;
pub use pour::*;
