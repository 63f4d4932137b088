//! Top-level facade crate for tallyline.
//!
//! Re-exports the core metric types and the collection pipeline so users can
//! depend on a single crate.

pub mod core {
    pub use tallyline_core::*;
}

pub mod pipeline {
    pub use tallyline_pipeline::*;
}
