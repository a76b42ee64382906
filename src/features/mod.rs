//! Feature construction: categorical encoding, derived features, scaling,
//! and final vector assembly.
//!
//! Everything in here pairs values to feature *names*; positional order only
//! appears at the very end, when the vector is assembled against the
//! bundle's declared input order.

pub mod encode;
pub mod scale;

pub use encode::{encode_record, EncodedRecord};
pub use scale::{assemble_vector, scale_record};
