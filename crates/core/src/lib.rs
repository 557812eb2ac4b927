//! `cattery-core`: domain building blocks.
//!
//! This crate contains **pure domain** types (no infrastructure concerns):
//! the `Cat` entity, its creation input, identifiers, and the injectable
//! clock / id-generator collaborators.

pub mod cat;
pub mod clock;
pub mod error;
pub mod id;

pub use cat::{Cat, CatDto};
pub use clock::{
    Clock, FixedClock, FixedIdGenerator, IdGenerator, RandomIdGenerator, SequenceIdGenerator,
    SystemClock,
};
pub use error::DomainError;
pub use id::CatId;
