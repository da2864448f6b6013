//! Arbitrary-precision CRC calculator and algorithm finder.
//!
//! The crate computes CRCs under any Williams-model parameter set and, given
//! a handful of messages with their checksums, recovers every parameter set
//! consistent with them. The pieces:
//!
//! * [`poly`] — variable-length GF(2) polynomials with explicit bit length,
//!   the storage every other module works on;
//! * [`crc`] — the division engine, augmenting and non-augmenting, with an
//!   optional quotient for the factor search;
//! * [`model`] — the Williams model bundle (poly, init, xorout, reflection,
//!   derived check and residue values) and its transformations;
//! * [`preset`] — the catalog of well-known models;
//! * [`reverse`] — the search core: GCD of sample differences, factor
//!   enumeration, GF(2) row reduction for Init and algebraic recovery of
//!   XorOut;
//! * [`text`] — reading and writing polynomials as hex or raw bytes.
//!
//! The search is synchronous and single-threaded; findings stream through
//! the [`reverse::SearchReport`] trait in discovery order and are also
//! returned as a vector.

pub mod crc;
pub mod model;
pub mod poly;
pub mod preset;
pub mod reverse;
pub mod text;

pub use model::{Model, ModelFlags};
pub use poly::Poly;
pub use reverse::{search, Known, SearchReport};

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
