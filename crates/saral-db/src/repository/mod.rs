//! # Repository Layer
//!
//! One repository per aggregate, each a thin struct over a pool clone.
//! The repositories cover the simple read/write surface; the only
//! multi-step write path (checkout) lives in [`crate::checkout`].

pub mod audit;
pub mod bill;
pub mod customer;
pub mod product;
