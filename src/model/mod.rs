//! Resource kinds exposed by the API.
//!
//! Each kind is a zero-sized marker implementing
//! [`ResourceEntity`](crate::framework::ResourceEntity), plus typed accessors on
//! `Resource<Kind>` for the fields callers usually need and, where useful, a
//! serializable parameter struct for creating one.

pub mod company;
pub mod person;
pub mod question_set;
pub mod verification;
pub mod watchlist;

pub use company::*;
pub use person::*;
pub use question_set::*;
pub use verification::*;
pub use watchlist::*;
