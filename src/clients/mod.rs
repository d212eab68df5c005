//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod api_client;
pub mod company_client;
pub mod person_client;
pub mod question_set_client;
pub mod verification_client;
pub mod watchlist_client;

pub use api_client::*;
pub use company_client::*;
pub use person_client::*;
pub use question_set_client::*;
pub use verification_client::*;
pub use watchlist_client::*;
