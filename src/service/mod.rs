//! QueryService: the read operations handlers call.

mod query;
pub use query::{QueryService, BAKERY_NOT_FOUND, NO_BAKED_GOODS};
