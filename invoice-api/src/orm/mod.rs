pub mod company;
mod db;
pub mod invoice;
#[cfg(any(test, feature = "test-staging"))]
pub mod testing;

pub use db::*;
