//! Operational tooling for the applicant-tracking pipeline: bulk resume
//! upload to the ingestion gateway, skill matching, demo seeding, temp
//! cleanup and a gateway smoke test.

pub mod cleanup;
pub mod config;
pub mod error;
pub mod logging;
pub mod matching;
pub mod report;
pub mod seed;
pub mod smoke;
pub mod store;
pub mod upload;

pub use config::Config;
pub use error::{Error, Result};
