//! HTTP backend for the care pages.

mod client;
mod error;

pub use client::{
    CareClient, CareClientBuilder, Missing, REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE, Set,
};
pub use error::ClientError;
