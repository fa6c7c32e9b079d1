//! Splitter flows.
//!
//! - [`factory`]: validate recipients, deploy a splitter, decode its address
//!   from the `SplitterCreated` event
//! - [`aggregator`]: read a splitter's recipients, shares and token balance
//!   as one consistent snapshot with per-recipient entitlements
//! - [`distribution`]: guard, submit and track `distribute()`
//! - [`service`]: the three flows wired to one network's deployments
//!
//! All chain access goes through [`splitter_chain::ChainClient`]; nothing is
//! cached between calls.

pub mod aggregator;
pub mod constants;
pub mod distribution;
pub mod error;
pub mod factory;
mod guard;
pub mod service;
pub mod validation;

pub use aggregator::{compute_entitlements, SplitterReader};
pub use distribution::{Distributed, Distributor};
pub use error::{ErrorKind, SplitterError, ValidationError};
pub use factory::{extract_creation, CreationResult, SplitterFactory};
pub use service::{DistributionReport, SplitterService};
pub use validation::{suggest_next_share, total_shares, validate_recipients, ValidatedRecipients};
