//! Tool definitions module.
//!
//! Each tool maps to one read-only DigitalOcean API operation.

pub mod account;
pub mod common;
pub mod droplets;
pub mod regions;

pub use account::{AccountGetTool, BalanceGetTool};
pub use droplets::{DropletGetParams, DropletGetTool, DropletListParams, DropletListTool};
pub use regions::{RegionListParams, RegionListTool};
