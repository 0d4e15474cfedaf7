//! Campaign reporting pipeline — filtering, metric aggregation, and sort
//! composition over decoded campaign records.
//!
//! Every stage is a pure function of its inputs; the only state is the
//! caller-owned [`session::SessionContext`].

pub mod aggregate;
pub mod filter;
pub mod session;
pub mod sort;

pub use aggregate::{distinct_names, global_summary, group_rows};
pub use filter::apply_filters;
pub use session::{CampaignView, SessionContext};
pub use sort::sort_rows;
