//! View-state model and reference data for the MEP Digital Ecosystem dashboard.
//!
//! Holds the fixed stage/step catalog, the route table shared by the gateway
//! and the SSR renderer, the bounded view-state controllers and the
//! self-expiring copy feedback used by the share modal.

pub mod copy_feedback;
pub mod reference_catalog;
pub mod route_table;
pub mod view_state;

pub use copy_feedback::*;
pub use reference_catalog::*;
pub use route_table::*;
pub use view_state::*;
