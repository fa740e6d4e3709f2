//! Admin request dashboard: pending requests joined with pets, plus the
//! list of completed adoptions.

pub mod images;
pub mod service;
pub mod state;

pub use images::ImageUrlResolver;
pub use service::{DashboardService, DashboardView};
pub use state::{distinct_pet_ids, DashboardState, PendingRequestView, SuccessEntryView, PET_PLACEHOLDER};
