//! Role dashboards.
//!
//! Each dashboard loads its data concurrently, then keeps it current by
//! folding mutation responses into local state instead of refetching.
//! State is only written through `&mut self` inside the returned futures,
//! so dropping a pending load leaves the dashboard untouched.

mod banner;
mod client;
mod seller;

pub use banner::{OrderDetails, SuccessBanner, BANNER_TTL};
pub use client::ClientDashboard;
pub use seller::SellerDashboard;
