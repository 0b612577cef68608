//! Business logic services for the application layer.

pub mod link_service;
pub mod qr_service;
pub mod rate_limiter;
pub mod reachability_service;
pub mod redirect_service;

pub use link_service::{CreateShortUrl, LinkService};
pub use qr_service::{QrImage, QrService};
pub use rate_limiter::{LimitInfo, TokenBucketLimiter};
pub use reachability_service::ReachabilityService;
pub use redirect_service::RedirectService;
