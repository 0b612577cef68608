//! Outbound HTTP probing used by the reachability worker.

mod reqwest_probe;
mod service;

pub use reqwest_probe::ReqwestProbe;
pub use service::{HttpProbe, ProbeError};

#[cfg(test)]
pub use service::MockHttpProbe;
