//! Network plumbing: Wi-Fi association, SNTP, and the color feed

pub mod cheer;
pub mod sntp;
pub mod wifi;
