pub mod relay;

pub use relay::{CrossPlatformPush, DirectPush, PushRelay};
