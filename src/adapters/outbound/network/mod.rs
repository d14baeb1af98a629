/// Network adapters for the platform API
mod platform_client;

pub use platform_client::{PlatformSettings, PlatformUploadClient};
