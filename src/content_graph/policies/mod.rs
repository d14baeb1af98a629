mod delivery_policy;
mod upload_exclusion;

pub use delivery_policy::DeliveryPolicy;
pub use upload_exclusion::UploadExclusionPolicy;
