/// Use cases module containing application business logic orchestration
mod dump_pack;
mod upload_archive;
mod upload_pack;

pub use dump_pack::DumpPackUseCase;
pub use upload_archive::UploadArchiveUseCase;
pub use upload_pack::{UploadPackUseCase, OUTER_ARCHIVE_NAME};
