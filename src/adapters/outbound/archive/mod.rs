/// Archive adapters for zipping dumped packs
mod zip_archiver;

pub use zip_archiver::ZipArchiver;
