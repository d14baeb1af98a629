//! packwright - dump and upload content packs described by a content graph
//!
//! This library turns a content graph export (packs, content items and the
//! relationships between them) into packs laid out the way the platform
//! expects, and uploads them either as one zip per pack or item by item,
//! following hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`content_graph`): Graph store, pack aggregate, policies and text services
//! - **Application Layer** (`application`): Dump and upload use cases and their DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Filesystem, zip, HTTP and console implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use packwright::prelude::*;
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> Result<()> {
//! let graph = GraphFileReader::new().read_graph(Path::new("graph.json"), Path::new("."))?;
//! let mut pack = Pack::load(&graph, "HelloWorld")?;
//!
//! let use_case = DumpPackUseCase::new(
//!     FileSystemItemSerializer::new(),
//!     FileSystemArtifactStore::new(),
//!     StderrProgressReporter::new(),
//! );
//! let request = DumpRequest::new(PathBuf::from("out/HelloWorld"), Marketplace::Xsoar);
//! let summary = use_case.execute(&mut pack, &graph, &request)?;
//! println!("{} item(s) written", summary.dumped.len());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod content_graph;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::archive::ZipArchiver;
    pub use crate::adapters::outbound::console::{StderrProgressReporter, UploadSummaryPrinter};
    pub use crate::adapters::outbound::filesystem::{
        FileSystemArtifactStore, FileSystemItemSerializer, GraphFileReader,
    };
    pub use crate::adapters::outbound::network::{PlatformSettings, PlatformUploadClient};
    pub use crate::application::dto::{DumpRequest, DumpSummary, UploadOutcome, UploadRequest};
    pub use crate::application::use_cases::{
        DumpPackUseCase, UploadArchiveUseCase, UploadPackUseCase,
    };
    pub use crate::content_graph::domain::{
        ContentGraph, ContentItem, ContentType, ContentVersion, Marketplace, Pack, UploadError,
    };
    pub use crate::content_graph::policies::{DeliveryPolicy, UploadExclusionPolicy};
    pub use crate::ports::outbound::{
        Archiver, ArtifactStore, GraphReader, ItemSerializer, ProgressReporter, UploadClient,
    };
    pub use crate::shared::Result;
}
