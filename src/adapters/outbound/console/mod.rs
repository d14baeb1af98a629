/// Console adapters for progress and summaries on stderr
mod progress_reporter;
mod summary_printer;

pub use progress_reporter::StderrProgressReporter;
pub use summary_printer::UploadSummaryPrinter;
