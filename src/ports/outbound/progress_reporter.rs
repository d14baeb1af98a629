/// ProgressReporter port for user-facing progress of dumps and uploads
///
/// Structured diagnostics go through `tracing`; this port carries the short
/// messages a person running the CLI follows (stderr in the CLI).
pub trait ProgressReporter {
    /// Reports a milestone ("📦 Dumping pack ...")
    fn report(&self, message: &str);

    /// Reports position within a sequence of items
    ///
    /// # Arguments
    /// * `current` - Items processed so far
    /// * `total` - Total items
    /// * `message` - Optional label for the current item
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports something skipped or degraded that did not stop the run
    fn report_warning(&self, message: &str);

    /// Reports an error message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
