use math_reviews::reviews::{DataLocation, PageOptions, ReviewLoader, ReviewSource};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub readiness: Arc<AtomicBool>,
    pub metrics: Arc<PrometheusHandle>,
}

/// Everything the review routes need: where the data lives, how to load
/// it, and how pages are titled.
pub struct SiteContext<S: ReviewSource> {
    pub loader: ReviewLoader<S>,
    pub location: DataLocation,
    pub options: PageOptions,
}

impl<S: ReviewSource> SiteContext<S> {
    pub fn new(source: S, location: DataLocation, options: PageOptions) -> Self {
        Self {
            loader: ReviewLoader::new(source),
            location,
            options,
        }
    }
}

/// Command-line `--data` wins over the configured location.
pub(crate) fn resolve_location(flag: Option<&str>, configured: &DataLocation) -> DataLocation {
    match flag.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => DataLocation::parse(value),
        None => configured.clone(),
    }
}
