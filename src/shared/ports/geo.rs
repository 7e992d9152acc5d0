use std::future::Future;
use std::pin::Pin;

use crate::shared::error::GeoError;

pub type GeoFuture = Pin<Box<dyn Future<Output = Result<Coordinates, GeoError>> + Send>>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: f64,
    pub altitude_m: Option<f64>,
}

/// Position lookup. Failures are surfaced inline in the requesting widget,
/// never fatal.
pub trait GeoPort: Send + Sync {
    fn current_position(&self) -> GeoFuture;
}
