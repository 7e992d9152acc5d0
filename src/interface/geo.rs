use crate::shared::config;
use crate::shared::error::GeoError;
use crate::shared::ports::geo::{Coordinates, GeoFuture, GeoPort};

/// Serves a fixed position from configuration, or denies the lookup when
/// none is set. Headless hosts have no real positioning source.
#[derive(Clone, Debug)]
pub struct StaticGeo {
    position: Option<(f64, f64)>,
}

impl StaticGeo {
    pub fn new(position: Option<(f64, f64)>) -> Self {
        Self { position }
    }

    pub fn from_env() -> Self {
        Self::new(config::geo_config().fixed_position())
    }
}

impl GeoPort for StaticGeo {
    fn current_position(&self) -> GeoFuture {
        let position = self.position;
        Box::pin(async move {
            match position {
                Some((latitude, longitude)) => Ok(Coordinates {
                    latitude,
                    longitude,
                    accuracy_m: 0.0,
                    altitude_m: None,
                }),
                None => Err(GeoError::Denied),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn configured_position_is_served() {
        let geo = StaticGeo::new(Some((35.6812, 139.7671)));
        let pos = geo.current_position().await.expect("position");
        assert!((pos.latitude - 35.6812).abs() < f64::EPSILON);
        assert!((pos.longitude - 139.7671).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn missing_position_is_denied() {
        let geo = StaticGeo::new(None);
        assert_eq!(geo.current_position().await, Err(GeoError::Denied));
    }
}
