//! Continuous scalar-field sampling.
//!
//! A landscape is a sum of independently parameterized 2D Gaussians,
//! evaluated over real-valued coordinates. Grid construction samples this
//! field at cell centers.

use crate::error::GameError;
use serde::{Deserialize, Serialize};

/// A single 2D Gaussian bump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    pub amplitude: f64,
    pub x0: f64,
    pub y0: f64,
    pub sigma_x: f64,
    pub sigma_y: f64,
}

impl Gaussian {
    /// Create a Gaussian, rejecting non-positive or non-finite sigmas.
    pub fn new(
        amplitude: f64,
        x0: f64,
        y0: f64,
        sigma_x: f64,
        sigma_y: f64,
    ) -> Result<Self, GameError> {
        if !(sigma_x > 0.0 && sigma_x.is_finite()) {
            return Err(GameError::InvalidParameter(format!(
                "sigma_x must be positive and finite, got {sigma_x}"
            )));
        }
        if !(sigma_y > 0.0 && sigma_y.is_finite()) {
            return Err(GameError::InvalidParameter(format!(
                "sigma_y must be positive and finite, got {sigma_y}"
            )));
        }
        if !(amplitude.is_finite() && x0.is_finite() && y0.is_finite()) {
            return Err(GameError::InvalidParameter(
                "gaussian amplitude/center must be finite".to_string(),
            ));
        }
        Ok(Self {
            amplitude,
            x0,
            y0,
            sigma_x,
            sigma_y,
        })
    }

    /// Evaluate at a real-valued point.
    #[inline]
    pub fn value_at(&self, x: f64, y: f64) -> f64 {
        let dx = x - self.x0;
        let dy = y - self.y0;
        let exponent = dx * dx / (2.0 * self.sigma_x * self.sigma_x)
            + dy * dy / (2.0 * self.sigma_y * self.sigma_y);
        self.amplitude * (-exponent).exp()
    }
}

/// A scalar field composed of Gaussian terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    terms: Vec<Gaussian>,
}

impl Field {
    /// Build a field from Gaussian terms. An empty landscape is rejected.
    pub fn new(terms: Vec<Gaussian>) -> Result<Self, GameError> {
        if terms.is_empty() {
            return Err(GameError::InvalidParameter(
                "field needs at least one gaussian term".to_string(),
            ));
        }
        Ok(Self { terms })
    }

    /// Sum of all terms at a point.
    #[inline]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        self.terms.iter().map(|g| g.value_at(x, y)).sum()
    }

    /// Number of Gaussian terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
