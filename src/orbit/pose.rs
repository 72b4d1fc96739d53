//! Where the fish is drawn and which way it faces

use glam::DVec2;
use serde::Serialize;

use crate::polar_to_cartesian;
use crate::settings::BowlGeometry;

/// Fish placement on the swim path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    /// Center of the fish (SVG units)
    pub position: DVec2,
    /// Rotation in degrees, tangent to the path in the direction of travel
    pub heading_deg: f64,
}

impl Pose {
    /// Pose for a wrapped angle on the given circle
    pub fn on_path(geometry: &BowlGeometry, wrapped: f64) -> Self {
        Self {
            position: polar_to_cartesian(geometry.center, geometry.radius, wrapped),
            // Sprite nose is +x at rotation 0; the tangent is a quarter turn past the radius
            heading_deg: wrapped.to_degrees() + 90.0,
        }
    }

    /// SVG `transform` attribute value
    pub fn svg_transform(&self) -> String {
        format!(
            "translate({},{}) rotate({})",
            self.position.x, self.position.y, self.heading_deg
        )
    }

    /// Same placement as a CSS transform (units required), for Web Animations keyframes
    pub fn css_transform(&self) -> String {
        format!(
            "translate({}px, {}px) rotate({}deg)",
            self.position.x, self.position.y, self.heading_deg
        )
    }
}
