use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use spg_core::errors::{ErrorInfo, SpgError};

/// Tolerance used when matching a [`Region::Point`].
pub const POINT_TOLERANCE: f64 = 1e-12;

/// Two-dimensional region of interest, tagged by `type`.
///
/// Angles are in radians, measured anticlockwise from the first axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Region {
    /// Disc around `centre`.
    Circular {
        /// Centre of the disc.
        centre: [f64; 2],
        /// Radius of the disc.
        radius: f64,
    },
    /// Rotated ellipse around `centre`.
    Elliptical {
        /// Centre of the ellipse.
        centre: [f64; 2],
        /// Semi-axis lengths before rotation.
        semiaxes: [f64; 2],
        /// Rotation of the first semi-axis.
        #[serde(default)]
        angle: f64,
    },
    /// A single coordinate pair.
    Point {
        /// The matched coordinates.
        point: [f64; 2],
    },
    /// Simple polygon given by its vertex coordinates.
    Polygonal {
        /// First-axis coordinates of the vertices.
        points_x: Vec<f64>,
        /// Second-axis coordinates of the vertices.
        points_y: Vec<f64>,
    },
    /// Rectangle anchored at `start`, rotated about it.
    Rectangular {
        /// Anchor corner.
        start: [f64; 2],
        /// Extent along the rotated first axis.
        width: f64,
        /// Extent along the rotated second axis.
        height: f64,
        /// Rotation about `start`.
        #[serde(default)]
        angle: f64,
    },
    /// Annular sector around `centre`.
    Sector {
        /// Centre of the annulus.
        centre: [f64; 2],
        /// Inner and outer radius.
        radii: [f64; 2],
        /// Start and end angle.
        angles: [f64; 2],
    },
}

fn invalid(kind: &str, code: &str, message: &str) -> SpgError {
    SpgError::Configuration(ErrorInfo::new(code, message).with_context("region", kind))
}

fn finite(kind: &str, values: &[f64]) -> Result<(), SpgError> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(invalid(kind, "non-finite", "region parameters must be finite"))
    }
}

impl Region {
    /// Short name of the region kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Region::Circular { .. } => "circular",
            Region::Elliptical { .. } => "elliptical",
            Region::Point { .. } => "point",
            Region::Polygonal { .. } => "polygonal",
            Region::Rectangular { .. } => "rectangular",
            Region::Sector { .. } => "sector",
        }
    }

    /// Checks the geometric parameters.
    pub fn validate(&self) -> Result<(), SpgError> {
        let kind = self.kind();
        match self {
            Region::Circular { centre, radius } => {
                finite(kind, centre)?;
                finite(kind, &[*radius])?;
                if *radius <= 0.0 {
                    return Err(invalid(kind, "non-positive", "radius must be positive"));
                }
            }
            Region::Elliptical {
                centre,
                semiaxes,
                angle,
            } => {
                finite(kind, centre)?;
                finite(kind, semiaxes)?;
                finite(kind, &[*angle])?;
                if semiaxes.iter().any(|axis| *axis <= 0.0) {
                    return Err(invalid(kind, "non-positive", "semi-axes must be positive"));
                }
            }
            Region::Point { point } => finite(kind, point)?,
            Region::Polygonal { points_x, points_y } => {
                if points_x.len() != points_y.len() {
                    return Err(invalid(
                        kind,
                        "length-mismatch",
                        "polygon coordinate lists must have equal length",
                    ));
                }
                if points_x.len() < 3 {
                    return Err(invalid(kind, "degenerate", "polygon needs at least three vertices"));
                }
                finite(kind, points_x)?;
                finite(kind, points_y)?;
            }
            Region::Rectangular {
                start,
                width,
                height,
                angle,
            } => {
                finite(kind, start)?;
                finite(kind, &[*width, *height, *angle])?;
                if *width <= 0.0 || *height <= 0.0 {
                    return Err(invalid(kind, "non-positive", "width and height must be positive"));
                }
            }
            Region::Sector {
                centre,
                radii,
                angles,
            } => {
                finite(kind, centre)?;
                finite(kind, radii)?;
                finite(kind, angles)?;
                if radii[0] < 0.0 || radii[1] <= radii[0] {
                    return Err(invalid(
                        kind,
                        "bad-radii",
                        "sector radii must satisfy 0 <= inner < outer",
                    ));
                }
                if angles[1] <= angles[0] {
                    return Err(invalid(kind, "bad-angles", "sector end angle must exceed start"));
                }
            }
        }
        Ok(())
    }

    /// Returns true when `(x, y)` lies inside the region (boundary included).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Region::Circular { centre, radius } => {
                let (dx, dy) = (x - centre[0], y - centre[1]);
                dx * dx + dy * dy <= radius * radius
            }
            Region::Elliptical {
                centre,
                semiaxes,
                angle,
            } => {
                let (u, v) = rotate(x - centre[0], y - centre[1], -angle);
                (u / semiaxes[0]).powi(2) + (v / semiaxes[1]).powi(2) <= 1.0
            }
            Region::Point { point } => {
                (x - point[0]).abs() <= POINT_TOLERANCE && (y - point[1]).abs() <= POINT_TOLERANCE
            }
            Region::Polygonal { points_x, points_y } => {
                polygon_contains(points_x, points_y, x, y)
            }
            Region::Rectangular {
                start,
                width,
                height,
                angle,
            } => {
                let (u, v) = rotate(x - start[0], y - start[1], -angle);
                (0.0..=*width).contains(&u) && (0.0..=*height).contains(&v)
            }
            Region::Sector {
                centre,
                radii,
                angles,
            } => {
                let (dx, dy) = (x - centre[0], y - centre[1]);
                let distance = (dx * dx + dy * dy).sqrt();
                if distance < radii[0] || distance > radii[1] {
                    return false;
                }
                if angles[1] - angles[0] >= TAU {
                    return true;
                }
                let relative = (dy.atan2(dx) - angles[0]).rem_euclid(TAU);
                relative <= angles[1] - angles[0]
            }
        }
    }
}

fn rotate(x: f64, y: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (x * cos - y * sin, x * sin + y * cos)
}

// Even-odd rule.
fn polygon_contains(points_x: &[f64], points_y: &[f64], x: f64, y: f64) -> bool {
    let count = points_x.len().min(points_y.len());
    if count < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = count - 1;
    for i in 0..count {
        let (xi, yi) = (points_x[i], points_y[i]);
        let (xj, yj) = (points_x[j], points_y[j]);
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
