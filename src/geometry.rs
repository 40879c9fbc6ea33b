//! Plot geometry calculator
//!
//! Converts user-supplied linear measurements into area and perimeter for
//! square and rectangular plots. Pure computation; saving the result as a
//! planting record is the ledger's job.

use serde::Serialize;

use crate::error::FarmError;
use crate::types::{PlotDimensions, ShapeKind};

/// Square meters in one hectare.
pub const SQUARE_METERS_PER_HECTARE: f64 = 10_000.0;

/// Result of one geometry calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotComputation {
    pub shape: ShapeKind,

    pub dimensions: PlotDimensions,

    pub area_square_meters: f64,

    pub area_hectares: f64,

    pub perimeter_meters: f64,
}

/// Compute area and perimeter for a plot.
///
/// `side` is the square's side or the rectangle's width; `height` is only
/// consulted for rectangles, where it is required. All measurements are in
/// meters and must be finite and strictly positive.
pub fn compute_area(
    shape: ShapeKind,
    side: f64,
    height: Option<f64>,
) -> Result<PlotComputation, FarmError> {
    if !(side.is_finite() && side > 0.0) {
        return Err(FarmError::invalid(
            "side",
            "a positive side/width measurement is required",
        ));
    }

    let (dimensions, area_square_meters, perimeter_meters) = match shape {
        ShapeKind::Square => (
            PlotDimensions::Square { side },
            side * side,
            4.0 * side,
        ),
        ShapeKind::Rectangle => {
            let height = match height {
                Some(h) if h.is_finite() && h > 0.0 => h,
                _ => {
                    return Err(FarmError::invalid(
                        "height",
                        "a positive height measurement is required",
                    ))
                }
            };
            (
                PlotDimensions::Rectangle {
                    width: side,
                    height,
                },
                side * height,
                2.0 * (side + height),
            )
        }
    };

    Ok(PlotComputation {
        shape,
        dimensions,
        area_square_meters,
        area_hectares: area_square_meters / SQUARE_METERS_PER_HECTARE,
        perimeter_meters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_square_area_and_perimeter() {
        let plot = compute_area(ShapeKind::Square, 50.0, None).unwrap();
        assert_relative_eq!(plot.area_square_meters, 2500.0);
        assert_relative_eq!(plot.area_hectares, 0.25);
        assert_relative_eq!(plot.perimeter_meters, 200.0);
        assert_eq!(plot.dimensions, PlotDimensions::Square { side: 50.0 });
    }

    #[test]
    fn test_square_identities_hold_across_sizes() {
        for side in [0.5, 1.0, 42.0, 134.16, 5000.0] {
            let plot = compute_area(ShapeKind::Square, side, None).unwrap();
            assert_relative_eq!(plot.area_square_meters, side * side);
            assert_relative_eq!(plot.perimeter_meters, 4.0 * side);
        }
    }

    #[test]
    fn test_rectangle_area_and_perimeter() {
        // 100 m x 250 m: the demo orange grove plot.
        let plot = compute_area(ShapeKind::Rectangle, 100.0, Some(250.0)).unwrap();
        assert_relative_eq!(plot.area_square_meters, 25_000.0);
        assert_relative_eq!(plot.area_hectares, 2.5);
        assert_relative_eq!(plot.perimeter_meters, 700.0);
        assert_eq!(
            plot.dimensions,
            PlotDimensions::Rectangle {
                width: 100.0,
                height: 250.0
            }
        );
    }

    #[test]
    fn test_rejects_non_positive_side() {
        for bad in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let err = compute_area(ShapeKind::Square, bad, None).unwrap_err();
            assert!(matches!(err, FarmError::InvalidInput { field: "side", .. }));
        }
    }

    #[test]
    fn test_rectangle_requires_height() {
        let err = compute_area(ShapeKind::Rectangle, 100.0, None).unwrap_err();
        assert!(matches!(
            err,
            FarmError::InvalidInput {
                field: "height",
                ..
            }
        ));

        for bad in [0.0, -1.0, f64::NAN] {
            let err = compute_area(ShapeKind::Rectangle, 100.0, Some(bad)).unwrap_err();
            assert!(matches!(
                err,
                FarmError::InvalidInput {
                    field: "height",
                    ..
                }
            ));
        }
    }

    #[test]
    fn test_square_ignores_height() {
        let plot = compute_area(ShapeKind::Square, 10.0, Some(999.0)).unwrap();
        assert_relative_eq!(plot.area_square_meters, 100.0);
    }
}
