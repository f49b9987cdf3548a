/// Parser for plain-text control-point paths
///
/// One `x y z` triple per line, separated by spaces or tabs. Blank lines and
/// everything after a `#` are ignored.
use nalgebra::Point3;
use nom::{
    character::complete::{char, not_line_ending, space0, space1},
    combinator::{all_consuming, opt},
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::control_points::ControlPointStore;
use crate::error::PointsError;

/// Minimum number of points a path file must contain
pub const MIN_PATH_POINTS: usize = 2;

/// Parse every control point in `input`, in file order.
pub fn parse_control_points(input: &str) -> Result<Vec<Point3<f32>>, PointsError> {
    let mut points = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let parse_error = || PointsError::Parse {
            line: index + 1,
            content: line.to_string(),
        };

        let (_, parsed) = parse_line(line).map_err(|_| parse_error())?;
        if let Some((x, y, z)) = parsed {
            if !(x.is_finite() && y.is_finite() && z.is_finite()) {
                return Err(parse_error());
            }
            points.push(Point3::new(x, y, z));
        }
    }

    if points.len() < MIN_PATH_POINTS {
        return Err(PointsError::TooFewPoints {
            min: MIN_PATH_POINTS,
            actual: points.len(),
        });
    }

    Ok(points)
}

/// Parse a path file straight into a store, ids following file order.
pub fn load_control_points(input: &str) -> Result<ControlPointStore, PointsError> {
    parse_control_points(input).map(ControlPointStore::from_positions)
}

fn parse_line(input: &str) -> IResult<&str, Option<(f32, f32, f32)>> {
    all_consuming(line_body)(input)
}

fn line_body(input: &str) -> IResult<&str, Option<(f32, f32, f32)>> {
    let (input, _) = space0(input)?;
    let (input, triple) = opt(parse_triple)(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = opt(preceded(char('#'), not_line_ending))(input)?;
    Ok((input, triple))
}

fn parse_triple(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, x) = float(input)?;
    let (input, _) = space1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = space1(input)?;
    let (input, z) = float(input)?;
    Ok((input, (x, y, z)))
}
