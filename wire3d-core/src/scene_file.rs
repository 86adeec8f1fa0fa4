/// Text scene format reader.
///
/// A line whose first non-blank character is `#` closes the current polyline
/// and opens a new one. Every other non-blank line is a point: exactly three
/// whitespace-separated numbers.
use nalgebra::Point3;
use nom::{
    character::complete::{space0, space1},
    combinator::all_consuming,
    number::complete::double,
    sequence::{delimited, tuple},
    IResult,
};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::geometry::{Polyline, Scene};

pub const COMMENT_MARKER: char = '#';

/// Failure while loading a scene description
#[derive(Debug)]
pub enum SceneError {
    /// The scene file does not exist
    NotFound(PathBuf),
    /// The scene file exists but could not be read
    Io { path: PathBuf, source: io::Error },
    /// A point line did not hold exactly three numbers (1-based line number)
    Malformed { line: usize, content: String },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::NotFound(path) => write!(f, "scene not found: {}", path.display()),
            SceneError::Io { path, source } => {
                write!(f, "failed to read scene {}: {}", path.display(), source)
            }
            SceneError::Malformed { line, content } => write!(
                f,
                "malformed point on line {}: expected three numbers, got {:?}",
                line, content
            ),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Read and parse a scene file, attaching a default camera
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => SceneError::NotFound(path.to_path_buf()),
        _ => SceneError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let polylines = parse_polylines(&text)?;
    log::info!(
        "loaded {} polylines ({} segments) from {}",
        polylines.len(),
        polylines.iter().map(Polyline::segment_count).sum::<usize>(),
        path.display()
    );

    Ok(Scene::new(polylines))
}

/// Parse scene text into polylines in file order.
///
/// Groups with no points are dropped.
pub fn parse_polylines(input: &str) -> Result<Vec<Polyline>, SceneError> {
    let mut polylines = Vec::new();
    let mut current = Polyline::default();

    for (index, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with(COMMENT_MARKER) {
            if !current.is_empty() {
                polylines.push(std::mem::take(&mut current));
            }
            continue;
        }

        match all_consuming(parse_point)(line) {
            Ok((_, point)) => current.push(point),
            Err(_) => {
                return Err(SceneError::Malformed {
                    line: index + 1,
                    content: line.to_string(),
                })
            }
        }
    }

    if !current.is_empty() {
        polylines.push(current);
    }

    Ok(polylines)
}

fn parse_point(input: &str) -> IResult<&str, Point3<f64>> {
    let (input, (x, _, y, _, z)) =
        delimited(space0, tuple((double, space1, double, space1, double)), space0)(input)?;
    Ok((input, Point3::new(x, y, z)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_groups() {
        let text = "# first\n0 0 0\n1 0 0\n1 1 0\n# second\n-1.5 2e2 3\n4 5 6\n";
        let polylines = parse_polylines(text).unwrap();
        assert_eq!(polylines.len(), 2);
        assert_eq!(polylines[0].len(), 3);
        assert_eq!(polylines[1].points[0], Point3::new(-1.5, 200.0, 3.0));
        assert_eq!(polylines[1].points[1], Point3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_points_before_first_comment_form_a_group() {
        let polylines = parse_polylines("1 2 3\n4 5 6\n#\n7 8 9").unwrap();
        assert_eq!(polylines.len(), 2);
        assert_eq!(polylines[1].points, vec![Point3::new(7.0, 8.0, 9.0)]);
    }

    #[test]
    fn test_empty_groups_and_blank_lines_are_dropped() {
        let text = "#a\n#b\n\n   \n# c\n\t0\t0 0 \r\n#d\n";
        let polylines = parse_polylines(text).unwrap();
        assert_eq!(polylines.len(), 1);
        assert_eq!(polylines[0].points, vec![Point3::origin()]);
    }

    #[test]
    fn test_empty_input_is_an_empty_scene() {
        assert!(parse_polylines("").unwrap().is_empty());
    }

    #[test]
    fn test_two_tokens_is_malformed() {
        let err = parse_polylines("# cube\n0 0 0\n1.0 2.0\n").unwrap_err();
        match err {
            SceneError::Malformed { line, content } => {
                assert_eq!(line, 3);
                assert_eq!(content, "1.0 2.0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_extra_or_non_numeric_tokens_are_malformed() {
        for text in ["1 2 3 4", "1 2 x", "one two three", "1,2,3", "1 2 3x"] {
            let err = parse_polylines(text).unwrap_err();
            assert!(matches!(err, SceneError::Malformed { line: 1, .. }), "{text}");
        }
    }

    #[test]
    fn test_error_messages() {
        let err = SceneError::Malformed {
            line: 7,
            content: "1.0 2.0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed point on line 7: expected three numbers, got \"1.0 2.0\""
        );

        let err = SceneError::NotFound(PathBuf::from("objects.txt"));
        assert_eq!(err.to_string(), "scene not found: objects.txt");
    }
}
