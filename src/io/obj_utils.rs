// Copyright @yucwang 2026

use std::fs;
use std::path::Path;

use wavefront_obj::{obj, ParseError};
use std::fmt;

#[derive(Debug)]
pub enum ObjLoadError {
    Io(std::io::Error),
    Parse(ParseError),
    Empty,
}

impl From<std::io::Error> for ObjLoadError {
    fn from(err: std::io::Error) -> Self {
        ObjLoadError::Io(err)
    }
}

impl From<ParseError> for ObjLoadError {
    fn from(err: ParseError) -> Self {
        ObjLoadError::Parse(err)
    }
}

impl fmt::Display for ObjLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjLoadError::Io(err) => write!(f, "io error: {}", err),
            ObjLoadError::Parse(err) => write!(f, "parse error: {}", err),
            ObjLoadError::Empty => write!(f, "obj contains no triangles"),
        }
    }
}

impl std::error::Error for ObjLoadError {}

/// Parse OBJ text; polygons with more than three corners are fanned into
/// triangles first.
pub fn parse_obj_str<S: AsRef<str>>(input: S) -> Result<obj::ObjSet, ObjLoadError> {
    let obj_set = obj::parse(fan_triangulate(input.as_ref()))?;
    Ok(obj_set)
}

pub fn read_obj_file<P: AsRef<Path>>(path: P) -> Result<obj::ObjSet, ObjLoadError> {
    log::info!("Loading OBJ mesh from: {}.", path.as_ref().display());
    let data = fs::read_to_string(path)?;
    parse_obj_str(data)
}

fn fan_triangulate(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + input.len() / 4);
    for line in input.lines() {
        let mut parts = line.split_whitespace();
        if parts.next() == Some("f") {
            let corners: Vec<&str> = parts.collect();
            if corners.len() > 3 {
                for pair in corners[1..].windows(2) {
                    out.push_str(&format!("f {} {} {}\n", corners[0], pair[0], pair[1]));
                }
                continue;
            }
        }
        out.push_str(line);
        out.push('\n');
    }
    out
}
