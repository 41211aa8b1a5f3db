// Copyright @yucwang 2026

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::binding::BindingMode;
use crate::textures::{AddressMode, FilterMode};

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "io error: {}", err),
            ConfigError::Parse(msg) => write!(f, "parse error: {}", msg),
            ConfigError::MissingField(field) => write!(f, "missing field: {}", field),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Clone, Debug, PartialEq)]
pub struct TextureConfig {
    pub filename: PathBuf,
    pub filter: FilterMode,
    pub address: [AddressMode; 2],
}

/// What to bind when resolving surfaces for one mesh.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceConfig {
    pub normal_binding: BindingMode,
    pub color_binding: BindingMode,
    pub lanes: usize,
    pub mesh: PathBuf,
    pub texture: Option<TextureConfig>,
}

pub fn load_surface_config<P: AsRef<Path>>(path: P) -> Result<SurfaceConfig, ConfigError> {
    let path = path.as_ref();
    let xml = fs::read_to_string(path)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let config = parse_surface_config(&xml, base_dir)?;
    log::info!("Surface configuration loaded from {}: {:?}.", path.display(), config);
    Ok(config)
}

pub fn parse_surface_config(xml: &str, base_dir: &Path) -> Result<SurfaceConfig, ConfigError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut buf = Vec::new();

    let mut normal_binding = BindingMode::PerVertex;
    let mut color_binding = BindingMode::PerFace;
    let mut lanes = 8usize;
    let mut mesh: Option<PathBuf> = None;
    let mut texture: Option<TextureConfig> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Eof) => break,
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                match e.name().as_ref() {
                    b"surface" => {
                        for attr in e.attributes().flatten() {
                            let value = attr.unescape_value().unwrap_or_default().to_string();
                            match attr.key.as_ref() {
                                b"normal_binding" => normal_binding = parse_binding(&value)?,
                                b"color_binding" => color_binding = parse_binding(&value)?,
                                b"lanes" => lanes = parse_lanes(&value)?,
                                _ => {}
                            }
                        }
                    }
                    b"mesh" => {
                        for attr in e.attributes().flatten() {
                            if attr.key.as_ref() == b"filename" {
                                let value = attr.unescape_value().unwrap_or_default().to_string();
                                mesh = Some(base_dir.join(value));
                            }
                        }
                    }
                    b"texture" => {
                        let mut filename: Option<PathBuf> = None;
                        let mut filter = FilterMode::Linear;
                        let mut address = [AddressMode::Wrap; 2];
                        for attr in e.attributes().flatten() {
                            let value = attr.unescape_value().unwrap_or_default().to_string();
                            match attr.key.as_ref() {
                                b"filename" => filename = Some(base_dir.join(value)),
                                b"filter" => {
                                    filter = FilterMode::from_name(&value)
                                        .ok_or_else(|| ConfigError::Parse(format!("unknown filter: {}", value)))?;
                                }
                                b"address" => address = parse_address(&value)?,
                                _ => {}
                            }
                        }
                        let filename = filename.ok_or(ConfigError::MissingField("texture.filename"))?;
                        texture = Some(TextureConfig { filename, filter, address });
                    }
                    _ => {}
                }
            }
            Err(e) => {
                return Err(ConfigError::Parse(format!(
                    "xml error at position {}: {}",
                    reader.buffer_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(SurfaceConfig {
        normal_binding,
        color_binding,
        lanes,
        mesh: mesh.ok_or(ConfigError::MissingField("mesh"))?,
        texture,
    })
}

fn parse_binding(value: &str) -> Result<BindingMode, ConfigError> {
    BindingMode::from_name(value).ok_or_else(|| ConfigError::Parse(format!("unknown binding: {}", value)))
}

fn parse_lanes(value: &str) -> Result<usize, ConfigError> {
    match value.parse::<usize>() {
        Ok(n) if n == 4 || n == 8 => Ok(n),
        _ => Err(ConfigError::Parse(format!("lanes must be 4 or 8, got {}", value))),
    }
}

/// One mode for both axes, or `x,y`.
fn parse_address(value: &str) -> Result<[AddressMode; 2], ConfigError> {
    let modes = value
        .split(',')
        .map(|s| {
            AddressMode::from_name(s.trim())
                .ok_or_else(|| ConfigError::Parse(format!("unknown address mode: {}", s.trim())))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match modes.as_slice() {
        [m] => Ok([*m, *m]),
        [x, y] => Ok([*x, *y]),
        _ => Err(ConfigError::Parse(format!("invalid address modes: {}", value))),
    }
}
