use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    #[error("invalid color '{0}' (expected 6 hex digits, optionally prefixed with '#')")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("could not parse palette JSON\n{0}")]
    Json(#[from] serde_json::Error),
    #[error("could not parse palette RON\n{0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("could not parse palette YAML\n{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unexpected structure: {0}")]
    Structure(String),
}

impl InputError {
    pub fn is_parse(&self) -> bool {
        !self.is_structure()
    }

    pub fn is_structure(&self) -> bool {
        matches!(self, InputError::Structure(_))
    }
}

#[derive(Error, Debug)]
pub enum VizError {
    #[error("{0}")]
    Input(#[from] InputError),
    #[error("failed to read input file\n{0}")]
    FileReadError(#[from] std::io::Error),
    #[error("input file does not have valid extension (must be .json, .ron, .yaml or .yml)")]
    ExtensionError,
    #[error("failed to save image\n{0}")]
    ImageSaveError(#[from] image::ImageError),
    #[error("canvas dimensions must be nonzero (got {width}x{height})")]
    CanvasError { width: u32, height: u32 },
    #[error("no palettes to render")]
    NothingToRender,
    #[error("failed to write report\n{0}")]
    ReportError(serde_json::Error),
}
