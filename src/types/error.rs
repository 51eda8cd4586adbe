use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridcastError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid map: {0}")]
    InvalidMap(String),
    #[error("invalid scene: {0}")]
    InvalidScene(String),
    #[error("map has {0} structural issue(s)")]
    MapIssues(usize),
}
