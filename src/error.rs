use thiserror::Error;

use crate::config::ConfigError;
use crate::mesh::MeshError;
use crate::shader::ShaderStage;

/// Fatal setup errors. Once a [`Session`](crate::Session) exists the frame
/// loop has no fallible operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Unable to initialize WebGL: {0}")]
    ContextUnavailable(String),
    #[error("Failed to compile {stage} shader: {log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("Failed to link shader program: {log}")]
    ProgramLink { log: String },
    #[error("Page element #{0} not found")]
    MissingElement(String),
    #[error("Driver refused to create {0}")]
    ResourceCreation(&'static str),
    #[error(transparent)]
    InvalidMesh(#[from] MeshError),
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
