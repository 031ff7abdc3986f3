/// Errors surfaced by the discretize-and-solve pipeline.
#[derive(thiserror::Error, Debug)]
pub enum Error {
  /// Rejected before any assembly happens.
  #[error("invalid parameter: {0}")]
  InvalidParameter(String),
  #[error("singular system: {0}")]
  SingularSystem(String),
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  pub(crate) fn invalid(msg: impl Into<String>) -> Self {
    Self::InvalidParameter(msg.into())
  }
  pub(crate) fn singular(msg: impl Into<String>) -> Self {
    Self::SingularSystem(msg.into())
  }
}
