use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The named pod has no entry in the canned result table.
    #[error("unable to retrieve Pod: pods \"{name}\" not found")]
    PodNotFound { name: String },

    /// The capability exists on the real client, but the fake answers with
    /// an error instead of aborting the calling test.
    #[error("mock client does not implement {0}")]
    Unimplemented(&'static str),

    /// A fixture file could not be read or parsed.
    #[error("fixture error: {0}")]
    Fixture(String),
}
