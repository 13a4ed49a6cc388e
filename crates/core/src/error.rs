use thiserror::Error;

use crate::model::InvalidRangeError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Range(#[from] InvalidRangeError),
}
