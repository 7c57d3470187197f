mod owned_iter;
mod raw_iter;

pub(crate) use owned_iter::*;
pub(crate) use raw_iter::*;
