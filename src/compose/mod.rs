//! The compositor: chained layer loading and drawing per render call.

pub(crate) mod compositor;
pub(crate) mod inputs;
