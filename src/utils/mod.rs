//! Small serde helpers shared by the adapters.

pub(crate) mod lenient;
