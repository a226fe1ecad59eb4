pub(crate) mod block;
pub(crate) mod measure;
pub(crate) mod wrap;
