pub(crate) mod color;
pub(crate) mod decode;
pub(crate) mod font;
pub(crate) mod loader;
pub(crate) mod source;
