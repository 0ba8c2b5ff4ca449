pub(crate) mod buffer;
pub(crate) mod interop;
pub(crate) mod sample;
pub(crate) mod view;
