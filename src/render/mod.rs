pub(crate) mod backend;
pub(crate) mod cancel;
pub(crate) mod processor;
pub(crate) mod resample;
pub(crate) mod tiles;
