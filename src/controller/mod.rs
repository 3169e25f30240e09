pub(crate) mod config;
pub(crate) mod env;
pub(crate) mod lifecycle;
pub(crate) mod mapper;
pub(crate) mod memory;
pub(crate) mod sequencer;
pub(crate) mod transport;
