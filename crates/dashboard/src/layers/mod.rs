pub(crate) mod client;
pub(crate) mod domain;
pub(crate) mod service;
pub(crate) mod ui;
