//! Shared client-side logic for the Internet Entity Logger.
//!
//! Everything here is free of browser APIs so it can be unit-tested on the
//! host. The Yew application in `frontend` renders this state and supplies
//! the `gloo-net` implementation of [`api::CatalogBackend`].

pub mod api;
pub mod codec;
pub mod detail;
pub mod format;
pub mod form;
pub mod model;
pub mod search;
pub mod tag_input;
pub mod tag_manager;
pub mod workflow;
