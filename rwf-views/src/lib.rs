//! Server-side views for Rwf: pages composed from layouts and partials, rendered
//! straight into HTTP responses.
//!
//! Templates live in a folder, usually `templates`:
//!
//! ```text
//! templates/
//! ├── layouts/base.html      <- page skeleton with blocks
//! ├── partials/nav.html      <- fragment, included from anywhere
//! ├── user/list.html         <- page "user/list"
//! └── errors/404.html        <- page "errors/404"
//! ```
//!
//! The engine runs in one of two modes. In `release`, all pages are compiled at startup
//! and rendering doesn't touch the disk. In `debug`, pages are compiled on every request,
//! so template edits show up immediately.
//!
//! # Getting started
//!
//! ```rust,no_run
//! use rwf_views::prelude::*;
//!
//! Logger::init();
//!
//! let views = Views::from_config(Config::get(), Functions::new())?;
//!
//! let mut context = Context::new();
//! context.insert("title", "Users");
//!
//! let mut response = Response::new();
//! views.instance("user/list", context).render(&mut response)?;
//! # Ok::<(), rwf_views::view::Error>(())
//! ```
//!
//! See [`view`] for how templates are put together.
pub mod config;
pub mod http;
pub mod logging;
pub mod prelude;
pub mod source;
pub mod view;

/// Serde is used for (de)serialization.
pub use serde;
/// Tera, the template language.
pub use tera;
