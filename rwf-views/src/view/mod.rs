//! Templates and views, the **V** in MVC.
//!
//! Templates live in one folder (`templates` by default) and are sorted by where they are:
//!
//! - `layouts/` hold page skeletons with `{% block %}`s that pages fill in,
//! - `partials/` hold fragments any template can `{% include %}`,
//! - everything else is a page, rendered by its path without the extension, e.g. `user/list`.
//!
//! Templates are written in [Tera](https://keats.github.io/tera/docs/), a language similar to Jinja2.
//!
//! # Example
//!
//! ```
//! use rwf_views::prelude::*;
//!
//! let tree = Memory::new()
//!     .with(
//!         "layouts/base.html",
//!         r#"<html><title>{% block title %}Default{% endblock %}</title>{% block content %}{% endblock %}</html>"#,
//!     )
//!     .with(
//!         "user/list.html",
//!         r#"{% extends "layouts/base" %}{% block title %}Users{% endblock %}{% block content %}<h1>{{ heading }}</h1>{% endblock %}"#,
//!     );
//!
//! let views = Views::new(tree, Functions::new(), Mode::Release)?;
//!
//! let mut context = Context::new();
//! context.insert("heading", "User List");
//!
//! let mut response = Response::new();
//! views.instance("user/list", context).render(&mut response)?;
//!
//! assert_eq!(response.text(), "<html><title>Users</title><h1>User List</h1></html>");
//! # Ok::<(), rwf_views::view::Error>(())
//! ```
pub mod base;
pub mod discovery;
pub mod error;
pub mod functions;
pub mod instance;
pub mod page;
pub mod views;

pub use base::{BaseSet, Compiler};
pub use discovery::{Discovery, Role, Source};
pub use error::Error;
pub use functions::Functions;
pub use instance::RenderInstance;
pub use page::PageSet;
pub use views::{Builder, Mode, Views};

pub use tera::{Context, Value};
