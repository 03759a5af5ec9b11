//! Types needed to render views, in one import:
//!
//! ```
//! use rwf_views::prelude::*;
//! ```
pub use crate::config::Config;
pub use crate::http::{Headers, Output, Response, Stream};
pub use crate::logging::Logger;
pub use crate::source::{Bundled, Disk, Memory, SourceTree};
pub use crate::view::{Context, Error, Functions, Mode, RenderInstance, Value, Views};

pub use serde::{Deserialize, Serialize};
