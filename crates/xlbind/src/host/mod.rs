//! Host runtime model: values, call frames, class registry and event loop

pub mod call;
pub mod event_loop;
pub mod registry;
pub mod value;

pub use call::{Arguments, CallInfo};
pub use event_loop::{EventLoop, WorkQueue};
pub use registry::{ClassKind, ClassTemplate, Constructor, Registry};
pub use value::{External, Object, Value};
