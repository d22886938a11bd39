//! Controllers for the admin screens, written once and instantiated per
//! resource.

pub mod debounce;
pub mod error;
pub mod form;
pub mod list_view;
pub mod page;
pub mod picker;
pub mod queries;
pub mod session;
pub mod toasts;

pub use error::AppError;
pub use session::Session;
