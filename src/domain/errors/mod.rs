mod object_store_errors;
mod save_errors;
mod store_errors;
mod validation_errors;

pub use object_store_errors::*;
pub use save_errors::*;
pub use store_errors::*;
pub use validation_errors::*;
