mod record_service_impl;

pub use record_service_impl::{RecordServiceBuilder, RecordServiceImpl};
