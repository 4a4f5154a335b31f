pub mod notify;
pub mod persistence;
pub mod storage;
