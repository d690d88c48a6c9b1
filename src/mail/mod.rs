pub mod archive;
pub mod dispatch;
pub mod message;
pub mod transport;
