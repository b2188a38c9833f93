pub mod attach;
pub mod send;
