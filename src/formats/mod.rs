pub mod com;
pub mod xyz;
