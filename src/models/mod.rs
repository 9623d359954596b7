pub mod application;
pub mod draft;
pub mod job;
pub mod resume;
pub mod session;
