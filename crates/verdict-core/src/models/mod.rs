pub mod section;
pub mod session;
pub mod template;
