pub mod grant;
pub mod repositories;
