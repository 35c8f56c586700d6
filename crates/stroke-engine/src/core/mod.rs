pub mod validator;
pub mod session;
pub mod time;
