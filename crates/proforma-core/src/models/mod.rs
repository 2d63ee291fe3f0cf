pub mod instance;
pub mod question;
pub mod selection;
