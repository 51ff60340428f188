pub mod health;
pub mod parse_script;
pub mod upload_script;
