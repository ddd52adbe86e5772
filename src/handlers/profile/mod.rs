pub mod edit_profile;
pub mod get_profile;
pub mod register;
pub mod user_id;
pub mod user_role;
