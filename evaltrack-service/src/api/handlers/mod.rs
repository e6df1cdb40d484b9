pub mod admin;
pub mod health;
pub mod requests;
pub mod status;
pub mod suppliers;
pub mod team_members;
pub mod uploads;
