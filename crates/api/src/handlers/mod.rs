pub mod auth;
pub mod dashboard;
pub mod media;
pub mod news;
pub mod patents;
pub mod projects;
pub mod publications;
pub mod research;
pub mod team_members;
pub mod todos;
pub mod users;
