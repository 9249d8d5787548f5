pub mod employee;
pub mod health;
pub mod ui;
