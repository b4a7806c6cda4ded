//! End-to-end tests, driving the real router over the in-memory storage

mod deactivate;
mod listing;
mod login;
mod redirect;
mod register;
