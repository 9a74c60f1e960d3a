//! Moresleep adapter - the submission system behind the talk source port.

mod client;
mod mapper;
mod models;

pub use client::{MoresleepClient, MoresleepConfig};
