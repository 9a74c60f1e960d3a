//! Talks Indexer - keeps conference talk search indices in sync.
//!
//! Talk submissions are read from the moresleep submission system and written
//! to two Elasticsearch indices: a private one holding every talk with all of
//! its data, and a public one holding approved talks with private fields and
//! email-like values removed.
//!
//! Layout follows ports and adapters: `domain` is pure, `ports` declares the
//! two external collaborators, `application` orchestrates reindexing, and
//! `adapters` hold the HTTP clients, in-memory doubles and the axum surface.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
