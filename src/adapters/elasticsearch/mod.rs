//! Elasticsearch adapter - the search engine behind the search index port.

mod client;

pub use client::{ElasticsearchClient, ElasticsearchConfig};
