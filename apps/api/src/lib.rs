//! cvlift API — CV enhancement pipeline over the Perplexity Sonar API.
//!
//! The service runs a fixed four-stage prompt pipeline (analysis, research,
//! optimization, writing) over a submitted CV and exposes the results plus a
//! text export and a job-search chat assistant as a JSON API.

pub mod assistant;
pub mod config;
pub mod errors;
pub mod extract;
pub mod pipeline;
pub mod routes;
pub mod sonar_client;
pub mod state;
