//! GitHub GraphQL transport.
//!
//! Wraps `reqwest` in a [`GraphQLClient`] that posts a query with its
//! variables and hands back the GraphQL envelope: `data` and `errors` are
//! both returned so callers can surface partial results.

mod client;

pub use client::{Endpoint, GraphQLClient, GraphQLResponse, Query, Token};
