//! Client library for the Camunda 7 REST API.
//!
//! Provides connection configuration, an HTTP gateway that performs exactly one
//! request per call, and a facade with one method per supported engine
//! operation.

pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod query;

pub use client::{CamundaClient, ProcessInstanceQuery, TaskQuery};
pub use config::{AuthMode, ConnectionProfile};
pub use error::ClientError;
pub use gateway::{join_url, HttpGateway, RequestOptions};
pub use query::QueryParams;
