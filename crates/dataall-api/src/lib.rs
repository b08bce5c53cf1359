// dataall-api: Async Rust client for the data.all GraphQL API

pub mod client;
pub mod endpoints;
pub mod error;
pub mod graphql;
pub mod operations;
pub mod paging;
pub mod transport;

pub use client::{GraphQlClient, session_headers};
pub use endpoints::{DEFAULT_MODULE, EndpointMap};
pub use error::Error;
pub use graphql::{
    ErrorOrigin, GraphQlError, GraphQlRequest, Location, Operation, OperationKind, Outcome,
    PagedOperation,
};
pub use paging::{DEFAULT_PAGE_SIZE, Filter, Page, SELECT_LIST_PAGE_SIZE};
pub use transport::{TlsMode, TransportConfig};
