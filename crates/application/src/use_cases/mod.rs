//! Application use cases (business logic orchestration).

mod resolve_request;

pub use resolve_request::{
    HeaderTemplate, RequestTemplate, ResolveRequest, ResolveRequestOutput, ResolvedRequest,
};
