//! Tool and resource adapter over the knowledge-base backend.
//!
//! # Architecture
//!
//! ```text
//! MCP tool call (query_knowledge_base / retrieve_from_knowledge_base)
//!   ↓ QueryArgs / RetrieveArgs
//! KbAdapter
//!   ├── payload: drop empty optionals, default top_k
//!   ├── BackendClient: one POST, bounded by timeout
//!   └── ToolOutcome: Success (body + _debug) | Failure (error + _debug)
//!   ↓
//! JSON object → MCP client
//! ```
//!
//! Resource reads follow the same path with a GET and render to text.

pub mod outcome;
pub mod resource;
pub mod translator;

pub use outcome::{DEBUG_KEY, FailureKind, Operation, ToolFailure, ToolOutcome};
pub use resource::{KbResource, SCHEME};
pub use translator::KbAdapter;
