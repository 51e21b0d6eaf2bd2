//! # Courtside Core
//!
//! A typed, validated client for the NBA data and stats HTTP APIs.
//!
//! Each API operation is described by a [`RequestDefinition`]: HTTP method, endpoint
//! template, API family, ordered fields with their constraints, and the declared
//! response type. The [`ApiClient`] turns a request bound to such a definition into an
//! HTTP exchange:
//!
//! 1. **Validation** - every field constraint is evaluated ([`ConstraintValidator`])
//! 2. **Resolution** - path fields are substituted into the endpoint template
//! 3. **Negotiation** - the `Accept` header follows the declared [`ResponseType`]
//! 4. **Assembly** - family, request, negotiated and per-call settings are merged into
//!    a [`CallDescriptor`]
//! 5. **Dispatch** - the descriptor goes through a pluggable [`Transport`]
//! 6. **Wrapping** - the answer is exposed as an [`ApiResponse`] with lazy decoding
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courtside_core::catalog::data::PLAYER_PROFILE;
//! use courtside_core::{ApiClient, CallOverrides, ReqwestTransport};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(ReqwestTransport::new());
//!
//! let request = PLAYER_PROFILE
//!     .request()
//!     .with("year", 2017)
//!     .with("playerId", 201_939);
//!
//! let response = client.send(&request, CallOverrides::new()).await?;
//! let profile = response.json_value()?;
//! println!("{profile:#}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Validation
//!
//! Invalid requests never reach the network; the error lists every failed
//! constraint:
//!
//! ```rust,no_run
//! use courtside_core::catalog::data::PLAYER_PROFILE;
//! use courtside_core::{ApiClient, ApiClientError, CallOverrides, ReqwestTransport};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let client = ApiClient::new(ReqwestTransport::new());
//! let request = PLAYER_PROFILE.request().with("year", 2010);
//!
//! match client.send(&request, CallOverrides::new()).await {
//!     Err(ApiClientError::Validation { violations, .. }) => {
//!         for violation in &violations {
//!             eprintln!("{violation}");
//!         }
//!     }
//!     other => println!("{other:?}"),
//! }
//!
//! // Validation can be switched off, for instance to probe the API
//! client.set_validation_enabled(false);
//! # }
//! ```
//!
//! ## Defining requests
//!
//! ```rust
//! use std::sync::{Arc, LazyLock};
//!
//! use courtside_core::{ApiFamily, Constraint, FieldDef, RequestDefinition, ResponseType};
//!
//! static TODAY: LazyLock<RequestDefinition> = LazyLock::new(|| {
//!     let family = Arc::new(ApiFamily::new("data", "http://data.nba.net").expect("a valid uri"));
//!     RequestDefinition::builder("today", family, "/10s/prod/v1/today.json")
//!         .response_type(ResponseType::Json)
//!         .build()
//!         .expect("a valid definition")
//! });
//!
//! assert_eq!(TODAY.request().endpoint(), "/10s/prod/v1/today.json");
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events at `debug` and `trace`
//! level and installs no subscriber.

mod client;
mod request;
mod response;
mod transport;
mod validation;

pub mod catalog;

pub use self::client::{ApiClient, ApiClientBuilder, ApiClientError};
pub use self::request::{
    ApiFamily, ApiRequest, CallDescriptor, CallOverrides, ConstructionDefect,
    DEFAULT_DATE_FORMAT, FieldDef, FieldLocation, FieldValue, RequestDefinition,
    RequestDefinitionBuilder, placeholders, resolve_endpoint,
};
pub use self::response::{
    ApiResponse, BodyDecoder, DecodeError, DecodedBody, ResponseType, StandardDecoder,
};
pub use self::transport::{RawResponse, ReqwestTransport, Transport, TransportError};
pub use self::validation::{
    Constraint, ConstraintKind, ConstraintValidator, RangeBound, RequestValidator,
    ValueKind, Violation, Violations,
};
