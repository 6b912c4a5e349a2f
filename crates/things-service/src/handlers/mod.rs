//! The four resource handlers.
//!
//! Each handler runs the whole request lifecycle for one operation:
//! check the identifier, parse and validate the body, call the store, and
//! answer with an envelope. Every [`ThingError`](things_core::ThingError) is
//! answered here, so only unexpected failures ever reach the pipeline's
//! error interceptor.

mod create;
mod delete;
mod get;
mod update;

pub use create::CreateThing;
pub use delete::DeleteThing;
pub use get::GetThing;
pub use update::UpdateThing;

/// Path parameter carrying the Thing identifier.
pub const THING_ID_PARAM: &str = "thingId";
