//! Request gating: the middleware enforcing a policy verdict per request.

mod middleware;

pub use middleware::{authorize, GateState};
