//! Multi-stop trips.
//!
//! A trip visits an ordered list of stops by running one search per pair of
//! consecutive stops. The planner paces the searches so a front end can
//! animate them, totals distances and visit counts across legs, and stops
//! early when a leg has no path or the caller cancels.

mod cancel;
mod config;
mod planner;
mod result;
mod route;

pub use cancel::CancelHandle;
pub use config::{ALGORITHM_VAR, STEP_DELAY_VAR, TripConfig};
pub use planner::{Progress, TripError, TripObserver, TripPlanner};
pub use result::{LegResult, TripOutcome, TripResult};
pub use route::{LegPlan, Route, RouteError};
