#![allow(unused_imports)]

mod selection;
pub use selection::{ClickEffect, RouteEndpoints, SelectionPhase};

mod result;
pub use result::{RouteCandidate, RouteMetrics, RouteResult};

mod wire;

mod orchestrator;
pub use orchestrator::{Failure, FailureKind, RouteClient, RouteOutcome, RouteQuery};

mod planner;
pub use planner::{RoutePlanner, SelectionError};
