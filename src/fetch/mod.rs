mod proxy;
mod retry;

pub use self::proxy::{FetchError, ProxyFetcher, ProxyRoute, RouteFailure, RouteFailureKind};
pub use self::retry::with_retry;
