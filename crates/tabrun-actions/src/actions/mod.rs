//! Built-in action implementations.
//!
//! - `add` - Add two numbers
//! - `fibonacci` - Fibonacci series as text
//! - `ping` - Ping a host once
//! - `url_status_code` - HTTP status code of a URL
//! - `website_headings` - Text of heading elements on a page
//! - `read_file` - Load a file into the shared bag
//! - `count_occurs` - Count occurrences in a shared text

mod arith;
mod http;
mod ping;
mod share;

pub use self::arith::{AddAction, FibonacciAction};
pub use self::http::{UrlStatusCodeAction, WebsiteHeadingsAction};
pub use self::ping::PingAction;
pub use self::share::{CountOccursAction, ReadFileAction};

use crate::registry::ActionRegistry;

/// Create an action registry with all built-in actions registered.
pub fn create_default_registry() -> ActionRegistry {
    let mut registry = ActionRegistry::new();

    registry.register(AddAction);
    registry.register(FibonacciAction);
    registry.register(PingAction::new());
    registry.register(UrlStatusCodeAction::new());
    registry.register(WebsiteHeadingsAction::new());
    registry.register(ReadFileAction);
    registry.register(CountOccursAction);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry() {
        let registry = create_default_registry();
        assert_eq!(
            registry.list(),
            vec![
                "add",
                "count_occurs",
                "fibonacci",
                "ping",
                "read_file",
                "url_status_code",
                "website_headings",
            ]
        );
    }
}
