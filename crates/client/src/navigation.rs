use parking_lot::RwLock;

/// Moves the UI to another route (e.g. the login page).
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// In-process navigation target shared with the UI shell.
///
/// Navigating to the route already shown changes nothing.
#[derive(Debug, Default)]
pub struct NavigationState {
    current: RwLock<Option<String>>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.current.read().clone()
    }
}

impl Navigator for NavigationState {
    fn navigate(&self, route: &str) {
        let mut current = self.current.write();
        if current.as_deref() == Some(route) {
            return;
        }
        tracing::info!(route, "navigating");
        *current = Some(route.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_navigation_is_a_no_op() {
        let nav = NavigationState::new();
        assert_eq!(nav.current(), None);

        nav.navigate("/login");
        let once = nav.current();
        nav.navigate("/login");
        assert_eq!(nav.current(), once);
        assert_eq!(once.as_deref(), Some("/login"));
    }
}
