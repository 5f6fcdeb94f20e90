use shared::DetailParams;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Grid,
    Detail(DetailParams),
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Grid => "Home",
            Route::Detail(_) => "Details",
        }
    }
}

/// Screen stack. The grid sits at the bottom and is never popped.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            stack: vec![Route::Grid],
        }
    }
}

impl Navigator {
    pub fn current(&self) -> &Route {
        self.stack.last().expect("root route is never popped")
    }

    pub fn push(&mut self, route: Route) {
        tracing::debug!(title = route.title(), depth = self.stack.len() + 1, "navigate");
        self.stack.push(route);
    }

    pub fn can_go_back(&self) -> bool {
        self.stack.len() > 1
    }

    /// Pops the top route. Returns `false` when already at the root.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.stack.pop();
        tracing::debug!(title = self.current().title(), "navigate back");
        true
    }
}
