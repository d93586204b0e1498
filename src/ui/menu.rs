// src/ui/menu.rs
use std::time::Duration;

/// Length of the slide-up animation played before the menu disappears
pub const CLOSE_ANIMATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

impl NavItem {
    pub fn is_active(&self, pathname: &str) -> bool {
        self.href == pathname
    }
}

pub const NAV_ITEMS: [NavItem; 3] = [
    NavItem { label: "Home", href: "/" },
    NavItem { label: "Companions", href: "/companions" },
    NavItem { label: "My Journey", href: "/my-journey" },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEffect {
    /// Call `finish_close` once the delay has elapsed
    CloseAfter(Duration),
}

/// Open/closed state of the collapsible navigation menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavMenu {
    is_open: bool,
    is_animating: bool,
}

impl NavMenu {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn toggle(&mut self) {
        if !self.is_animating {
            self.is_open = !self.is_open;
        }
    }

    pub fn close(&mut self) -> Option<MenuEffect> {
        if self.is_animating {
            return None;
        }
        self.is_animating = true;
        Some(MenuEffect::CloseAfter(CLOSE_ANIMATION))
    }

    pub fn finish_close(&mut self) {
        self.is_open = false;
        self.is_animating = false;
    }

    pub fn route_changed(&mut self) -> Option<MenuEffect> {
        if self.is_open {
            self.close()
        } else {
            None
        }
    }
}
