use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use std::fmt;

/// Entries of the navigation menu, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum Page {
    Welcome = 0,
    AddData,
    Graph,
    Calendar,
    NeedsWants,
    About,
    Chatbot,
}

impl Page {
    pub const COUNT: usize = 7;

    /// All pages in menu order
    pub fn all() -> impl Iterator<Item = Page> {
        (0..Self::COUNT).filter_map(Page::from_usize)
    }

    /// Menu position, counting from 1
    pub fn number(self) -> usize {
        self as usize + 1
    }

    /// Short name used in commands
    pub fn key(self) -> &'static str {
        use Page::*;
        match self {
            Welcome => "welcome",
            AddData => "add",
            Graph => "graph",
            Calendar => "calendar",
            NeedsWants => "needs",
            About => "about",
            Chatbot => "chatbot",
        }
    }

    /// Title as shown in the menu
    pub fn title(self) -> &'static str {
        use Page::*;
        match self {
            Welcome => "Welcome",
            AddData => "Add Data",
            Graph => "Graph",
            Calendar => "Calendar",
            NeedsWants => "Needs vs Wants",
            About => "About",
            Chatbot => "Chatbot",
        }
    }

    /// Resolve a menu number, a key or a title, ignoring case
    pub fn lookup(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            return n.checked_sub(1).and_then(Page::from_usize);
        }
        let s = s.to_lowercase();
        Self::all().find(|p| p.key() == s || p.title().to_lowercase() == s)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
