//! Canned finance advice
//!
//! `respond` walks an ordered table of keyword rules and answers with the
//! first rule that has any of its keywords somewhere in the lower-cased
//! input. Matching is substring containment: "wantonly" contains "want".

use crate::lib::entry::Category;

/// Names the chatbot may go by
pub const BOT_NAMES: &[&str] = &[
    "Lilly",
    "Leo",
    "Charlotte",
    "James",
    "William",
    "John",
    "Jonny",
    "Joppy",
    "Jane",
    "Jiva",
    "Legend of the Universe",
    "God",
    "Cookie",
    "Daisy",
    "Pinky",
];

/// A set of trigger words and the reply they produce
struct Rule {
    keywords: &'static [&'static str],
    reply: &'static str,
}

impl Rule {
    fn matches(&self, input: &str) -> bool {
        self.keywords.iter().any(|k| input.contains(k))
    }
}

// first match wins
const RULES: &[Rule] = &[
    Rule {
        keywords: &["hi", "hello", "hey"],
        reply: "Hello! 👋 I'm your finance buddy. Ask me how to save or what counts as a need.",
    },
    Rule {
        keywords: &["save"],
        reply: "Try saving 15–25% of your income. Even ₹50 daily adds up!",
    },
    Rule {
        keywords: &["spend"],
        reply: "Track every purchase. Cut one 'want' per week to see real change.",
    },
    Rule {
        keywords: &["need"],
        reply: "Needs are essentials: food, rent, bills, transport.",
    },
    Rule {
        keywords: &["want"],
        reply: "Wants are extras: gadgets, snacks, subscriptions.",
    },
];

const FALLBACK: &str = "I’m still learning — try: 'How can I save?' or 'What is a need?'";

/// Reply to free text
pub fn respond(input: &str) -> &'static str {
    let input = input.to_lowercase();
    RULES
        .iter()
        .find(|r| r.matches(&input))
        .map(|r| r.reply)
        .unwrap_or(FALLBACK)
}

/// Fixed advice for an item of known category
pub fn item_advice(item: &str, category: Category, bot_name: &str) -> String {
    match category {
        Category::Need => format!("{}: '{}' is essential. Prioritize it in your budget!", bot_name, item),
        Category::Want => format!(
            "{}: '{}' is a Want. Consider it only if your Needs are well-covered.",
            bot_name, item
        ),
    }
}

/// Case-insensitive lookup into `BOT_NAMES`, returns the canonical spelling
pub fn bot_name(s: &str) -> Option<&'static str> {
    let s = s.trim();
    BOT_NAMES.iter().copied().find(|n| n.eq_ignore_ascii_case(s))
}

#[cfg(test)]
mod test {
    use super::*;

    macro_rules! replies {
        ( $input:expr => fallback ) => {
            assert_eq!(respond($input), FALLBACK, "input {:?}", $input)
        };
        ( $input:expr => $idx:expr ) => {
            assert_eq!(respond($input), RULES[$idx].reply, "input {:?}", $input)
        };
    }

    #[test]
    fn greeting() {
        replies!("hello there" => 0);
        replies!("HEY" => 0);
        // "hi" hides inside other words too
        replies!("this costs too much" => 0);
    }

    #[test]
    fn first_match_wins() {
        replies!("I want to save more" => 1);
        replies!("spend or save?" => 1);
        replies!("do I need to spend less" => 2);
        replies!("need or want" => 3);
    }

    #[test]
    fn substring_matching() {
        replies!("wantonly" => 4);
        replies!("SPENDING" => 2);
        replies!("necessary needs" => 3);
    }

    #[test]
    fn unmatched_input() {
        replies!("xyz" => fallback);
        replies!("" => fallback);
    }

    #[test]
    fn item_templates() {
        assert_eq!(
            item_advice("Rent", Category::Need, "Leo"),
            "Leo: 'Rent' is essential. Prioritize it in your budget!"
        );
        assert_eq!(
            item_advice("Netflix", Category::Want, "Cookie"),
            "Cookie: 'Netflix' is a Want. Consider it only if your Needs are well-covered."
        );
    }

    #[test]
    fn bot_names() {
        assert_eq!(BOT_NAMES.len(), 15);
        assert_eq!(bot_name("lilly"), Some("Lilly"));
        assert_eq!(bot_name(" legend of the universe "), Some("Legend of the Universe"));
        assert_eq!(bot_name("Bob"), None);
    }
}
