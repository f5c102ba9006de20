//! Rule-based intent parser.
//!
//! An utterance is lower-cased and trimmed, then run through a fixed chain
//! of rules. The first rule whose extractor returns an intent wins; input
//! no rule claims becomes [`Intent::Unknown`]. Multi-word command prefixes
//! are tried before the bare keyword rules (`battery`, `vibrate`), so
//! "call the battery shop" is a call, not a battery query.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    /// Place a phone call to a contact name or number.
    Call {
        /// Contact name or number as spoken.
        target: String,
    },
    /// Compose a text message.
    SendMessage {
        /// Contact name or number as spoken.
        target: String,
        /// Message body, possibly empty.
        body: String,
    },
    /// Start turn-by-turn directions.
    Navigate {
        /// Free-text destination.
        destination: String,
    },
    /// Open an app from the app directory.
    OpenApp {
        /// App name as spoken.
        app: String,
    },
    /// Ask for the current time.
    QueryTime,
    /// Ask for the battery level.
    QueryBattery,
    /// Buzz the device.
    Vibrate,
    /// List what the assistant understands.
    Help,
    /// Nothing matched.
    Unknown {
        /// The input exactly as received.
        original: String,
    },
}

impl Intent {
    /// Short snake_case name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Call { .. } => "call",
            Self::SendMessage { .. } => "send_message",
            Self::Navigate { .. } => "navigate",
            Self::OpenApp { .. } => "open_app",
            Self::QueryTime => "query_time",
            Self::QueryBattery => "query_battery",
            Self::Vibrate => "vibrate",
            Self::Help => "help",
            Self::Unknown { .. } => "unknown",
        }
    }
}

/// One step of the rule chain.
struct Rule {
    name: &'static str,
    extract: fn(&str) -> Option<Intent>,
}

/// Rules in priority order.
const RULES: &[Rule] = &[
    Rule {
        name: "help",
        extract: help,
    },
    Rule {
        name: "call",
        extract: call,
    },
    Rule {
        name: "send_message",
        extract: send_message,
    },
    Rule {
        name: "navigate",
        extract: navigate,
    },
    Rule {
        name: "open_app",
        extract: open_app,
    },
    Rule {
        name: "query_time",
        extract: query_time,
    },
    Rule {
        name: "query_battery",
        extract: query_battery,
    },
    Rule {
        name: "vibrate",
        extract: vibrate,
    },
];

const CALL_KEYWORDS: &[&str] = &["call", "dial"];
// Longest first so "send message to bob" does not leave "to bob" as the name.
const MESSAGE_KEYWORDS: &[&str] = &[
    "send a message to",
    "send message to",
    "send a message",
    "send message",
    "text",
];
const NAVIGATE_KEYWORDS: &[&str] = &["navigate to", "directions to", "take me to", "go to"];
const OPEN_KEYWORDS: &[&str] = &["open", "launch"];
const TIME_PHRASES: &[&str] = &["what's the time", "whats the time", "what time is it", "time"];

/// Classify an utterance. Never fails.
pub fn parse(input: &str) -> Intent {
    let text = input.trim().to_lowercase();
    if text.is_empty() {
        return Intent::Unknown {
            original: input.to_owned(),
        };
    }

    for rule in RULES {
        if let Some(intent) = (rule.extract)(&text) {
            debug!(rule = rule.name, "intent rule matched");
            return intent;
        }
    }

    debug!("no intent rule matched");
    Intent::Unknown {
        original: input.to_owned(),
    }
}

/// Strip a (possibly multi-word) keyword from the front of `text`.
///
/// Every keyword word must be followed by whitespace, and something must
/// remain afterwards. Returns the trimmed remainder.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let mut rest = text;
    for word in keyword.split(' ') {
        rest = rest.strip_prefix(word)?;
        let trimmed = rest.trim_start();
        if trimmed.len() == rest.len() {
            return None;
        }
        rest = trimmed;
    }
    let rest = rest.trim_end();
    (!rest.is_empty()).then_some(rest)
}

fn strip_any<'a>(text: &'a str, keywords: &[&str]) -> Option<&'a str> {
    keywords.iter().find_map(|kw| strip_keyword(text, kw))
}

fn help(text: &str) -> Option<Intent> {
    (text == "help" || text.starts_with("what can you do")).then_some(Intent::Help)
}

fn call(text: &str) -> Option<Intent> {
    strip_any(text, CALL_KEYWORDS).map(|target| Intent::Call {
        target: target.to_owned(),
    })
}

fn send_message(text: &str) -> Option<Intent> {
    let rest = strip_any(text, MESSAGE_KEYWORDS)?;
    let (target, body) = split_recipient(rest)?;
    Some(Intent::SendMessage {
        target: target.to_owned(),
        body: body.to_owned(),
    })
}

/// Split `"<name>[,|:]<body>"`.
///
/// With a comma or colon the name is everything before it. Without one the
/// name is the first word and the body is the rest.
fn split_recipient(rest: &str) -> Option<(&str, &str)> {
    let (name, body) = rest
        .split_once(|c: char| c == ',' || c == ':')
        .or_else(|| rest.split_once(char::is_whitespace))
        .unwrap_or((rest, ""));
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name, body.trim()))
}

fn navigate(text: &str) -> Option<Intent> {
    strip_any(text, NAVIGATE_KEYWORDS).map(|destination| Intent::Navigate {
        destination: destination.to_owned(),
    })
}

fn open_app(text: &str) -> Option<Intent> {
    strip_any(text, OPEN_KEYWORDS).map(|app| Intent::OpenApp {
        app: app.to_owned(),
    })
}

fn query_time(text: &str) -> Option<Intent> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    TIME_PHRASES
        .contains(&collapsed.as_str())
        .then_some(Intent::QueryTime)
}

fn query_battery(text: &str) -> Option<Intent> {
    text.contains("battery").then_some(Intent::QueryBattery)
}

fn vibrate(text: &str) -> Option<Intent> {
    (text.contains("vibrate") || text.contains("buzz")).then_some(Intent::Vibrate)
}
