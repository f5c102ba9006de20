//! Command dispatch: turns a parsed [`Intent`] into a [`Reply`].
//!
//! The dispatcher resolves call/message targets against the injected
//! [`ContactStore`], looks apps up in the [`AppDirectory`], and consults
//! the [`Device`] for battery, vibration and time. It never opens URLs or
//! speaks; the [`Action`] in each reply tells the host what to do.
//!
//! Expected misses (unknown contact, unknown app, missing hardware) come
//! back as [`DispatchError`] values whose `Display` is the sentence to show
//! the user.

pub mod device;

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::{debug, info};

use crate::apps::AppDirectory;
use crate::contacts::store::ContactStore;
use crate::contacts::ContactResolver;
use crate::intent::{parse, Intent};

use self::device::{Device, DeviceError};

/// Spoken in response to [`Intent::Help`].
pub const HELP_TEXT: &str = "Try: call Mom, text Alice hello, navigate to Times Square, \
                             open YouTube, what's the time, vibrate, battery.";

/// Spoken in response to [`Intent::Unknown`].
pub const NOT_UNDERSTOOD: &str = "Sorry, I didn't understand that.";

/// On/off durations used for the "vibrate" command.
pub const VIBRATION_PATTERN_MS: [u32; 3] = [200, 100, 200];

const DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/?api=1&destination=";

static PHONE_LITERAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{5,}$").ok());

/// Side effect the host should perform for a reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Hand a `tel:` or `sms:` URI to the platform in the current context.
    OpenUri {
        /// The URI to open.
        uri: String,
    },
    /// Open a web URL in a new window or tab.
    OpenUrl {
        /// The URL to open.
        url: String,
    },
    /// Nothing beyond showing or speaking the text.
    Speak,
}

/// The outcome of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reply {
    /// What the host should do.
    pub action: Action,
    /// What the host should say or show.
    pub text: String,
}

impl Reply {
    /// A reply that only speaks `text`.
    pub fn speak(text: impl Into<String>) -> Self {
        Self {
            action: Action::Speak,
            text: text.into(),
        }
    }
}

/// A device capability the dispatcher may need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Battery level.
    Battery,
    /// Vibration motor.
    Vibration,
}

fn unavailable_message(capability: &Capability) -> &'static str {
    match capability {
        Capability::Battery => "Battery info is not supported on this device.",
        Capability::Vibration => "Vibration is not supported on this device.",
    }
}

fn failed_message(capability: &Capability) -> &'static str {
    match capability {
        Capability::Battery => "I couldn't read the battery level.",
        Capability::Vibration => "I couldn't buzz the device.",
    }
}

/// A command that could not be completed. `Display` is user-facing.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// No contact matched and the target is not a phone number.
    #[error("I couldn't find {target}.")]
    TargetNotFound {
        /// The target as spoken.
        target: String,
    },

    /// The app is not in the directory.
    #[error("I can't open {app}.")]
    AppNotFound {
        /// The app name as spoken.
        app: String,
    },

    /// The host does not have the capability.
    #[error("{}", unavailable_message(.0))]
    CapabilityUnavailable(Capability),

    /// The capability exists but failed.
    #[error("{}", failed_message(.capability))]
    CapabilityFailed {
        /// Which capability failed.
        capability: Capability,
        /// The underlying device error.
        #[source]
        source: DeviceError,
    },
}

/// Return the compacted number if `target` looks like a phone number.
///
/// Whitespace is removed first, so "555 123 4567" qualifies. Requires at
/// least five ASCII digits with an optional leading `+`.
pub fn phone_literal(target: &str) -> Option<String> {
    let compact: String = target.chars().filter(|c| !c.is_whitespace()).collect();
    let pattern = PHONE_LITERAL.as_ref()?;
    pattern.is_match(&compact).then_some(compact)
}

/// Percent-encode a URI component, spaces as `%20`.
fn encode_component(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Routes intents to contacts, apps and device capabilities.
pub struct Dispatcher {
    store: Box<dyn ContactStore>,
    apps: AppDirectory,
    resolver: ContactResolver,
    device: Device,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("apps", &self.apps)
            .field("resolver", &self.resolver)
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Dispatcher over `store` with built-in apps, the default resolver
    /// and a headless device.
    pub fn new(store: Box<dyn ContactStore>) -> Self {
        Self {
            store,
            apps: AppDirectory::default(),
            resolver: ContactResolver::default(),
            device: Device::headless(),
        }
    }

    /// Replace the app directory.
    pub fn with_apps(mut self, apps: AppDirectory) -> Self {
        self.apps = apps;
        self
    }

    /// Replace the contact resolver.
    pub fn with_resolver(mut self, resolver: ContactResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Replace the device capabilities.
    pub fn with_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Parse and dispatch one utterance, rendering failures as speech.
    ///
    /// Returns `None` for blank input.
    pub fn handle(&self, utterance: &str) -> Option<Reply> {
        let cleaned = utterance.trim();
        if cleaned.is_empty() {
            return None;
        }

        let intent = parse(cleaned);
        match self.dispatch(&intent) {
            Ok(reply) => {
                info!(intent = intent.kind(), "command handled");
                Some(reply)
            }
            Err(e) => {
                info!(intent = intent.kind(), outcome = %e, "command not completed");
                Some(Reply::speak(e.to_string()))
            }
        }
    }

    /// Complete an intent.
    ///
    /// # Errors
    ///
    /// Returns a [`DispatchError`] when a target, app or capability is
    /// missing. These are expected outcomes, not faults.
    pub fn dispatch(&self, intent: &Intent) -> Result<Reply, DispatchError> {
        match intent {
            Intent::Call { target } => {
                let number = self.resolve_number(target)?;
                Ok(Reply {
                    action: Action::OpenUri {
                        uri: format!("tel:{number}"),
                    },
                    text: format!("Calling {target}."),
                })
            }
            Intent::SendMessage { target, body } => {
                let number = self.resolve_number(target)?;
                Ok(Reply {
                    action: Action::OpenUri {
                        uri: format!("sms:{number}?body={}", encode_component(body)),
                    },
                    text: format!("Opening messages to {target}."),
                })
            }
            Intent::Navigate { destination } => Ok(Reply {
                action: Action::OpenUrl {
                    url: format!("{DIRECTIONS_URL}{}", encode_component(destination)),
                },
                text: format!("Starting directions to {destination}."),
            }),
            Intent::OpenApp { app } => {
                let url = self
                    .apps
                    .lookup(app)
                    .ok_or_else(|| DispatchError::AppNotFound { app: app.clone() })?;
                Ok(Reply {
                    action: Action::OpenUrl {
                        url: url.to_owned(),
                    },
                    text: format!("Opening {app}."),
                })
            }
            Intent::QueryTime => {
                let now = self.device.clock.now();
                Ok(Reply::speak(format!("It is {}.", now.format("%-I:%M %p"))))
            }
            Intent::QueryBattery => self.battery_reply(),
            Intent::Vibrate => self.vibrate_reply(),
            Intent::Help => Ok(Reply::speak(HELP_TEXT)),
            Intent::Unknown { .. } => Ok(Reply::speak(NOT_UNDERSTOOD)),
        }
    }

    fn resolve_number(&self, target: &str) -> Result<String, DispatchError> {
        if let Some(number) = phone_literal(target) {
            debug!(number = %number, "target is a phone number");
            return Ok(number);
        }

        let contacts = self.store.load();
        self.resolver
            .resolve(&contacts, target)
            .map(|contact| contact.number.clone())
            .ok_or_else(|| DispatchError::TargetNotFound {
                target: target.to_owned(),
            })
    }

    fn battery_reply(&self) -> Result<Reply, DispatchError> {
        let battery = &self.device.battery;
        if !battery.is_available() {
            return Err(DispatchError::CapabilityUnavailable(Capability::Battery));
        }
        let status = battery
            .status()
            .map_err(|source| DispatchError::CapabilityFailed {
                capability: Capability::Battery,
                source,
            })?;
        let charging = if status.charging { ", and charging" } else { "" };
        Ok(Reply::speak(format!(
            "Battery is at {} percent{charging}.",
            status.percent()
        )))
    }

    fn vibrate_reply(&self) -> Result<Reply, DispatchError> {
        let vibration = &self.device.vibration;
        if !vibration.is_available() {
            return Err(DispatchError::CapabilityUnavailable(Capability::Vibration));
        }
        vibration
            .vibrate(&VIBRATION_PATTERN_MS)
            .map_err(|source| DispatchError::CapabilityFailed {
                capability: Capability::Vibration,
                source,
            })?;
        Ok(Reply::speak("Buzzing now."))
    }
}
