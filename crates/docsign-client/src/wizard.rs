//! Signature wizard
//!
//! Collects the signer name and PIN over three steps and yields a
//! [`SignatureRequest`] once both have been entered and reviewed.

use std::fmt;

use docsign_common::{Error, SignatureRequest};

/// Shown when advancing past [`WizardStep::EnterName`] without a name
pub const NAME_REQUIRED_MESSAGE: &str = "Please enter your name";

/// Shown when advancing past [`WizardStep::EnterPin`] without a PIN
pub const PIN_REQUIRED_MESSAGE: &str = "Please enter the PIN";

const MASKED_PIN: &str = "****";

/// Wizard step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// Signer name
    #[default]
    EnterName,
    /// Shared PIN
    EnterPin,
    /// Confirm before submitting
    Review,
}

impl WizardStep {
    /// All steps in order
    pub const ALL: [WizardStep; 3] = [Self::EnterName, Self::EnterPin, Self::Review];

    /// Title shown in the stepper
    pub fn label(&self) -> &'static str {
        match self {
            Self::EnterName => "Enter Name",
            Self::EnterPin => "Enter PIN",
            Self::Review => "Review",
        }
    }

    /// Zero based position
    pub fn index(&self) -> usize {
        match self {
            Self::EnterName => 0,
            Self::EnterPin => 1,
            Self::Review => 2,
        }
    }

    /// Following step, `None` at [`WizardStep::Review`]
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::EnterName => Some(Self::EnterPin),
            Self::EnterPin => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// Preceding step, `None` at [`WizardStep::EnterName`]
    pub fn previous(&self) -> Option<Self> {
        match self {
            Self::EnterName => None,
            Self::EnterPin => Some(Self::EnterName),
            Self::Review => Some(Self::EnterPin),
        }
    }

    /// Label of the forward button
    pub fn primary_action(&self) -> &'static str {
        match self {
            Self::Review => "Finish",
            _ => "Next",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of a successful [`Wizard::next`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardTransition {
    /// Moved to the given step
    Advanced(WizardStep),
    /// Review confirmed
    Completed(SignatureRequest),
}

/// Wizard state
///
/// Owned by the viewer while the wizard is open and dropped on close, so a
/// reopened wizard always starts empty.
#[derive(Clone, Default)]
pub struct Wizard {
    step: WizardStep,
    name: String,
    pin: String,
    error: Option<String>,
}

impl fmt::Debug for Wizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("step", &self.step)
            .field("name", &self.name)
            .field("pin", &"<redacted>")
            .field("error", &self.error)
            .finish()
    }
}

impl Wizard {
    /// Create new [`Wizard`] at [`WizardStep::EnterName`]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Entered name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entered PIN
    pub fn pin(&self) -> &str {
        &self.pin
    }

    /// Error from the last rejected advance
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Update the name field
    pub fn set_name<S>(&mut self, name: S)
    where
        S: Into<String>,
    {
        self.name = name.into();
    }

    /// Update the PIN field
    pub fn set_pin<S>(&mut self, pin: S)
    where
        S: Into<String>,
    {
        self.pin = pin.into();
    }

    /// Advance one step
    ///
    /// An empty field keeps the wizard on its step and records the error. At
    /// [`WizardStep::Review`] both fields are checked again and the wizard is
    /// sent back to the first empty one.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<WizardTransition, Error> {
        let transition = match self.step {
            WizardStep::EnterName => {
                self.require_name()?;
                self.step = WizardStep::EnterPin;
                WizardTransition::Advanced(self.step)
            }
            WizardStep::EnterPin => {
                self.require_pin()?;
                self.step = WizardStep::Review;
                WizardTransition::Advanced(self.step)
            }
            WizardStep::Review => {
                if let Err(err) = self.require_name() {
                    self.step = WizardStep::EnterName;
                    return Err(err);
                }
                if let Err(err) = self.require_pin() {
                    self.step = WizardStep::EnterPin;
                    return Err(err);
                }
                WizardTransition::Completed(SignatureRequest::new(
                    self.name.clone(),
                    self.pin.clone(),
                ))
            }
        };

        self.error = None;

        Ok(transition)
    }

    /// Go back one step, no-op at [`WizardStep::EnterName`]
    pub fn back(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
            self.error = None;
        }
    }

    /// Review text with the PIN masked
    pub fn summary(&self) -> String {
        format!("Name: {}\nPIN: {}", self.name, MASKED_PIN)
    }

    fn require_name(&mut self) -> Result<(), Error> {
        if self.name.is_empty() {
            self.error = Some(NAME_REQUIRED_MESSAGE.to_string());
            return Err(Error::validation(NAME_REQUIRED_MESSAGE));
        }
        Ok(())
    }

    fn require_pin(&mut self) -> Result<(), Error> {
        if self.pin.is_empty() {
            self.error = Some(PIN_REQUIRED_MESSAGE.to_string());
            return Err(Error::validation(PIN_REQUIRED_MESSAGE));
        }
        Ok(())
    }
}
