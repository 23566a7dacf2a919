//! Project input form.
//!
//! # Responsibility
//! - Read and validate the title, description and people fields on submit.
//! - Hand valid input to the store and reset the form.
//!
//! # Invariants
//! - Rejected input never reaches the store and leaves the fields untouched.
//! - Rejections end in a user alert; nothing propagates out of the handler.

use crate::component::{bind_handler, Component, ComponentError, MountHost, MountSpec, TemplateMount};
use crate::config::PageLayout;
use crate::dom::{DomEvent, EventType, HostDocument, NodeHandle};
use crate::state::store::ProjectStore;
use crate::validation::{violations, ConstraintDescriptor, ConstraintViolation};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

const COMPONENT: &str = "ProjectInput";
const FORM_ELEMENT_ID: &str = "user-input";
/// Alert shown when any field fails validation.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input, please try again!";

const DESCRIPTION_MIN_LENGTH: usize = 5;
const PEOPLE_MIN: f64 = 1.0;
const PEOPLE_MAX: f64 = 5.0;

/// Form field names used in rejection reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Title,
    Description,
    People,
}

impl InputField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::People => "people",
        }
    }
}

/// Why a submission was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum InputRejection {
    Constraint {
        field: InputField,
        violations: Vec<ConstraintViolation>,
    },
    /// People count passed the range checks but is not a whole number.
    FractionalPeople(f64),
}

impl Display for InputRejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constraint { field, violations } => {
                let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
                write!(f, "{} rejected: {}", field.as_str(), reasons.join("; "))
            }
            Self::FractionalPeople(value) => {
                write!(f, "people rejected: {value} is not a whole number")
            }
        }
    }
}

impl Error for InputRejection {}

/// Validated submission ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub people: u32,
}

/// Form component creating projects.
pub struct ProjectInput {
    inner: Rc<InputFields>,
}

struct InputFields {
    mount: TemplateMount,
    store: Rc<ProjectStore>,
    title: NodeHandle,
    description: NodeHandle,
    people: NodeHandle,
}

impl ProjectInput {
    /// Inserts the form at the start of the layout's input host.
    pub fn new(
        document: Rc<dyn HostDocument>,
        store: Rc<ProjectStore>,
        layout: &PageLayout,
    ) -> Result<Self, ComponentError> {
        let mount = TemplateMount::attach(
            document,
            &MountSpec {
                template_id: &layout.input_template_id,
                host: MountHost::Id(&layout.input_host_id),
                insert_at_start: true,
                new_element_id: Some(FORM_ELEMENT_ID.to_string()),
            },
        )?;
        let title = mount.select(COMPONENT, "#title")?;
        let description = mount.select(COMPONENT, "#description")?;
        let people = mount.select(COMPONENT, "#people")?;

        let input = Self {
            inner: Rc::new(InputFields {
                mount,
                store,
                title,
                description,
                people,
            }),
        };
        input.configure();
        input.render_content();
        Ok(input)
    }

    /// Field elements in title, description, people order.
    pub fn fields(&self) -> [NodeHandle; 3] {
        [self.inner.title, self.inner.description, self.inner.people]
    }

    fn configure(&self) {
        self.inner.mount.document().add_event_listener(
            self.inner.mount.element(),
            EventType::Submit,
            bind_handler(&self.inner, InputFields::submit_handler),
        );
    }
}

impl Component for ProjectInput {
    fn mount(&self) -> &TemplateMount {
        &self.inner.mount
    }

    fn render_content(&self) {}
}

impl InputFields {
    fn submit_handler(&self, event: &mut DomEvent) {
        event.prevent_default();
        match self.gather_user_input() {
            Ok(draft) => {
                let id = self
                    .store
                    .add_project(draft.title, draft.description, draft.people);
                self.clear_inputs();
                info!("event=input_submit module=component status=ok project_id={id}");
            }
            Err(rejection) => {
                warn!("event=input_submit module=component status=error reason={rejection}");
                self.mount.document().alert(INVALID_INPUT_MESSAGE);
            }
        }
    }

    fn gather_user_input(&self) -> Result<ProjectDraft, InputRejection> {
        let document = self.mount.document();
        let title = document.input_value(self.title);
        let description = document.input_value(self.description);
        let people = coerce_number(&document.input_value(self.people));

        check(InputField::Title, &ConstraintDescriptor::text(title.as_str()).required())?;
        check(
            InputField::Description,
            &ConstraintDescriptor::text(description.as_str())
                .required()
                .min_length(DESCRIPTION_MIN_LENGTH),
        )?;
        check(
            InputField::People,
            &ConstraintDescriptor::number(people)
                .required()
                .min(PEOPLE_MIN)
                .max(PEOPLE_MAX),
        )?;
        if people.fract() != 0.0 {
            return Err(InputRejection::FractionalPeople(people));
        }

        Ok(ProjectDraft {
            title,
            description,
            people: people as u32,
        })
    }

    fn clear_inputs(&self) {
        let document = self.mount.document();
        for field in [self.title, self.description, self.people] {
            document.set_input_value(field, "");
        }
    }
}

fn check(field: InputField, descriptor: &ConstraintDescriptor) -> Result<(), InputRejection> {
    let found = violations(descriptor);
    if found.is_empty() {
        Ok(())
    } else {
        Err(InputRejection::Constraint {
            field,
            violations: found,
        })
    }
}

/// Numeric coercion of a raw field value: blank is `0`, garbage is `NaN`.
///
/// Follows the page's unary-plus rules rather than `f64::from_str`: `0x`, `0o`
/// and `0b` literals are integers, `Infinity` is spelled exactly, and
/// `inf`/`nan` are garbage.
fn coerce_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return coerce_radix_literal(&trimmed[2..], radix);
    }

    let unsigned = trimmed
        .strip_prefix(|c: char| c == '+' || c == '-')
        .unwrap_or(trimmed);
    let decimal = |c: char| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-');
    match unsigned {
        "Infinity" if trimmed.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ if unsigned.chars().all(decimal) => trimmed.parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn coerce_radix_literal(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
        })
        .unwrap_or(f64::NAN)
}
