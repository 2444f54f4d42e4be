// Copyright 2026 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Form field enhancement, contact form validation and submission.
//!
//! Submission goes through a [`Submitter`]. The site has no backend, so the
//! landing page uses [`SimulatedSubmitter`], which reports an outcome after
//! a fixed delay on the [`TimerHost`].
//!
//! While a submission is in flight the submit button shows a spinner and is
//! disabled, and further submit events are ignored. The outcome banner in
//! `#formMessage` hides itself after a delay; showing a new banner restarts
//! that delay.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use crate::host::{DomEvent, Element, ElementLocator, ElementOf, EventSource, EventTarget, Host};
use crate::time::Duration;
use crate::timer::{TimerHost, TimerId};

/// Submit button label while a submission is in flight.
pub const SENDING_LABEL: &str = "<i class=\"fas fa-spinner fa-spin mr-2\"></i> Enviando...";

/// Banner text after a successful submission.
pub const SENT_MESSAGE: &str = "¡Mensaje enviado con éxito! Te contactaremos pronto.";

/// Banner text after a failed submission.
pub const FAILED_MESSAGE: &str = "Hubo un error al enviar el mensaje. Por favor intenta de nuevo.";

const BANNER_BASE: &str = "mt-4 p-4 rounded-xl border";
const ERROR_CLASSES: &str = "text-red-500 text-sm mt-1 field-error";

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Why a required field was rejected. The message is shown under the field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// Empty after trimming.
    #[error("Este campo es requerido")]
    Required,
    /// An email field that does not look like an address.
    #[error("Por favor ingresa un email válido")]
    InvalidEmail,
}

/// Loose address check: one `@`, no whitespace, non-empty local part, and a
/// dot in the domain with text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Checks one required field value.
pub fn check_field(value: &str, is_email: bool) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        Err(FieldError::Required)
    } else if is_email && !is_valid_email(value) {
        Err(FieldError::InvalidEmail)
    } else {
        Ok(())
    }
}

/// Marks `field` invalid and puts `error` under it, replacing an earlier
/// message.
pub fn show_field_error<L: ElementLocator>(host: &L, field: &L::Element, error: FieldError) {
    clear_field_error(field);
    field.add_class("border-red-500");
    let (Some(parent), Some(message)) = (field.parent(), host.create_element("div")) else {
        return;
    };
    message.set_class_name(ERROR_CLASSES);
    message.set_text(&format!("{error}"));
    parent.append_child(&message);
}

/// Removes the invalid marker and message from `field`.
pub fn clear_field_error<E: Element>(field: &E) {
    field.remove_class("border-red-500");
    if let Some(message) = field.parent().and_then(|p| p.query(".field-error")) {
        message.remove();
    }
}

/// Validates every `[required]` field of `form`, updating inline errors.
/// Returns `true` when all pass.
pub fn validate_form<L: ElementLocator>(host: &L, form: &L::Element) -> bool {
    let mut valid = true;
    for field in form.query_all("[required]") {
        let is_email = field.attribute("type").as_deref() == Some("email");
        match check_field(&field.value(), is_email) {
            Ok(()) => clear_field_error(&field),
            Err(error) => {
                show_field_error(host, &field, error);
                valid = false;
            }
        }
    }
    valid
}

// ---------------------------------------------------------------------------
// Field enhancement
// ---------------------------------------------------------------------------

/// Focus, blur and fill-state styling for `.form-input` fields and `select`
/// placeholders. Returns the number of controls enhanced.
pub fn enhance_fields<H: Host>(host: &Rc<H>) -> usize {
    let inputs = host.query_all(".form-input");
    for input in &inputs {
        let focused = input.clone();
        host.listen(
            EventTarget::Element(input),
            DomEvent::Focus,
            Box::new(move |_| {
                if let Some(parent) = focused.parent() {
                    parent.add_class("focused");
                }
            }),
        );
        let blurred = input.clone();
        host.listen(
            EventTarget::Element(input),
            DomEvent::Blur,
            Box::new(move |_| {
                if let Some(parent) = blurred.parent() {
                    parent.remove_class("focused");
                }
            }),
        );
        let typed = input.clone();
        host.listen(
            EventTarget::Element(input),
            DomEvent::Input,
            Box::new(move |_| typed.set_class("has-value", !typed.value().trim().is_empty())),
        );
    }

    let selects = host.query_all("select");
    for select in &selects {
        let changed = select.clone();
        host.listen(
            EventTarget::Element(select),
            DomEvent::Change,
            Box::new(move |_| {
                let chosen = !changed.value().is_empty();
                changed.set_class("text-gray-900", chosen);
                changed.set_class("text-gray-500", !chosen);
            }),
        );
    }
    inputs.len() + selects.len()
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// Result of a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SubmitOutcome {
    /// The message was delivered.
    #[default]
    Sent,
    /// Delivery failed.
    Failed,
}

/// Completion callback for a [`Submitter`].
pub type SubmitDone = Box<dyn FnOnce(SubmitOutcome)>;

/// Delivers a validated form.
pub trait Submitter<E> {
    /// Starts delivering `form`; `done` runs exactly once with the outcome.
    fn submit(&self, form: &E, done: SubmitDone);
}

/// A stand-in submitter that reports a fixed outcome after a delay.
pub struct SimulatedSubmitter {
    timers: Rc<dyn TimerHost>,
    delay: Duration,
    outcome: Cell<SubmitOutcome>,
}

impl fmt::Debug for SimulatedSubmitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulatedSubmitter")
            .field("delay", &self.delay)
            .field("outcome", &self.outcome.get())
            .finish_non_exhaustive()
    }
}

impl SimulatedSubmitter {
    /// Reports [`SubmitOutcome::Sent`] `delay` after each submission.
    pub fn new(timers: Rc<dyn TimerHost>, delay: Duration) -> Self {
        Self {
            timers,
            delay,
            outcome: Cell::new(SubmitOutcome::Sent),
        }
    }

    /// Changes the outcome reported by later submissions.
    pub fn set_outcome(&self, outcome: SubmitOutcome) {
        self.outcome.set(outcome);
    }
}

impl<E> Submitter<E> for SimulatedSubmitter {
    fn submit(&self, _form: &E, done: SubmitDone) {
        let outcome = self.outcome.get();
        self.timers.schedule(self.delay, Box::new(move || done(outcome)));
    }
}

/// The `#contactForm` controller.
pub struct ContactForm<H: Host> {
    host: Rc<H>,
    form: ElementOf<H>,
    submitter: Rc<dyn Submitter<ElementOf<H>>>,
    banner_duration: Duration,
    in_flight: Cell<bool>,
    banner_timer: Cell<Option<TimerId>>,
}

impl<H: Host> fmt::Debug for ContactForm<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactForm")
            .field("form", &self.form)
            .field("in_flight", &self.in_flight.get())
            .finish_non_exhaustive()
    }
}

impl<H: Host> ContactForm<H> {
    /// Subscribes to `#contactForm` submit events. Returns `None` when the
    /// page has no contact form.
    pub fn install(
        host: &Rc<H>,
        submitter: Rc<dyn Submitter<ElementOf<H>>>,
        banner_duration: Duration,
    ) -> Option<Rc<Self>> {
        let Some(form) = host.by_id("contactForm") else {
            tracing::debug!("no #contactForm");
            return None;
        };
        let this = Rc::new(Self {
            host: host.clone(),
            form,
            submitter,
            banner_duration,
            in_flight: Cell::new(false),
            banner_timer: Cell::new(None),
        });
        let handler = this.clone();
        host.listen(
            EventTarget::Element(&this.form),
            DomEvent::Submit,
            Box::new(move |_| handler.submit()),
        );
        Some(this)
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.get()
    }

    /// Validates and, if valid, submits the form.
    pub fn submit(self: &Rc<Self>) {
        if self.in_flight.get() {
            tracing::debug!("submission already in flight; ignoring submit");
            return;
        }
        if !validate_form(&*self.host, &self.form) {
            return;
        }

        let button = self.form.query("button[type=\"submit\"]");
        let label = button.as_ref().map(Element::inner_html).unwrap_or_default();
        if let Some(button) = &button {
            button.set_inner_html(SENDING_LABEL);
            button.set_disabled(true);
            button.add_class("opacity-75");
        }
        self.in_flight.set(true);

        let this = self.clone();
        self.submitter.submit(
            &self.form,
            Box::new(move |outcome| this.finish(outcome, button, &label)),
        );
    }

    fn finish(&self, outcome: SubmitOutcome, button: Option<ElementOf<H>>, label: &str) {
        match outcome {
            SubmitOutcome::Sent => {
                self.show_banner(outcome);
                self.form.reset_form();
                for input in self.form.query_all(".form-input") {
                    input.remove_class("has-value");
                }
            }
            SubmitOutcome::Failed => {
                tracing::debug!("contact form submission failed");
                self.show_banner(outcome);
            }
        }
        if let Some(button) = button {
            button.set_inner_html(label);
            button.set_disabled(false);
            button.remove_class("opacity-75");
        }
        self.in_flight.set(false);
    }

    fn show_banner(&self, outcome: SubmitOutcome) {
        let Some(banner) = self.host.by_id("formMessage") else {
            return;
        };
        let (colors, icon, text) = match outcome {
            SubmitOutcome::Sent => (
                "bg-green-50 text-green-800 border-green-200",
                "check-circle",
                SENT_MESSAGE,
            ),
            SubmitOutcome::Failed => (
                "bg-red-50 text-red-800 border-red-200",
                "exclamation-circle",
                FAILED_MESSAGE,
            ),
        };
        banner.set_class_name(&format!("{BANNER_BASE} {colors}"));
        banner.set_inner_html(&format!("<i class=\"fas fa-{icon} mr-2\"></i> {text}"));
        banner.remove_class("hidden");

        if let Some(previous) = self.banner_timer.take() {
            self.host.cancel(previous);
        }
        let hide = banner.clone();
        let id = self
            .host
            .schedule(self.banner_duration, Box::new(move || hide.add_class("hidden")));
        self.banner_timer.set(Some(id));
    }
}
