use gloo_timers::future::TimeoutFuture;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::notification::{NotificationKind, Toaster};
use crate::config;
use crate::reveal::Reveal;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

pub const SUBMIT_LABEL: &str = "Envoyer ma demande";
pub const BUSY_LABEL: &str = "Envoi en cours...";
pub const SUCCESS_MESSAGE: &str =
    "Merci ! Votre demande a bien été envoyée. Nous vous répondrons sous 24h.";

pub const PROJECT_TYPES: &[(&str, &str)] = &[
    ("charpente", "Charpente traditionnelle"),
    ("ossature", "Maison ossature bois"),
    ("extension", "Extension / surélévation"),
    ("renovation", "Rénovation"),
    ("amenagement", "Aménagement extérieur"),
    ("autre", "Autre projet"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Project,
    Message,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Veuillez remplir tous les champs obligatoires.")]
    MissingField(Field),
    #[error("Veuillez entrer une adresse email valide.")]
    InvalidEmail,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project: String,
    pub message: String,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

impl ContactForm {
    /// Required fields first, then the email shape.
    pub fn validate(&self) -> Result<(), ContactError> {
        let required = [
            (Field::Name, &self.name),
            (Field::Email, &self.email),
            (Field::Project, &self.project),
            (Field::Message, &self.message),
        ];
        if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(ContactError::MissingField(*field));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ContactError::InvalidEmail);
        }
        Ok(())
    }
}

/// What a submit click leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStep {
    /// A simulated send is already in flight.
    Ignored,
    /// Validation failed; nothing is sent.
    Rejected(ContactError),
    /// The button is busy until `finish` runs after `delay_ms`.
    Started { delay_ms: u32 },
}

impl SubmitStep {
    /// Toast raised right away for this step, if any.
    pub fn notification(&self) -> Option<(NotificationKind, String)> {
        match self {
            SubmitStep::Rejected(err) => Some((NotificationKind::Error, err.to_string())),
            _ => None,
        }
    }
}

/// Form contents plus the in-flight flag of the simulated send.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    pub form: ContactForm,
    pub sending: bool,
}

impl Submission {
    pub fn submit(&mut self) -> SubmitStep {
        if self.sending {
            return SubmitStep::Ignored;
        }
        if let Err(err) = self.form.validate() {
            return SubmitStep::Rejected(err);
        }
        self.sending = true;
        SubmitStep::Started { delay_ms: config::SUBMIT_DELAY_MS }
    }

    /// Ends the simulated send: clears the fields and returns the toast.
    pub fn finish(&mut self) -> (NotificationKind, &'static str) {
        self.form = ContactForm::default();
        self.sending = false;
        (NotificationKind::Success, SUCCESS_MESSAGE)
    }

    pub fn button_label(&self) -> &'static str {
        if self.sending {
            BUSY_LABEL
        } else {
            SUBMIT_LABEL
        }
    }
}

/// Number of `.contact__card` blocks, for the page-wide reveal stagger.
pub const CONTACT_CARDS: usize = 3;

#[derive(Properties, PartialEq)]
pub struct ContactSectionProps {
    /// Position of the first card among all revealed elements of the page.
    #[prop_or_default]
    pub reveal_offset: usize,
}

#[function_component(ContactSection)]
pub fn contact_section(props: &ContactSectionProps) -> Html {
    let form = use_state(ContactForm::default);
    let is_sending = use_state(|| false);
    let toaster = use_context::<Toaster>();

    let on_name = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(ContactForm { name: input.value(), ..(*form).clone() });
        })
    };
    let on_email = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(ContactForm { email: input.value(), ..(*form).clone() });
        })
    };
    let on_phone = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            form.set(ContactForm { phone: input.value(), ..(*form).clone() });
        })
    };
    let on_project = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            form.set(ContactForm { project: select.value(), ..(*form).clone() });
        })
    };
    let on_message = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            form.set(ContactForm { message: area.value(), ..(*form).clone() });
        })
    };

    let on_submit = {
        let form = form.clone();
        let is_sending = is_sending.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let mut submission = Submission { form: (*form).clone(), sending: *is_sending };
            let step = submission.submit();
            if let (Some((kind, message)), Some(toaster)) = (step.notification(), toaster.as_ref()) {
                toaster.show(message, kind);
            }
            let SubmitStep::Started { delay_ms } = step else {
                debug!("contact form not sent: {:?}", step);
                return;
            };

            info!("contact form submitted");
            debug!("payload: {}", serde_json::to_string(&submission.form).unwrap_or_default());
            is_sending.set(submission.sending);

            let form = form.clone();
            let is_sending = is_sending.clone();
            let toaster = toaster.clone();
            spawn_local(async move {
                // No backend: the request is simulated.
                TimeoutFuture::new(delay_ms).await;
                let (kind, message) = submission.finish();
                if let Some(toaster) = toaster.as_ref() {
                    toaster.show(message, kind);
                }
                form.set(submission.form);
                is_sending.set(submission.sending);
            });
        })
    };

    let selected_project = form.project.clone();
    let label = Submission { form: ContactForm::default(), sending: *is_sending }.button_label();
    let card = props.reveal_offset;

    html! {
        <section id="contact" class="contact section">
            <div class="container contact__container">
                <div class="contact__info">
                    <h2 class="section__title">{"Parlons de votre projet"}</h2>
                    <p>{"Devis gratuit et sans engagement. Nous nous déplaçons sur le Nord et le Pas-de-Calais."}</p>
                    <Reveal class={classes!("contact__card")} index={card}>
                        <h3>{"Téléphone"}</h3>
                        <a href="tel:+33320000000">{"03 20 00 00 00"}</a>
                    </Reveal>
                    <Reveal class={classes!("contact__card")} index={card + 1}>
                        <h3>{"Email"}</h3>
                        <a href="mailto:contact@nordbois-structure.fr">{"contact@nordbois-structure.fr"}</a>
                    </Reveal>
                    <Reveal class={classes!("contact__card")} index={card + 2}>
                        <h3>{"Atelier"}</h3>
                        <p>{"Zone artisanale des Près, 59000 Lille"}</p>
                    </Reveal>
                </div>
                <form id="contact-form" class="contact__form" onsubmit={on_submit} novalidate=true>
                    <div class="form__group">
                        <label for="name">{"Nom complet *"}</label>
                        <input id="name" name="name" type="text" value={form.name.clone()} oninput={on_name} />
                    </div>
                    <div class="form__group">
                        <label for="email">{"Email *"}</label>
                        <input id="email" name="email" type="email" value={form.email.clone()} oninput={on_email} />
                    </div>
                    <div class="form__group">
                        <label for="phone">{"Téléphone"}</label>
                        <input id="phone" name="phone" type="tel" value={form.phone.clone()} oninput={on_phone} />
                    </div>
                    <div class="form__group">
                        <label for="project">{"Type de projet *"}</label>
                        <select id="project" name="project" onchange={on_project}>
                            <option value="" selected={selected_project.is_empty()}>{"Sélectionnez..."}</option>
                            { for PROJECT_TYPES.iter().map(|(value, label)| html! {
                                <option value={*value} selected={selected_project == *value}>{*label}</option>
                            }) }
                        </select>
                    </div>
                    <div class="form__group">
                        <label for="message">{"Votre message *"}</label>
                        <textarea id="message" name="message" rows="5" value={form.message.clone()} oninput={on_message} />
                    </div>
                    <button type="submit" class="btn btn--primary" disabled={*is_sending}>
                        { label }
                    </button>
                </form>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: "Camille Martin".into(),
            email: "camille@example.fr".into(),
            phone: String::new(),
            project: "ossature".into(),
            message: "Extension de 30 m² à l'arrière de la maison.".into(),
        }
    }

    #[test]
    fn complete_form_is_valid_without_phone() {
        assert_eq!(filled().validate(), Ok(()));
    }

    #[test]
    fn each_required_field_is_checked() {
        let cases = [
            (ContactForm { name: String::new(), ..filled() }, Field::Name),
            (ContactForm { email: "  ".into(), ..filled() }, Field::Email),
            (ContactForm { project: String::new(), ..filled() }, Field::Project),
            (ContactForm { message: "\n".into(), ..filled() }, Field::Message),
        ];
        for (form, field) in cases {
            assert_eq!(form.validate(), Err(ContactError::MissingField(field)));
        }
    }

    #[test]
    fn malformed_email_is_rejected() {
        let form = ContactForm { email: "not-an-email".into(), ..filled() };
        let err = form.validate().unwrap_err();
        assert_eq!(err, ContactError::InvalidEmail);
        assert_eq!(err.to_string(), "Veuillez entrer une adresse email valide.");
    }

    #[test]
    fn missing_fields_win_over_bad_email() {
        let form = ContactForm { name: String::new(), email: "nope".into(), ..filled() };
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Veuillez remplir tous les champs obligatoires."
        );
    }

    #[test]
    fn email_shape() {
        for ok in ["a@b.co", "prenom.nom@nordbois-structure.fr", "x+tag@sub.domain.org"] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in ["not-an-email", "a@b", "@b.fr", "a b@c.fr", "a@b.", "a@@b.fr"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn bad_email_raises_error_toast_and_stays_idle() {
        let mut submission = Submission {
            form: ContactForm { email: "not-an-email".into(), ..filled() },
            sending: false,
        };
        let step = submission.submit();
        assert_eq!(step, SubmitStep::Rejected(ContactError::InvalidEmail));
        assert_eq!(
            step.notification(),
            Some((NotificationKind::Error, "Veuillez entrer une adresse email valide.".to_string()))
        );
        assert!(!submission.sending);
        assert_eq!(submission.button_label(), SUBMIT_LABEL);
        assert_eq!(submission.form.email, "not-an-email");
    }

    #[test]
    fn valid_submit_is_busy_then_succeeds_and_clears() {
        let mut submission = Submission { form: filled(), sending: false };
        let step = submission.submit();
        assert_eq!(step, SubmitStep::Started { delay_ms: 1500 });
        assert_eq!(step.notification(), None);
        assert!(submission.sending);
        assert_eq!(submission.button_label(), "Envoi en cours...");

        let (kind, message) = submission.finish();
        assert_eq!(kind, NotificationKind::Success);
        assert_eq!(message, SUCCESS_MESSAGE);
        assert!(!submission.sending);
        assert_eq!(submission.button_label(), "Envoyer ma demande");
        assert_eq!(submission.form, ContactForm::default());
    }

    #[test]
    fn submit_while_sending_is_ignored() {
        let mut submission = Submission { form: filled(), sending: true };
        let step = submission.submit();
        assert_eq!(step, SubmitStep::Ignored);
        assert_eq!(step.notification(), None);
        assert!(submission.sending);
        assert_eq!(submission.form, filled());
    }
}
