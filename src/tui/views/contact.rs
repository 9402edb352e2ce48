//! Contact section: contact details and the message form.
//!
//! The form has a normal mode (`j`/`k` pick a field, `i`/`Enter` start
//! editing, `s` sends) and an insert mode where keys go to the focused
//! field. `Ctrl+S` sends from either mode.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::core::catalog::Profile;
use crate::core::contact::{
    describe, ContactForm, Field, SendError, StatusTimer, SubmitRejected, SubmitStatus,
};
use crate::tui::events::AppEvent;
use crate::tui::services::Services;
use crate::tui::theme::{self, Palette};
use crate::tui::widgets::input_buffer::{route_text_input, InputBuffer};

use super::key_hints;

const SENT_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";
const FAILED_MESSAGE: &str = "Failed to send message. Please try again.";

fn field_index(field: Field) -> usize {
    Field::ALL.iter().position(|f| *f == field).unwrap_or(0)
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Name => "Your name",
        Field::Email => "you@example.com",
        Field::Subject => "What's this about?",
        Field::Message => "Your message (at least 10 characters)",
    }
}

pub struct ContactState {
    form: ContactForm,
    inputs: [InputBuffer; 4],
    focused: Field,
    editing: bool,
    status_timer: StatusTimer,
}

impl Default for ContactState {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactState {
    pub fn new() -> Self {
        Self {
            form: ContactForm::new(),
            inputs: Default::default(),
            focused: Field::Name,
            editing: false,
            status_timer: StatusTimer::new(),
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn focused(&self) -> Field {
        self.focused
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Replace a field's text, as if typed.
    pub fn set_field(&mut self, field: Field, text: &str) {
        self.inputs[field_index(field)].set_text(text);
        self.form.set_value(field, text);
    }

    // ── Input ───────────────────────────────────────────────────────────

    pub fn handle_input(&mut self, event: &Event, services: &Services) -> bool {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event
        else {
            return false;
        };

        if (*modifiers, *code) == (KeyModifiers::CONTROL, KeyCode::Char('s')) {
            self.submit(services);
            return true;
        }

        if self.editing {
            self.handle_insert_key(*code, *modifiers, services);
            return true;
        }

        match (*modifiers, *code) {
            (KeyModifiers::NONE, KeyCode::Char('j') | KeyCode::Down) => {
                self.focused = self.focused.next();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('k') | KeyCode::Up) => {
                self.focused = self.focused.prev();
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('i') | KeyCode::Enter) => {
                self.editing = true;
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('s')) => {
                self.submit(services);
                true
            }
            (KeyModifiers::NONE, KeyCode::Char('m')) => {
                services.open_link(&format!("mailto:{}", services.catalog.profile.email));
                true
            }
            _ => false,
        }
    }

    fn handle_insert_key(&mut self, code: KeyCode, modifiers: KeyModifiers, services: &Services) {
        match (modifiers, code) {
            (_, KeyCode::Esc) => self.editing = false,
            (KeyModifiers::NONE, KeyCode::Tab) => self.focused = self.focused.next(),
            (_, KeyCode::BackTab) => self.focused = self.focused.prev(),
            (KeyModifiers::NONE, KeyCode::Enter) => {
                if self.focused == Field::Message {
                    self.submit(services);
                } else {
                    self.focused = self.focused.next();
                }
            }
            _ => {
                // Fields are read-only while a send is in flight.
                if self.form.is_submitting() {
                    return;
                }
                let field = self.focused;
                let buf = &mut self.inputs[field_index(field)];
                if route_text_input(buf, code, modifiers) {
                    let text = buf.text().to_string();
                    self.form.set_value(field, text);
                }
            }
        }
    }

    /// Validate and hand the message to the sender in the background.
    pub fn submit(&mut self, services: &Services) {
        match self.form.begin_submit() {
            Ok(message) => {
                self.editing = false;
                self.status_timer.cancel();
                log::info!("Sending contact message");
                let sender = services.sender.clone();
                let tx = services.event_tx.clone();
                tokio::spawn(async move {
                    let result = sender.send(&message).await;
                    let _ = tx.send(AppEvent::ContactSent(result));
                });
            }
            Err(SubmitRejected::InFlight) => {
                log::debug!("Ignoring submit while a message is in flight");
            }
            Err(SubmitRejected::Invalid(errors)) => {
                if let Some(first) = errors.keys().next() {
                    self.focused = *first;
                }
            }
        }
    }

    /// The background send finished.
    pub fn on_sent(&mut self, result: Result<(), SendError>, services: &Services) {
        let delivered = result.is_ok();
        let epoch = self.form.finish_submit(result);
        if delivered {
            for input in &mut self.inputs {
                input.clear();
            }
            self.focused = Field::Name;
        }

        let tx = services.event_tx.clone();
        self.status_timer
            .schedule(services.contact.status_reset(), move || {
                let _ = tx.send(AppEvent::ContactStatusExpired(epoch));
            });
    }

    pub fn on_status_expired(&mut self, epoch: u64) {
        if self.form.expire_status(epoch) {
            log::debug!("Contact status reset (epoch {epoch})");
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame, area: Rect, profile: &Profile, palette: &Palette) {
        let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(area);
        let cols = Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(rows[0]);

        self.render_info(frame, cols[0], profile, palette);
        self.render_form(frame, cols[1], palette);

        let hints = if self.editing {
            key_hints(
                &[("Esc", "done"), ("Tab", "next field"), ("Ctrl+S", "send")],
                palette,
            )
        } else {
            key_hints(
                &[("j/k", "field"), ("i", "edit"), ("s", "send"), ("m", "email me")],
                palette,
            )
        };
        frame.render_widget(Paragraph::new(hints), rows[1]);
    }

    fn render_info(&self, frame: &mut Frame, area: Rect, profile: &Profile, palette: &Palette) {
        let mut lines = vec![
            Line::from(Span::styled("Get in Touch", palette.heading())),
            Line::raw(""),
            Line::from(Span::styled(
                "Have a project in mind or just want to say hi? Send a message.",
                palette.muted(),
            )),
            Line::raw(""),
            Line::from(vec![
                Span::styled("✉ ", palette.title()),
                Span::styled(profile.email.clone(), palette.text()),
            ]),
            Line::from(vec![
                Span::styled("⌖ ", palette.title()),
                Span::styled(profile.location.clone(), palette.text()),
            ]),
            Line::raw(""),
        ];
        for link in &profile.socials {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<10}", link.label), palette.key_hint()),
                Span::styled(link.url.clone(), palette.dim()),
            ]));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .block(palette.block_default("Contact"))
                .wrap(Wrap { trim: false }),
            area,
        );
    }

    fn render_form(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let block = if self.editing {
            palette.block_focused("Send a Message")
        } else {
            palette.block_default("Send a Message")
        };

        let mut lines: Vec<Line<'static>> = Vec::new();
        for field in Field::ALL {
            let focused = field == self.focused;
            let label_style = if focused {
                palette.highlight()
            } else {
                palette.muted()
            };
            lines.push(Line::from(vec![
                Span::styled(if focused { "▸ " } else { "  " }, palette.title()),
                Span::styled(format!("{} *", field.label()), label_style),
            ]));
            lines.push(self.inputs[field_index(field)].to_line(
                "  ",
                placeholder(field),
                focused && self.editing,
                palette,
            ));
            match self.form.errors().get(&field) {
                Some(error) => lines.push(Line::from(Span::styled(
                    format!("  {}", describe(field, *error)),
                    Style::default().fg(theme::ERROR),
                ))),
                None => lines.push(Line::raw("")),
            }
        }

        let button = if self.form.is_submitting() {
            Span::styled("  [ Sending… ]", palette.dim())
        } else {
            Span::styled("  [ Send Message ]", palette.brand_badge())
        };
        lines.push(Line::from(button));
        lines.push(Line::raw(""));

        match self.form.status() {
            SubmitStatus::Success => lines.push(Line::from(Span::styled(
                format!("  ✓ {SENT_MESSAGE}"),
                Style::default().fg(theme::SUCCESS),
            ))),
            SubmitStatus::Error => lines.push(Line::from(Span::styled(
                format!("  ✗ {FAILED_MESSAGE}"),
                Style::default().fg(theme::ERROR),
            ))),
            SubmitStatus::Idle | SubmitStatus::Submitting => {}
        }

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::contact::FieldError;
    use crate::tui::services::test_support::services;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn fill(contact: &mut ContactState) {
        contact.set_field(Field::Name, "Ada");
        contact.set_field(Field::Email, "ada@example.com");
        contact.set_field(Field::Subject, "Hello");
        contact.set_field(Field::Message, "I'd like to collaborate.");
    }

    #[test]
    fn test_typing_updates_form() {
        let (services, _rx) = services();
        let mut contact = ContactState::new();
        contact.handle_input(&press(KeyCode::Char('i')), &services);
        assert!(contact.is_editing());
        for c in "Ada".chars() {
            contact.handle_input(&press(KeyCode::Char(c)), &services);
        }
        assert_eq!(contact.form().value(Field::Name), "Ada");

        contact.handle_input(&press(KeyCode::Tab), &services);
        assert_eq!(contact.focused(), Field::Email);
        contact.handle_input(&press(KeyCode::Esc), &services);
        assert!(!contact.is_editing());
    }

    #[test]
    fn test_section_keys_are_text_in_insert_mode() {
        let (services, _rx) = services();
        let mut contact = ContactState::new();
        contact.handle_input(&press(KeyCode::Enter), &services);
        contact.handle_input(&press(KeyCode::Char('s')), &services);
        assert_eq!(contact.form().value(Field::Name), "s");
        assert_eq!(contact.form().status(), SubmitStatus::Idle);
    }

    #[test]
    fn test_invalid_submit_focuses_first_error() {
        let (services, _rx) = services();
        let mut contact = ContactState::new();
        contact.set_field(Field::Name, "Ada");
        contact.focused = Field::Message;
        contact.handle_input(&press(KeyCode::Char('s')), &services);
        assert_eq!(contact.focused(), Field::Email);
        assert_eq!(contact.form().errors().get(&Field::Email), Some(&FieldError::Required));
        assert_eq!(contact.form().status(), SubmitStatus::Idle);
    }

    #[test]
    fn test_editing_clears_field_error() {
        let (services, _rx) = services();
        let mut contact = ContactState::new();
        contact.submit(&services);
        assert!(contact.form().errors().contains_key(&Field::Name));
        contact.handle_input(&press(KeyCode::Char('i')), &services);
        contact.handle_input(&press(KeyCode::Char('A')), &services);
        assert!(!contact.form().errors().contains_key(&Field::Name));
        assert!(contact.form().errors().contains_key(&Field::Email));
    }

    #[test]
    fn test_unhandled_keys_fall_through() {
        let (services, _rx) = services();
        let mut contact = ContactState::new();
        assert!(!contact.handle_input(&press(KeyCode::Tab), &services));
        assert!(!contact.handle_input(&press(KeyCode::Char('q')), &services));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_send_cycle() {
        let (services, mut rx) = services();
        let mut contact = ContactState::new();
        fill(&mut contact);

        contact.handle_input(
            &Event::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            &services,
        );
        assert!(contact.form().is_submitting());

        // A second submit while in flight is ignored
        contact.submit(&services);
        assert!(contact.form().is_submitting());

        let result = match rx.recv().await.unwrap() {
            AppEvent::ContactSent(result) => result,
            other => panic!("unexpected event: {other:?}"),
        };
        contact.on_sent(result, &services);
        assert_eq!(contact.form().status(), SubmitStatus::Success);
        assert!(contact.form().fields().is_empty());
        assert_eq!(contact.inputs[0].text(), "");

        let epoch = match rx.recv().await.unwrap() {
            AppEvent::ContactStatusExpired(epoch) => epoch,
            other => panic!("unexpected event: {other:?}"),
        };
        contact.on_status_expired(epoch);
        assert_eq!(contact.form().status(), SubmitStatus::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_send_keeps_fields() {
        let (services, _rx) = services();
        let mut contact = ContactState::new();
        fill(&mut contact);
        contact.submit(&services);
        contact.on_sent(Err(SendError::Delivery("offline".into())), &services);
        assert_eq!(contact.form().status(), SubmitStatus::Error);
        assert_eq!(contact.form().value(Field::Name), "Ada");
        assert_eq!(contact.inputs[0].text(), "Ada");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_expiry_is_ignored() {
        let (services, _rx) = services();
        let mut contact = ContactState::new();
        fill(&mut contact);
        contact.submit(&services);
        contact.on_sent(Err(SendError::Delivery("offline".into())), &services);
        contact.submit(&services);
        contact.on_sent(Ok(()), &services);
        contact.on_status_expired(1);
        assert_eq!(contact.form().status(), SubmitStatus::Success);
        contact.on_status_expired(2);
        assert_eq!(contact.form().status(), SubmitStatus::Idle);
    }
}
