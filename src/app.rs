//! Application state and core logic

use crate::platform::SHORTCUT_MODIFIER;
use crate::state::{AppState, Dialog, Form, FormSettings};
use crate::submit::SubmitHandler;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Where validated submissions go
    handler: Arc<dyn SubmitHandler>,
    /// Submit handler running in the background, if any
    pending_submit: Option<JoinHandle<Result<String>>>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(settings: FormSettings, handler: Arc<dyn SubmitHandler>) -> Self {
        Self {
            state: AppState::new(settings),
            handler,
            pending_submit: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn is_submitting(&self) -> bool {
        self.pending_submit.is_some()
    }

    fn is_shortcut(key: &KeyEvent, c: char) -> bool {
        key.code == KeyCode::Char(c)
            && (key.modifiers.contains(KeyModifiers::CONTROL)
                || key.modifiers.contains(SHORTCUT_MODIFIER))
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        if Self::is_shortcut(&key, 'q') {
            self.quit = true;
            return;
        }

        if self.state.current_dialog().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_dialog();
            }
            return;
        }

        self.handle_form_key(key);
    }

    /// Handle keys while the form has focus
    fn handle_form_key(&mut self, key: KeyEvent) {
        let form = &mut self.state.form;
        let on_language = form.active().is_some_and(|f| f.is_select());
        let on_button = form.is_submit_focused();

        match key.code {
            _ if Self::is_shortcut(&key, 's') => self.submit(),
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Enter if on_button => self.submit(),
            KeyCode::Enter => form.next_field(),
            KeyCode::Left if on_language => {
                form.cycle_language(false);
            }
            KeyCode::Right | KeyCode::Char(' ') if on_language => {
                form.cycle_language(true);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.input_char(c);
            }
            KeyCode::Backspace => {
                form.backspace();
            }
            _ => {}
        }
    }

    /// Gate the submit and hand the snapshot to the handler on a background task
    fn submit(&mut self) {
        match self.state.form.begin_submit() {
            Ok(data) => {
                tracing::info!("Submitting form");
                let handler = Arc::clone(&self.handler);
                self.pending_submit =
                    Some(tokio::spawn(async move { handler.submit(&data).await }));
                self.state.status_message = Some("Odesílám…".to_string());
            }
            Err(refused) => {
                tracing::debug!("Submit refused: {refused}");
                self.state.status_message = Some(refused.to_string());
            }
        }
    }

    /// Finish the background submit once its task is done
    pub async fn poll_submission(&mut self) {
        let finished = self
            .pending_submit
            .as_ref()
            .is_some_and(|handle| handle.is_finished());
        if finished {
            self.complete_submission().await;
        }
    }

    /// Await the background submit and release the form latch
    async fn complete_submission(&mut self) {
        let Some(handle) = self.pending_submit.take() else {
            return;
        };

        let result = match handle.await {
            Ok(result) => result,
            Err(err) => Err(anyhow::Error::new(err).context("Submit task failed")),
        };

        match result {
            Ok(message) => {
                self.state.form.finish_submit(true);
                self.state.status_message = Some("Formulář odeslán".to_string());
                self.state.push_dialog(Dialog::Submitted(message));
            }
            Err(err) => {
                tracing::warn!("Submit failed: {err:#}");
                self.state.form.finish_submit(false);
                self.state.status_message = None;
                self.state.push_error(format!("Odeslání se nezdařilo: {err:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Field, FormData, FormPhase, Validity, SUBMIT_SLOT};
    use crate::submit::MockSubmitHandler;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn expected_data() -> FormData {
        FormData {
            name: "Jana".to_string(),
            telephone: "+420123456789".to_string(),
            email: "jana@example.com".to_string(),
            language: "Čeština".to_string(),
        }
    }

    /// Fill name, telephone and email through key events; the default
    /// language is already valid
    fn fill_form(app: &mut App) {
        type_text(app, "Jana");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "+420123456789");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "jana@example.com");
    }

    fn app_with(mock: MockSubmitHandler) -> App {
        App::new(FormSettings::default(), Arc::new(mock))
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_valid_submit_calls_handler_once_with_data() {
            let mut mock = MockSubmitHandler::new();
            let expected = expected_data();
            mock.expect_submit()
                .times(1)
                .withf(move |data| expected.eq(data))
                .returning(|_| Ok("hotovo".to_string()));

            let mut app = app_with(mock);
            fill_form(&mut app);
            assert!(app.state.form.errors().is_empty());

            app.handle_key(ctrl('s'));
            assert!(app.is_submitting());
            assert_eq!(app.state.form.phase(), FormPhase::Submitting);

            app.complete_submission().await;
            assert!(!app.is_submitting());
            assert_eq!(app.state.form.phase(), FormPhase::Submitted);
            assert_eq!(
                app.state.current_dialog(),
                Some(&Dialog::Submitted("hotovo".to_string()))
            );
        }

        #[tokio::test]
        async fn test_invalid_submit_never_reaches_handler() {
            let mut mock = MockSubmitHandler::new();
            mock.expect_submit().times(0);

            let mut app = app_with(mock);
            app.handle_key(ctrl('s'));

            assert!(!app.is_submitting());
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("formulář obsahuje chyby (3)")
            );
            assert_eq!(app.state.form.visible_errors().len(), 3);
        }

        #[tokio::test]
        async fn test_enter_on_button_submits() {
            let mut mock = MockSubmitHandler::new();
            mock.expect_submit()
                .times(1)
                .returning(|_| Ok(String::new()));

            let mut app = app_with(mock);
            fill_form(&mut app);
            app.state.form.set_active_field(SUBMIT_SLOT);
            app.handle_key(key(KeyCode::Enter));
            assert!(app.is_submitting());
            app.complete_submission().await;
        }

        #[tokio::test]
        async fn test_repeated_submit_while_pending_is_ignored() {
            let mut mock = MockSubmitHandler::new();
            mock.expect_submit()
                .times(1)
                .returning(|_| Ok("ok".to_string()));

            let mut app = app_with(mock);
            fill_form(&mut app);
            app.handle_key(ctrl('s'));
            app.handle_key(ctrl('s'));
            app.handle_key(ctrl('s'));
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("odesílání již probíhá")
            );

            app.complete_submission().await;
            app.handle_key(key(KeyCode::Esc));
            app.handle_key(ctrl('s'));
            assert!(!app.is_submitting());
            assert_eq!(
                app.state.status_message.as_deref(),
                Some("formulář již byl odeslán")
            );
        }

        #[tokio::test]
        async fn test_edits_ignored_while_pending() {
            let mut mock = MockSubmitHandler::new();
            mock.expect_submit()
                .times(1)
                .returning(|_| Ok("ok".to_string()));

            let mut app = app_with(mock);
            fill_form(&mut app);
            app.handle_key(ctrl('s'));
            type_text(&mut app, "xyz");
            assert_eq!(app.state.form.email.as_text(), "jana@example.com");
            app.complete_submission().await;
        }

        #[tokio::test]
        async fn test_handler_failure_is_recoverable() {
            let mut mock = MockSubmitHandler::new();
            let mut calls = 0;
            mock.expect_submit().times(2).returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Err(anyhow::anyhow!("síť nedostupná"))
                } else {
                    Ok("ok".to_string())
                }
            });

            let mut app = app_with(mock);
            fill_form(&mut app);
            app.handle_key(ctrl('s'));
            app.complete_submission().await;

            assert_eq!(
                app.state.form.phase(),
                FormPhase::Editing(Validity::Valid)
            );
            match app.state.current_dialog() {
                Some(Dialog::Error(message)) => assert!(message.contains("síť nedostupná")),
                other => panic!("expected error dialog, got {other:?}"),
            }

            app.handle_key(key(KeyCode::Enter));
            assert!(app.state.current_dialog().is_none());
            app.handle_key(ctrl('s'));
            app.complete_submission().await;
            assert_eq!(app.state.form.phase(), FormPhase::Submitted);
        }

        #[tokio::test]
        async fn test_poll_without_pending_is_noop() {
            let mut app = app_with(MockSubmitHandler::new());
            app.poll_submission().await;
            assert!(app.state.current_dialog().is_none());
        }

        #[tokio::test]
        async fn test_poll_completes_finished_task() {
            let mut mock = MockSubmitHandler::new();
            mock.expect_submit()
                .times(1)
                .returning(|_| Ok("ok".to_string()));

            let mut app = app_with(mock);
            fill_form(&mut app);
            app.handle_key(ctrl('s'));
            while app.is_submitting() {
                tokio::task::yield_now().await;
                app.poll_submission().await;
            }
            assert_eq!(app.state.form.phase(), FormPhase::Submitted);
        }
    }

    mod keys {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_quit_shortcut() {
            let mut app = app_with(MockSubmitHandler::new());
            assert!(!app.should_quit());
            app.handle_key(ctrl('q'));
            assert!(app.should_quit());
        }

        #[test]
        fn test_typing_edits_focused_field() {
            let mut app = app_with(MockSubmitHandler::new());
            type_text(&mut app, "Jan");
            app.handle_key(key(KeyCode::Backspace));
            assert_eq!(app.state.form.name.as_text(), "Ja");
            assert_eq!(app.state.form.phase(), FormPhase::Editing(Validity::Invalid));
        }

        #[test]
        fn test_ctrl_chars_are_not_typed() {
            let mut app = app_with(MockSubmitHandler::new());
            app.handle_key(ctrl('x'));
            assert_eq!(app.state.form.name.as_text(), "");
        }

        #[test]
        fn test_enter_on_field_moves_focus() {
            let mut app = app_with(MockSubmitHandler::new());
            app.handle_key(key(KeyCode::Enter));
            assert_eq!(app.state.form.active(), Some(Field::Telephone));
            app.handle_key(key(KeyCode::Up));
            assert_eq!(app.state.form.active(), Some(Field::Name));
        }

        #[test]
        fn test_language_keys_cycle_selection() {
            let mut app = app_with(MockSubmitHandler::new());
            app.state.form.set_active_field(3);
            app.handle_key(key(KeyCode::Right));
            assert_eq!(app.state.form.language.as_text(), "Angličtina");
            app.handle_key(key(KeyCode::Char(' ')));
            assert_eq!(app.state.form.language.as_text(), "Slovenčtina");
            app.handle_key(key(KeyCode::Left));
            assert_eq!(app.state.form.language.as_text(), "Angličtina");
        }

        #[test]
        fn test_dialog_swallows_keys_until_dismissed() {
            let mut app = app_with(MockSubmitHandler::new());
            app.state.push_error("chyba".to_string());
            type_text(&mut app, "abc");
            assert_eq!(app.state.form.name.as_text(), "");
            app.handle_key(key(KeyCode::Esc));
            assert!(app.state.current_dialog().is_none());
        }
    }
}
