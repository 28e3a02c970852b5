//! Login/register form key handling.

use crossterm::event::{KeyCode, KeyEvent};
use postdeck_core::api::RegisterDraft;

use super::state::{LoginForm, RegisterField, RegisterForm};

#[derive(Debug)]
pub enum LoginAction {
    None,
    Submit { username: String, password: String },
    Invalid { message: &'static str },
}

pub fn handle_login_key(form: &mut LoginForm, key: KeyEvent) -> LoginAction {
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Enter => {
            if form.username.is_empty() || form.password.is_empty() {
                return LoginAction::Invalid {
                    message: "Username and password are required",
                };
            }
            return LoginAction::Submit {
                username: form.username.value().to_string(),
                password: form.password.value().to_string(),
            };
        }
        KeyCode::Char(c) => form.focused_field().insert(c),
        KeyCode::Backspace => form.focused_field().backspace(),
        KeyCode::Left => form.focused_field().move_left(),
        KeyCode::Right => form.focused_field().move_right(),
        KeyCode::Home => form.focused_field().move_home(),
        KeyCode::End => form.focused_field().move_end(),
        _ => {}
    }
    LoginAction::None
}

#[derive(Debug)]
pub enum RegisterAction {
    None,
    Submit { draft: RegisterDraft },
    Invalid { message: &'static str },
}

pub fn handle_register_key(form: &mut RegisterForm, key: KeyEvent) -> RegisterAction {
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Enter => {
            if form.username.is_empty() || form.email.is_empty() || form.password.is_empty() {
                return RegisterAction::Invalid {
                    message: "Username, email and password are required",
                };
            }
            return RegisterAction::Submit {
                draft: RegisterDraft {
                    username: form.username.value().to_string(),
                    email: form.email.value().to_string(),
                    password: form.password.value().to_string(),
                    subscription_plan: form.plan().to_string(),
                },
            };
        }
        KeyCode::Left if form.focus == RegisterField::Plan => form.cycle_plan(false),
        KeyCode::Right if form.focus == RegisterField::Plan => form.cycle_plan(true),
        KeyCode::Char(c) => {
            if let Some(field) = form.focused_field() {
                field.insert(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(field) = form.focused_field() {
                field.backspace();
            }
        }
        KeyCode::Left => {
            if let Some(field) = form.focused_field() {
                field.move_left();
            }
        }
        KeyCode::Right => {
            if let Some(field) = form.focused_field() {
                field.move_right();
            }
        }
        _ => {}
    }
    RegisterAction::None
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut LoginForm, s: &str) {
        for c in s.chars() {
            handle_login_key(form, key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_login_submit_carries_form_values() {
        let mut form = LoginForm::default();
        type_str(&mut form, "casey");
        handle_login_key(&mut form, key(KeyCode::Tab));
        type_str(&mut form, "hunter2");

        match handle_login_key(&mut form, key(KeyCode::Enter)) {
            LoginAction::Submit { username, password } => {
                assert_eq!(username, "casey");
                assert_eq!(password, "hunter2");
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[test]
    fn test_login_empty_fields_do_not_submit() {
        let mut form = LoginForm::default();
        assert!(matches!(
            handle_login_key(&mut form, key(KeyCode::Enter)),
            LoginAction::Invalid { .. }
        ));
    }

    #[test]
    fn test_register_plan_cycles() {
        let mut form = RegisterForm::default();
        assert_eq!(form.plan(), "basic");
        form.focus = RegisterField::Plan;
        handle_register_key(&mut form, key(KeyCode::Right));
        assert_eq!(form.plan(), "premium");
        handle_register_key(&mut form, key(KeyCode::Right));
        assert_eq!(form.plan(), "enterprise");
        handle_register_key(&mut form, key(KeyCode::Right));
        assert_eq!(form.plan(), "basic");
        handle_register_key(&mut form, key(KeyCode::Left));
        assert_eq!(form.plan(), "enterprise");
    }

    #[test]
    fn test_register_submit_includes_plan() {
        let mut form = RegisterForm::default();
        for c in "casey".chars() {
            handle_register_key(&mut form, key(KeyCode::Char(c)));
        }
        handle_register_key(&mut form, key(KeyCode::Tab));
        for c in "c@example.com".chars() {
            handle_register_key(&mut form, key(KeyCode::Char(c)));
        }
        handle_register_key(&mut form, key(KeyCode::Tab));
        for c in "pw".chars() {
            handle_register_key(&mut form, key(KeyCode::Char(c)));
        }
        handle_register_key(&mut form, key(KeyCode::Tab));
        handle_register_key(&mut form, key(KeyCode::Right));

        match handle_register_key(&mut form, key(KeyCode::Enter)) {
            RegisterAction::Submit { draft } => {
                assert_eq!(draft.username, "casey");
                assert_eq!(draft.email, "c@example.com");
                assert_eq!(draft.subscription_plan, "premium");
            }
            other => panic!("expected submit, got {other:?}"),
        }
    }
}
