//! Login and registration form state.

use postdeck_core::api::types::SUBSCRIPTION_PLANS;

use crate::common::TextField;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug)]
pub struct LoginForm {
    pub username: TextField,
    pub password: TextField,
    pub focus: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            username: TextField::new(),
            password: TextField::masked(),
            focus: LoginField::Username,
        }
    }
}

impl LoginForm {
    pub fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn focus_prev(&mut self) {
        // Two fields: next and prev coincide.
        self.focus_next();
    }

    pub fn reset(&mut self) {
        self.username.clear();
        self.password.clear();
        self.focus = LoginField::Username;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Username,
    Email,
    Password,
    Plan,
}

#[derive(Debug)]
pub struct RegisterForm {
    pub username: TextField,
    pub email: TextField,
    pub password: TextField,
    pub plan_index: usize,
    pub focus: RegisterField,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            username: TextField::new(),
            email: TextField::new(),
            password: TextField::masked(),
            plan_index: 0,
            focus: RegisterField::Username,
        }
    }
}

impl RegisterForm {
    pub fn focused_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            RegisterField::Username => Some(&mut self.username),
            RegisterField::Email => Some(&mut self.email),
            RegisterField::Password => Some(&mut self.password),
            RegisterField::Plan => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            RegisterField::Username => RegisterField::Email,
            RegisterField::Email => RegisterField::Password,
            RegisterField::Password => RegisterField::Plan,
            RegisterField::Plan => RegisterField::Username,
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            RegisterField::Username => RegisterField::Plan,
            RegisterField::Email => RegisterField::Username,
            RegisterField::Password => RegisterField::Email,
            RegisterField::Plan => RegisterField::Password,
        };
    }

    pub fn plan(&self) -> &'static str {
        SUBSCRIPTION_PLANS[self.plan_index % SUBSCRIPTION_PLANS.len()]
    }

    pub fn cycle_plan(&mut self, forward: bool) {
        let len = SUBSCRIPTION_PLANS.len();
        self.plan_index = if forward {
            (self.plan_index + 1) % len
        } else {
            (self.plan_index + len - 1) % len
        };
    }

    pub fn reset(&mut self) {
        self.username.clear();
        self.email.clear();
        self.password.clear();
        self.plan_index = 0;
        self.focus = RegisterField::Username;
    }
}
