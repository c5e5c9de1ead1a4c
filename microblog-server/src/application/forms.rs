use serde::Deserialize;

/// Per-field validation messages, collected while cleaning a submission
/// and handed to the template for re-rendering.
#[derive(Debug, Default)]
pub struct FormErrors {
    pub entries: Vec<FieldError>,
}

#[derive(Debug)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.entries.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First message recorded for a field, if any.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.field == name)
            .map(|entry| entry.message.as_str())
    }
}

/// The post submission as it arrives on the wire. Unknown fields (an
/// injected `author`, say) are dropped by deserialization; authorship is
/// never read from the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub group: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CleanedPost {
    pub text: String,
    pub group_id: Option<i64>,
}

impl PostForm {
    /// Checks the required text and parses the optional group token,
    /// recording field errors as it goes. Group existence is checked by
    /// the caller against the group store.
    pub fn clean(&self, errors: &mut FormErrors) -> CleanedPost {
        let text = self.text.trim();
        if text.is_empty() {
            errors.add("text", "This field is required.");
        }

        let group_id = match self.group.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("group", "Select a valid group.");
                    None
                }
            },
        };

        CleanedPost {
            text: text.to_string(),
            group_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SignupData {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn clean(&self, errors: &mut FormErrors) -> SignupData {
        let username = self.username.trim();
        if username.chars().count() < 3 {
            errors.add("username", "Username must be at least 3 characters.");
        }

        let email = self.email.trim();
        if !email.contains('@') {
            errors.add("email", "Enter a valid email address.");
        }

        if self.password.chars().count() < 8 {
            errors.add("password", "Password must be at least 8 characters.");
        }

        SignupData {
            username: username.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
        }
    }
}
