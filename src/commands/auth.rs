use crate::models::user::UserAccount;

/// In-memory account list and the signed-in user. Not persisted; each
/// owner constructs its own instance.
#[derive(Debug, Clone)]
pub struct UserStore {
    users: Vec<UserAccount>,
    current: Option<usize>,
}

impl UserStore {
    pub fn empty() -> Self {
        Self {
            users: Vec::new(),
            current: None,
        }
    }

    /// Store seeded with the demo account.
    pub fn with_demo_account() -> Self {
        let mut store = Self::empty();
        store.users.push(UserAccount {
            email: "demo@company.com".to_string(),
            company_name: "EcoTech Solutions".to_string(),
            password: "demo123".to_string(),
        });
        store
    }

    pub fn login(&mut self, email: &str, password: &str) -> Result<UserAccount, String> {
        let index = self
            .users
            .iter()
            .position(|u| u.email.eq_ignore_ascii_case(email.trim()) && u.password == password)
            .ok_or("Invalid email or password")?;

        self.current = Some(index);
        log::info!("User {} signed in", self.users[index].email);
        Ok(self.users[index].clone())
    }

    pub fn register(&mut self, email: &str, password: &str, company_name: &str) -> Result<UserAccount, String> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() || company_name.trim().is_empty() {
            return Err("Email, password and company name are required".to_string());
        }
        if !email.contains('@') {
            return Err(format!("Invalid email address: {email}"));
        }
        if self.users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            return Err(format!("Account already exists: {email}"));
        }

        self.users.push(UserAccount {
            email: email.to_string(),
            company_name: company_name.trim().to_string(),
            password: password.to_string(),
        });
        self.current = Some(self.users.len() - 1);
        Ok(self.users[self.users.len() - 1].clone())
    }

    pub fn logout(&mut self) {
        self.current = None;
    }

    pub fn current_user(&self) -> Option<&UserAccount> {
        self.current.and_then(|i| self.users.get(i))
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::with_demo_account()
    }
}
