use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use crossterm::event::{self, Event, KeyEvent};
use uuid::Uuid;

use api_types::{
    auth::{LoginRequest, RegisterRequest},
    transaction::{Category, TransactionKind, TransactionUpdate, TransactionView},
};

use crate::{
    client::{Client, ClientError},
    config::AppConfig,
    error::{AppError, Result},
    form,
    ledger::Ledger,
    session::{SessionError, SessionManager},
    ui,
};

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Overview,
    Transactions,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Transactions => "Transactions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginState {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterField {
    Name,
    Email,
    Password,
}

#[derive(Debug)]
pub struct RegisterState {
    pub name: String,
    pub email: String,
    pub password: String,
    pub focus: RegisterField,
    pub message: Option<String>,
}

impl RegisterState {
    fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.password.clear();
        self.focus = RegisterField::Name;
        self.message = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionsMode {
    List,
    Form,
    ConfirmDelete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Description,
    Amount,
    Kind,
    Category,
    Date,
}

#[derive(Debug)]
pub struct FormState {
    pub description: String,
    pub amount: String,
    pub kind: TransactionKind,
    pub category: usize,
    pub date: String,
    pub focus: FormField,
    pub message: Option<String>,
    /// Id of the record being edited; `None` while creating.
    pub editing: Option<Uuid>,
}

impl FormState {
    fn blank(today: NaiveDate) -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            kind: TransactionKind::Expense,
            category: Category::ALL.len() - 1,
            date: today.format("%Y-%m-%d").to_string(),
            focus: FormField::Description,
            message: None,
            editing: None,
        }
    }

    fn for_edit(tx: &TransactionView) -> Self {
        let category = Category::ALL
            .iter()
            .position(|c| *c == tx.category)
            .unwrap_or(Category::ALL.len() - 1);
        Self {
            description: tx.description.clone(),
            amount: format_amount_input(tx.amount_minor),
            kind: tx.kind,
            category,
            date: tx.occurred_on.format("%Y-%m-%d").to_string(),
            focus: FormField::Description,
            message: None,
            editing: Some(tx.id),
        }
    }

    pub fn selected_category(&self) -> Category {
        Category::ALL[self.category.min(Category::ALL.len() - 1)]
    }

    fn cycle_category(&mut self, step: isize) {
        let len = Category::ALL.len() as isize;
        let next = (self.category as isize + step).rem_euclid(len);
        self.category = next as usize;
    }

    fn toggle_kind(&mut self) {
        self.kind = match self.kind {
            TransactionKind::Income => TransactionKind::Expense,
            TransactionKind::Expense => TransactionKind::Income,
        };
    }

    fn advance_focus(&mut self) {
        self.focus = match self.focus {
            FormField::Description => FormField::Amount,
            FormField::Amount => FormField::Kind,
            FormField::Kind => FormField::Category,
            FormField::Category => FormField::Date,
            FormField::Date => FormField::Description,
        };
    }

    fn active_text_field_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Description => Some(&mut self.description),
            FormField::Amount => Some(&mut self.amount),
            FormField::Date => Some(&mut self.date),
            FormField::Kind | FormField::Category => None,
        }
    }
}

#[derive(Debug)]
pub struct TransactionsState {
    pub mode: TransactionsMode,
    pub selected: usize,
    pub form: FormState,
}

impl TransactionsState {
    fn new(today: NaiveDate) -> Self {
        Self {
            mode: TransactionsMode::List,
            selected: 0,
            form: FormState::blank(today),
        }
    }

    fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = self.selected.min(len - 1);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    deadline: Instant,
}

#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub login: LoginState,
    pub register: RegisterState,
    pub section: Section,
    pub transactions: TransactionsState,
    pub toast: Option<ToastState>,
    pub base_url: String,
}

pub struct App {
    config: AppConfig,
    pub client: Client,
    pub session: SessionManager,
    pub ledger: Ledger,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Client::new(&config.base_url)?;
        let session = SessionManager::new(&config.session_path);
        let today = Local::now().date_naive();
        let state = AppState {
            screen: Screen::Login,
            login: LoginState {
                email: config.email.clone(),
                password: String::new(),
                focus: LoginField::Email,
                message: None,
            },
            register: RegisterState {
                name: String::new(),
                email: String::new(),
                password: String::new(),
                focus: RegisterField::Name,
                message: None,
            },
            section: Section::Overview,
            transactions: TransactionsState::new(today),
            toast: None,
            base_url: config.base_url.clone(),
        };

        Ok(Self {
            config,
            client,
            session,
            ledger: Ledger::new(),
            state,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        self.initialize().await?;
        let mut terminal = ui::setup_terminal()?;
        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    /// Restores a persisted session before the first frame; an authenticated
    /// start lands on Home with the ledger already loading.
    async fn initialize(&mut self) -> Result<()> {
        let authenticated = self
            .session
            .restore(&self.client, self.config.verify_session)
            .await?;
        if authenticated {
            self.state.screen = Screen::Home;
            self.refresh_ledger().await?;
        }
        Ok(())
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        let tick_rate = Duration::from_millis(200);

        while !self.should_quit {
            self.expire_toast();

            terminal
                .draw(|frame| ui::render(frame, self))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => self.handle_key(key).await?,
                    Event::Resize(_, _) => {}
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn expire_toast(&mut self) {
        let expired = self
            .state
            .toast
            .as_ref()
            .is_some_and(|toast| toast.deadline <= Instant::now());
        if expired {
            self.state.toast = None;
        }
    }

    fn push_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.state.toast = Some(ToastState {
            message: message.into(),
            level,
            deadline: Instant::now() + TOAST_TTL,
        });
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        use crate::ui::keymap::AppAction;

        let action = crate::ui::keymap::map_key(key);
        if action == AppAction::Quit {
            self.should_quit = true;
            return Ok(());
        }

        match self.state.screen {
            Screen::Login => self.handle_login_key(action).await,
            Screen::Register => self.handle_register_key(action).await,
            Screen::Home => self.handle_home_key(action).await,
        }
    }

    async fn handle_login_key(&mut self, action: crate::ui::keymap::AppAction) -> Result<()> {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::NextField => {
                self.state.login.focus = match self.state.login.focus {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
            }
            AppAction::Submit => self.attempt_login().await?,
            AppAction::Backspace => {
                self.active_login_field_mut().pop();
            }
            AppAction::Input(ch) => {
                self.active_login_field_mut().push(ch);
            }
            AppAction::SwitchForm => {
                self.state.register.clear();
                self.state.screen = Screen::Register;
            }
            _ => {}
        }

        Ok(())
    }

    fn active_login_field_mut(&mut self) -> &mut String {
        match self.state.login.focus {
            LoginField::Email => &mut self.state.login.email,
            LoginField::Password => &mut self.state.login.password,
        }
    }

    async fn handle_register_key(&mut self, action: crate::ui::keymap::AppAction) -> Result<()> {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::NextField => {
                self.state.register.focus = match self.state.register.focus {
                    RegisterField::Name => RegisterField::Email,
                    RegisterField::Email => RegisterField::Password,
                    RegisterField::Password => RegisterField::Name,
                };
            }
            AppAction::Submit => self.attempt_register().await?,
            AppAction::Backspace => {
                self.active_register_field_mut().pop();
            }
            AppAction::Input(ch) => {
                self.active_register_field_mut().push(ch);
            }
            AppAction::SwitchForm | AppAction::Cancel => {
                self.state.screen = Screen::Login;
            }
            _ => {}
        }

        Ok(())
    }

    fn active_register_field_mut(&mut self) -> &mut String {
        match self.state.register.focus {
            RegisterField::Name => &mut self.state.register.name,
            RegisterField::Email => &mut self.state.register.email,
            RegisterField::Password => &mut self.state.register.password,
        }
    }

    async fn attempt_login(&mut self) -> Result<()> {
        let email = self.state.login.email.trim().to_string();
        let password = self.state.login.password.trim().to_string();

        if let Err(message) = form::validate_login(&email, &password) {
            self.state.login.message = Some(message);
            return Ok(());
        }

        let payload = LoginRequest { email, password };
        match self.session.login(&self.client, payload).await {
            Ok(()) => {
                self.state.login.password.clear();
                self.state.login.message = None;
                self.state.screen = Screen::Home;
                self.state.section = Section::Overview;
                self.push_toast(ToastLevel::Success, "Signed in.");
                self.refresh_ledger().await?;
            }
            Err(err) => {
                self.state.login.message = Some(session_message(&err));
            }
        }

        Ok(())
    }

    async fn attempt_register(&mut self) -> Result<()> {
        let name = self.state.register.name.trim().to_string();
        let email = self.state.register.email.trim().to_string();
        let password = self.state.register.password.trim().to_string();

        if let Err(message) = form::validate_registration(&name, &email, &password) {
            self.state.register.message = Some(message);
            return Ok(());
        }

        let payload = RegisterRequest {
            name,
            email: email.clone(),
            password,
        };
        match self.session.register(&self.client, payload).await {
            Ok(()) => {
                // The session is persisted and authenticated; the flow still
                // returns to the login screen, which forwards on submit.
                self.state.register.clear();
                self.state.login.email = email;
                self.state.login.password.clear();
                self.state.login.message = None;
                self.state.screen = Screen::Login;
                self.push_toast(ToastLevel::Success, "Account created. Sign in to continue.");
            }
            Err(err) => {
                self.state.register.message = Some(session_message(&err));
            }
        }

        Ok(())
    }

    async fn handle_home_key(&mut self, action: crate::ui::keymap::AppAction) -> Result<()> {
        match self.state.transactions.mode {
            TransactionsMode::List => self.handle_list_key(action).await,
            TransactionsMode::Form => self.handle_form_key(action).await,
            TransactionsMode::ConfirmDelete => self.handle_confirm_key(action).await,
        }
    }

    async fn handle_list_key(&mut self, action: crate::ui::keymap::AppAction) -> Result<()> {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::Logout => self.logout()?,
            AppAction::Up => self.state.transactions.select_prev(),
            AppAction::Down => {
                let len = self.ledger.items.len();
                self.state.transactions.select_next(len);
            }
            AppAction::Input(ch) => self.handle_list_char(ch).await?,
            _ => {}
        }

        Ok(())
    }

    async fn handle_list_char(&mut self, ch: char) -> Result<()> {
        match ch {
            'q' | 'Q' => {
                self.should_quit = true;
            }
            'o' | 'O' => {
                self.state.section = Section::Overview;
            }
            't' | 'T' => {
                self.state.section = Section::Transactions;
            }
            'r' | 'R' => {
                self.refresh_ledger().await?;
            }
            'j' | 'J' => {
                if self.state.section == Section::Transactions {
                    let len = self.ledger.items.len();
                    self.state.transactions.select_next(len);
                }
            }
            'k' | 'K' => {
                if self.state.section == Section::Transactions {
                    self.state.transactions.select_prev();
                }
            }
            'a' | 'A' => {
                if self.state.section == Section::Transactions && !self.ledger.loading {
                    let today = Local::now().date_naive();
                    self.state.transactions.form = FormState::blank(today);
                    self.state.transactions.mode = TransactionsMode::Form;
                }
            }
            'e' | 'E' => {
                if self.state.section == Section::Transactions && !self.ledger.loading {
                    let selected = self.state.transactions.selected;
                    if let Some(tx) = self.ledger.items.get(selected) {
                        self.state.transactions.form = FormState::for_edit(tx);
                        self.state.transactions.mode = TransactionsMode::Form;
                    }
                }
            }
            'd' | 'D' => {
                if self.state.section == Section::Transactions
                    && !self.ledger.loading
                    && !self.ledger.items.is_empty()
                {
                    self.state.transactions.mode = TransactionsMode::ConfirmDelete;
                }
            }
            _ => {}
        }

        Ok(())
    }

    async fn handle_form_key(&mut self, action: crate::ui::keymap::AppAction) -> Result<()> {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::Cancel => {
                self.state.transactions.mode = TransactionsMode::List;
            }
            AppAction::NextField => self.state.transactions.form.advance_focus(),
            AppAction::Submit => self.submit_form().await?,
            AppAction::Up | AppAction::Down => {
                let form = &mut self.state.transactions.form;
                match form.focus {
                    FormField::Kind => form.toggle_kind(),
                    FormField::Category => {
                        let step = if action == AppAction::Up { -1 } else { 1 };
                        form.cycle_category(step);
                    }
                    _ => {}
                }
            }
            AppAction::Backspace => {
                if let Some(field) = self.state.transactions.form.active_text_field_mut() {
                    field.pop();
                }
            }
            AppAction::Input(ch) => {
                let form = &mut self.state.transactions.form;
                match form.focus {
                    FormField::Kind => {
                        if ch == ' ' {
                            form.toggle_kind();
                        }
                    }
                    FormField::Category => {
                        if ch == ' ' {
                            form.cycle_category(1);
                        }
                    }
                    _ => {
                        if let Some(field) = form.active_text_field_mut() {
                            field.push(ch);
                        }
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }

    async fn submit_form(&mut self) -> Result<()> {
        if self.ledger.loading {
            return Ok(());
        }

        let form = &self.state.transactions.form;
        let parsed = form::parse_transaction(
            &form.description,
            &form.amount,
            form.kind,
            form.selected_category(),
            &form.date,
        );

        let payload = match parsed {
            Ok(payload) => payload,
            Err(message) => {
                self.state.transactions.form.message = Some(message);
                return Ok(());
            }
        };

        let Some(token) = self.session.token().map(str::to_string) else {
            return Ok(());
        };

        let editing = self.state.transactions.form.editing;
        let outcome = match editing {
            Some(id) => {
                let update = TransactionUpdate {
                    description: payload.description,
                    amount_minor: payload.amount_minor,
                    kind: payload.kind,
                    category: payload.category,
                    occurred_on: payload.occurred_on,
                };
                self.ledger.update(&self.client, &token, id, update).await
            }
            None => self.ledger.create(&self.client, &token, payload).await,
        };

        match outcome {
            Ok(()) => {
                self.state.transactions.mode = TransactionsMode::List;
                let len = self.ledger.items.len();
                self.state.transactions.clamp_selection(len);
                let message = if editing.is_some() {
                    "Transaction updated."
                } else {
                    "Transaction created."
                };
                self.push_toast(ToastLevel::Success, message);
            }
            Err(err) => self.handle_api_error(err)?,
        }

        Ok(())
    }

    async fn handle_confirm_key(&mut self, action: crate::ui::keymap::AppAction) -> Result<()> {
        use crate::ui::keymap::AppAction;

        match action {
            AppAction::Cancel => {
                self.state.transactions.mode = TransactionsMode::List;
            }
            AppAction::Input('y') | AppAction::Input('Y') | AppAction::Submit => {
                self.delete_selected().await?;
            }
            AppAction::Input('n') | AppAction::Input('N') => {
                self.state.transactions.mode = TransactionsMode::List;
            }
            _ => {}
        }

        Ok(())
    }

    async fn delete_selected(&mut self) -> Result<()> {
        self.state.transactions.mode = TransactionsMode::List;

        if self.ledger.loading {
            return Ok(());
        }
        let selected = self.state.transactions.selected;
        let Some(id) = self.ledger.items.get(selected).map(|tx| tx.id) else {
            return Ok(());
        };
        let Some(token) = self.session.token().map(str::to_string) else {
            return Ok(());
        };

        match self.ledger.delete(&self.client, &token, id).await {
            Ok(()) => {
                let len = self.ledger.items.len();
                self.state.transactions.clamp_selection(len);
                self.push_toast(ToastLevel::Success, "Transaction deleted.");
            }
            Err(err) => self.handle_api_error(err)?,
        }

        Ok(())
    }

    async fn refresh_ledger(&mut self) -> Result<()> {
        let Some(token) = self.session.token().map(str::to_string) else {
            return Ok(());
        };

        match self.ledger.fetch_all(&self.client, &token).await {
            Ok(()) => {
                let len = self.ledger.items.len();
                self.state.transactions.clamp_selection(len);
            }
            Err(err) => self.handle_api_error(err)?,
        }

        Ok(())
    }

    fn logout(&mut self) -> Result<()> {
        self.session.logout()?;
        self.ledger = Ledger::new();
        self.state.screen = Screen::Login;
        self.state.login.password.clear();
        self.state.login.message = None;
        self.push_toast(ToastLevel::Info, "Logged out.");
        Ok(())
    }

    /// An expired or rejected token forces a logout; anything else becomes a
    /// notification and the user can retry.
    fn handle_api_error(&mut self, err: ClientError) -> Result<()> {
        if let ClientError::Unauthorized = err {
            self.session.force_logout()?;
            self.ledger = Ledger::new();
            self.state.screen = Screen::Login;
            self.state.login.password.clear();
            self.state.login.message = Some("Session expired. Sign in again.".to_string());
            return Ok(());
        }

        self.push_toast(ToastLevel::Error, message_for_error(&err));
        Ok(())
    }
}

/// Renders a stored amount back into the form's text representation.
fn format_amount_input(minor: i64) -> String {
    format!("{}.{:02}", minor / 100, minor % 100)
}

pub fn message_for_error(err: &ClientError) -> String {
    match err {
        ClientError::Unauthorized | ClientError::Forbidden => {
            "Invalid credentials or session.".to_string()
        }
        ClientError::NotFound => "Not found.".to_string(),
        ClientError::Conflict(message) => format!("Conflict: {message}"),
        ClientError::Validation(message) => format!("Validation error: {message}"),
        ClientError::Server(message) => format!("Server error: {message}"),
        ClientError::Transport(err) => format!("Server unreachable: {err}"),
    }
}

fn session_message(err: &SessionError) -> String {
    match err {
        SessionError::Api(err) => message_for_error(err),
        SessionError::Store(err) => format!("Could not persist session: {err}"),
    }
}
