//! Application state and business logic for the terminal client.
//!
//! `App` owns the wired services, the current route and the per-page state
//! for the login form and the daily inventory grid. Routing follows the
//! navigator: soft navigations swap pages, hard navigations also rebuild the
//! auth context as a fresh start would.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use happippang_core::api::ApiError;
use happippang_core::auth::{flows, AuthProvider, GuardView, RouteGuard};
use happippang_core::inventory::{InventoryForm, QtyField, DATE_FORMAT};
use happippang_core::lifecycle::Mounted;
use happippang_core::models::{Inventory, InventoryBulk, Item, Store, User};
use happippang_core::navigation::Navigation;
use happippang_core::router::{self, Route};
use happippang_core::{Config, Services};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the page load channel
const CHANNEL_BUFFER_SIZE: usize = 8;

/// Maximum allowed length for username input
const MAX_USERNAME_LENGTH: usize = 50;

/// Maximum allowed length for password input
const MAX_PASSWORD_LENGTH: usize = 128;

/// Number of rows to jump on PageUp/PageDown
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Maximum digits accepted in a quantity cell
const MAX_QTY_DIGITS: usize = 6;

const DATE_INPUT_LENGTH: usize = 10;

// ============================================================================
// Enums
// ============================================================================

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    ConfirmingQuit,
    Quitting,
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Username,
    Password,
    Button,
}

/// Inventory page focus: the quantity grid or the date field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InventoryFocus {
    Grid,
    Date,
}

/// What the current frame shows
#[derive(Debug, Clone, PartialEq)]
pub enum PageView {
    /// Nothing yet; a redirect is on its way
    Blank,
    Login,
    /// The protected layout is waiting on the auth context
    Placeholder,
    Inventory(User),
}

/// Results sent back from page loads, tagged with the page they belong to
enum PageLoad {
    Catalog {
        page: Mounted,
        result: Result<(Vec<Store>, Vec<Item>), ApiError>,
    },
    Submitted {
        page: Mounted,
        shop: String,
        date: NaiveDate,
        result: Result<Vec<Inventory>, ApiError>,
    },
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    pub config: Config,
    /// Where remembered form values are written; `None` keeps them in memory
    config_file: Option<PathBuf>,
    services: Services,
    auth: Arc<AuthProvider>,
    auth_task: Option<JoinHandle<()>>,
    guard: RouteGuard,
    nav_rx: watch::Receiver<Navigation>,

    pub route: Route,
    pub view: PageView,
    pub state: AppState,
    pub status_message: Option<String>,

    // Login form
    pub login_username: String,
    pub login_password: String,
    pub login_focus: LoginFocus,
    pub login_error: Option<String>,

    // Inventory page
    pub form: InventoryForm,
    pub grid_selection: usize,
    pub grid_field: QtyField,
    /// Digits typed into the selected cell but not yet committed
    pub edit_buffer: Option<String>,
    pub inventory_focus: InventoryFocus,
    pub date_input: String,
    /// A bulk submission is in flight
    pub submitting: bool,
    page: Mounted,
    catalog_requested: bool,

    load_tx: mpsc::Sender<PageLoad>,
    load_rx: mpsc::Receiver<PageLoad>,
}

impl App {
    /// Build the app and start resolving the auth context.
    /// Must be called from within the tokio runtime.
    pub fn new(config: Config, services: Services, initial_path: &str) -> Self {
        let (load_tx, load_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        let nav_rx = services.navigator().subscribe();
        let auth = Arc::new(services.auth_scope());
        let guard = services.route_guard(&auth);
        let login_username = config.last_username.clone().unwrap_or_default();
        let login_focus = if login_username.is_empty() {
            LoginFocus::Username
        } else {
            LoginFocus::Password
        };

        let mut app = Self {
            config,
            config_file: Config::config_path().ok(),
            services,
            auth,
            auth_task: None,
            guard,
            nav_rx,
            route: Route::Login,
            view: PageView::Blank,
            state: AppState::Normal,
            status_message: None,
            login_username,
            login_password: String::new(),
            login_focus,
            login_error: None,
            form: InventoryForm::from_catalog(Local::now().date_naive()),
            grid_selection: 0,
            grid_field: QtyField::In,
            edit_buffer: None,
            inventory_focus: InventoryFocus::Grid,
            date_input: String::new(),
            submitting: false,
            page: Mounted::new(),
            catalog_requested: false,
            load_tx,
            load_rx,
        };
        app.restore_last_store();
        app.start_auth();
        app.enter_route(Route::parse(initial_path));
        app
    }

    /// Replace the auth context with a fresh one and resolve it in the
    /// background. The guard is rebuilt against the new context.
    fn start_auth(&mut self) {
        if let Some(task) = self.auth_task.take() {
            task.abort();
        }

        let provider = Arc::new(self.services.auth_scope());
        let client = self.services.client().clone();
        let task_provider = provider.clone();
        self.auth_task = Some(tokio::spawn(async move {
            task_provider.initialize(&client).await;
        }));

        self.guard = self.services.route_guard(&provider);
        self.auth = provider;
    }

    fn enter_route(&mut self, route: Route) {
        debug!(path = route.path(), "Entering route");

        // Whatever the previous page had in flight is no longer wanted
        self.page.unmount();
        self.page = Mounted::new();
        self.catalog_requested = false;
        self.edit_buffer = None;
        self.inventory_focus = InventoryFocus::Grid;

        if route.is_protected() {
            self.guard = self.services.route_guard(&self.auth);
        }
        if let Some(target) = route.redirect() {
            self.services.navigator().navigate(target);
        }
        self.route = route;
        self.view = PageView::Blank;
    }

    /// Called after each drawn frame
    pub fn hydrate(&mut self) {
        self.guard.hydrate();
    }

    /// Advance routing and page loads. Called once per main loop iteration.
    pub fn tick(&mut self) {
        self.apply_navigation();
        self.check_page_loads();
        self.update_view();
    }

    fn apply_navigation(&mut self) {
        if !self.nav_rx.has_changed().unwrap_or(false) {
            return;
        }
        let nav = self.nav_rx.borrow_and_update().clone();
        info!(path = nav.route.path(), hard = nav.hard, "Navigation");

        if nav.hard {
            self.login_password.clear();
            self.status_message = None;
            self.start_auth();
        }
        self.enter_route(nav.route);
    }

    fn update_view(&mut self) {
        self.view = match self.route {
            Route::Login => match router::login_forward(&self.auth.state()) {
                Some(target) => {
                    self.services.navigator().navigate(target);
                    PageView::Blank
                }
                None => PageView::Login,
            },
            Route::InventoryCreate => match self.guard.view() {
                GuardView::Placeholder => PageView::Placeholder,
                GuardView::Content(user) => {
                    self.ensure_catalog_loaded();
                    PageView::Inventory(user)
                }
            },
            Route::NotFound(_) => PageView::Blank,
        };
    }

    // =========================================================================
    // Login
    // =========================================================================

    /// Attempt login with the credentials from the login form
    pub async fn attempt_login(&mut self) {
        self.login_error = None;
        let username = self.login_username.trim().to_string();

        match flows::login(self.services.client(), &username, &self.login_password).await {
            Ok(()) => {
                self.login_password.clear();
                self.config.last_username = Some(username);
                self.save_config();
            }
            Err(e) => {
                self.login_error = Some(e.user_message().to_string());
            }
        }
    }

    fn save_config(&self) {
        let Some(ref path) = self.config_file else {
            return;
        };
        if let Err(e) = self.config.save_to(path) {
            warn!(error = %e, "Failed to save config");
        }
    }

    pub async fn logout(&mut self) {
        let result = flows::logout(self.services.client()).await;

        // Take the reload now so the notice below outlives it
        self.apply_navigation();
        self.status_message = Some(match result {
            Ok(()) => "Logged out".to_string(),
            Err(e) => {
                warn!(error = %e, "Logged out locally only");
                format!("Logged out locally (server said: {})", e.user_message())
            }
        });
    }

    // =========================================================================
    // Inventory page
    // =========================================================================

    fn ensure_catalog_loaded(&mut self) {
        if self.catalog_requested {
            return;
        }
        self.catalog_requested = true;

        let client = self.services.client().clone();
        let page = self.page.clone();
        let tx = self.load_tx.clone();
        tokio::spawn(async move {
            let result = futures::try_join!(client.list_stores(), client.list_items());
            if !page.is_mounted() {
                debug!("Inventory page left before the catalog arrived");
                return;
            }
            if tx.send(PageLoad::Catalog { page, result }).await.is_err() {
                debug!("Page load channel closed");
            }
        });
    }

    /// Apply finished page loads, dropping those whose page is gone
    fn check_page_loads(&mut self) {
        while let Ok(load) = self.load_rx.try_recv() {
            match load {
                PageLoad::Catalog { page, result } => {
                    page.commit(result, |result| self.apply_catalog(result));
                }
                PageLoad::Submitted { page, shop, date, result } => {
                    self.submitting = false;
                    page.commit(result, |result| self.apply_submission(&shop, date, result));
                }
            }
        }
    }

    fn apply_catalog(&mut self, result: Result<(Vec<Store>, Vec<Item>), ApiError>) {
        match result {
            Ok((stores, items)) if !stores.is_empty() && !items.is_empty() => {
                info!(stores = stores.len(), items = items.len(), "Catalog loaded");
                self.form.replace_catalog(stores, items);
                self.restore_last_store();
                self.grid_selection = self.grid_selection.min(self.form.items().len().saturating_sub(1));
                self.edit_buffer = None;
            }
            Ok(_) => {
                warn!("Server catalog is empty, keeping the built-in one");
                self.status_message = Some("Server has no shops or items, using built-in list".to_string());
            }
            Err(e) => {
                warn!(error = %e, "Failed to load catalog");
                self.status_message = Some(format!("Using built-in list: {}", e.user_message()));
            }
        }
    }

    fn restore_last_store(&mut self) {
        let Some(ref last) = self.config.last_store_id else {
            return;
        };
        let found = self
            .form
            .stores()
            .iter()
            .find(|store| store.id.to_string() == *last)
            .map(|store| store.id.clone());
        if let Some(id) = found {
            self.form.select_store(&id);
        }
    }

    fn remember_store(&mut self) {
        let Some(store) = self.form.store() else {
            return;
        };
        let id = store.id.to_string();
        if self.config.last_store_id.as_deref() != Some(id.as_str()) {
            self.config.last_store_id = Some(id);
            self.save_config();
        }
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.form.items().get(self.grid_selection)
    }

    pub fn move_selection(&mut self, delta: isize) {
        self.commit_edit();
        let len = self.form.items().len();
        if len == 0 {
            return;
        }
        self.grid_selection = self.grid_selection.saturating_add_signed(delta).min(len - 1);
    }

    pub fn switch_field(&mut self) {
        self.commit_edit();
        self.grid_field = self.grid_field.toggle();
    }

    pub fn push_digit(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        let buffer = self.edit_buffer.get_or_insert_with(String::new);
        if buffer.len() < MAX_QTY_DIGITS {
            buffer.push(c);
        }
    }

    /// Backspace in the selected cell; starts editing from the stored value
    pub fn pop_digit(&mut self) {
        if self.edit_buffer.is_none() {
            let current = self
                .selected_item()
                .map(|item| self.form.row(&item.id).get(self.grid_field))
                .unwrap_or_default();
            self.edit_buffer = Some(if current == 0 { String::new() } else { current.to_string() });
        }
        if let Some(ref mut buffer) = self.edit_buffer {
            buffer.pop();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer = None;
    }

    /// Write the edit buffer into the form
    pub fn commit_edit(&mut self) {
        let Some(buffer) = self.edit_buffer.take() else {
            return;
        };
        if let Some(id) = self.selected_item().map(|item| item.id.clone()) {
            self.form.set_input(&id, self.grid_field, &buffer);
        }
    }

    pub fn next_store(&mut self) {
        self.commit_edit();
        self.form.next_store();
        self.remember_store();
    }

    pub fn prev_store(&mut self) {
        self.commit_edit();
        self.form.prev_store();
        self.remember_store();
    }

    pub fn start_date_edit(&mut self) {
        self.commit_edit();
        self.date_input = self.form.date().format(DATE_FORMAT).to_string();
        self.inventory_focus = InventoryFocus::Date;
    }

    pub fn push_date_char(&mut self, c: char) {
        if can_add_date_char(self.date_input.len(), c) {
            self.date_input.push(c);
        }
    }

    pub fn finish_date_edit(&mut self) {
        match self.form.set_date(&self.date_input) {
            Ok(()) => {
                self.inventory_focus = InventoryFocus::Grid;
                self.status_message = None;
            }
            Err(e) => {
                debug!(error = %e, input = %self.date_input, "Rejected date");
                self.status_message = Some("Invalid date, use YYYY-MM-DD".to_string());
            }
        }
    }

    pub fn cancel_date_edit(&mut self) {
        self.inventory_focus = InventoryFocus::Grid;
    }

    /// Send the whole grid for the selected shop and date in the background.
    /// The result arrives through the page load channel.
    pub fn submit_inventory(&mut self) {
        if self.submitting {
            return;
        }
        self.commit_edit();
        let Some(bulk) = self.form.to_bulk() else {
            self.status_message = Some("No shop selected".to_string());
            return;
        };
        self.submitting = true;
        self.spawn_submission(bulk);
    }

    fn spawn_submission(&self, bulk: InventoryBulk) {
        let shop = self.form.store().map(|s| s.name.clone()).unwrap_or_default();
        let client = self.services.client().clone();
        let page = self.page.clone();
        let tx = self.load_tx.clone();
        tokio::spawn(async move {
            let result = client.create_inventory_bulk(&bulk).await;
            let load = PageLoad::Submitted { page, shop, date: bulk.date, result };
            if tx.send(load).await.is_err() {
                debug!("Page load channel closed");
            }
        });
    }

    fn apply_submission(&mut self, shop: &str, date: NaiveDate, result: Result<Vec<Inventory>, ApiError>) {
        match result {
            Ok(saved) => {
                info!(rows = saved.len(), shop = %shop, date = %date, "Inventory submitted");
                self.status_message = Some(format!("Saved {} rows for {} on {}", saved.len(), shop, date));
                self.form.clear_rows();
                self.edit_buffer = None;
                self.remember_store();
            }
            Err(e) => {
                error!(error = %e, "Inventory submit failed");
                self.status_message = Some(e.user_message());
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.page.unmount();
        if let Some(task) = self.auth_task.take() {
            task.abort();
        }
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if a username character should be accepted
pub fn can_add_username_char(current_len: usize, c: char) -> bool {
    current_len < MAX_USERNAME_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

pub fn can_add_date_char(current_len: usize, c: char) -> bool {
    current_len < DATE_INPUT_LENGTH && (c.is_ascii_digit() || c == '-')
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use happippang_core::api::{ApiRequest, ApiResponse, Transport};
    use happippang_core::auth::{MemoryTokenStore, TokenStore};
    use happippang_core::navigation::Navigator;
    use serde_json::json;

    /// Accepts any bearer token, answers 401 without one, and records
    /// request paths
    #[derive(Default)]
    struct FakeServer {
        paths: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Transport for FakeServer {
        async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
            self.paths.lock().unwrap().push(request.path.clone());
            tokio::task::yield_now().await;
            let signed_in = request.bearer.is_some();
            let response = match request.path.as_str() {
                "/users/me" if signed_in => {
                    json!({"id": 1, "email": "alice@example.com", "role": "user"})
                }
                "/stores/" if signed_in => json!([{"id": 7, "name": "Central Park"}]),
                "/items/" if signed_in => {
                    json!([{"id": 11, "name": "Roti Coklat", "category": "Roti", "cost": 0}])
                }
                "/inventory/bulk" if signed_in => json!([{
                    "id": 1, "store_id": 7, "item_id": 11,
                    "date": "2025-06-01", "in_qty": 12, "out_qty": 0
                }]),
                "/users/login" => json!({"access_token": "A1", "refresh_token": "R1"}),
                "/users/logout" => {
                    return Ok(ApiResponse::with_status(500, r#"{"detail":"session store down"}"#));
                }
                _ => return Ok(ApiResponse::with_status(401, "{}")),
            };
            Ok(ApiResponse::with_status(200, response.to_string()))
        }
    }

    fn app(signed_in: bool, path: &str) -> (App, Arc<FakeServer>, Arc<MemoryTokenStore>) {
        let server = Arc::new(FakeServer::default());
        let tokens = Arc::new(if signed_in {
            MemoryTokenStore::with_tokens("A0", "R0")
        } else {
            MemoryTokenStore::default()
        });
        let services = Services::builder()
            .transport(server.clone())
            .tokens(tokens.clone())
            .navigator(Navigator::new(Route::parse(path)))
            .build()
            .unwrap();
        let config = Config {
            token_backend: happippang_core::config::TokenBackend::Memory,
            ..Config::default()
        };
        let mut app = App::new(config, services, path);
        app.config_file = None;
        (app, server, tokens)
    }

    /// Run frames until `done` holds or the budget runs out
    async fn settle(app: &mut App, done: impl Fn(&App) -> bool) {
        for _ in 0..200 {
            app.tick();
            app.hydrate();
            if done(app) {
                return;
            }
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_first_frame_is_placeholder_on_protected_page() {
        let (mut app, _, _) = app(true, "/inventory/create");
        app.tick();
        assert_eq!(app.view, PageView::Placeholder);
    }

    #[tokio::test]
    async fn test_signed_out_visitor_is_sent_to_login() {
        let (mut app, _, _) = app(false, "/inventory/create");
        settle(&mut app, |app| app.view == PageView::Login).await;
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.view, PageView::Login);
    }

    #[tokio::test]
    async fn test_unknown_path_lands_on_inventory_when_signed_in() {
        let (mut app, _, _) = app(true, "/");
        settle(&mut app, |app| matches!(app.view, PageView::Inventory(_))).await;
        assert_eq!(app.route, Route::InventoryCreate);
    }

    #[tokio::test]
    async fn test_catalog_replaced_from_server() {
        let (mut app, _, _) = app(true, "/inventory/create");
        settle(&mut app, |app| app.form.items().len() == 1).await;
        assert_eq!(app.form.items()[0].name, "Roti Coklat");
        assert_eq!(app.form.store().unwrap().name, "Central Park");
    }

    #[tokio::test]
    async fn test_login_reloads_into_inventory() {
        let (mut app, server, tokens) = app(false, "/login");
        let dir = tempfile::tempdir().unwrap();
        let config_file = dir.path().join("config.json");
        app.config_file = Some(config_file.clone());
        settle(&mut app, |app| app.view == PageView::Login).await;

        app.login_username = " alice ".to_string();
        app.login_password = "pw".to_string();
        app.attempt_login().await;

        assert_eq!(tokens.get().access_token.as_deref(), Some("A1"));
        assert!(app.login_error.is_none());
        assert!(app.login_password.is_empty());
        assert!(server.paths.lock().unwrap().contains(&"/users/login".to_string()));
        assert_eq!(Config::load_from(&config_file).unwrap().last_username.as_deref(), Some("alice"));

        // The hard reload rebuilds the auth context and forwards past login
        settle(&mut app, |app| matches!(app.view, PageView::Inventory(_))).await;
        assert_eq!(app.route, Route::InventoryCreate);
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let (mut app, server, _) = app(false, "/login");
        app.login_username = "alice".to_string();
        app.attempt_login().await;

        assert_eq!(app.login_error.as_deref(), Some("Username and password required"));
        assert!(server.paths.lock().unwrap().iter().all(|p| p != "/users/login"));
    }

    #[tokio::test]
    async fn test_quantity_editing() {
        let (mut app, _, _) = app(false, "/login");
        let first = app.form.items()[0].id.clone();

        app.push_digit('1');
        app.push_digit('2');
        app.push_digit('x');
        app.switch_field();
        assert_eq!(app.form.row(&first).in_qty, 12);

        app.push_digit('3');
        app.move_selection(1);
        assert_eq!(app.form.row(&first).out_qty, 3);
        assert_eq!(app.grid_selection, 1);

        app.move_selection(-5);
        app.pop_digit();
        app.commit_edit();
        assert_eq!(app.form.row(&first).out_qty, 0);
    }

    #[tokio::test]
    async fn test_submission_reports_through_frames() {
        let (mut app, server, _) = app(true, "/inventory/create");
        settle(&mut app, |app| app.form.items().len() == 1).await;
        let item = app.form.items()[0].id.clone();

        app.push_digit('1');
        app.push_digit('2');
        app.submit_inventory();
        // Saving stays visible until a later frame applies the result
        assert!(app.submitting);
        assert_eq!(app.form.row(&item).in_qty, 12);

        settle(&mut app, |app| !app.submitting).await;
        let notice = app.status_message.clone().unwrap();
        assert!(notice.starts_with("Saved 1 rows for Central Park"), "{notice}");
        assert_eq!(app.form.row(&item).in_qty, 0);
        assert_eq!(app.config.last_store_id.as_deref(), Some("7"));
        assert_eq!(server.paths.lock().unwrap().iter().filter(|p| *p == "/inventory/bulk").count(), 1);
    }

    #[tokio::test]
    async fn test_logout_reports_server_failure() {
        let (mut app, _, tokens) = app(true, "/inventory/create");
        settle(&mut app, |app| matches!(app.view, PageView::Inventory(_))).await;

        app.logout().await;
        assert!(tokens.get().is_empty());
        assert_eq!(app.route, Route::Login);
        let notice = app.status_message.clone().unwrap();
        assert!(notice.starts_with("Logged out locally"), "{notice}");

        settle(&mut app, |app| app.view == PageView::Login).await;
        assert_eq!(app.status_message.as_deref(), Some(notice.as_str()));
    }

    #[tokio::test]
    async fn test_date_edit_rejects_bad_input() {
        let (mut app, _, _) = app(false, "/login");
        app.start_date_edit();
        app.date_input = "2025-13-40".to_string();
        app.finish_date_edit();
        assert_eq!(app.inventory_focus, InventoryFocus::Date);

        app.date_input = "2025-06-01".to_string();
        app.finish_date_edit();
        assert_eq!(app.inventory_focus, InventoryFocus::Grid);
        assert_eq!(app.form.date().to_string(), "2025-06-01");
    }

    #[test]
    fn test_can_add_username_char() {
        assert!(can_add_username_char(0, 'a'));
        assert!(can_add_username_char(49, 'z'));
        assert!(!can_add_username_char(50, 'a'));
        assert!(!can_add_username_char(0, '\x00'));
        assert!(!can_add_username_char(0, '\n'));
        assert!(!can_add_username_char(0, '\t'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(0, 'a'));
        assert!(can_add_password_char(127, '!'));
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(0, '\r'));
    }

    #[test]
    fn test_can_add_date_char() {
        assert!(can_add_date_char(0, '2'));
        assert!(can_add_date_char(4, '-'));
        assert!(!can_add_date_char(10, '1'));
        assert!(!can_add_date_char(0, '/'));
    }
}
