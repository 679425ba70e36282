//! Hand-written service doubles shared by the unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use guildhall_core::balance::{BalanceService, BalanceSnapshot};
use guildhall_core::error::{HubError, Result};
use guildhall_core::files::{FileItem, FileService, FileUpload};
use guildhall_core::notification::{Notification, NotificationPage, NotificationService};
use guildhall_core::progression::{ProgressionService, ProgressionSnapshot};
use guildhall_core::session::{AuthService, Session, SessionState};
use guildhall_core::shop::{
    CategoryDraft, ItemDraft, OrderStatus, ShopCategory, ShopItem, ShopOrder, ShopService,
};
use tokio::sync::watch;

pub fn user(id: &str) -> Session {
    Session {
        user_id: id.to_string(),
        username: format!("user{id}"),
        avatar_url: None,
        is_admin: false,
        is_super_admin: false,
        background_url: None,
    }
}

pub fn session_channel(id: &str) -> (watch::Sender<SessionState>, watch::Receiver<SessionState>) {
    watch::channel(SessionState::authenticated(user(id)))
}

pub fn anonymous_channel() -> (watch::Sender<SessionState>, watch::Receiver<SessionState>) {
    watch::channel(SessionState::anonymous())
}

/// Level `level` starting at `level * 100` XP, `progress` XP into it.
pub fn snapshot(level: u32, progress: i64) -> ProgressionSnapshot {
    let start = i64::from(level) * 100;
    let span = 200;
    ProgressionSnapshot {
        level,
        total_xp: start + progress,
        xp_for_current_level: start,
        xp_for_next_level: start + span,
        xp_progress: progress,
        xp_needed: span - progress,
        progress_percent: progress as f64 / span as f64 * 100.0,
    }
}

pub fn notification(id: i64) -> Notification {
    Notification {
        id,
        title: format!("notification {id}"),
        message: String::new(),
        kind: None,
        is_read: false,
        link: None,
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub struct MockAuthService {
    response: Mutex<(Result<Session>, Duration)>,
    logout_error: Mutex<Option<HubError>>,
    logouts: Mutex<usize>,
}

impl MockAuthService {
    pub fn new(response: Result<Session>) -> Self {
        Self {
            response: Mutex::new((response, Duration::ZERO)),
            logout_error: Mutex::new(None),
            logouts: Mutex::new(0),
        }
    }

    pub fn set_response(&self, response: Result<Session>) {
        self.set_response_with_delay(response, Duration::ZERO);
    }

    /// Calls issued after this resolve to `response` once `delay` has elapsed.
    pub fn set_response_with_delay(&self, response: Result<Session>, delay: Duration) {
        *self.response.lock().unwrap() = (response, delay);
    }

    pub fn fail_logout(&self, error: HubError) {
        *self.logout_error.lock().unwrap() = Some(error);
    }

    pub fn logout_count(&self) -> usize {
        *self.logouts.lock().unwrap()
    }
}

#[async_trait]
impl AuthService for MockAuthService {
    async fn current_user(&self) -> Result<Session> {
        let (response, delay) = self.response.lock().unwrap().clone();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response
    }

    async fn logout(&self) -> Result<()> {
        *self.logouts.lock().unwrap() += 1;
        match self.logout_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

pub struct MockProgressionService {
    current: Mutex<Result<ProgressionSnapshot>>,
    award: Mutex<Option<Result<ProgressionSnapshot>>>,
    awarded: Mutex<Vec<i64>>,
    fetches: Mutex<usize>,
}

impl MockProgressionService {
    pub fn new(current: ProgressionSnapshot) -> Self {
        Self {
            current: Mutex::new(Ok(current)),
            award: Mutex::new(None),
            awarded: Mutex::new(Vec::new()),
            fetches: Mutex::new(0),
        }
    }

    pub fn set_current(&self, current: ProgressionSnapshot) {
        *self.current.lock().unwrap() = Ok(current);
    }

    pub fn fail_fetch(&self, error: HubError) {
        *self.current.lock().unwrap() = Err(error);
    }

    /// Response of both mutation endpoints. Defaults to the current snapshot.
    pub fn set_award_response(&self, response: Result<ProgressionSnapshot>) {
        *self.award.lock().unwrap() = Some(response);
    }

    pub fn awarded(&self) -> Vec<i64> {
        self.awarded.lock().unwrap().clone()
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }

    fn mutation_response(&self) -> Result<ProgressionSnapshot> {
        match self.award.lock().unwrap().clone() {
            Some(response) => response,
            None => self.current.lock().unwrap().clone(),
        }
    }
}

#[async_trait]
impl ProgressionService for MockProgressionService {
    async fn get_progression(&self) -> Result<ProgressionSnapshot> {
        *self.fetches.lock().unwrap() += 1;
        self.current.lock().unwrap().clone()
    }

    async fn award_xp(&self, amount: i64) -> Result<ProgressionSnapshot> {
        self.awarded.lock().unwrap().push(amount);
        self.mutation_response()
    }

    async fn reset_progression(&self) -> Result<ProgressionSnapshot> {
        self.mutation_response()
    }
}

pub struct MockBalanceService {
    response: Mutex<Result<Option<BalanceSnapshot>>>,
    fetches: Mutex<usize>,
}

impl MockBalanceService {
    pub fn new(response: Result<Option<BalanceSnapshot>>) -> Self {
        Self {
            response: Mutex::new(response),
            fetches: Mutex::new(0),
        }
    }

    pub fn set_response(&self, response: Result<Option<BalanceSnapshot>>) {
        *self.response.lock().unwrap() = response;
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl BalanceService for MockBalanceService {
    async fn get_balance(&self) -> Result<Option<BalanceSnapshot>> {
        *self.fetches.lock().unwrap() += 1;
        self.response.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct MockNotificationService {
    recent: Mutex<Vec<Notification>>,
    history: Mutex<Vec<Notification>>,
    list_error: Mutex<Option<HubError>>,
    recent_calls: Mutex<usize>,
    list_calls: Mutex<Vec<(u32, u32)>>,
    marked: Mutex<Vec<i64>>,
}

impl MockNotificationService {
    pub fn new(recent: Vec<Notification>) -> Self {
        Self {
            recent: Mutex::new(recent),
            ..Self::default()
        }
    }

    pub fn with_history(history: Vec<Notification>) -> Self {
        Self {
            history: Mutex::new(history),
            ..Self::default()
        }
    }

    pub fn set_recent(&self, recent: Vec<Notification>) {
        *self.recent.lock().unwrap() = recent;
    }

    pub fn prepend(&self, notification: Notification) {
        self.history.lock().unwrap().insert(0, notification);
    }

    pub fn fail_list(&self, error: HubError) {
        *self.list_error.lock().unwrap() = Some(error);
    }

    pub fn recent_count(&self) -> usize {
        *self.recent_calls.lock().unwrap()
    }

    pub fn list_calls(&self) -> Vec<(u32, u32)> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn marked_read(&self) -> Vec<i64> {
        self.marked.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationService for MockNotificationService {
    async fn recent(&self) -> Result<Vec<Notification>> {
        *self.recent_calls.lock().unwrap() += 1;
        Ok(self.recent.lock().unwrap().clone())
    }

    async fn list(&self, skip: u32, limit: u32) -> Result<NotificationPage> {
        self.list_calls.lock().unwrap().push((skip, limit));
        if let Some(error) = self.list_error.lock().unwrap().clone() {
            return Err(error);
        }
        let items = self
            .history
            .lock()
            .unwrap()
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(NotificationPage::new(items, skip, limit))
    }

    async fn mark_read(&self, notification_id: i64) -> Result<()> {
        self.marked.lock().unwrap().push(notification_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockFileService {
    stored: Mutex<Vec<FileItem>>,
}

#[async_trait]
impl FileService for MockFileService {
    async fn upload(&self, file: FileUpload) -> Result<FileItem> {
        let item = FileItem {
            url: format!("/uploads/{}", file.filename),
            size: file.bytes.len() as u64,
            content_type: file.content_type,
            filename: file.filename,
            uploaded_at: None,
        };
        self.stored.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn list(&self) -> Result<Vec<FileItem>> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn delete(&self, filename: &str) -> Result<()> {
        let mut stored = self.stored.lock().unwrap();
        let before = stored.len();
        stored.retain(|f| f.filename != filename);
        if stored.len() == before {
            return Err(HubError::not_found("File", filename));
        }
        Ok(())
    }
}

/// Only `purchase` is scripted; it answers with an order of the given total.
pub struct MockShopService {
    purchase: Result<i64>,
}

impl MockShopService {
    pub fn new(purchase: Result<i64>) -> Self {
        Self { purchase }
    }

    fn unscripted<T>() -> Result<T> {
        Err(HubError::internal("not scripted in this test"))
    }
}

#[async_trait]
impl ShopService for MockShopService {
    async fn list_categories(&self) -> Result<Vec<ShopCategory>> {
        Ok(Vec::new())
    }

    async fn create_category(&self, _draft: &CategoryDraft) -> Result<ShopCategory> {
        Self::unscripted()
    }

    async fn update_category(&self, _category_id: i64, _draft: &CategoryDraft) -> Result<ShopCategory> {
        Self::unscripted()
    }

    async fn delete_category(&self, _category_id: i64) -> Result<()> {
        Self::unscripted()
    }

    async fn list_items(&self, _category_id: Option<i64>) -> Result<Vec<ShopItem>> {
        Ok(Vec::new())
    }

    async fn get_item(&self, item_id: i64) -> Result<ShopItem> {
        Err(HubError::not_found("Shop item", item_id.to_string()))
    }

    async fn create_item(&self, _draft: &ItemDraft) -> Result<ShopItem> {
        Self::unscripted()
    }

    async fn update_item(&self, _item_id: i64, _draft: &ItemDraft) -> Result<ShopItem> {
        Self::unscripted()
    }

    async fn delete_item(&self, _item_id: i64) -> Result<()> {
        Self::unscripted()
    }

    async fn purchase(&self, item_id: i64, quantity: u32) -> Result<ShopOrder> {
        let total_price = self.purchase.clone()?;
        Ok(ShopOrder {
            id: 1,
            item_id,
            item_name: None,
            quantity,
            total_price,
            status: OrderStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        })
    }

    async fn list_orders(&self) -> Result<Vec<ShopOrder>> {
        Ok(Vec::new())
    }

    async fn update_order_status(&self, _order_id: i64, _status: OrderStatus) -> Result<ShopOrder> {
        Self::unscripted()
    }
}
