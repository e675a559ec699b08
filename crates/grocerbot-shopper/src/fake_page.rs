//! In-memory storefront page for exercising the shopper without Chrome.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use grocerbot_protocols::{DriverError, ElementHandle, PageDriver};
use parking_lot::Mutex;

use crate::selectors::Selectors;

/// One product cell in the search results.
#[derive(Debug, Clone, Default)]
pub struct FakeCell {
    pub title: Option<String>,
    pub amount: Option<String>,
    pub sale_amount: Option<String>,
    pub image: Option<String>,
    pub purchased: bool,
    pub add_button: bool,
    pub select_id: Option<String>,
}

impl FakeCell {
    pub fn product(title: &str, amount: &str) -> Self {
        Self {
            title: Some(title.to_string()),
            amount: Some(amount.to_string()),
            add_button: true,
            ..Default::default()
        }
    }

    pub fn purchased(mut self) -> Self {
        self.purchased = true;
        self
    }

    pub fn on_sale(mut self, amount: &str) -> Self {
        self.sale_amount = Some(amount.to_string());
        self
    }

    pub fn with_image(mut self, url: &str) -> Self {
        self.image = Some(url.to_string());
        self
    }

    pub fn by_weight(mut self, select_id: &str) -> Self {
        self.add_button = false;
        self.select_id = Some(select_id.to_string());
        self
    }
}

/// A recorded primitive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Init,
    Close,
    Navigate(String),
    Locate(String),
    LocateWithin(String, String),
    LocateAllWithin(String, String),
    ReadText(String),
    ReadAttribute(String, String, String),
    Click(String, u32),
    ClickElement(String, u32),
    TypeText(String, String),
    ClearText(String),
    SelectOption(String, String),
    CurrentUrl,
    Pause(Duration),
    Screenshot,
}

struct PageState {
    open: bool,
    url: String,
    controls: HashSet<String>,
    /// Selector -> lookups left before it appears.
    delayed: HashMap<String, u32>,
    /// Selector -> lookups left before it disappears.
    expiring: HashMap<String, u32>,
    results: Option<Vec<FakeCell>>,
    /// Add buttons are replaced after each click; handles carry a generation.
    add_generation: Vec<u32>,
    cart: Vec<(String, u32)>,
    calls: Vec<Call>,
}

/// Fake page preloaded with the storefront's controls.
pub struct FakePage {
    selectors: Selectors,
    state: Mutex<PageState>,
}

impl FakePage {
    pub fn new() -> Self {
        let selectors = Selectors::default();
        let controls = [
            &selectors.search_input,
            &selectors.search_button,
            &selectors.cart_nav,
            &selectors.cart_empty,
            &selectors.cart_empty_confirm,
            &selectors.sign_in,
            &selectors.login_email,
            &selectors.login_password,
            &selectors.login_submit,
        ]
        .into_iter()
        .cloned()
        .collect();

        Self {
            selectors,
            state: Mutex::new(PageState {
                open: false,
                url: "about:blank".to_string(),
                controls,
                delayed: HashMap::new(),
                expiring: HashMap::new(),
                results: None,
                add_generation: Vec::new(),
                cart: Vec::new(),
                calls: Vec::new(),
            }),
        }
    }

    /// A page whose session is already open.
    pub fn opened() -> Self {
        let page = Self::new();
        page.state.lock().open = true;
        page
    }

    pub fn with_results(self, cells: Vec<FakeCell>) -> Self {
        {
            let mut state = self.state.lock();
            state.add_generation = vec![0; cells.len()];
            state.results = Some(cells);
        }
        self
    }

    pub fn with_control(self, selector: &str) -> Self {
        self.state.lock().controls.insert(selector.to_string());
        self
    }

    pub fn without_control(self, selector: &str) -> Self {
        self.state.lock().controls.remove(selector);
        self
    }

    /// `selector` shows up after `lookups` failed presence checks.
    pub fn appearing_after(self, selector: &str, lookups: u32) -> Self {
        self.state.lock().delayed.insert(selector.to_string(), lookups);
        self
    }

    /// `selector` is gone after `lookups` successful presence checks.
    pub fn vanishing_after(self, selector: &str, lookups: u32) -> Self {
        self.state.lock().expiring.insert(selector.to_string(), lookups);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Cart contents as (product title, quantity).
    pub fn cart(&self) -> Vec<(String, u32)> {
        self.state.lock().cart.clone()
    }

    pub fn seed_cart(&self, title: &str, quantity: u32) {
        self.state.lock().cart.push((title.to_string(), quantity));
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) -> Result<parking_lot::MutexGuard<'_, PageState>, DriverError> {
        let mut state = self.state.lock();
        if !state.open {
            return Err(DriverError::SessionNotReady);
        }
        state.calls.push(call);
        Ok(state)
    }

    fn cell_index(id: &str) -> Option<usize> {
        id.strip_prefix("cell:")?.split('/').next()?.parse().ok()
    }

    fn control_present(&self, state: &mut PageState, selector: &str) -> bool {
        if let Some(left) = state.delayed.get_mut(selector) {
            if *left > 0 {
                *left -= 1;
                return false;
            }
            state.controls.insert(selector.to_string());
        }
        if let Some(left) = state.expiring.get_mut(selector) {
            if *left == 0 {
                state.expiring.remove(selector);
                state.controls.remove(selector);
            } else {
                *left -= 1;
            }
        }
        state.controls.contains(selector)
    }

    fn add_to_cart(state: &mut PageState, title: &str, quantity: u32) {
        match state.cart.iter_mut().find(|(t, _)| t == title) {
            Some(entry) => entry.1 += quantity,
            None => state.cart.push((title.to_string(), quantity)),
        }
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn init(&mut self) -> Result<(), DriverError> {
        let mut state = self.state.lock();
        if state.open {
            return Err(DriverError::SessionAlreadyOpen);
        }
        state.open = true;
        state.calls.push(Call::Init);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), DriverError> {
        let mut state = self.record(Call::Close)?;
        state.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state.lock().open
    }

    async fn navigate(&self, url: &str) -> Result<(), DriverError> {
        let mut state = self.record(Call::Navigate(url.to_string()))?;
        state.url = url.to_string();
        Ok(())
    }

    async fn locate(&self, selector: &str) -> Result<Option<ElementHandle>, DriverError> {
        let mut state = self.record(Call::Locate(selector.to_string()))?;
        if selector == self.selectors.results_container {
            return Ok(state
                .results
                .as_ref()
                .map(|_| ElementHandle::new("container", selector)));
        }
        let present = self.control_present(&mut state, selector);
        Ok(present.then(|| ElementHandle::new(format!("control:{}", selector), selector)))
    }

    async fn locate_within(
        &self,
        parent: &ElementHandle,
        selector: &str,
    ) -> Result<Option<ElementHandle>, DriverError> {
        let state = self.record(Call::LocateWithin(
            parent.id().to_string(),
            selector.to_string(),
        ))?;
        let s = &self.selectors;
        let Some(index) = Self::cell_index(parent.id()) else {
            return Ok(None);
        };
        let cell = state
            .results
            .as_ref()
            .and_then(|cells| cells.get(index))
            .ok_or_else(|| DriverError::StaleElement(parent.selector().to_string()))?;
        let base = format!("cell:{}", index);

        let id = if parent.id().ends_with("/sale") {
            (selector == s.price_amount && cell.sale_amount.is_some())
                .then(|| format!("{}/sale/amount", base))
        } else if selector == s.cell_title {
            cell.title.as_ref().map(|_| format!("{}/title", base))
        } else if selector == s.sale_price {
            cell.sale_amount.as_ref().map(|_| format!("{}/sale", base))
        } else if selector == s.price_amount {
            if cell.amount.is_some() {
                Some(format!("{}/amount", base))
            } else {
                cell.sale_amount.as_ref().map(|_| format!("{}/sale/amount", base))
            }
        } else if selector == s.purchased_marker {
            cell.purchased.then(|| format!("{}/purchased", base))
        } else if selector == s.add_button {
            cell.add_button
                .then(|| format!("{}/add:{}", base, state.add_generation[index]))
        } else if selector == s.weight_select {
            cell.select_id.as_ref().map(|_| format!("{}/select", base))
        } else {
            None
        };
        Ok(id.map(|id| ElementHandle::new(id, selector)))
    }

    async fn locate_all_within(
        &self,
        parent: &ElementHandle,
        selector: &str,
    ) -> Result<Vec<ElementHandle>, DriverError> {
        let state = self.record(Call::LocateAllWithin(
            parent.id().to_string(),
            selector.to_string(),
        ))?;
        if parent.id() != "container" || selector != self.selectors.product_cell {
            return Ok(Vec::new());
        }
        let count = state.results.as_ref().map_or(0, Vec::len);
        Ok((0..count)
            .map(|i| ElementHandle::new(format!("cell:{}", i), selector))
            .collect())
    }

    async fn read_text(&self, element: &ElementHandle) -> Result<String, DriverError> {
        let state = self.record(Call::ReadText(element.id().to_string()))?;
        let stale = || DriverError::StaleElement(element.selector().to_string());
        let index = Self::cell_index(element.id()).ok_or_else(stale)?;
        let cell = state
            .results
            .as_ref()
            .and_then(|cells| cells.get(index))
            .ok_or_else(stale)?;
        let text = if element.id().ends_with("/sale/amount") {
            cell.sale_amount.clone()
        } else if element.id().ends_with("/amount") {
            cell.amount.clone()
        } else if element.id().ends_with("/title") {
            cell.title.clone()
        } else {
            None
        };
        Ok(text.unwrap_or_default())
    }

    async fn read_attribute(
        &self,
        element: &ElementHandle,
        selector: &str,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let state = self.record(Call::ReadAttribute(
            element.id().to_string(),
            selector.to_string(),
            name.to_string(),
        ))?;
        let s = &self.selectors;
        let cell = Self::cell_index(element.id())
            .and_then(|i| state.results.as_ref()?.get(i))
            .ok_or_else(|| DriverError::StaleElement(element.selector().to_string()))?;

        let missing = || DriverError::ElementNotFound(selector.to_string());
        if selector == s.cell_image {
            let url = cell.image.clone().ok_or_else(missing)?;
            Ok((name == s.cell_image_attribute).then_some(url))
        } else if selector == s.weight_select {
            let id = cell.select_id.clone().ok_or_else(missing)?;
            Ok((name == "id").then_some(id))
        } else {
            Err(missing())
        }
    }

    async fn click(&self, selector: &str, click_count: u32) -> Result<(), DriverError> {
        let mut state = self.record(Call::Click(selector.to_string(), click_count))?;
        if !self.control_present(&mut state, selector) {
            return Err(DriverError::ElementNotFound(selector.to_string()));
        }
        if selector == self.selectors.cart_nav {
            state.url = "https://shop.lowesfoods.com/checkout/cart".to_string();
        } else if selector == self.selectors.cart_empty_confirm {
            state.cart.clear();
        }
        Ok(())
    }

    async fn click_element(&self, element: &ElementHandle, click_count: u32) -> Result<(), DriverError> {
        let mut state = self.record(Call::ClickElement(element.id().to_string(), click_count))?;
        let stale = || DriverError::StaleElement(element.selector().to_string());
        let index = Self::cell_index(element.id()).ok_or_else(stale)?;
        let generation: u32 = element
            .id()
            .rsplit_once("/add:")
            .and_then(|(_, g)| g.parse().ok())
            .ok_or_else(stale)?;
        if state.add_generation.get(index) != Some(&generation) {
            return Err(stale());
        }
        state.add_generation[index] += 1;

        let title = state
            .results
            .as_ref()
            .and_then(|cells| cells.get(index))
            .and_then(|cell| cell.title.clone())
            .unwrap_or_default();
        Self::add_to_cart(&mut state, &title, click_count);
        Ok(())
    }

    async fn type_text(&self, selector: &str, text: &str) -> Result<(), DriverError> {
        let mut state = self.record(Call::TypeText(selector.to_string(), text.to_string()))?;
        if !self.control_present(&mut state, selector) {
            return Err(DriverError::ElementNotFound(selector.to_string()));
        }
        Ok(())
    }

    async fn clear_text(&self, selector: &str) -> Result<(), DriverError> {
        let mut state = self.record(Call::ClearText(selector.to_string()))?;
        if !self.control_present(&mut state, selector) {
            return Err(DriverError::ElementNotFound(selector.to_string()));
        }
        Ok(())
    }

    async fn select_option(&self, selector: &str, value: &str) -> Result<(), DriverError> {
        let mut state = self.record(Call::SelectOption(selector.to_string(), value.to_string()))?;
        let found = state.results.as_ref().and_then(|cells| {
            cells
                .iter()
                .find(|c| c.select_id.as_deref().map(|id| format!("#{}", id)).as_deref() == Some(selector))
                .cloned()
        });
        let cell = found.ok_or_else(|| DriverError::ElementNotFound(selector.to_string()))?;
        let quantity: u32 = value
            .strip_prefix("number:")
            .and_then(|q| q.parse().ok())
            .ok_or_else(|| DriverError::ElementNotFound(format!("option {} in {}", value, selector)))?;
        Self::add_to_cart(&mut state, &cell.title.unwrap_or_default(), quantity);
        Ok(())
    }

    async fn current_url(&self) -> Result<String, DriverError> {
        let state = self.record(Call::CurrentUrl)?;
        Ok(state.url.clone())
    }

    async fn pause(&self, duration: Duration) -> Result<(), DriverError> {
        self.record(Call::Pause(duration))?;
        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>, DriverError> {
        self.record(Call::Screenshot)?;
        Ok(vec![0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'])
    }
}
