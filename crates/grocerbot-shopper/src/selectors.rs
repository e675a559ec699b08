//! Storefront page selectors.

/// CSS selectors for every storefront control the shopper touches.
///
/// Defaults target the Lowes Foods web shop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectors {
    // search
    pub search_input: String,
    pub search_button: String,
    pub results_container: String,
    pub product_cell: String,

    // inside a product cell
    pub cell_image: String,
    pub cell_image_attribute: String,
    pub cell_title: String,
    pub sale_price: String,
    pub price_amount: String,
    pub purchased_marker: String,
    pub add_button: String,
    pub weight_select: String,

    // cart
    pub cart_nav: String,
    pub cart_empty: String,
    pub cart_empty_confirm: String,

    // login
    pub loyalty_dismiss: String,
    pub store_selector_close: String,
    pub sign_in: String,
    pub login_email: String,
    pub login_password: String,
    pub login_submit: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            search_input: "#search-nav-input".into(),
            search_button: "#search-nav-search".into(),
            results_container: "ol.cell-container".into(),
            product_cell: ".cell.product-cell".into(),

            cell_image: "a.cell-image".into(),
            cell_image_attribute: "data-src".into(),
            cell_title: ".cell-title-text".into(),
            sale_price: ".price.sale".into(),
            price_amount: ".amount".into(),
            purchased_marker: ".purchased".into(),
            add_button: "button.full.cart.add".into(),
            weight_select: "select.ng-pristine.ng-valid".into(),

            cart_nav: "#nav-cart-main-checkout-cart".into(),
            cart_empty: "#checkout-cart-empty".into(),
            cart_empty_confirm: "#error-modal-ok-button".into(),

            loyalty_dismiss: "#loyalty-onboarding-dismiss".into(),
            store_selector_close: "#shopping-selector-parent-process-modal-close-click".into(),
            sign_in: "#nav-register".into(),
            login_email: "#login-email".into(),
            login_password: "#login-password".into(),
            login_submit: "#login-submit".into(),
        }
    }
}

impl Selectors {
    /// Selector for the weight dropdown with the given element id.
    pub fn weight_select_by_id(&self, id: &str) -> String {
        format!("#{}", id)
    }

    /// Option value the weight dropdown uses for a quantity.
    pub fn weight_option_value(&self, quantity: u32) -> String {
        format!("number:{}", quantity)
    }
}
