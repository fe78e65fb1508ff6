//! In-progress invoice form.
//!
//! A [`CustomerRecord`] is whatever the browser has typed so far. Nothing here
//! is persisted; the server keeps one record per session and overwrites the
//! fields each request carries.

/// Customer half of the invoice form, plus its line items.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CustomerRecord {
    pub name: String,
    pub gstin: String,
    /// Tax rate in percent.
    pub gst: f64,
    pub email: String,
    pub phone: String,
    pub phone_ext: String,
    pub remark: String,
    pub shop_no: String,
    pub line1: String,
    pub line2: String,
    pub line3: String,
    pub city: String,
    pub state: String,
    pub postal_code: u32,
    pub products: Vec<ProductRecord>,
}

/// One invoice line item.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductRecord {
    pub quantity: i64,
    /// Unit sell price.
    pub sell_price: f64,
    /// Discount in percent.
    pub discount: f64,
    pub serial_number: String,
    pub product_name: String,
    /// HSN classification code, 2, 4, 6 or 8 digits.
    pub hsn: String,
}
