//! Field validation rules for the invoice form.
//!
//! The [`Engine`] owns the read-only reference data and dispatches a
//! [`Field`] to its rule. Rules themselves live in [`rules`] and can be called
//! directly.
pub use error::{EngineError, Violation};
pub use field::{AddressLine, Field, ProductField};
pub use record::{CustomerRecord, ProductRecord};
pub use states::{EXPECTED_STATES, StateEntry, StateInfo, StateTable};
pub use util::{contains_invalid_char, is_all_digits, is_all_letters, is_word_char};

mod error;
mod field;
mod record;
pub mod rules;
mod states;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

/// Result of running one rule: valid, or the single reason it failed.
pub type Outcome = Result<(), Violation>;

#[derive(Debug)]
pub struct Engine {
    states: StateTable,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn states(&self) -> &StateTable {
        &self.states
    }

    /// Run the rule of `field` against the current form.
    ///
    /// A line item index past the end of `record.products` is checked as an
    /// empty item.
    pub fn evaluate(&self, field: Field, record: &CustomerRecord) -> Outcome {
        match field {
            Field::Name => rules::name(&record.name),
            Field::Gstin => rules::gstin(&record.gstin),
            Field::Gst => rules::gst(record.gst),
            Field::Email => rules::email(&record.email),
            Field::Phone => rules::phone(&record.phone),
            Field::Remark => rules::remark(&record.remark),
            Field::ShopNo => rules::shop_no(&record.shop_no),
            Field::Line(line) => {
                let value = match line {
                    AddressLine::First => &record.line1,
                    AddressLine::Second => &record.line2,
                    AddressLine::Third => &record.line3,
                };
                rules::address_line(line, value)
            }
            Field::City => rules::city(&record.city),
            Field::State => rules::state(&record.state, &self.states),
            Field::PostalCode => {
                rules::postal_code(record.postal_code, &record.state, &self.states)
            }
            Field::Product { index, field } => match record.products.get(index) {
                Some(product) => evaluate_product(field, product),
                None => evaluate_product(field, &ProductRecord::default()),
            },
        }
    }
}

fn evaluate_product(field: ProductField, product: &ProductRecord) -> Outcome {
    match field {
        ProductField::SerialNumber => rules::serial_number(&product.serial_number),
        ProductField::ProductName => rules::product_name(&product.product_name),
        ProductField::Hsn => rules::hsn(&product.hsn),
        ProductField::Quantity => rules::quantity(product.quantity),
        ProductField::SellPrice => rules::sell_price(product.sell_price),
        ProductField::Discount => rules::discount(product.discount),
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    states: Option<StateTable>,
}

impl EngineBuilder {
    /// Use a custom state table instead of the built-in one.
    pub fn states(mut self, states: StateTable) -> EngineBuilder {
        self.states = Some(states);
        self
    }

    /// Construct `Engine`.
    ///
    /// Fails when the built-in state table is inconsistent; callers should
    /// treat that as fatal.
    pub fn build(self) -> ResultEngine<Engine> {
        let states = match self.states {
            Some(states) => states,
            None => StateTable::load()?,
        };

        Ok(Engine { states })
    }
}
