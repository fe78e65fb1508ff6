//! Merge decoded signals into the stored form.

use api_types::form::{CustomerSignals, ProductSignals};
use engine::{CustomerRecord, ProductRecord};

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn map_product(signals: ProductSignals) -> ProductRecord {
    ProductRecord {
        quantity: signals.quantity.unwrap_or_default(),
        sell_price: signals.sell_price.unwrap_or_default(),
        discount: signals.discount.unwrap_or_default(),
        serial_number: signals.serial_number.unwrap_or_default(),
        product_name: signals.product_name.unwrap_or_default(),
        hsn: signals.hsn.unwrap_or_default(),
    }
}

/// Overwrite every field of `record` that `signals` carries.
pub(crate) fn apply(record: &mut CustomerRecord, signals: CustomerSignals) {
    set(&mut record.name, signals.name);
    set(&mut record.gstin, signals.gstin);
    set(&mut record.gst, signals.gst);
    set(&mut record.email, signals.email);
    set(&mut record.phone, signals.phone);
    set(&mut record.phone_ext, signals.phone_ext);
    set(&mut record.remark, signals.remark);
    set(&mut record.shop_no, signals.shop_no);
    set(&mut record.line1, signals.line1);
    set(&mut record.line2, signals.line2);
    set(&mut record.line3, signals.line3);
    set(&mut record.city, signals.city);
    set(&mut record.state, signals.state);
    set(&mut record.postal_code, signals.postal_code);
    if let Some(products) = signals.products {
        record.products = products.into_iter().map(map_product).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_are_kept() {
        let mut record = CustomerRecord {
            name: "Acme".to_string(),
            city: "Kolkata".to_string(),
            ..Default::default()
        };
        apply(
            &mut record,
            CustomerSignals {
                city: Some("Howrah".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(record.name, "Acme");
        assert_eq!(record.city, "Howrah");
    }

    #[test]
    fn products_replace_the_whole_list() {
        let mut record = CustomerRecord {
            products: vec![ProductRecord::default(), ProductRecord::default()],
            ..Default::default()
        };
        apply(
            &mut record,
            CustomerSignals {
                products: Some(vec![ProductSignals {
                    hsn: Some("7214".to_string()),
                    ..Default::default()
                }]),
                ..Default::default()
            },
        );
        assert_eq!(record.products.len(), 1);
        assert_eq!(record.products[0].hsn, "7214");
        assert_eq!(record.products[0].quantity, 0);
    }
}
