use crate::EngineError;

/// Which of the three free-form address lines is addressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressLine {
    First,
    Second,
    Third,
}

impl AddressLine {
    /// Only the first line must be filled in.
    pub const fn is_required(self) -> bool {
        matches!(self, AddressLine::First)
    }
}

/// Fields of a single line item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProductField {
    SerialNumber,
    ProductName,
    Hsn,
    Quantity,
    SellPrice,
    Discount,
}

impl ProductField {
    /// Name of the field as the browser sends it.
    pub const fn signal_name(self) -> &'static str {
        match self {
            ProductField::SerialNumber => "serialNumber",
            ProductField::ProductName => "productName",
            ProductField::Hsn => "hsn",
            ProductField::Quantity => "quantity",
            ProductField::SellPrice => "sellPrice",
            ProductField::Discount => "discount",
        }
    }

    pub const fn error_key(self) -> &'static str {
        match self {
            ProductField::SerialNumber => "serialNumberError",
            ProductField::ProductName => "productNameError",
            ProductField::Hsn => "hsnError",
            ProductField::Quantity => "quantityError",
            ProductField::SellPrice => "sellPriceError",
            ProductField::Discount => "discountError",
        }
    }
}

impl TryFrom<&str> for ProductField {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "serialNumber" => Ok(ProductField::SerialNumber),
            "productName" => Ok(ProductField::ProductName),
            "hsn" => Ok(ProductField::Hsn),
            "quantity" => Ok(ProductField::Quantity),
            "sellPrice" => Ok(ProductField::SellPrice),
            "discount" => Ok(ProductField::Discount),
            other => Err(EngineError::UnknownField(other.to_string())),
        }
    }
}

/// A validatable field of the invoice form.
///
/// Every variant maps to exactly one rule and one error signal. Line item
/// fields carry the position of the item they address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Gstin,
    Gst,
    Email,
    Phone,
    Remark,
    ShopNo,
    Line(AddressLine),
    City,
    State,
    PostalCode,
    Product { index: usize, field: ProductField },
}

impl Field {
    /// Name of the field as the browser sends it.
    pub const fn signal_name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Gstin => "gstin",
            Field::Gst => "gst",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::Remark => "remark",
            Field::ShopNo => "shopNo",
            Field::Line(AddressLine::First) => "line1",
            Field::Line(AddressLine::Second) => "line2",
            Field::Line(AddressLine::Third) => "line3",
            Field::City => "city",
            Field::State => "state",
            Field::PostalCode => "postalCode",
            Field::Product { field, .. } => field.signal_name(),
        }
    }

    /// Signal the client binds the field's error message to.
    pub const fn error_key(self) -> &'static str {
        match self {
            Field::Name => "nameError",
            Field::Gstin => "gstinError",
            Field::Gst => "gstError",
            Field::Email => "emailError",
            Field::Phone => "phoneError",
            Field::Remark => "remarkError",
            Field::ShopNo => "shopNoError",
            Field::Line(AddressLine::First) => "line1Error",
            Field::Line(AddressLine::Second) => "line2Error",
            Field::Line(AddressLine::Third) => "line3Error",
            Field::City => "cityError",
            Field::State => "stateError",
            Field::PostalCode => "postalCodeError",
            Field::Product { field, .. } => field.error_key(),
        }
    }

    /// Error keys reported alongside this field's own key. The address
    /// lines share one block on the form, so each line reports all three.
    pub const fn sibling_error_keys(self) -> &'static [&'static str] {
        match self {
            Field::Line(AddressLine::First) => &["line2Error", "line3Error"],
            Field::Line(AddressLine::Second) => &["line1Error", "line3Error"],
            Field::Line(AddressLine::Third) => &["line1Error", "line2Error"],
            _ => &[],
        }
    }
}

/// Parses the customer field names. Line item fields need an index and are
/// built from [`ProductField`] instead.
impl TryFrom<&str> for Field {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "name" => Ok(Field::Name),
            "gstin" => Ok(Field::Gstin),
            "gst" => Ok(Field::Gst),
            "email" => Ok(Field::Email),
            "phone" => Ok(Field::Phone),
            "remark" => Ok(Field::Remark),
            "shopNo" => Ok(Field::ShopNo),
            "line1" => Ok(Field::Line(AddressLine::First)),
            "line2" => Ok(Field::Line(AddressLine::Second)),
            "line3" => Ok(Field::Line(AddressLine::Third)),
            "city" => Ok(Field::City),
            "state" => Ok(Field::State),
            "postalCode" => Ok(Field::PostalCode),
            other => Err(EngineError::UnknownField(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_names_round_trip() {
        for name in [
            "name",
            "gstin",
            "gst",
            "email",
            "phone",
            "remark",
            "shopNo",
            "line1",
            "line2",
            "line3",
            "city",
            "state",
            "postalCode",
        ] {
            let field = Field::try_from(name).unwrap();
            assert_eq!(field.signal_name(), name);
            assert_eq!(field.error_key(), format!("{name}Error"));
        }
    }

    #[test]
    fn address_lines_report_every_line_key() {
        for line in [AddressLine::First, AddressLine::Second, AddressLine::Third] {
            let field = Field::Line(line);
            let mut keys = vec![field.error_key()];
            keys.extend(field.sibling_error_keys());
            keys.sort_unstable();
            assert_eq!(keys, ["line1Error", "line2Error", "line3Error"]);
        }
        assert!(Field::City.sibling_error_keys().is_empty());
    }

    #[test]
    fn line_items_need_product_path() {
        assert_eq!(
            Field::try_from("hsn"),
            Err(EngineError::UnknownField("hsn".to_string()))
        );
        let field = Field::Product {
            index: 2,
            field: ProductField::try_from("sellPrice").unwrap(),
        };
        assert_eq!(field.error_key(), "sellPriceError");
    }

    #[test]
    fn only_first_line_is_required() {
        assert!(AddressLine::First.is_required());
        assert!(!AddressLine::Second.is_required());
        assert!(!AddressLine::Third.is_required());
    }
}
