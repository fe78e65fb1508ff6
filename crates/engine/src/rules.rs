//! One rule per form field.
//!
//! Every rule takes the raw value, trims it and runs its checks in a fixed
//! order: required-ness, length, character class, structure, numeric range.
//! The first failing check is returned. Rules are pure and never panic.
use crate::{
    AddressLine, Outcome, StateTable, Violation,
    util::{char_len, contains_invalid_char, is_all_digits, is_all_letters},
};

/// PAN holder-type codes allowed at position 3.
const PAN_HOLDER_TYPES: [char; 9] = ['P', 'C', 'F', 'H', 'A', 'T', 'G', 'L', 'J'];

const GST_MAX: u8 = 40;
const DISCOUNT_MAX: u8 = 100;
const EMAIL_MAX: usize = 254;
const EMAIL_LOCAL_MAX: usize = 64;

fn required(value: &str) -> Outcome {
    if value.is_empty() {
        return Err(Violation::Required);
    }
    Ok(())
}

fn length(value: &str, min: usize, max: usize) -> Outcome {
    let len = char_len(value);
    if len < min {
        return Err(Violation::TooShort);
    }
    if len > max {
        return Err(Violation::TooLong);
    }
    Ok(())
}

/// Length bounds followed by the word-character check.
fn free_text(value: &str, min: usize, max: usize) -> Outcome {
    length(value, min, max)?;
    if contains_invalid_char(value) {
        return Err(Violation::InvalidCharacters);
    }
    Ok(())
}

fn percent(value: f64, max: u8) -> Outcome {
    if !(0.0..=f64::from(max)).contains(&value) {
        return Err(Violation::PercentRange { max });
    }
    Ok(())
}

pub fn name(value: &str) -> Outcome {
    let value = value.trim();
    required(value)?;
    free_text(value, 3, 100)
}

/// GSTIN: 2-digit state code, embedded PAN, entity code, literal `Z` and a
/// checksum character.
pub fn gstin(value: &str) -> Outcome {
    let value = value.trim().to_uppercase();
    required(&value)?;

    let chars: Vec<char> = value.chars().collect();
    if chars.len() != 15 {
        return Err(Violation::GstinLength);
    }
    // Lenient: a single digit in the state code is enough.
    if !chars[0].is_ascii_digit() && !chars[1].is_ascii_digit() {
        return Err(Violation::GstinStateCode);
    }

    let embedded: String = chars[2..12].iter().collect();
    pan(&embedded)?;

    if !chars[12].is_ascii_digit() && !chars[12].is_ascii_uppercase() {
        return Err(Violation::GstinEntityCode);
    }
    if chars[13] != 'Z' {
        return Err(Violation::GstinFormat);
    }
    if !chars[14].is_ascii_digit() && !chars[14].is_alphabetic() {
        return Err(Violation::GstinChecksum);
    }
    Ok(())
}

/// PAN: five letters (the fourth a holder type), four digits other than
/// `0000`, one letter.
pub fn pan(value: &str) -> Outcome {
    let value = value.trim().to_uppercase();
    required(&value)?;

    let chars: Vec<char> = value.chars().collect();
    if chars.len() != 10 {
        return Err(Violation::PanLength);
    }
    if !chars[..5].iter().all(|c| c.is_alphabetic()) {
        return Err(Violation::PanLetters);
    }
    if !PAN_HOLDER_TYPES.contains(&chars[3]) {
        return Err(Violation::PanHolderType);
    }
    let serial = &chars[5..9];
    if !serial.iter().all(char::is_ascii_digit) {
        return Err(Violation::PanDigits);
    }
    if serial.iter().all(|c| *c == '0') {
        return Err(Violation::PanSerial);
    }
    if !chars[9].is_alphabetic() {
        return Err(Violation::PanCheckLetter);
    }
    Ok(())
}

/// Tax rate in percent, 0 to 40 inclusive.
pub fn gst(value: f64) -> Outcome {
    percent(value, GST_MAX)
}

/// Optional; when present must look like `local@domain.tld`.
pub fn email(value: &str) -> Outcome {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    if char_len(value) > EMAIL_MAX {
        return Err(Violation::TooLong);
    }

    let Some((local, domain)) = value.split_once('@') else {
        return Err(Violation::InvalidEmail);
    };
    let local_ok = !local.is_empty()
        && local.len() <= EMAIL_LOCAL_MAX
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    if !local_ok || !is_email_domain(domain) {
        return Err(Violation::InvalidEmail);
    }
    Ok(())
}

fn is_email_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));
    labels_ok && tld_ok
}

/// Ten-digit mobile number starting with 6, 7, 8 or 9.
pub fn phone(value: &str) -> Outcome {
    let value = value.trim();
    required(value)?;
    if !is_all_digits(value) {
        return Err(Violation::NotDigits);
    }
    if value.len() != 10 {
        return Err(Violation::PhoneLength);
    }
    if !value.starts_with(['6', '7', '8', '9']) {
        return Err(Violation::PhonePrefix);
    }
    Ok(())
}

pub fn remark(value: &str) -> Outcome {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }
    free_text(value, 3, 100)
}

pub fn shop_no(value: &str) -> Outcome {
    let value = value.trim();
    required(value)?;
    free_text(value, 3, 8)
}

/// Shared by the three address lines; only [`AddressLine::First`] is required.
pub fn address_line(line: AddressLine, value: &str) -> Outcome {
    let value = value.trim();
    if value.is_empty() {
        return if line.is_required() {
            Err(Violation::Required)
        } else {
            Ok(())
        };
    }
    free_text(value, 3, 100)
}

/// Letters only; words may be separated by single spaces.
pub fn city(value: &str) -> Outcome {
    let value = value.trim();
    required(value)?;
    length(value, 3, 32)?;
    if !value
        .split(' ')
        .all(|word| !word.is_empty() && is_all_letters(word))
    {
        return Err(Violation::NotLetters);
    }
    Ok(())
}

pub fn state(value: &str, states: &StateTable) -> Outcome {
    let value = value.trim();
    required(value)?;
    if states.get(value).is_none() {
        return Err(Violation::UnknownState);
    }
    Ok(())
}

/// Postal code must fall in the selected state's range. With no known state
/// every code is rejected and the range is reported as `[0 - 0]`.
pub fn postal_code(code: u32, state: &str, states: &StateTable) -> Outcome {
    let Some(info) = states.get(state) else {
        return Err(Violation::PostalCodeRange { min: 0, max: 0 });
    };
    if !info.accepts(code) {
        return Err(Violation::PostalCodeRange {
            min: info.min_code,
            max: info.max_code,
        });
    }
    Ok(())
}

pub fn serial_number(value: &str) -> Outcome {
    let value = value.trim();
    required(value)?;
    free_text(value, 1, 20)
}

pub fn product_name(value: &str) -> Outcome {
    let value = value.trim();
    required(value)?;
    free_text(value, 3, 100)
}

/// HSN commodity code: 2, 4, 6 or 8 digits.
pub fn hsn(value: &str) -> Outcome {
    let value = value.trim();
    required(value)?;
    if !is_all_digits(value) {
        return Err(Violation::NotDigits);
    }
    if !matches!(value.len(), 2 | 4 | 6 | 8) {
        return Err(Violation::HsnLength);
    }
    Ok(())
}

pub fn quantity(value: i64) -> Outcome {
    if value <= 0 {
        return Err(Violation::NotPositive);
    }
    Ok(())
}

pub fn sell_price(value: f64) -> Outcome {
    // NaN fails as well.
    if !(value > 0.0) {
        return Err(Violation::NotPositive);
    }
    Ok(())
}

pub fn discount(value: f64) -> Outcome {
    percent(value, DISCOUNT_MAX)
}
