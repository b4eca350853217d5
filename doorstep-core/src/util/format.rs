//! Canonical formatting of addresses.
//!
//! Manually entered addresses are rendered as
//! `address line, city, state - postal code[, Near landmark]`.
//! Provider output is normalized into comma separated components.

use crate::entities::StructuredAddress;
use itertools::Itertools;

const COMPONENT_SEP: &str = ", ";
const POSTAL_CODE_SEP: &str = " - ";
const LANDMARK_SEP: &str = ", Near ";

/// Renders a manually entered address.
///
/// Blank fields are left out together with their separators.
pub fn format_manual_entry(addr: &StructuredAddress) -> String {
    let StructuredAddress {
        address_line,
        city,
        state,
        postal_code,
        landmark,
    } = addr;
    let head = join_components([
        Some(address_line.as_str()),
        Some(city.as_str()),
        Some(state.as_str()),
    ]);
    let postal_code = Some(postal_code.trim()).filter(|p| !p.is_empty());
    let mut formatted = match (head, postal_code) {
        (Some(head), Some(postal_code)) => format!("{head}{POSTAL_CODE_SEP}{postal_code}"),
        (Some(head), None) => head,
        (None, Some(postal_code)) => postal_code.to_owned(),
        (None, None) => String::new(),
    };
    if let Some(landmark) = landmark.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        if formatted.is_empty() {
            formatted.push_str(LANDMARK_SEP.trim_start_matches(COMPONENT_SEP));
        } else {
            formatted.push_str(LANDMARK_SEP);
        }
        formatted.push_str(landmark);
    }
    formatted
}

/// Recovers the structured fields from a string that has been
/// produced by [`format_manual_entry`].
pub fn parse_formatted(formatted: &str) -> Option<StructuredAddress> {
    let formatted = formatted.trim();
    let (head, landmark) = match formatted.rsplit_once(LANDMARK_SEP) {
        Some((head, landmark)) if head.contains(POSTAL_CODE_SEP) => {
            (head, Some(landmark.trim().to_owned()))
        }
        _ => (formatted, None),
    };
    let (head, postal_code) = head.rsplit_once(POSTAL_CODE_SEP)?;
    let mut parts = head.rsplitn(3, COMPONENT_SEP);
    let state = parts.next()?;
    let city = parts.next()?;
    let address_line = parts.next()?;
    Some(StructuredAddress {
        address_line: address_line.trim().to_owned(),
        city: city.trim().to_owned(),
        state: state.trim().to_owned(),
        postal_code: postal_code.trim().to_owned(),
        landmark: landmark.filter(|l| !l.is_empty()),
    })
}

/// Joins the non-empty components of a provider response.
pub fn join_components<'a, I>(parts: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let joined = parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .join(COMPONENT_SEP);
    (!joined.is_empty()).then_some(joined)
}

/// Cleans up a formatted address returned by any provider.
pub fn normalize_formatted(formatted: &str) -> Option<String> {
    let joined = formatted
        .split(',')
        .map(|c| c.split_whitespace().join(" "))
        .filter(|c| !c.is_empty())
        .join(COMPONENT_SEP);
    (!joined.is_empty()).then_some(joined)
}
