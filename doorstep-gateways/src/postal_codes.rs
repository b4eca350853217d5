use doorstep_core::gateways::postal::{PostalArea, PostalCodeLookup};

// PIN code, city, state
const SAMPLE_PIN_CODES: &[(&str, &str, &str)] = &[
    ("110001", "New Delhi", "Delhi"),
    ("122001", "Gurugram", "Haryana"),
    ("160017", "Chandigarh", "Chandigarh"),
    ("201301", "Noida", "Uttar Pradesh"),
    ("226001", "Lucknow", "Uttar Pradesh"),
    ("302001", "Jaipur", "Rajasthan"),
    ("380001", "Ahmedabad", "Gujarat"),
    ("400001", "Mumbai", "Maharashtra"),
    ("411001", "Pune", "Maharashtra"),
    ("452001", "Indore", "Madhya Pradesh"),
    ("500001", "Hyderabad", "Telangana"),
    ("560001", "Bengaluru", "Karnataka"),
    ("600001", "Chennai", "Tamil Nadu"),
    ("682001", "Kochi", "Kerala"),
    ("700001", "Kolkata", "West Bengal"),
    ("800001", "Patna", "Bihar"),
];

/// A small built-in table of Indian PIN codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SamplePostalCodes;

impl PostalCodeLookup for SamplePostalCodes {
    fn lookup(&self, postal_code: &str) -> Option<PostalArea> {
        let postal_code = postal_code.trim();
        SAMPLE_PIN_CODES
            .iter()
            .find(|(pin, _, _)| *pin == postal_code)
            .map(|(_, city, state)| PostalArea {
                city: (*city).to_owned(),
                state: (*state).to_owned(),
            })
    }
}
