//! Counterparty naming for trade rows whose source feed carries no company.

/// `(hs prefix, country, candidates)`. Prefixes are digit-only and matched
/// longest-first against the record's HS code.
const COUNTERPARTY_TABLE: &[(&str, &str, &[&str])] = &[
    (
        "8471",
        "china",
        &["Lenovo Group", "Inspur Electronic Information", "Quanta Computer Shanghai"],
    ),
    (
        "8471",
        "taiwan",
        &["Quanta Computer", "Wistron Corporation", "Compal Electronics"],
    ),
    (
        "8517",
        "china",
        &["Huawei Technologies", "ZTE Corporation", "Xiaomi Communications"],
    ),
    ("8517", "korea, south", &["Samsung Electronics", "LG Electronics"]),
    (
        "8542",
        "taiwan",
        &["Taiwan Semiconductor Manufacturing", "United Microelectronics", "MediaTek"],
    ),
    ("8542", "korea, south", &["Samsung Electronics", "SK Hynix"]),
    (
        "8528",
        "japan",
        &["Sony Corporation", "Panasonic Corporation", "Sharp Corporation"],
    ),
    (
        "3004",
        "india",
        &["Sun Pharmaceutical Industries", "Dr. Reddy's Laboratories", "Cipla"],
    ),
    ("3004", "ireland", &["Pfizer Ireland Pharmaceuticals", "Janssen Sciences Ireland"]),
    (
        "6110",
        "vietnam",
        &["Hansae Vietnam", "Youngone Nam Dinh", "Pou Chen Vietnam"],
    ),
    (
        "87",
        "germany",
        &["Robert Bosch", "Continental AG", "ZF Friedrichshafen"],
    ),
    ("85", "mexico", &["Foxconn Mexico", "Jabil Chihuahua", "Flex Guadalajara"]),
];

/// Deterministic display name for the counterparty of an `(hs_code, country)` pair.
///
/// The same pair always yields the same name, so ingestion re-runs are idempotent.
pub fn normalize_company_name(hs_code: &str, country: &str) -> String {
    let digits: String = hs_code.chars().filter(|c| c.is_ascii_digit()).collect();
    let country_key = country.trim().to_lowercase();

    let entry = COUNTERPARTY_TABLE
        .iter()
        .filter(|(prefix, table_country, _)| {
            *table_country == country_key && digits.starts_with(prefix)
        })
        .max_by_key(|(prefix, _, _)| prefix.len());

    match entry {
        Some((_, _, candidates)) if !candidates.is_empty() => {
            let index = numeric_suffix_mod(hs_code, candidates.len());
            candidates[index].to_string()
        }
        _ => {
            let country = country.trim();
            if country.is_empty() {
                "Unknown Trading Company".to_string()
            } else {
                format!("{country} Trading Company")
            }
        }
    }
}

/// Trailing run of ASCII digits in `code`, reduced modulo `modulus` one digit at a
/// time so long codes never overflow. No trailing digits means zero.
fn numeric_suffix_mod(code: &str, modulus: usize) -> usize {
    let trimmed = code.trim();
    let start = trimmed
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    trimmed[start..].bytes().fold(0usize, |acc, b| {
        (acc * 10 + usize::from(b - b'0')) % modulus
    })
}

/// Display form of a reported company name: trimmed, inner whitespace collapsed.
pub fn display_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
