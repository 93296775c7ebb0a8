//! Company-name normalization

/// Legal-entity suffixes stripped from the end of a name
pub const LEGAL_SUFFIXES: &[&str] = &[
    "CORP",
    "CORPORATION",
    "INC",
    "INCORPORATED",
    "LLC",
    "LTD",
    "LIMITED",
    "PLC",
    "CO",
    "COMPANY",
    "LLP",
    "GMBH",
    "AG",
    "SA",
    "NV",
    "BV",
    "TBK",
    "BHD",
    "SDN",
];

fn is_legal_suffix(token: &str) -> bool {
    let key: String = token.chars().filter(|c| *c != '.').collect();
    LEGAL_SUFFIXES.contains(&key.as_str())
}

/// Normalize a company name for matching
///
/// Trims, collapses whitespace, uppercases, then repeatedly strips trailing
/// legal suffixes. A name consisting of a single suffix token is kept as is.
///
/// # Examples
///
/// ```
/// use ecoforensics_resolver::normalize;
///
/// assert_eq!(normalize("Acme Corp Inc."), "ACME");
/// assert_eq!(normalize("  acme   holdings l.l.c. "), "ACME HOLDINGS");
/// assert_eq!(normalize("Inc"), "INC");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(name: &str) -> String {
    let mut tokens: Vec<String> = name.split_whitespace().map(str::to_uppercase).collect();

    loop {
        let Some(last) = tokens.last_mut() else {
            break;
        };

        let cleaned_len = last.trim_end_matches(['.', ',']).len();
        if cleaned_len != last.len() {
            last.truncate(cleaned_len);
        }
        if last.is_empty() {
            tokens.pop();
            continue;
        }

        if tokens.len() > 1 && is_legal_suffix(&tokens[tokens.len() - 1]) {
            tokens.pop();
            continue;
        }
        break;
    }

    tokens.join(" ")
}
