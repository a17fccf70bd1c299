//! Parsing of the two menu prompts.
//!
//! Pure functions over a single input line, so the whole menu grammar is
//! testable without a terminal.

/// Answer to the region prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionInput {
    Exit,
    /// Lowercased region name, not yet checked against the directory.
    Name(String),
}

/// Answer to the site prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteInput {
    Exit,
    Back,
    /// Zero-based index into the listed sites.
    Select(usize),
}

/// Rejected site prompt answers. Display strings are shown verbatim after `[Error] `.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("You must choose a number or \"exit\" or \"back\"")]
    NotANumber,

    #[error("Choose a number within the list range")]
    OutOfRange,
}

pub fn parse_region_input(line: &str) -> RegionInput {
    let name = line.trim().to_lowercase();
    if name == "exit" { RegionInput::Exit } else { RegionInput::Name(name) }
}

/// Parse a site prompt answer against a list of `count` sites, numbered from 1.
pub fn parse_site_input(line: &str, count: usize) -> Result<SiteInput, InputError> {
    let answer = line.trim();

    match answer.to_lowercase().as_str() {
        "exit" => return Ok(SiteInput::Exit),
        "back" => return Ok(SiteInput::Back),
        _ => {}
    }

    if answer.is_empty() || !answer.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::NotANumber);
    }

    // All digits, so a parse failure can only be overflow.
    let number: usize = answer.parse().map_err(|_| InputError::OutOfRange)?;
    if number == 0 || number > count {
        return Err(InputError::OutOfRange);
    }

    Ok(SiteInput::Select(number - 1))
}

/// Python-style capitalize: first character uppercased, the rest lowercased.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
