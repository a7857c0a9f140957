//! Best-effort parsing of free-text ingredient lines.
//!
//! Lines like `"1 1/2 cups flour"` become `count: 1.5, unit: "cup",
//! ingredient: "flour"`. Anything the parser can't make sense of comes back
//! as the whole line with no count, so callers always get something to show.

use log::debug;
use thiserror::Error;

use crate::model::ParsedIngredient;

/// Recognized unit spellings and the canonical unit each maps onto.
const UNITS: &[(&str, &str)] = &[
    ("tablespoons", "tbsp"),
    ("tablespoon", "tbsp"),
    ("tbsps", "tbsp"),
    ("tbsp", "tbsp"),
    ("tbs", "tbsp"),
    ("teaspoons", "tsp"),
    ("teaspoon", "tsp"),
    ("tsps", "tsp"),
    ("tsp", "tsp"),
    ("ounces", "oz"),
    ("ounce", "oz"),
    ("oz", "oz"),
    ("cups", "cup"),
    ("cup", "cup"),
    ("pounds", "pound"),
    ("pound", "pound"),
    ("lbs", "pound"),
    ("lb", "pound"),
    ("kilograms", "kg"),
    ("kilogram", "kg"),
    ("kg", "kg"),
    ("grams", "g"),
    ("gram", "g"),
    ("g", "g"),
    ("millilitres", "ml"),
    ("milliliters", "ml"),
    ("ml", "ml"),
    ("litres", "l"),
    ("liters", "l"),
    ("litre", "l"),
    ("liter", "l"),
    ("l", "l"),
];

const VULGAR_FRACTIONS: &[(char, f64)] = &[
    ('½', 1.0 / 2.0),
    ('⅓', 1.0 / 3.0),
    ('⅔', 2.0 / 3.0),
    ('¼', 1.0 / 4.0),
    ('¾', 3.0 / 4.0),
    ('⅛', 1.0 / 8.0),
    ('⅜', 3.0 / 8.0),
    ('⅝', 5.0 / 8.0),
    ('⅞', 7.0 / 8.0),
];

/// A line that could only be kept as raw text.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("could not fully parse ingredient line {line:?}")]
pub struct ParseDegraded {
    pub line: String,
    /// The whole line as an ingredient, without count or unit
    pub fallback: ParsedIngredient,
}

impl ParseDegraded {
    fn new(line: &str) -> Self {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        ParseDegraded {
            line: line.to_string(),
            fallback: ParsedIngredient {
                count: None,
                unit: String::new(),
                ingredient: normalize_name(&tokens),
            },
        }
    }
}

enum Quantity {
    Value(f64),
    /// Number glued to a unit, e.g. `200g`
    WithUnit(f64, &'static str),
    /// Looks numeric but can't be read reliably, e.g. a range like `2-3`
    Ambiguous,
    NotNumeric,
}

/// Parse an ingredient line, falling back to the raw text when it is ambiguous.
pub fn parse(raw: &str) -> ParsedIngredient {
    match try_parse(raw) {
        Ok(parsed) => parsed,
        Err(degraded) => {
            debug!("{}", degraded);
            degraded.fallback
        }
    }
}

/// Parse an ingredient line, reporting lines that had to fall back to raw text.
pub fn try_parse(raw: &str) -> Result<ParsedIngredient, ParseDegraded> {
    let cleaned = strip_parentheses(raw);
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    let mut count: Option<f64> = None;
    let mut unit: Option<&'static str> = None;
    let mut idx = 0;

    while let Some(token) = tokens.get(idx) {
        match parse_quantity(token) {
            Quantity::Value(value) => {
                count = Some(count.unwrap_or(0.0) + value);
                idx += 1;
            }
            Quantity::WithUnit(value, glued) => {
                count = Some(count.unwrap_or(0.0) + value);
                unit = Some(glued);
                idx += 1;
                break;
            }
            Quantity::Ambiguous => return Err(ParseDegraded::new(raw)),
            Quantity::NotNumeric => break,
        }
    }

    if unit.is_none() {
        if let Some(found) = tokens.get(idx).and_then(|token| canonical_unit(token)) {
            unit = Some(found);
            idx += 1;
        }
    }

    Ok(ParsedIngredient {
        count,
        unit: unit.unwrap_or_default().to_string(),
        ingredient: normalize_name(&tokens[idx..]),
    })
}

/// Map a unit spelling onto its canonical form.
pub fn canonical_unit(token: &str) -> Option<&'static str> {
    let token = token.trim_end_matches(['.', ',']).to_lowercase();
    UNITS
        .iter()
        .find(|(spelling, _)| *spelling == token)
        .map(|(_, canonical)| *canonical)
}

fn parse_quantity(token: &str) -> Quantity {
    let first = match token.chars().next() {
        Some(c) => c,
        None => return Quantity::NotNumeric,
    };
    if !first.is_ascii_digit() && first != '.' && vulgar_value(first).is_none() {
        return Quantity::NotNumeric;
    }

    // 1-1/2 is a mixed number, 2-3 is a range
    if let Some((whole, fraction)) = token.split_once(['-', '–']) {
        return match (parse_decimal(whole), parse_fraction(fraction)) {
            (Some(whole), Some(Some(fraction))) => Quantity::Value(whole + fraction),
            _ => Quantity::Ambiguous,
        };
    }

    if let Some(fraction) = parse_fraction(token) {
        return fraction.map_or(Quantity::Ambiguous, Quantity::Value);
    }

    if let Some(value) = parse_decimal(token) {
        return Quantity::Value(value);
    }

    // 1½
    let split = token
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit() && *c != '.')
        .map(|(i, _)| i)
        .unwrap_or(token.len());
    let (number, rest) = token.split_at(split);
    let leading = if number.is_empty() {
        Some(0.0)
    } else {
        parse_decimal(number)
    };

    let mut rest_chars = rest.chars();
    if let (Some(leading), Some(glyph)) = (leading, rest_chars.next()) {
        if let Some(value) = vulgar_value(glyph) {
            return if rest_chars.as_str().is_empty() {
                Quantity::Value(leading + value)
            } else {
                Quantity::Ambiguous
            };
        }
    }

    // 200g
    match (parse_decimal(number), canonical_unit(rest)) {
        (Some(value), Some(unit)) => Quantity::WithUnit(value, unit),
        _ => Quantity::Ambiguous,
    }
}

/// `Some(None)` means the token is shaped like a fraction but unusable.
fn parse_fraction(token: &str) -> Option<Option<f64>> {
    let (numerator, denominator) = token.split_once('/')?;
    let numerator = parse_decimal(numerator);
    let denominator = parse_decimal(denominator);
    Some(match (numerator, denominator) {
        (Some(n), Some(d)) if d > 0.0 => Some(n / d),
        _ => None,
    })
}

fn parse_decimal(token: &str) -> Option<f64> {
    let digits = token.chars().filter(|c| c.is_ascii_digit()).count();
    let dots = token.chars().filter(|c| *c == '.').count();
    if digits == 0 || dots > 1 || digits + dots != token.chars().count() {
        return None;
    }
    token.parse().ok()
}

fn vulgar_value(c: char) -> Option<f64> {
    VULGAR_FRACTIONS
        .iter()
        .find(|(glyph, _)| *glyph == c)
        .map(|(_, value)| *value)
}

fn strip_parentheses(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for c in raw.chars() {
        match c {
            '(' => {
                depth += 1;
                out.push(' ');
            }
            ')' => depth = depth.saturating_sub(1),
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Lower-case the ingredient name, keeping likely proper nouns and acronyms.
fn normalize_name(words: &[&str]) -> String {
    let mut seen_word = false;
    words
        .iter()
        .map(|word| {
            let keep = is_acronym(word) || (seen_word && is_capitalized(word));
            if word.starts_with(char::is_alphabetic) {
                seen_word = true;
            }
            if keep {
                word.to_string()
            } else {
                word.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_capitalized(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(chars.next(), Some(c) if c.is_uppercase()) && chars.any(|c| c.is_lowercase())
}

fn is_acronym(word: &str) -> bool {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    letters.len() >= 2 && letters.iter().all(|c| c.is_uppercase())
}
