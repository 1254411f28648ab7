//! Turns the free-text answer of the generation service into a
//! [`GeneratedRecipe`].
//!
//! The answer is expected to follow the template in `prompt_template.txt`,
//! but nothing guarantees it does. Parsing is line driven: a header line
//! switches the current section and every other line is routed to the
//! buffer of that section. Missing sections fall back to placeholders, and
//! an internal fault yields [`fallback_recipe`] instead of an error.

use log::{debug, error, warn};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

use crate::model::{Difficulty, GeneratedRecipe};

/// Title used when the answer has no usable title line.
pub const DEFAULT_TITLE: &str = "美味しいレシピ";
/// Ingredients text used when the answer has no ingredients section.
pub const DEFAULT_INGREDIENTS: &str = "材料情報が取得できませんでした";
/// Instructions text used when the answer has no instructions section.
pub const DEFAULT_INSTRUCTIONS: &str = "作り方の情報が取得できませんでした";

const FALLBACK_TITLE: &str = "簡単な料理";
const FALLBACK_INGREDIENTS: &str = "適切な材料をご用意ください";
const FALLBACK_INSTRUCTIONS: &str = "基本的な調理手順に従ってください";
const FALLBACK_COOKING_TIME: u32 = 30;

const EASY_TOKEN: &str = "簡単";
const HARD_TOKEN: &str = "難しい";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Title,
    Ingredients,
    Instructions,
    CookingTime,
    Difficulty,
    Tips,
}

/// A bracketed label, with bare keywords as a looser fallback.
struct SectionMarker {
    section: Section,
    labels: &'static [&'static str],
    keywords: &'static [&'static str],
}

impl SectionMarker {
    fn matches(&self, line: &str) -> bool {
        self.labels.iter().any(|label| line.contains(label))
            || self.keywords.iter().any(|keyword| line.contains(keyword))
    }
}

// Checked in this order; the first match wins.
const MARKERS: [SectionMarker; 6] = [
    SectionMarker {
        section: Section::Title,
        labels: &["【レシピ名】"],
        keywords: &["レシピ名"],
    },
    SectionMarker {
        section: Section::Ingredients,
        labels: &["【材料】"],
        keywords: &["材料"],
    },
    SectionMarker {
        section: Section::Instructions,
        labels: &["【作り方】"],
        keywords: &["作り方"],
    },
    SectionMarker {
        section: Section::CookingTime,
        labels: &["【調理時間】"],
        keywords: &["調理時間"],
    },
    SectionMarker {
        section: Section::Difficulty,
        labels: &["【難易度】"],
        keywords: &["難易度"],
    },
    SectionMarker {
        section: Section::Tips,
        labels: &["【コツ・ポイント】", "【コツ】", "【ポイント】"],
        keywords: &["コツ", "ポイント"],
    },
];

fn match_header(line: &str) -> Option<Section> {
    MARKERS
        .iter()
        .find(|marker| marker.matches(line))
        .map(|marker| marker.section)
}

#[derive(Error, Debug)]
enum ParseFault {
    #[error("cooking time '{0}' is out of range")]
    CookingTimeOverflow(String),
}

/// First run of decimal digits, any script (`\d` is Unicode aware)
static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("Invalid digit run regex"));

static DECIMAL_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d$").expect("Invalid decimal digit regex"));

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

/// Value of a decimal digit matched by `\d`.
///
/// Decimal digits are encoded as contiguous 0-9 runs, so the distance to
/// the start of the run, modulo ten, is the value.
fn digit_value(c: char) -> u32 {
    let mut start = c as u32;
    while start > 0 && char::from_u32(start - 1).is_some_and(is_decimal_digit) {
        start -= 1;
    }
    (c as u32 - start) % 10
}

/// Parse the first run of decimal digits in `line`.
fn first_number(line: &str) -> Result<Option<u32>, ParseFault> {
    let Some(run) = DIGIT_RUN.find(line) else {
        return Ok(None);
    };

    let value = run
        .as_str()
        .chars()
        .map(digit_value)
        .try_fold(0u32, |acc, d| acc.checked_mul(10)?.checked_add(d));
    match value {
        Some(minutes) => Ok(Some(minutes)),
        None => Err(ParseFault::CookingTimeOverflow(run.as_str().to_string())),
    }
}

fn classify_difficulty(line: &str) -> Difficulty {
    if line.contains(EASY_TOKEN) {
        Difficulty::Easy
    } else if line.contains(HARD_TOKEN) {
        Difficulty::Hard
    } else {
        Difficulty::Medium
    }
}

#[derive(Debug, Default)]
struct ResponseParser<'a> {
    section: Option<Section>,
    headers_seen: usize,
    title: Option<&'a str>,
    ingredients: Vec<&'a str>,
    instructions: Vec<&'a str>,
    cooking_time: Option<u32>,
    difficulty: Difficulty,
    tips: Vec<&'a str>,
}

impl<'a> ResponseParser<'a> {
    fn feed(&mut self, line: &'a str) -> Result<(), ParseFault> {
        if let Some(section) = match_header(line) {
            self.section = Some(section);
            self.headers_seen += 1;
            return Ok(());
        }

        match self.section {
            None => {}
            Some(Section::Title) => {
                if self.title.is_none() {
                    self.title = Some(line);
                }
            }
            Some(Section::Ingredients) => self.ingredients.push(line),
            Some(Section::Instructions) => self.instructions.push(line),
            Some(Section::CookingTime) => {
                if let Some(minutes) = first_number(line)? {
                    self.cooking_time = Some(minutes);
                }
            }
            Some(Section::Difficulty) => self.difficulty = classify_difficulty(line),
            Some(Section::Tips) => self.tips.push(line),
        }
        Ok(())
    }

    fn finish(self) -> GeneratedRecipe {
        fn block(lines: &[&str], default: &str) -> String {
            let joined = lines.join("\n");
            let trimmed = joined.trim();
            if trimmed.is_empty() {
                default.to_string()
            } else {
                trimmed.to_string()
            }
        }

        GeneratedRecipe {
            title: self.title.unwrap_or(DEFAULT_TITLE).to_string(),
            ingredients: block(&self.ingredients, DEFAULT_INGREDIENTS),
            instructions: block(&self.instructions, DEFAULT_INSTRUCTIONS),
            cooking_time: self.cooking_time,
            difficulty: self.difficulty,
            tips: self.tips.join("\n").trim().to_string(),
        }
    }
}

fn try_parse(raw: &str) -> Result<GeneratedRecipe, ParseFault> {
    let mut parser = ResponseParser::default();
    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        parser.feed(line)?;
    }

    if parser.headers_seen == 0 {
        warn!("Generation response contained no recognizable section headers");
    }
    Ok(parser.finish())
}

/// The record returned when a response cannot be interpreted at all.
pub fn fallback_recipe() -> GeneratedRecipe {
    GeneratedRecipe {
        title: FALLBACK_TITLE.to_string(),
        ingredients: FALLBACK_INGREDIENTS.to_string(),
        instructions: FALLBACK_INSTRUCTIONS.to_string(),
        cooking_time: Some(FALLBACK_COOKING_TIME),
        difficulty: Difficulty::Medium,
        tips: String::new(),
    }
}

/// Parse a raw generation response. Never fails.
///
/// Rules worth knowing:
/// - only the first content line after the title header becomes the title
/// - cooking time is the first run of digits on a line; later lines win
/// - every difficulty line reclassifies; the last one wins
/// - a content line that happens to contain a header keyword switches
///   sections like a header would
pub fn parse_response(raw: &str) -> GeneratedRecipe {
    match try_parse(raw) {
        Ok(recipe) => {
            debug!("Parsed generated recipe: {:?}", recipe);
            recipe
        }
        Err(e) => {
            error!("Failed to parse generation response: {}", e);
            fallback_recipe()
        }
    }
}
