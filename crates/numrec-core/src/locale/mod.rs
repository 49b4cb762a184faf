//! Locale pattern providers.
//!
//! A locale is pure data: a [`LocaleDefinition`] lists ordered `(pattern, tag)` tables,
//! word-to-value dictionaries and a handful of auxiliary patterns. [`LocaleProvider::compile`]
//! turns it into the immutable tables the extractors and the parser borrow. Compiled
//! providers for the built-in cultures are created at most once per process.

pub mod chinese;
pub mod english;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::LocaleError;
use crate::extraction::pattern::{AmbiguityFilter, TaggedPattern};
use crate::models::{ExtractKind, RelativeTo, Tag};

/// Compiled size limit for a single pattern.
const PATTERN_SIZE_LIMIT: usize = 16 * (1 << 20);

lazy_static! {
    static ref ENGLISH: LocaleProvider = LocaleProvider::compile(english::definition());
    static ref CHINESE: LocaleProvider = LocaleProvider::compile(chinese::definition());
}

/// Supported cultures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Culture {
    English,
    Chinese,
}

impl Culture {
    pub const ALL: [Culture; 2] = [Culture::English, Culture::Chinese];

    /// Canonical culture code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en-us",
            Self::Chinese => "zh-cn",
        }
    }
}

impl fmt::Display for Culture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Culture {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::English),
            "zh" | "zh-cn" | "zh-hans" | "chinese" => Ok(Self::Chinese),
            _ => Err(LocaleError::UnknownCulture(s.to_string())),
        }
    }
}

/// Compiled provider for a built-in culture.
pub fn provider(culture: Culture) -> &'static LocaleProvider {
    match culture {
        Culture::English => &ENGLISH,
        Culture::Chinese => &CHINESE,
    }
}

/// Compiled provider for a culture identifier such as `"en-us"`.
pub fn provider_for(id: &str) -> Result<&'static LocaleProvider, LocaleError> {
    Ok(provider(id.parse()?))
}

/// Value-computation strategy selected by a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Digit notation with optional multiplier suffix ("1,234.5", "1.5k", "3万").
    Digit,
    /// Exponential or power notation ("1.5e10", "2^10").
    Power,
    /// Spelled-out cardinals ("nine hundred thousand", "twenty point five").
    Words,
    /// Spelled-out ordinals ("ninety-ninth").
    WordOrdinal,
    /// Digit ordinals ("22nd").
    DigitOrdinal,
    /// Relative ordinals ("the next one").
    RelativeOrdinal,
    /// Fractions in digits or words ("3/4", "two and a half").
    Fraction,
    /// Merge group of magnitudes.
    Compound,
    /// Percentage over nested numbers or digit text.
    Percent,
    /// Free-standing percentage phrase looked up in the word tables ("half a percent").
    PercentIdiom,
    /// Merge group of numbers and currency units.
    Currency,
    /// Interval with the given shape.
    Range(RangeShape),
    CjkInteger,
    CjkDouble,
    CjkFraction,
    CjkOrdinal,
    CjkPercent,
    CjkSpecialPercent,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Digit => "digit",
            Self::Power => "power",
            Self::Words => "words",
            Self::WordOrdinal => "word-ordinal",
            Self::DigitOrdinal => "digit-ordinal",
            Self::RelativeOrdinal => "relative-ordinal",
            Self::Fraction => "fraction",
            Self::Compound => "compound",
            Self::Percent => "percent",
            Self::PercentIdiom => "percent-idiom",
            Self::Currency => "currency",
            Self::Range(_) => "range",
            Self::CjkInteger => "cjk-integer",
            Self::CjkDouble => "cjk-double",
            Self::CjkFraction => "cjk-fraction",
            Self::CjkOrdinal => "cjk-ordinal",
            Self::CjkPercent => "cjk-percent",
            Self::CjkSpecialPercent => "cjk-special-percent",
        }
    }
}

/// Shape of the interval a range tag resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeShape {
    /// `[a,b]`
    Between,
    /// `[a,b)`
    Till,
    /// `(a,)`
    More,
    /// `(,a)`
    Less,
    /// `[a,)`
    MoreOrEqual,
    /// `(,a]`
    LessOrEqual,
    /// `[a,a]`
    Equal,
    /// `(a,b)`
    MoreAndLess,
    /// `[a,b]` from explicit bounds
    AtLeastAndAtMost,
}

/// Merge behaviour of a tag inside the compound merge extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeClass {
    Digit,
    Word,
    Round,
    Unit,
    PrefixUnit,
    None,
}

impl MergeClass {
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Digit | Self::Word | Self::Round)
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit | Self::PrefixUnit)
    }
}

/// How percentages are found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PercentageStyle {
    /// Numbers are replaced by placeholders before matching.
    Placeholder,
    /// Percentage patterns run over the raw text.
    Direct,
}

/// Raw pattern table entry.
#[derive(Debug, Clone)]
pub struct PatternSpec {
    pub pattern: String,
    pub tag: &'static str,
    pub priority: u8,
    pub kind: ExtractKind,
}

impl PatternSpec {
    pub fn new(pattern: impl Into<String>, tag: &'static str, kind: ExtractKind) -> Self {
        Self {
            pattern: pattern.into(),
            tag,
            priority: 0,
            kind,
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }
}

/// Currency unit entry.
#[derive(Debug, Clone)]
pub struct CurrencyUnitSpec {
    /// Surface forms, matched case-insensitively.
    pub names: &'static [&'static str],
    /// ISO code of the currency family.
    pub iso: &'static str,
    /// Value of one unit in the family's main unit ("0.01" for cents).
    pub ratio: &'static str,
    /// Written before the number ("$5").
    pub prefix: bool,
}

/// Spelled-out number dictionaries.
#[derive(Debug, Clone, Default)]
pub struct WordDefinition {
    pub cardinals: &'static [(&'static str, u64)],
    pub ordinals: &'static [(&'static str, u64)],
    pub round_numbers: &'static [(&'static str, u64)],
    /// Fraction denominators beyond the ordinal forms ("half", "quarters").
    pub denominators: &'static [(&'static str, u64)],
    /// Words splitting the integer and fractional part ("and").
    pub fraction_separators: &'static [&'static str],
    /// Words ignored inside cardinals ("and").
    pub fillers: &'static [&'static str],
    /// Decimal point words ("point").
    pub point_words: &'static [&'static str],
    pub relative_ordinals: &'static [(&'static str, i64, RelativeTo)],
    /// Percentage phrases without a number and their percent value.
    pub percent_idioms: &'static [(&'static str, &'static str)],
}

/// Logographic numeral tables.
#[derive(Debug, Clone)]
pub struct CjkDefinition {
    pub digits: &'static [(char, u32)],
    pub round_chars: &'static [(char, u64)],
    pub dozen_chars: &'static [char],
    pub pair_chars: &'static [char],
    pub point_chars: &'static [char],
    pub fraction_marker: &'static str,
    pub mixed_marker: char,
    pub percent_prefixes: &'static [&'static str],
    pub ordinal_prefix: char,
    pub discount_char: char,
    pub tenth_char: char,
    pub half_char: char,
}

/// Complete data for one culture.
#[derive(Debug, Clone)]
pub struct LocaleDefinition {
    pub culture: Culture,
    pub numbers: Vec<PatternSpec>,
    pub ordinals: Vec<PatternSpec>,
    pub percentages: Vec<PatternSpec>,
    pub percentage_style: PercentageStyle,
    pub ranges: Vec<PatternSpec>,
    pub currency_units: Vec<CurrencyUnitSpec>,
    /// Applied to the text before a span; capture group 1 is the sign to absorb.
    pub negative_lookup: Option<String>,
    /// Anchored sign pattern stripped before parsing.
    pub negative_prefix: Option<String>,
    /// Text allowed between mergeable results (full match, lower-cased).
    pub merge_connector: String,
    pub ambiguity_filters: Vec<(String, String)>,
    pub ambiguous_fraction_connector: Option<String>,
    /// Splits "X over Y" style fractions.
    pub fraction_over: String,
    pub words: WordDefinition,
    pub digit_multipliers: &'static [(&'static str, u64)],
    pub decimal_separator: char,
    pub group_separators: &'static [char],
    pub strategies: &'static [(&'static str, Strategy)],
    pub merge_classes: &'static [(&'static str, MergeClass)],
    pub compound_number_tag: &'static str,
    pub compound_currency_tag: &'static str,
    pub cjk: Option<CjkDefinition>,
    /// Whether unit names are delimited by `\b`.
    pub word_boundaries: bool,
}

/// Compiled word dictionaries.
#[derive(Debug, Clone, Default)]
pub struct WordTables {
    pub cardinals: Arc<HashMap<String, Decimal>>,
    pub ordinals: HashMap<String, Decimal>,
    pub round_numbers: HashMap<String, Decimal>,
    pub denominators: HashMap<String, Decimal>,
    pub fraction_separators: Vec<String>,
    pub fillers: Vec<String>,
    pub point_words: Vec<String>,
    /// Longest phrase first.
    pub relative_ordinals: Vec<(String, i64, RelativeTo)>,
    pub percent_idioms: HashMap<String, Decimal>,
}

impl WordTables {
    fn compile(def: &WordDefinition) -> Self {
        let cardinals: HashMap<String, Decimal> = def
            .cardinals
            .iter()
            .map(|(w, v)| (w.to_string(), Decimal::from(*v)))
            .collect();
        let ordinals: HashMap<String, Decimal> = def
            .ordinals
            .iter()
            .map(|(w, v)| (w.to_string(), Decimal::from(*v)))
            .collect();

        let mut denominators: HashMap<String, Decimal> = def
            .denominators
            .iter()
            .map(|(w, v)| (w.to_string(), Decimal::from(*v)))
            .collect();
        for (word, value) in def.ordinals.iter().filter(|(_, v)| *v >= 3) {
            denominators.insert(word.to_string(), Decimal::from(*value));
            denominators.insert(format!("{word}s"), Decimal::from(*value));
        }

        let mut relative_ordinals: Vec<(String, i64, RelativeTo)> = def
            .relative_ordinals
            .iter()
            .map(|(p, o, r)| (p.to_string(), *o, *r))
            .collect();
        relative_ordinals.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self {
            cardinals: Arc::new(cardinals),
            ordinals,
            round_numbers: def
                .round_numbers
                .iter()
                .map(|(w, v)| (w.to_string(), Decimal::from(*v)))
                .collect(),
            denominators,
            fraction_separators: def.fraction_separators.iter().map(|s| s.to_string()).collect(),
            fillers: def.fillers.iter().map(|s| s.to_string()).collect(),
            point_words: def.point_words.iter().map(|s| s.to_string()).collect(),
            relative_ordinals,
            percent_idioms: def
                .percent_idioms
                .iter()
                .filter_map(|(phrase, value)| {
                    Decimal::from_str(value).ok().map(|v| (phrase.to_string(), v))
                })
                .collect(),
        }
    }

    /// Whether an ordinal word multiplies rather than adds ("hundredth").
    pub fn is_round_ordinal(&self, value: Decimal) -> bool {
        value >= Decimal::ONE_HUNDRED && self.round_numbers.values().any(|r| *r == value)
    }
}

/// Compiled logographic tables.
#[derive(Debug, Clone)]
pub struct CjkTables {
    pub digits: HashMap<char, Decimal>,
    pub round_chars: HashMap<char, Decimal>,
    pub dozen_chars: Vec<char>,
    pub pair_chars: Vec<char>,
    pub point_chars: Vec<char>,
    pub fraction_marker: String,
    pub mixed_marker: char,
    pub percent_prefixes: Vec<String>,
    pub ordinal_prefix: char,
    pub discount_char: char,
    pub tenth_char: char,
    pub half_char: char,
}

impl CjkTables {
    fn compile(def: &CjkDefinition) -> Self {
        Self {
            digits: def
                .digits
                .iter()
                .map(|(c, v)| (*c, Decimal::from(*v)))
                .collect(),
            round_chars: def
                .round_chars
                .iter()
                .map(|(c, v)| (*c, Decimal::from(*v)))
                .collect(),
            dozen_chars: def.dozen_chars.to_vec(),
            pair_chars: def.pair_chars.to_vec(),
            point_chars: def.point_chars.to_vec(),
            fraction_marker: def.fraction_marker.to_string(),
            mixed_marker: def.mixed_marker,
            percent_prefixes: def.percent_prefixes.iter().map(|s| s.to_string()).collect(),
            ordinal_prefix: def.ordinal_prefix,
            discount_char: def.discount_char,
            tenth_char: def.tenth_char,
            half_char: def.half_char,
        }
    }
}

/// Resolved currency unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyUnit {
    pub iso: String,
    pub ratio: Decimal,
    pub prefix: bool,
}

/// Immutable compiled tables for one culture.
#[derive(Debug)]
pub struct LocaleProvider {
    culture: Culture,
    numbers: Vec<TaggedPattern>,
    ordinals: Vec<TaggedPattern>,
    percentages: Vec<TaggedPattern>,
    percentage_style: PercentageStyle,
    ranges: Vec<TaggedPattern>,
    currency_patterns: Vec<TaggedPattern>,
    currency_units: Vec<CurrencyUnit>,
    currency_names: HashMap<String, usize>,
    negative_lookup: Option<Regex>,
    negative_prefix: Option<Regex>,
    merge_connector: Regex,
    ambiguity_filters: Vec<AmbiguityFilter>,
    ambiguous_fraction_connector: Option<Regex>,
    fraction_over: Regex,
    words: WordTables,
    digit_multipliers: Vec<(String, Decimal)>,
    decimal_separator: char,
    group_separators: Vec<char>,
    strategies: HashMap<String, Strategy>,
    merge_classes: HashMap<String, MergeClass>,
    compound_number_tag: Tag,
    compound_currency_tag: Tag,
    cjk: Option<CjkTables>,
    diagnostics: Vec<LocaleError>,
}

impl LocaleProvider {
    /// Compile a definition. Patterns that fail to compile are skipped and recorded in
    /// [`LocaleProvider::diagnostics`]; the rest of the locale stays usable.
    pub fn compile(def: LocaleDefinition) -> Self {
        let mut diagnostics = Vec::new();

        let numbers = compile_table(&def.numbers, &mut diagnostics);
        let ordinals = compile_table(&def.ordinals, &mut diagnostics);
        let percentages = compile_table(&def.percentages, &mut diagnostics);
        let ranges = compile_table(&def.ranges, &mut diagnostics);

        let mut currency_specs = Vec::new();
        let mut currency_units = Vec::new();
        let mut currency_names = HashMap::new();
        for spec in &def.currency_units {
            let Ok(ratio) = Decimal::from_str(spec.ratio) else {
                diagnostics.push(LocaleError::Pattern {
                    tag: spec.iso.to_string(),
                    message: format!("invalid unit ratio {:?}", spec.ratio),
                });
                continue;
            };
            let index = currency_units.len();
            currency_units.push(CurrencyUnit {
                iso: spec.iso.to_string(),
                ratio,
                prefix: spec.prefix,
            });
            for name in spec.names {
                currency_names.insert(name.to_lowercase(), index);
            }
            let (tag, _) = currency_tags(spec.prefix);
            currency_specs.push(PatternSpec::new(
                unit_pattern(spec.names, def.word_boundaries),
                tag,
                ExtractKind::Currency,
            ));
        }
        let currency_patterns = compile_table(&currency_specs, &mut diagnostics);

        let negative_lookup = def
            .negative_lookup
            .as_deref()
            .and_then(|p| compile_pattern(p, "negative", &mut diagnostics));
        let negative_prefix = def
            .negative_prefix
            .as_deref()
            .and_then(|p| compile_pattern(p, "negative", &mut diagnostics));
        let merge_connector = compile_pattern(
            &format!("^(?:{})$", def.merge_connector),
            "connector",
            &mut diagnostics,
        )
        .unwrap_or_else(never_matching);
        let fraction_over = compile_pattern(&def.fraction_over, "fraction-over", &mut diagnostics)
            .unwrap_or_else(never_matching);
        let ambiguous_fraction_connector = def
            .ambiguous_fraction_connector
            .as_deref()
            .and_then(|p| compile_pattern(p, "fraction-connector", &mut diagnostics));

        let ambiguity_filters = def
            .ambiguity_filters
            .iter()
            .filter_map(|(trigger, disqualifier)| {
                let trigger = compile_pattern(trigger, "ambiguity-trigger", &mut diagnostics)?;
                let disqualifier =
                    compile_pattern(disqualifier, "ambiguity-disqualifier", &mut diagnostics)?;
                Some(AmbiguityFilter::new(trigger, disqualifier))
            })
            .collect();

        let mut digit_multipliers: Vec<(String, Decimal)> = def
            .digit_multipliers
            .iter()
            .map(|(s, v)| (s.to_string(), Decimal::from(*v)))
            .collect();
        digit_multipliers.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));

        let mut merge_classes: HashMap<String, MergeClass> = def
            .merge_classes
            .iter()
            .map(|(tag, class)| (tag.to_string(), *class))
            .collect();
        for prefix in [false, true] {
            let (tag, class) = currency_tags(prefix);
            merge_classes.insert(tag.to_string(), class);
        }

        for err in &diagnostics {
            warn!(culture = %def.culture, "{}", err);
        }
        debug!(
            culture = %def.culture,
            numbers = numbers.len(),
            ordinals = ordinals.len(),
            percentages = percentages.len(),
            ranges = ranges.len(),
            skipped = diagnostics.len(),
            "compiled locale"
        );

        Self {
            culture: def.culture,
            numbers,
            ordinals,
            percentages,
            percentage_style: def.percentage_style,
            ranges,
            currency_patterns,
            currency_units,
            currency_names,
            negative_lookup,
            negative_prefix,
            merge_connector,
            ambiguity_filters,
            ambiguous_fraction_connector,
            fraction_over,
            words: WordTables::compile(&def.words),
            digit_multipliers,
            decimal_separator: def.decimal_separator,
            group_separators: def.group_separators.to_vec(),
            strategies: def
                .strategies
                .iter()
                .map(|(tag, s)| (tag.to_string(), *s))
                .collect(),
            merge_classes,
            compound_number_tag: Tag::new(def.compound_number_tag, 0),
            compound_currency_tag: Tag::new(def.compound_currency_tag, 0),
            cjk: def.cjk.as_ref().map(CjkTables::compile),
            diagnostics,
        }
    }

    pub fn culture(&self) -> Culture {
        self.culture
    }

    pub fn number_patterns(&self) -> &[TaggedPattern] {
        &self.numbers
    }

    pub fn ordinal_patterns(&self) -> &[TaggedPattern] {
        &self.ordinals
    }

    pub fn percentage_patterns(&self) -> &[TaggedPattern] {
        &self.percentages
    }

    pub fn percentage_style(&self) -> PercentageStyle {
        self.percentage_style
    }

    pub fn range_patterns(&self) -> &[TaggedPattern] {
        &self.ranges
    }

    pub fn currency_patterns(&self) -> &[TaggedPattern] {
        &self.currency_patterns
    }

    /// Look up a currency unit by its surface text.
    pub fn currency_unit(&self, text: &str) -> Option<&CurrencyUnit> {
        self.currency_names
            .get(&text.trim().to_lowercase())
            .map(|&index| &self.currency_units[index])
    }

    /// Currency family (ISO code) of every unit surface form.
    pub fn currency_families(&self) -> HashMap<String, String> {
        self.currency_names
            .iter()
            .map(|(name, &index)| (name.clone(), self.currency_units[index].iso.clone()))
            .collect()
    }

    pub fn negative_lookup(&self) -> Option<&Regex> {
        self.negative_lookup.as_ref()
    }

    /// Split a leading negative marker off `text`.
    pub fn strip_negative<'t>(&self, text: &'t str) -> (bool, &'t str) {
        match self.negative_prefix.as_ref().and_then(|re| re.find(text)) {
            Some(m) if m.start() == 0 && m.end() < text.len() => (true, text[m.end()..].trim_start()),
            _ => (false, text),
        }
    }

    pub fn merge_connector(&self) -> &Regex {
        &self.merge_connector
    }

    pub fn ambiguity_filters(&self) -> &[AmbiguityFilter] {
        &self.ambiguity_filters
    }

    pub fn ambiguous_fraction_connector(&self) -> Option<&Regex> {
        self.ambiguous_fraction_connector.as_ref()
    }

    pub fn fraction_over(&self) -> &Regex {
        &self.fraction_over
    }

    pub fn words(&self) -> &WordTables {
        &self.words
    }

    /// Multiplier suffixes, longest first.
    pub fn digit_multipliers(&self) -> &[(String, Decimal)] {
        &self.digit_multipliers
    }

    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    pub fn group_separators(&self) -> &[char] {
        &self.group_separators
    }

    pub fn strategy(&self, tag: &str) -> Option<Strategy> {
        self.strategies.get(tag).copied()
    }

    pub fn merge_class(&self, tag: &str) -> MergeClass {
        self.merge_classes
            .get(tag)
            .copied()
            .unwrap_or(MergeClass::None)
    }

    pub fn merge_classes(&self) -> &HashMap<String, MergeClass> {
        &self.merge_classes
    }

    pub fn compound_number_tag(&self) -> &Tag {
        &self.compound_number_tag
    }

    pub fn compound_currency_tag(&self) -> &Tag {
        &self.compound_currency_tag
    }

    pub fn cjk(&self) -> Option<&CjkTables> {
        self.cjk.as_ref()
    }

    /// Patterns skipped during compilation.
    pub fn diagnostics(&self) -> &[LocaleError] {
        &self.diagnostics
    }
}

/// Tag and merge class for currency unit patterns.
pub(crate) fn currency_tags(prefix: bool) -> (&'static str, MergeClass) {
    if prefix {
        ("CurrencyPrefix", MergeClass::PrefixUnit)
    } else {
        ("CurrencyUnit", MergeClass::Unit)
    }
}

fn unit_pattern(names: &[&str], word_boundaries: bool) -> String {
    let mut sorted: Vec<&str> = names.to_vec();
    sorted.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    let alternatives: Vec<String> = sorted
        .iter()
        .map(|name| {
            let escaped = regex::escape(name);
            let wordy = name.chars().all(|c| c.is_alphanumeric() || c == ' ');
            if word_boundaries && wordy {
                format!(r"\b{escaped}\b")
            } else {
                escaped
            }
        })
        .collect();
    format!("(?i)(?:{})", alternatives.join("|"))
}

fn compile_pattern(
    pattern: &str,
    tag: &str,
    diagnostics: &mut Vec<LocaleError>,
) -> Option<Regex> {
    match RegexBuilder::new(pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(e) => {
            diagnostics.push(LocaleError::Pattern {
                tag: tag.to_string(),
                message: e.to_string(),
            });
            None
        }
    }
}

fn compile_table(specs: &[PatternSpec], diagnostics: &mut Vec<LocaleError>) -> Vec<TaggedPattern> {
    specs
        .iter()
        .filter_map(|spec| {
            compile_pattern(&spec.pattern, spec.tag, diagnostics).map(|regex| TaggedPattern {
                regex,
                tag: Tag::new(spec.tag, spec.priority),
                kind: spec.kind,
            })
        })
        .collect()
}

fn never_matching() -> Regex {
    Regex::new(r"\b\B").expect("static pattern")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_culture_aliases() {
        assert_eq!("en-US".parse::<Culture>().unwrap(), Culture::English);
        assert_eq!("zh_CN".parse::<Culture>().unwrap(), Culture::Chinese);
        assert!(matches!(
            "fr-fr".parse::<Culture>(),
            Err(LocaleError::UnknownCulture(_))
        ));
    }

    #[test]
    fn test_builtin_locales_compile_cleanly() {
        for culture in Culture::ALL {
            let locale = provider(culture);
            assert!(locale.diagnostics().is_empty(), "{:?}", locale.diagnostics());
            assert!(!locale.number_patterns().is_empty());
            assert!(!locale.range_patterns().is_empty());
        }
    }

    #[test]
    fn test_provider_is_memoized() {
        let a = provider(Culture::English) as *const LocaleProvider;
        let b = provider_for("en").unwrap() as *const LocaleProvider;
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let mut def = english::definition();
        def.numbers.push(PatternSpec::new("(unclosed", "Broken", ExtractKind::Number));
        let count = def.numbers.len();

        let locale = LocaleProvider::compile(def);
        assert_eq!(locale.number_patterns().len(), count - 1);
        assert_eq!(locale.diagnostics().len(), 1);
    }

    #[test]
    fn test_currency_lookup() {
        let locale = provider(Culture::English);
        let cents = locale.currency_unit("Cents").unwrap();
        assert_eq!(cents.iso, "USD");
        assert_eq!(cents.ratio, Decimal::new(1, 2));
        assert!(locale.currency_unit("$").unwrap().prefix);
    }

    #[test]
    fn test_strip_negative() {
        let locale = provider(Culture::English);
        assert_eq!(locale.strip_negative("minus five"), (true, "five"));
        assert_eq!(locale.strip_negative("five"), (false, "five"));
    }

    #[test]
    fn test_denominators_include_ordinal_plurals() {
        let words = provider(Culture::English).words();
        assert_eq!(words.denominators.get("fifths"), Some(&Decimal::from(5)));
        assert_eq!(words.denominators.get("half"), Some(&Decimal::from(2)));
        assert!(words.is_round_ordinal(Decimal::from(100)));
        assert!(!words.is_round_ordinal(Decimal::from(12)));
    }

    #[test]
    fn test_percent_idioms() {
        let locale = provider(Culture::English);
        assert_eq!(
            locale.words().percent_idioms.get("half percent"),
            Some(&Decimal::new(5, 1))
        );
        assert_eq!(locale.strategy("PerIdiom"), Some(Strategy::PercentIdiom));
        assert!(provider(Culture::Chinese).words().percent_idioms.is_empty());
    }
}
