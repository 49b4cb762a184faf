//! English number patterns and word tables.

use super::{
    CurrencyUnitSpec, Culture, LocaleDefinition, MergeClass, PatternSpec, PercentageStyle,
    RangeShape, Strategy, WordDefinition,
};
use crate::extraction::percentage::{FRACTION_PLACEHOLDER, NUMBER_PLACEHOLDER};
use crate::models::{ExtractKind, RelativeTo};

const ONES_AND_TEENS: &str = "eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|zero|one|two|three|four|five|six|seven|eight|nine|ten";
const DIGIT_WORDS: &str = "one|two|three|four|five|six|seven|eight|nine";
const TENS: &str = "twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety";
const ROUNDS: &str = "hundred|thousand|million|billion|trillion";
const ORDINAL_UNITS: &str = "first|second|third|fourth|fifth|sixth|seventh|eighth|ninth";
const ORDINAL_WORDS: &str = "eleventh|twelfth|thirteenth|fourteenth|fifteenth|sixteenth|seventeenth|eighteenth|nineteenth|twentieth|thirtieth|fortieth|fiftieth|sixtieth|seventieth|eightieth|ninetieth|hundredth|thousandth|millionth|billionth|trillionth|tenth|first|second|third|fourth|fifth|sixth|seventh|eighth|ninth";
const ROUND_ORDINALS: &str = "hundredth|thousandth|millionth|billionth|trillionth";

const CARDINALS: &[(&str, u64)] = &[
    ("zero", 0),
    ("oh", 0),
    ("a", 1),
    ("an", 1),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

const ORDINALS: &[(&str, u64)] = &[
    ("first", 1),
    ("second", 2),
    ("third", 3),
    ("fourth", 4),
    ("fifth", 5),
    ("sixth", 6),
    ("seventh", 7),
    ("eighth", 8),
    ("ninth", 9),
    ("tenth", 10),
    ("eleventh", 11),
    ("twelfth", 12),
    ("thirteenth", 13),
    ("fourteenth", 14),
    ("fifteenth", 15),
    ("sixteenth", 16),
    ("seventeenth", 17),
    ("eighteenth", 18),
    ("nineteenth", 19),
    ("twentieth", 20),
    ("thirtieth", 30),
    ("fortieth", 40),
    ("fiftieth", 50),
    ("sixtieth", 60),
    ("seventieth", 70),
    ("eightieth", 80),
    ("ninetieth", 90),
    ("hundredth", 100),
    ("thousandth", 1_000),
    ("millionth", 1_000_000),
    ("billionth", 1_000_000_000),
    ("trillionth", 1_000_000_000_000),
];

const ROUND_NUMBERS: &[(&str, u64)] = &[
    ("hundred", 100),
    ("thousand", 1_000),
    ("million", 1_000_000),
    ("billion", 1_000_000_000),
    ("trillion", 1_000_000_000_000),
    ("dozen", 12),
];

const DENOMINATORS: &[(&str, u64)] = &[
    ("half", 2),
    ("halves", 2),
    ("quarter", 4),
    ("quarters", 4),
];

/// Keyed without articles; "per cent" is read as "percent".
const PERCENT_IDIOMS: &[(&str, &str)] = &[("half percent", "0.5")];

const RELATIVE_ORDINALS: &[(&str, i64, RelativeTo)] = &[
    ("next", 1, RelativeTo::Current),
    ("previous", -1, RelativeTo::Current),
    ("prior", -1, RelativeTo::Current),
    ("current", 0, RelativeTo::Current),
    ("last", 0, RelativeTo::End),
    ("penultimate", -1, RelativeTo::End),
    ("second to last", -1, RelativeTo::End),
    ("next to last", -1, RelativeTo::End),
    ("last but one", -1, RelativeTo::End),
    ("antepenultimate", -2, RelativeTo::End),
    ("third to last", -2, RelativeTo::End),
];

const DIGIT_MULTIPLIERS: &[(&str, u64)] = &[
    ("k", 1_000),
    ("m", 1_000_000),
    ("g", 1_000_000_000),
    ("b", 1_000_000_000),
    ("t", 1_000_000_000_000),
];

const STRATEGIES: &[(&str, Strategy)] = &[
    ("IntegerNum", Strategy::Digit),
    ("DoubleNum", Strategy::Digit),
    ("DoublePow", Strategy::Power),
    ("IntegerEng", Strategy::Words),
    ("RoundNumEng", Strategy::Words),
    ("DoubleEng", Strategy::Words),
    ("FracEng", Strategy::Fraction),
    ("FracNum", Strategy::Fraction),
    ("OrdinalNum", Strategy::DigitOrdinal),
    ("OrdinalEng", Strategy::WordOrdinal),
    ("OrdinalRelEng", Strategy::RelativeOrdinal),
    ("CompoundNum", Strategy::Compound),
    ("CompoundCurrency", Strategy::Currency),
    ("PerNum", Strategy::Percent),
    ("PerFrac", Strategy::Percent),
    ("PerRatio", Strategy::Percent),
    ("PerIdiom", Strategy::PercentIdiom),
    ("BetweenRange", Strategy::Range(RangeShape::Between)),
    ("TillRange", Strategy::Range(RangeShape::Till)),
    ("MoreRange", Strategy::Range(RangeShape::More)),
    ("LessRange", Strategy::Range(RangeShape::Less)),
    ("MoreOrEqualRange", Strategy::Range(RangeShape::MoreOrEqual)),
    ("LessOrEqualRange", Strategy::Range(RangeShape::LessOrEqual)),
    ("EqualRange", Strategy::Range(RangeShape::Equal)),
    ("MoreLessRange", Strategy::Range(RangeShape::MoreAndLess)),
    ("AtLeastAtMostRange", Strategy::Range(RangeShape::AtLeastAndAtMost)),
];

const MERGE_CLASSES: &[(&str, MergeClass)] = &[
    ("IntegerNum", MergeClass::Digit),
    ("DoubleNum", MergeClass::Digit),
    ("DoublePow", MergeClass::Digit),
    ("IntegerEng", MergeClass::Word),
    ("DoubleEng", MergeClass::Word),
    ("RoundNumEng", MergeClass::Round),
];

/// "twenty-one", "seventeen", "six"
fn below_hundred() -> String {
    format!(r"(?:(?:{TENS})(?:[\s-]+(?:{DIGIT_WORDS}))?|(?:{ONES_AND_TEENS}))")
}

/// A cardinal below one thousand: "nine hundred and ninety-nine".
fn segment() -> String {
    let b = below_hundred();
    format!(r"(?:(?:{b}|an?)\s+hundred(?:\s+(?:and\s+)?{b})?|{b})")
}

fn number_word() -> String {
    format!(r"(?:{ONES_AND_TEENS}|{TENS}|{ROUNDS}|an?)")
}

fn denominator() -> String {
    let ordinals: Vec<String> = ORDINALS
        .iter()
        .filter(|(_, v)| *v >= 3)
        .map(|(w, _)| format!("{w}s?"))
        .rev()
        .collect();
    format!(r"(?:(?:{TENS})-)?(?:halves|half|quarters|quarter|{})", ordinals.join("|"))
}

/// Capture group for a range operand, optionally signed.
fn range_operand(name: &str) -> String {
    let token = format!(
        r"(?:\d+(?:[.,]\d+)*(?:st|nd|rd|th|[kKMB])?\b|(?:{ONES_AND_TEENS}|{TENS}|{ROUNDS}|dozen|{ORDINAL_WORDS}|point)\b)"
    );
    format!(r"(?P<{name}>(?:(?:minus|negative)\s+|-)?{token}(?:[\s-]+(?:and\s+)?{token})*)")
}

fn number_patterns() -> Vec<PatternSpec> {
    let seg = segment();
    let den = denominator();
    let n = ExtractKind::Number;
    let f = ExtractKind::Fraction;

    vec![
        PatternSpec::new(format!(r"(?i)\b{seg}\b"), "IntegerEng", n),
        PatternSpec::new(
            format!(r"(?i)\b(?:an?\s+)?(?:{ROUNDS}|dozen)\b"),
            "RoundNumEng",
            n,
        )
        .with_priority(1),
        PatternSpec::new(
            format!(r"(?i)\b(?:{seg}\s+)?point(?:\s+(?:zero|oh|{DIGIT_WORDS}))+\b"),
            "DoubleEng",
            n,
        ),
        PatternSpec::new(
            format!(r"(?i)\b(?:(?:{seg}|\d+)\s+and\s+)?(?:{seg}|an?|\d+)[\s-]+{den}\b"),
            "FracEng",
            f,
        ),
        PatternSpec::new(
            format!(r"(?i)\b(?:{seg}|\d+)\s+(?:over|out\s+of|divided\s+by)\s+(?:{seg}|\d+)\b"),
            "FracEng",
            f,
        ),
        PatternSpec::new(
            format!(r"(?i)\b(?P<numerator>{seg}|\d+)\s+in\s+(?P<denominator>{seg}|\d+)\b"),
            "FracEng",
            f,
        )
        .with_priority(2),
        PatternSpec::new(r"\b\d+\s+\d+\s*/\s*\d+\b", "FracNum", f),
        PatternSpec::new(r"\b\d+\s*/\s*\d+\b", "FracNum", f),
        PatternSpec::new(r"\b\d+(?:\.\d+)?[eE][-+]?\d+\b", "DoublePow", n),
        PatternSpec::new(r"\b\d+(?:\.\d+)?\s*\^\s*-?\d+\b", "DoublePow", n),
        PatternSpec::new(r"\b\d{1,3}(?:,\d{3})+\.\d+\b", "DoubleNum", n),
        PatternSpec::new(r"\b\d+\.\d+\b", "DoubleNum", n),
        PatternSpec::new(r"\b\d+(?:\.\d+)?[kKMGBT]\b", "DoubleNum", n),
        PatternSpec::new(r"\b\d{1,3}(?:,\d{3})+\b", "IntegerNum", n),
        PatternSpec::new(r"\b\d+\b", "IntegerNum", n),
    ]
}

fn ordinal_patterns() -> Vec<PatternSpec> {
    let word = number_word();
    let o = ExtractKind::Ordinal;

    vec![
        PatternSpec::new(r"(?i)\b\d{1,3}(?:,\d{3})+(?:st|nd|rd|th)\b", "OrdinalNum", o),
        PatternSpec::new(r"(?i)\b\d+(?:st|nd|rd|th)\b", "OrdinalNum", o),
        PatternSpec::new(
            format!(r"(?i)\b(?:{word}[\s-]+(?:and\s+)?)*(?:{TENS})[\s-]+(?:{ORDINAL_UNITS})\b"),
            "OrdinalEng",
            o,
        ),
        PatternSpec::new(
            format!(
                r"(?i)\b(?:(?:{word}[\s-]+)*(?:{ROUNDS})\s+(?:and\s+)?)?(?:{ORDINAL_WORDS})\b"
            ),
            "OrdinalEng",
            o,
        ),
        PatternSpec::new(
            format!(r"(?i)\b(?:{word}[\s-]+)+(?:{ROUND_ORDINALS})\b"),
            "OrdinalEng",
            o,
        ),
        PatternSpec::new(
            r"(?i)\bthe\s+(?P<relord>next|previous|prior|current)\s+one\b",
            "OrdinalRelEng",
            o,
        ),
        PatternSpec::new(
            r"(?i)\bthe\s+(?P<relord>(?:second|next|third)\s+to\s+(?:the\s+)?last|last\s+but\s+one|antepenultimate|penultimate|last)(?:\s+one)?\b",
            "OrdinalRelEng",
            o,
        ),
    ]
}

fn percentage_patterns() -> Vec<PatternSpec> {
    let num = regex::escape(NUMBER_PLACEHOLDER);
    let frac = regex::escape(FRACTION_PLACEHOLDER);
    let p = ExtractKind::Percentage;

    vec![
        PatternSpec::new(
            format!(r"(?i){num}\s*(?:%|percent\b|per\s+cent\b|pct\b)"),
            "PerNum",
            p,
        ),
        PatternSpec::new(
            format!(r"(?i){frac}\s*(?:%|percent\b|per\s+cent\b)"),
            "PerFrac",
            p,
        ),
        PatternSpec::new(
            format!(r"(?i){num}\s+(?:in|out\s+of)\s+every\s+{num}"),
            "PerRatio",
            p,
        ),
        PatternSpec::new(
            r"(?i)\bhalf\s+(?:(?:of\s+)?an?\s+)?(?:percent|per\s+cent)\b",
            "PerIdiom",
            p,
        ),
    ]
}

fn range_patterns() -> Vec<PatternSpec> {
    let n1 = range_operand("number1");
    let n2 = range_operand("number2");
    let r = ExtractKind::Range;
    let more = r"(?:(?:more|greater|higher|larger|bigger)\s+than|over|above|exceeding)";
    let less = r"(?:(?:less|fewer|smaller|lower)\s+than|under|below)";

    vec![
        PatternSpec::new(
            format!(r"(?i)\bbetween\s+{n1}\s+and\s+{n2}"),
            "BetweenRange",
            r,
        ),
        PatternSpec::new(
            format!(r"(?i)\b(?:from\s+)?{n1}\s+(?:to|through|thru|till|until)\s+{n2}"),
            "TillRange",
            r,
        ),
        PatternSpec::new(
            r"\b(?P<number1>\d+(?:[.,]\d+)*)\s*[-~–]\s*(?P<number2>\d+(?:[.,]\d+)*)\b",
            "TillRange",
            r,
        ),
        PatternSpec::new(
            format!(r"(?i)\b{more}\s+{n1}\s*,?\s*(?:and|but)\s+{less}\s+{n2}"),
            "MoreLessRange",
            r,
        ),
        PatternSpec::new(
            format!(
                r"(?i)\bat\s+least\s+{n1}\s*,?\s*(?:and|but)\s+(?:at\s+most|no\s+more\s+than)\s+{n2}"
            ),
            "AtLeastAtMostRange",
            r,
        ),
        PatternSpec::new(format!(r"(?i)\b{more}\s+{n1}"), "MoreRange", r),
        PatternSpec::new(format!(r">\s*{n1}"), "MoreRange", r),
        PatternSpec::new(format!(r"(?i)\b{less}\s+{n1}"), "LessRange", r),
        PatternSpec::new(format!(r"<\s*{n1}"), "LessRange", r),
        PatternSpec::new(
            format!(r"(?i)\b(?:at\s+least|no\s+(?:less|fewer)\s+than|not\s+(?:less|fewer)\s+than)\s+{n1}"),
            "MoreOrEqualRange",
            r,
        ),
        PatternSpec::new(format!(r"(?:>=|≥)\s*{n1}"), "MoreOrEqualRange", r),
        PatternSpec::new(
            format!(r"(?i){n1}\s+or\s+(?:more|greater|higher|above)\b"),
            "MoreOrEqualRange",
            r,
        ),
        PatternSpec::new(
            format!(r"(?i)\b(?:at\s+most|up\s+to|no\s+more\s+than|not\s+more\s+than)\s+{n1}"),
            "LessOrEqualRange",
            r,
        ),
        PatternSpec::new(format!(r"(?:<=|≤)\s*{n1}"), "LessOrEqualRange", r),
        PatternSpec::new(
            format!(r"(?i){n1}\s+or\s+(?:less|fewer|lower|below)\b"),
            "LessOrEqualRange",
            r,
        ),
        PatternSpec::new(
            format!(r"(?i)\b(?:equal\s+to|equals)\s+{n1}"),
            "EqualRange",
            r,
        ),
    ]
}

fn currency_units() -> Vec<CurrencyUnitSpec> {
    vec![
        CurrencyUnitSpec {
            names: &["dollars", "dollar", "bucks", "buck", "usd"],
            iso: "USD",
            ratio: "1",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["cents", "cent"],
            iso: "USD",
            ratio: "0.01",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["$", "us$"],
            iso: "USD",
            ratio: "1",
            prefix: true,
        },
        CurrencyUnitSpec {
            names: &["euros", "euro", "eur"],
            iso: "EUR",
            ratio: "1",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["€"],
            iso: "EUR",
            ratio: "1",
            prefix: true,
        },
        CurrencyUnitSpec {
            names: &["pounds", "pound", "quid", "gbp"],
            iso: "GBP",
            ratio: "1",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["pence", "pennies", "penny"],
            iso: "GBP",
            ratio: "0.01",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["£"],
            iso: "GBP",
            ratio: "1",
            prefix: true,
        },
        CurrencyUnitSpec {
            names: &["yen", "jpy"],
            iso: "JPY",
            ratio: "1",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["¥"],
            iso: "JPY",
            ratio: "1",
            prefix: true,
        },
        CurrencyUnitSpec {
            names: &["yuan", "renminbi", "rmb", "cny"],
            iso: "CNY",
            ratio: "1",
            prefix: false,
        },
    ]
}

pub fn definition() -> LocaleDefinition {
    LocaleDefinition {
        culture: Culture::English,
        numbers: number_patterns(),
        ordinals: ordinal_patterns(),
        percentages: percentage_patterns(),
        percentage_style: PercentageStyle::Placeholder,
        ranges: range_patterns(),
        currency_units: currency_units(),
        negative_lookup: Some(r"(?i)(?:^|[\s(])((?:minus|negative)\s+|-)$".to_string()),
        negative_prefix: Some(r"(?i)^(?:(?:minus|negative)\s+|-\s*)".to_string()),
        merge_connector: "and|&".to_string(),
        ambiguity_filters: vec![(
            r"(?i)^one$".to_string(),
            r"(?i)\b(?:the|this|that|which|each|every|any|no|another)\s+one\b".to_string(),
        )],
        ambiguous_fraction_connector: Some(r"(?i)\bin\b".to_string()),
        fraction_over: r"(?i)\s*(?:\bover\b|\bout\s+of\b|\bdivided\s+by\b|/|\bin\b)\s*".to_string(),
        words: WordDefinition {
            cardinals: CARDINALS,
            ordinals: ORDINALS,
            round_numbers: ROUND_NUMBERS,
            denominators: DENOMINATORS,
            fraction_separators: &["and"],
            fillers: &["and"],
            point_words: &["point"],
            relative_ordinals: RELATIVE_ORDINALS,
            percent_idioms: PERCENT_IDIOMS,
        },
        digit_multipliers: DIGIT_MULTIPLIERS,
        decimal_separator: '.',
        group_separators: &[',', '_'],
        strategies: STRATEGIES,
        merge_classes: MERGE_CLASSES,
        compound_number_tag: "CompoundNum",
        compound_currency_tag: "CompoundCurrency",
        cjk: None,
        word_boundaries: true,
    }
}
