//! Simplified/traditional Chinese number patterns and numeral tables.

use super::{
    CjkDefinition, CurrencyUnitSpec, Culture, LocaleDefinition, MergeClass, PatternSpec,
    PercentageStyle, RangeShape, Strategy, WordDefinition,
};
use crate::models::ExtractKind;

const DIGITS: &str = "零〇一二两兩三四五六七八九壹贰貳叁參肆伍陆陸柒捌玖";
const ROUNDS: &str = "十拾百佰千仟万萬亿億兆";
const ARABIC: &str = "0-9０-９";

const DIGIT_VALUES: &[(char, u32)] = &[
    ('零', 0),
    ('〇', 0),
    ('一', 1),
    ('二', 2),
    ('两', 2),
    ('兩', 2),
    ('三', 3),
    ('四', 4),
    ('五', 5),
    ('六', 6),
    ('七', 7),
    ('八', 8),
    ('九', 9),
    ('壹', 1),
    ('贰', 2),
    ('貳', 2),
    ('叁', 3),
    ('參', 3),
    ('肆', 4),
    ('伍', 5),
    ('陆', 6),
    ('陸', 6),
    ('柒', 7),
    ('捌', 8),
    ('玖', 9),
    ('0', 0),
    ('1', 1),
    ('2', 2),
    ('3', 3),
    ('4', 4),
    ('5', 5),
    ('6', 6),
    ('7', 7),
    ('8', 8),
    ('9', 9),
];

const ROUND_VALUES: &[(char, u64)] = &[
    ('十', 10),
    ('拾', 10),
    ('百', 100),
    ('佰', 100),
    ('千', 1_000),
    ('仟', 1_000),
    ('万', 10_000),
    ('萬', 10_000),
    ('亿', 100_000_000),
    ('億', 100_000_000),
    ('兆', 1_000_000_000_000),
];

const DIGIT_MULTIPLIERS: &[(&str, u64)] = &[
    ("十", 10),
    ("百", 100),
    ("千", 1_000),
    ("万", 10_000),
    ("萬", 10_000),
    ("亿", 100_000_000),
    ("億", 100_000_000),
    ("兆", 1_000_000_000_000),
    ("k", 1_000),
];

const STRATEGIES: &[(&str, Strategy)] = &[
    ("IntegerNum", Strategy::Digit),
    ("DoubleNum", Strategy::Digit),
    ("DoublePow", Strategy::Power),
    ("FracNum", Strategy::Fraction),
    ("IntegerChs", Strategy::CjkInteger),
    ("DoubleChs", Strategy::CjkDouble),
    ("FracChs", Strategy::CjkFraction),
    ("OrdinalChs", Strategy::CjkOrdinal),
    ("PerChs", Strategy::CjkPercent),
    ("PerNum", Strategy::Percent),
    ("PerSpe", Strategy::CjkSpecialPercent),
    ("CompoundNum", Strategy::Compound),
    ("CompoundCurrency", Strategy::Currency),
    ("BetweenRange", Strategy::Range(RangeShape::Between)),
    ("TillRange", Strategy::Range(RangeShape::Till)),
    ("MoreRange", Strategy::Range(RangeShape::More)),
    ("LessRange", Strategy::Range(RangeShape::Less)),
    ("MoreOrEqualRange", Strategy::Range(RangeShape::MoreOrEqual)),
    ("LessOrEqualRange", Strategy::Range(RangeShape::LessOrEqual)),
    ("EqualRange", Strategy::Range(RangeShape::Equal)),
    ("MoreLessRange", Strategy::Range(RangeShape::MoreAndLess)),
];

const MERGE_CLASSES: &[(&str, MergeClass)] = &[
    ("IntegerNum", MergeClass::Digit),
    ("DoubleNum", MergeClass::Digit),
    ("IntegerChs", MergeClass::Word),
    ("DoubleChs", MergeClass::Word),
];

fn number_patterns() -> Vec<PatternSpec> {
    let n = ExtractKind::Number;
    let f = ExtractKind::Fraction;

    vec![
        PatternSpec::new(
            format!("(?:[{DIGITS}{ROUNDS}]+又)?[{DIGITS}{ROUNDS}]+分之[{DIGITS}{ROUNDS}]+"),
            "FracChs",
            f,
        ),
        PatternSpec::new(format!("[{ARABIC}]+分之[{ARABIC}]+"), "FracChs", f),
        PatternSpec::new(format!(r"[{ARABIC}]+\s*[/／]\s*[{ARABIC}]+"), "FracNum", f),
        PatternSpec::new(
            format!("[{DIGITS}{ROUNDS}]+[点點][{DIGITS}]+"),
            "DoubleChs",
            n,
        ),
        PatternSpec::new(
            format!("[{DIGITS}{ROUNDS}]+[打对對双雙]?"),
            "IntegerChs",
            n,
        ),
        PatternSpec::new(r"[0-9]+(?:\.[0-9]+)?[eE][-+]?[0-9]+", "DoublePow", n),
        PatternSpec::new(
            format!("[{ARABIC}]+[.．][{ARABIC}]+[{ROUNDS}]*"),
            "DoubleNum",
            n,
        ),
        PatternSpec::new(format!("[{ARABIC}]+[{ROUNDS}]+"), "IntegerNum", n),
        PatternSpec::new(
            format!("[{ARABIC}]{{1,3}}(?:[,，][{ARABIC}]{{3}})+"),
            "IntegerNum",
            n,
        ),
        PatternSpec::new(format!("[{ARABIC}]+"), "IntegerNum", n),
    ]
}

fn ordinal_patterns() -> Vec<PatternSpec> {
    vec![PatternSpec::new(
        format!("第[{DIGITS}{ROUNDS}{ARABIC}]+"),
        "OrdinalChs",
        ExtractKind::Ordinal,
    )]
}

fn percentage_patterns() -> Vec<PatternSpec> {
    let p = ExtractKind::Percentage;

    vec![
        PatternSpec::new(
            format!("百分之[{DIGITS}{ROUNDS}]+(?:[点點][{DIGITS}]+)?"),
            "PerChs",
            p,
        ),
        PatternSpec::new(
            format!("百分之[{ARABIC}]+(?:[.．][{ARABIC}]+)?"),
            "PerChs",
            p,
        ),
        PatternSpec::new(
            format!(r"[{ARABIC}]+(?:[.．][{ARABIC}]+)?\s*[%％]"),
            "PerNum",
            p,
        ),
        PatternSpec::new(
            format!("(?:[{DIGITS}](?:[点點]?[{DIGITS}])?|[{ARABIC}](?:[.．]?[{ARABIC}])?|半)折"),
            "PerSpe",
            p,
        ),
        PatternSpec::new(
            format!("(?:[{DIGITS}十]成[{DIGITS}]?|半成)"),
            "PerSpe",
            p,
        ),
    ]
}

fn range_patterns() -> Vec<PatternSpec> {
    let operand = format!("[负負\\-－]?[{DIGITS}{ROUNDS}{ARABIC}.．点點]+");
    let n1 = format!("(?P<number1>{operand})");
    let n2 = format!("(?P<number2>{operand})");
    let r = ExtractKind::Range;
    let more = "(?:大于|大於|多于|多於|高于|高於|超过|超過)";
    let less = "(?:小于|小於|少于|少於|低于|低於|不到|不足)";

    vec![
        PatternSpec::new(
            format!("(?:介于|介於|在){n1}(?:和|与|與|到|至){n2}之[间間]"),
            "BetweenRange",
            r,
        ),
        PatternSpec::new(
            format!(r"{n1}\s*(?:到|至|~|～|-|－|—)\s*{n2}"),
            "TillRange",
            r,
        ),
        PatternSpec::new(
            format!("{more}{n1}(?:且|并且|並且|而|，|,)?{less}{n2}"),
            "MoreLessRange",
            r,
        ),
        PatternSpec::new(format!("{more}{n1}"), "MoreRange", r),
        PatternSpec::new(format!("{less}{n1}"), "LessRange", r),
        PatternSpec::new(
            format!("(?:不少于|不少於|不低于|不低於|至少|最少|大于等于|大於等於|大于或等于){n1}"),
            "MoreOrEqualRange",
            r,
        ),
        PatternSpec::new(format!("{n1}或?以上"), "MoreOrEqualRange", r),
        PatternSpec::new(
            format!("(?:不多于|不多於|不超过|不超過|不高于|至多|最多|小于等于|小於等於|小于或等于){n1}"),
            "LessOrEqualRange",
            r,
        ),
        PatternSpec::new(format!("{n1}或?以下"), "LessOrEqualRange", r),
        PatternSpec::new(format!("(?:等于|等於){n1}"), "EqualRange", r),
    ]
}

fn currency_units() -> Vec<CurrencyUnitSpec> {
    vec![
        CurrencyUnitSpec {
            names: &["元", "块", "塊", "圆", "圓", "人民币", "人民幣"],
            iso: "CNY",
            ratio: "1",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["角", "毛"],
            iso: "CNY",
            ratio: "0.1",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["分"],
            iso: "CNY",
            ratio: "0.01",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["¥", "￥"],
            iso: "CNY",
            ratio: "1",
            prefix: true,
        },
        CurrencyUnitSpec {
            names: &["美元", "美金"],
            iso: "USD",
            ratio: "1",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["美分"],
            iso: "USD",
            ratio: "0.01",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["$"],
            iso: "USD",
            ratio: "1",
            prefix: true,
        },
        CurrencyUnitSpec {
            names: &["欧元", "歐元"],
            iso: "EUR",
            ratio: "1",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["英镑", "英鎊"],
            iso: "GBP",
            ratio: "1",
            prefix: false,
        },
        CurrencyUnitSpec {
            names: &["日元", "日圓"],
            iso: "JPY",
            ratio: "1",
            prefix: false,
        },
    ]
}

pub fn definition() -> LocaleDefinition {
    LocaleDefinition {
        culture: Culture::Chinese,
        numbers: number_patterns(),
        ordinals: ordinal_patterns(),
        percentages: percentage_patterns(),
        percentage_style: PercentageStyle::Direct,
        ranges: range_patterns(),
        currency_units: currency_units(),
        negative_lookup: Some("(?:^|[^0-9０-９])([负負\\-－])$".to_string()),
        negative_prefix: Some("^[负負\\-－]".to_string()),
        merge_connector: "又|和".to_string(),
        ambiguity_filters: vec![
            (
                "^一$".to_string(),
                "一(?:直|定|起|样|樣|般|些|点|點|切|旦|共|同|再|成不[变變])".to_string(),
            ),
            (
                "^千[万萬]$".to_string(),
                "千[万萬](?:不要|别|別|不能|要|记住|記住|小心)".to_string(),
            ),
            ("^[万萬]一$".to_string(), "[万萬]一".to_string()),
            (
                "成".to_string(),
                "成(?:不[变變]|人|功|立|为|為|员|員|绩|績|长|長|熟)".to_string(),
            ),
            (
                "^分$".to_string(),
                "分(?:钟|鐘|数|數|析|之|别|別|开|開)".to_string(),
            ),
        ],
        ambiguous_fraction_connector: None,
        fraction_over: r"\s*[/／]\s*".to_string(),
        words: WordDefinition::default(),
        digit_multipliers: DIGIT_MULTIPLIERS,
        decimal_separator: '.',
        group_separators: &[',', '，'],
        strategies: STRATEGIES,
        merge_classes: MERGE_CLASSES,
        compound_number_tag: "CompoundNum",
        compound_currency_tag: "CompoundCurrency",
        cjk: Some(CjkDefinition {
            digits: DIGIT_VALUES,
            round_chars: ROUND_VALUES,
            dozen_chars: &['打'],
            pair_chars: &['对', '對', '双', '雙'],
            point_chars: &['点', '點', '.', '．'],
            fraction_marker: "分之",
            mixed_marker: '又',
            percent_prefixes: &["百分之"],
            ordinal_prefix: '第',
            discount_char: '折',
            tenth_char: '成',
            half_char: '半',
        }),
        word_boundaries: false,
    }
}
