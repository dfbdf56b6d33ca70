//! Built-in case catalog for `bc`

use super::{CaseGroup, Expectation, InputSpec, TestCase};

const BILLION: u64 = 1_000_000_000;

/// All built-in cases, ordered by id
pub fn builtin() -> Vec<TestCase> {
    let mut cases = Vec::new();
    cases.extend(limits());
    cases.extend(heavy());
    cases.extend(decimal());
    cases.extend(behaviour());
    cases.sort_by(|a, b| a.id.cmp(&b.id));
    cases
}

/// Look up a built-in case by id
pub fn find(id: &str) -> Option<TestCase> {
    builtin().into_iter().find(|case| case.id == id)
}

fn limits() -> Vec<TestCase> {
    vec![
        TestCase::new(
            "001",
            CaseGroup::Limits,
            "Simple addition",
            InputSpec::literal("2+2"),
            Expectation::all([Expectation::Succeeds, Expectation::equals("4")]),
        ),
        TestCase::new(
            "003",
            CaseGroup::Limits,
            "Decimal scale within limit",
            InputSpec::literal("scale=5000; 1/3"),
            Expectation::all([
                Expectation::Succeeds,
                Expectation::FractionDigitsAtLeast { digits: 4999 },
            ]),
        )
        .with_tags(["precision"]),
        TestCase::new(
            "005",
            CaseGroup::Limits,
            "1000 additions",
            InputSpec::repeated("1", " + 1", 999, "\n"),
            Expectation::equals("1000"),
        )
        .with_tags(["streamed"]),
        TestCase::new(
            "010",
            CaseGroup::Limits,
            "Correct result even with 100-level nesting",
            InputSpec::literal(format!("{}1+2{}", "(".repeat(100), ")".repeat(100))),
            Expectation::equals("3"),
        ),
    ]
}

fn heavy() -> Vec<TestCase> {
    vec![
        TestCase::new(
            "002",
            CaseGroup::Heavy,
            "Integer exceeds limit",
            InputSpec::repeated("", "9", BILLION, " + 1"),
            Expectation::any([Expectation::Fails, Expectation::equals("0")]),
        )
        .with_tags(["streamed"]),
        TestCase::new(
            "004",
            CaseGroup::Heavy,
            "Decimal scale exceeds limit",
            InputSpec::stream("scale=1000000000\n1/3"),
            Expectation::any([
                Expectation::Fails,
                Expectation::OutputMissing,
                Expectation::OutputShorterThan { chars: 100 },
            ]),
        )
        .with_tags(["streamed", "precision"]),
        TestCase::new(
            "006",
            CaseGroup::Heavy,
            "1 billion additions, extreme overload",
            InputSpec::repeated("", "1+", BILLION, ""),
            Expectation::any([
                Expectation::error_contains("Timeout"),
                Expectation::OutputBlank,
                Expectation::equals("0"),
            ]),
        )
        .with_tags(["streamed"]),
        TestCase::new(
            "007",
            CaseGroup::Heavy,
            "Large multiplication of 2000-digit operands",
            InputSpec::literal(format!(
                "scale=0; {} * {}",
                "9".repeat(2000),
                "9".repeat(2000)
            )),
            Expectation::all([
                Expectation::Succeeds,
                Expectation::OutputLongerThan { chars: 3999 },
                Expectation::EndsWithDigits { count: 5 },
            ]),
        ),
        TestCase::new(
            "008",
            CaseGroup::Heavy,
            "Too-large multiplication result",
            InputSpec::repeated(
                "scale=0; ",
                "9",
                BILLION,
                format!(" * {}", "9".repeat(12000)),
            ),
            Expectation::any([
                Expectation::Fails,
                Expectation::OutputShorterThan { chars: 100 },
            ]),
        )
        .with_tags(["streamed"]),
    ]
}

fn decimal() -> Vec<TestCase> {
    let case = |id: &str, description: &str, expr: &str, expected: &str| {
        TestCase::new(
            id,
            CaseGroup::Decimal,
            description,
            InputSpec::literal(expr),
            Expectation::equals(expected),
        )
    };

    vec![
        case("020", "Basic decimal addition", "1.5 + 2.25", "3.75"),
        case(
            "021",
            "Decimal multiplication with scale",
            "scale=4; 2.25 * 3.1",
            "6.975",
        ),
        case(
            "022",
            "High-precision division returns 50 decimal digits",
            "scale=50; 1/7",
            ".14285714285714285714285714285714285714285714285714",
        )
        .with_tags(["precision"]),
        case(
            "023",
            "Decimal normalization keeps no trailing zeros",
            "scale=5; 1.2 + 0",
            "1.2",
        ),
        case(
            "024",
            "Division with decimal result produces a decimal",
            "scale=2; 10 / 4",
            "2.50",
        ),
        case(
            "025",
            "Mixed operations follow operator precedence",
            "2 + 3 * 4 - 5",
            "9",
        ),
        case(
            "026",
            "Parentheses change operation order",
            "(2 + 3) * (4 - 5)",
            "-5",
        ),
        case(
            "027",
            "Full expression respects operator precedence",
            "5 + 6 - 3 * 2 / 1",
            "5",
        ),
    ]
}

fn behaviour() -> Vec<TestCase> {
    let syntax_error = || Expectation::all([Expectation::Fails, Expectation::HasError]);
    let case = |id: &str, description: &str, expr: &str, expect: Expectation| {
        TestCase::new(
            id,
            CaseGroup::Behaviour,
            description,
            InputSpec::literal(expr),
            expect,
        )
    };

    vec![
        case(
            "011",
            "Empty input is handled gracefully",
            "",
            Expectation::all([
                Expectation::OutputBlank,
                Expectation::any([
                    Expectation::ErrorBlank,
                    Expectation::ErrorContains {
                        text: "empty".to_string(),
                        ignore_case: true,
                    },
                    Expectation::ErrorContains {
                        text: "no input".to_string(),
                        ignore_case: true,
                    },
                ]),
            ]),
        ),
        case(
            "012",
            "Invalid syntax returns a parser error",
            "1 + * 2",
            syntax_error(),
        )
        .with_tags(["syntax"]),
        case(
            "013",
            "Division by zero returns a runtime error",
            "1 / 0",
            syntax_error(),
        ),
        case(
            "014",
            "Undefined variable evaluates as zero or reports an error",
            "a + 1",
            Expectation::any([Expectation::equals("1"), Expectation::HasError]),
        ),
        case(
            "015",
            "Unterminated parentheses trigger a parser error",
            "(1 + (2 + 3)",
            syntax_error(),
        )
        .with_tags(["syntax"]),
        case(
            "016",
            "Mixed valid and invalid lines report output or errors",
            "1+1\nabc\n2+2",
            Expectation::any([Expectation::HasOutput, Expectation::HasError]),
        ),
        case(
            "017",
            "Expression ending with an operator is a syntax error",
            "5 +",
            Expectation::HasError,
        )
        .with_tags(["syntax"]),
        case(
            "018",
            "Misplaced decimal point is treated as zero",
            ". + 1",
            Expectation::equals("1"),
        ),
        case(
            "019",
            "Malformed scale assignment falls back to the default scale",
            "scale=abc; 1/2",
            Expectation::equals("0"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_and_sorted() {
        let cases = builtin();
        let ids: Vec<&str> = cases.iter().map(|c| c.id.as_str()).collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());

        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
        assert_eq!(ids.len(), 26);
    }

    #[test]
    fn test_every_group_is_populated() {
        let cases = builtin();
        for group in CaseGroup::all() {
            assert!(cases.iter().any(|c| c.group == *group), "{group} is empty");
        }
    }

    #[test]
    fn test_heavy_inputs_are_streamed_or_guarded() {
        for case in builtin().iter().filter(|c| c.group == CaseGroup::Heavy) {
            assert!(case.guarded, "{} must run under the guard", case.id);
        }
        let billion = find("002").unwrap();
        assert!(billion.input.is_streamed());
        assert_eq!(billion.input.size_hint(), Some(BILLION + 4));
    }

    #[test]
    fn test_find() {
        let case = find("022").unwrap();
        assert_eq!(case.group, CaseGroup::Decimal);
        assert!(find("999").is_none());
    }
}
